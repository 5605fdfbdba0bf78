//! Request bodies: `multipart/form-data`, JSON, or urlencoded forms.

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, rejection::JsonRejection},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

use crate::domain::types::{ContentFields, DocumentInput, UploadedDocument};
use crate::error::CmsServiceError;

/// Map a JSON extractor rejection onto the service error shape.
pub fn json_rejection(rejection: JsonRejection) -> CmsServiceError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => CmsServiceError::UnsupportedMediaType,
        other => CmsServiceError::MalformedBody(other.body_text()),
    }
}

fn body_mime(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

fn is_json(mime: &str) -> bool {
    mime == "application/json" || mime.ends_with("+json")
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> CmsServiceError {
    CmsServiceError::MalformedBody(e.body_text())
}

/// Raw content fields parsed from whichever body encoding the client used.
#[derive(Debug)]
pub struct ContentForm(pub ContentFields);

impl<S> FromRequest<S> for ContentForm
where
    S: Send + Sync,
{
    type Rejection = CmsServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = body_mime(&req);
        let fields = match mime.as_str() {
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| CmsServiceError::MalformedBody(e.body_text()))?;
                fields_from_multipart(multipart).await?
            }
            "application/x-www-form-urlencoded" => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| CmsServiceError::MalformedBody(e.body_text()))?;
                fields_from_pairs(pairs)
            }
            m if is_json(m) => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(json_rejection)?;
                fields_from_json(value)?
            }
            _ => return Err(CmsServiceError::UnsupportedMediaType),
        };
        Ok(Self(fields))
    }
}

/// Flat fields for the account endpoints. JSON scalars are read as text, so
/// `"phone": 1234567890` reaches validation as `"1234567890"`.
#[derive(Debug, Default)]
pub struct PlainForm(pub Map<String, Value>);

impl PlainForm {
    /// Text value of `name`; `null` and absent are both `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        json_text(self.0.get(name))
    }
}

impl<S> FromRequest<S> for PlainForm
where
    S: Send + Sync,
{
    type Rejection = CmsServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = body_mime(&req);
        let mut map = Map::new();
        match mime.as_str() {
            "multipart/form-data" => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| CmsServiceError::MalformedBody(e.body_text()))?;
                while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
                    let name = field.name().unwrap_or_default().to_owned();
                    let value = field.text().await.map_err(multipart_error)?;
                    map.insert(name, Value::String(value));
                }
            }
            "application/x-www-form-urlencoded" => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| CmsServiceError::MalformedBody(e.body_text()))?;
                for (name, value) in pairs {
                    map.insert(name, Value::String(value));
                }
            }
            m if is_json(m) => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(json_rejection)?;
                map = json_object(value)?;
            }
            _ => return Err(CmsServiceError::UnsupportedMediaType),
        }
        Ok(Self(map))
    }
}

fn is_category_key(name: &str) -> bool {
    name == "categories" || name == "categories[]"
}

async fn fields_from_multipart(mut multipart: Multipart) -> Result<ContentFields, CmsServiceError> {
    let mut fields = ContentFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "document" => {
                // A part without `filename=` is a plain form value.
                let Some(file_name) = field.file_name().map(str::to_owned) else {
                    fields.document = Some(DocumentInput::NotAFile);
                    continue;
                };
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await.map_err(multipart_error)?;
                fields.document = Some(DocumentInput::File(UploadedDocument {
                    file_name: Some(file_name).filter(|n| !n.is_empty()),
                    content_type,
                    data,
                }));
            }
            "title" | "body" | "summary" => {
                let value = field.text().await.map_err(multipart_error)?;
                set_text(&mut fields, &name, value);
            }
            n if is_category_key(n) => {
                let value = field.text().await.map_err(multipart_error)?;
                fields.categories.get_or_insert_with(Vec::new).push(value);
            }
            // `author` and anything unknown are ignored.
            _ => {}
        }
    }
    Ok(fields)
}

fn set_text(fields: &mut ContentFields, name: &str, value: String) {
    match name {
        "title" => fields.title = Some(value),
        "body" => fields.body = Some(value),
        "summary" => fields.summary = Some(value),
        _ => {}
    }
}

fn fields_from_pairs(pairs: Vec<(String, String)>) -> ContentFields {
    let mut fields = ContentFields::default();
    for (name, value) in pairs {
        match name.as_str() {
            "document" => fields.document = Some(DocumentInput::NotAFile),
            n if is_category_key(n) => {
                fields.categories.get_or_insert_with(Vec::new).push(value);
            }
            n => set_text(&mut fields, n, value),
        }
    }
    fields
}

fn json_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn json_object(value: Value) -> Result<Map<String, Value>, CmsServiceError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CmsServiceError::MalformedBody(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn fields_from_json(value: Value) -> Result<ContentFields, CmsServiceError> {
    let map = json_object(value)?;
    let document = match map.get("document") {
        None | Some(Value::Null) => None,
        // JSON cannot carry a file upload.
        Some(_) => Some(DocumentInput::NotAFile),
    };
    let categories = match map.get("categories") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Some(other) => {
            return Err(CmsServiceError::field(
                "categories",
                format!(
                    "Expected a list of items but got type \"{}\".",
                    json_type_name(other)
                ),
            ));
        }
    };
    Ok(ContentFields {
        title: json_text(map.get("title")),
        body: json_text(map.get("body")),
        summary: json_text(map.get("summary")),
        document,
        categories,
    })
}
