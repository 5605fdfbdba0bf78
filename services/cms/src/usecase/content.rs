use anyhow::anyhow;

use folio_domain::field_errors::FieldErrors;
use folio_domain::search::SearchQuery;
use folio_domain::visibility::Visibility;

use crate::domain::repository::{CategoryRepository, ContentRepository, DocumentStorage};
use crate::domain::types::{
    BODY_MAX_LEN, Caller, ContentChanges, ContentFields, ContentItem, DocumentInput,
    NewContentItem, SUMMARY_MAX_LEN, TITLE_MAX_LEN, UploadedDocument, required_text,
};
use crate::error::CmsServiceError;

pub const NO_FILE: &str = "No file was submitted.";
pub const NOT_A_FILE: &str =
    "The submitted data was not a file. Check the encoding type on the form.";
pub const EMPTY_FILE: &str = "The submitted file is empty.";
pub const NO_FILENAME: &str = "No filename could be determined.";
pub const CATEGORY_INCORRECT_TYPE: &str = "Incorrect type. Expected pk value, received str.";

pub fn category_does_not_exist(id: i32) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Path ids that are not integers cannot name an item.
pub fn parse_content_id(raw: &str) -> Result<i32, CmsServiceError> {
    raw.parse().map_err(|_| CmsServiceError::ContentNotFound)
}

fn validate_document(
    errors: &mut FieldErrors,
    input: Option<DocumentInput>,
) -> Option<UploadedDocument> {
    let document = match input {
        None => {
            errors.add("document", NO_FILE);
            return None;
        }
        Some(DocumentInput::NotAFile) => {
            errors.add("document", NOT_A_FILE);
            return None;
        }
        Some(DocumentInput::File(document)) => document,
    };
    if document.file_name.as_deref().is_none_or(str::is_empty) {
        errors.add("document", NO_FILENAME);
        return None;
    }
    if document.data.is_empty() {
        errors.add("document", EMPTY_FILE);
        return None;
    }
    Some(document)
}

/// Parse, dedupe and check category references. Stops at the first bad
/// reference. `Ok(None)` means an error was recorded.
async fn resolve_categories<K: CategoryRepository>(
    categories: &K,
    errors: &mut FieldErrors,
    raw: Vec<String>,
) -> Result<Option<Vec<i32>>, CmsServiceError> {
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match value.trim().parse::<i32>() {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(_) => {
                errors.add("categories", CATEGORY_INCORRECT_TYPE);
                return Ok(None);
            }
        }
    }
    if ids.is_empty() {
        return Ok(Some(ids));
    }
    let existing = categories.find_existing(&ids).await?;
    if let Some(missing) = ids.iter().find(|id| !existing.contains(*id)) {
        errors.add("categories", category_does_not_exist(*missing));
        return Ok(None);
    }
    Ok(Some(ids))
}

/// Best-effort blob cleanup after a failed write.
async fn discard_document<S: DocumentStorage>(storage: &S, path: &str) {
    if let Err(e) = storage.remove(path).await {
        tracing::warn!(error = %e, path, "failed to remove orphaned document");
    }
}

// ── ListContent ──────────────────────────────────────────────────────────────

pub struct ListContentUseCase<C: ContentRepository> {
    pub content: C,
}

impl<C: ContentRepository> ListContentUseCase<C> {
    /// Search narrows the caller's scope; it never widens it.
    pub async fn execute(
        &self,
        caller: &Caller,
        search: Option<&str>,
    ) -> Result<Vec<ContentItem>, CmsServiceError> {
        let query = search.and_then(SearchQuery::parse);
        self.content.list(caller.visibility(), query.as_ref()).await
    }
}

// ── GetContent ───────────────────────────────────────────────────────────────

pub struct GetContentUseCase<C: ContentRepository> {
    pub content: C,
}

impl<C: ContentRepository> GetContentUseCase<C> {
    pub async fn execute(&self, caller: &Caller, id: &str) -> Result<ContentItem, CmsServiceError> {
        let id = parse_content_id(id)?;
        self.content
            .find(caller.visibility(), id)
            .await?
            .ok_or(CmsServiceError::ContentNotFound)
    }
}

// ── CreateContent ────────────────────────────────────────────────────────────

pub struct CreateContentUseCase<C: ContentRepository, K: CategoryRepository, S: DocumentStorage> {
    pub content: C,
    pub categories: K,
    pub storage: S,
}

impl<C: ContentRepository, K: CategoryRepository, S: DocumentStorage>
    CreateContentUseCase<C, K, S>
{
    /// The author is always the caller.
    pub async fn execute(
        &self,
        caller: &Caller,
        fields: ContentFields,
    ) -> Result<ContentItem, CmsServiceError> {
        let mut errors = FieldErrors::new();
        let title = required_text(&mut errors, "title", fields.title, TITLE_MAX_LEN);
        let body = required_text(&mut errors, "body", fields.body, BODY_MAX_LEN);
        let summary = required_text(&mut errors, "summary", fields.summary, SUMMARY_MAX_LEN);
        let document = validate_document(&mut errors, fields.document);
        let category_ids = resolve_categories(
            &self.categories,
            &mut errors,
            fields.categories.unwrap_or_default(),
        )
        .await?;

        let (Some(title), Some(body), Some(summary), Some(document), Some(category_ids)) =
            (title, body, summary, document, category_ids)
        else {
            return Err(errors.into());
        };

        let file_name = document.file_name.unwrap_or_default();
        let path = self.storage.save(&file_name, document.data).await?;
        let item = NewContentItem {
            title,
            body,
            summary,
            document: path.clone(),
            author_id: caller.id,
            category_ids,
        };
        let id = match self.content.create(&item).await {
            Ok(id) => id,
            Err(e) => {
                discard_document(&self.storage, &path).await;
                return Err(e);
            }
        };

        self.content
            .find(Visibility::Everything, id)
            .await?
            .ok_or_else(|| anyhow!("content item {id} missing after insert").into())
    }
}

// ── UpdateContent ────────────────────────────────────────────────────────────

pub struct UpdateContentUseCase<C: ContentRepository, K: CategoryRepository, S: DocumentStorage> {
    pub content: C,
    pub categories: K,
    pub storage: S,
}

impl<C: ContentRepository, K: CategoryRepository, S: DocumentStorage>
    UpdateContentUseCase<C, K, S>
{
    /// Full replacement (`partial == false`) requires title, body, summary and
    /// document. Partial updates touch only the supplied fields. Supplying
    /// categories replaces the set in both modes.
    pub async fn execute(
        &self,
        caller: &Caller,
        id: &str,
        fields: ContentFields,
        partial: bool,
    ) -> Result<ContentItem, CmsServiceError> {
        let visibility = caller.visibility();
        let id = parse_content_id(id)?;
        // Scope check first: out-of-scope ids are 404 even with an invalid body.
        if self.content.find(visibility, id).await?.is_none() {
            return Err(CmsServiceError::ContentNotFound);
        }

        let mut errors = FieldErrors::new();
        let mut text = |field: &str, value: Option<String>, max_len: usize| {
            if partial && value.is_none() {
                None
            } else {
                required_text(&mut errors, field, value, max_len)
            }
        };
        let title = text("title", fields.title, TITLE_MAX_LEN);
        let body = text("body", fields.body, BODY_MAX_LEN);
        let summary = text("summary", fields.summary, SUMMARY_MAX_LEN);
        let document = if partial && fields.document.is_none() {
            None
        } else {
            validate_document(&mut errors, fields.document)
        };
        let category_ids = match fields.categories {
            Some(raw) => resolve_categories(&self.categories, &mut errors, raw).await?,
            None => None,
        };
        errors.into_result()?;

        let document = match document {
            Some(document) => {
                let file_name = document.file_name.unwrap_or_default();
                Some(self.storage.save(&file_name, document.data).await?)
            }
            None => None,
        };
        let changes = ContentChanges {
            title,
            body,
            summary,
            document,
            category_ids,
        };
        if !changes.is_empty() {
            if let Err(e) = self.content.update(id, &changes).await {
                if let Some(ref path) = changes.document {
                    discard_document(&self.storage, path).await;
                }
                return Err(e);
            }
        }

        self.content
            .find(visibility, id)
            .await?
            .ok_or(CmsServiceError::ContentNotFound)
    }
}

// ── DeleteContent ────────────────────────────────────────────────────────────

pub struct DeleteContentUseCase<C: ContentRepository> {
    pub content: C,
}

impl<C: ContentRepository> DeleteContentUseCase<C> {
    /// Hard delete. The stored document is left in place.
    pub async fn execute(&self, caller: &Caller, id: &str) -> Result<(), CmsServiceError> {
        let id = parse_content_id(id)?;
        if self.content.delete(caller.visibility(), id).await? {
            Ok(())
        } else {
            Err(CmsServiceError::ContentNotFound)
        }
    }
}
