use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Caller, ContentItem};
use crate::error::CmsServiceError;
use crate::handlers::form::ContentForm;
use crate::state::AppState;
use crate::usecase::content::{
    CreateContentUseCase, DeleteContentUseCase, GetContentUseCase, ListContentUseCase,
    UpdateContentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Content object as returned to clients. `author` is the author's email.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub summary: String,
    pub document: String,
    pub author: String,
    pub categories: Vec<i32>,
}

impl ContentResponse {
    pub fn new(item: ContentItem, state: &AppState) -> Self {
        Self {
            document: state.document_url(&item.document),
            id: item.id,
            title: item.title,
            body: item.body,
            summary: item.summary,
            author: item.author_email,
            categories: item.category_ids,
        }
    }
}

// ── GET /api/content/ ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListContentQuery {
    pub search: Option<String>,
}

pub async fn list_content(
    caller: Caller,
    State(state): State<AppState>,
    Query(query): Query<ListContentQuery>,
) -> Result<Json<Vec<ContentResponse>>, CmsServiceError> {
    let usecase = ListContentUseCase {
        content: state.content_repo(),
    };
    let items = usecase.execute(&caller, query.search.as_deref()).await?;
    Ok(Json(
        items
            .into_iter()
            .map(|item| ContentResponse::new(item, &state))
            .collect(),
    ))
}

// ── POST /api/content/ ───────────────────────────────────────────────────────

pub async fn create_content(
    caller: Caller,
    State(state): State<AppState>,
    ContentForm(fields): ContentForm,
) -> Result<(StatusCode, Json<ContentResponse>), CmsServiceError> {
    let usecase = CreateContentUseCase {
        content: state.content_repo(),
        categories: state.category_repo(),
        storage: state.document_storage(),
    };
    let item = usecase.execute(&caller, fields).await?;
    Ok((StatusCode::CREATED, Json(ContentResponse::new(item, &state))))
}

// ── GET /api/content/{id}/ ───────────────────────────────────────────────────

pub async fn get_content(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>, CmsServiceError> {
    let usecase = GetContentUseCase {
        content: state.content_repo(),
    };
    let item = usecase.execute(&caller, &id).await?;
    Ok(Json(ContentResponse::new(item, &state)))
}

// ── PUT / PATCH /api/content/{id}/ ───────────────────────────────────────────

async fn update_content(
    caller: Caller,
    state: AppState,
    id: String,
    form: ContentForm,
    partial: bool,
) -> Result<Json<ContentResponse>, CmsServiceError> {
    let usecase = UpdateContentUseCase {
        content: state.content_repo(),
        categories: state.category_repo(),
        storage: state.document_storage(),
    };
    let item = usecase.execute(&caller, &id, form.0, partial).await?;
    Ok(Json(ContentResponse::new(item, &state)))
}

pub async fn replace_content(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ContentForm,
) -> Result<Json<ContentResponse>, CmsServiceError> {
    update_content(caller, state, id, form, false).await
}

pub async fn patch_content(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ContentForm,
) -> Result<Json<ContentResponse>, CmsServiceError> {
    update_content(caller, state, id, form, true).await
}

// ── DELETE /api/content/{id}/ ────────────────────────────────────────────────

pub async fn delete_content(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CmsServiceError> {
    let usecase = DeleteContentUseCase {
        content: state.content_repo(),
    };
    usecase.execute(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
