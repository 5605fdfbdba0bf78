use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCategoryRepository, DbContentRepository, DbUserRepository};
use crate::infra::storage::LocalDocumentStorage;
use crate::usecase::token::JwtSettings;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtSettings,
    pub storage: LocalDocumentStorage,
    /// Prefix joined with stored document paths in responses, e.g. `/media/`.
    pub media_url: String,
    /// Request body cap applied by the router.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn content_repo(&self) -> DbContentRepository {
        DbContentRepository {
            db: self.db.clone(),
        }
    }

    pub fn document_storage(&self) -> LocalDocumentStorage {
        self.storage.clone()
    }

    /// Public URL of a stored document.
    pub fn document_url(&self, path: &str) -> String {
        media_url(&self.media_url, path)
    }
}

pub fn media_url(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
