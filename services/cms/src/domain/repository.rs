#![allow(async_fn_in_trait)]

use bytes::Bytes;
use uuid::Uuid;

use folio_domain::search::SearchQuery;
use folio_domain::visibility::Visibility;

use crate::domain::types::{ContentChanges, ContentItem, NewContentItem, User};
use crate::error::CmsServiceError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CmsServiceError>;

    /// Exact match; callers normalize the address first.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CmsServiceError>;

    async fn email_exists(&self, email: &str) -> Result<bool, CmsServiceError>;

    async fn username_exists(&self, username: &str) -> Result<bool, CmsServiceError>;

    /// Insert a new user. A uniqueness race lost at insert time surfaces as a
    /// field-level `Validation` error on `email` or `username`.
    async fn create(&self, user: &User) -> Result<(), CmsServiceError>;
}

/// Repository for category tags.
pub trait CategoryRepository: Send + Sync {
    /// The subset of `ids` that exist.
    async fn find_existing(&self, ids: &[i32]) -> Result<Vec<i32>, CmsServiceError>;
}

/// Repository for content items and their category links.
pub trait ContentRepository: Send + Sync {
    /// Items within `visibility`, optionally narrowed by `search`, ordered by id.
    async fn list(
        &self,
        visibility: Visibility,
        search: Option<&SearchQuery>,
    ) -> Result<Vec<ContentItem>, CmsServiceError>;

    /// `None` when the item does not exist or lies outside `visibility`.
    async fn find(
        &self,
        visibility: Visibility,
        id: i32,
    ) -> Result<Option<ContentItem>, CmsServiceError>;

    /// Insert the item and its category links in one transaction. Returns the new id.
    async fn create(&self, item: &NewContentItem) -> Result<i32, CmsServiceError>;

    /// Apply `changes` in one transaction.
    async fn update(&self, id: i32, changes: &ContentChanges) -> Result<(), CmsServiceError>;

    /// Delete. Returns `true` if deleted, `false` if absent or outside `visibility`.
    async fn delete(&self, visibility: Visibility, id: i32) -> Result<bool, CmsServiceError>;
}

/// Blob store for uploaded documents.
pub trait DocumentStorage: Send + Sync {
    /// Persist `data` under a fresh name derived from `file_name`. Returns the
    /// stored path relative to the media root.
    async fn save(&self, file_name: &str, data: Bytes) -> Result<String, CmsServiceError>;

    async fn remove(&self, path: &str) -> Result<(), CmsServiceError>;
}
