use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use folio_cms::domain::password::hash_password;
use folio_cms::domain::repository::{
    CategoryRepository, ContentRepository, DocumentStorage, UserRepository,
};
use folio_cms::domain::types::{
    Caller, ContentChanges, ContentFields, ContentItem, DocumentInput, NewContentItem,
    UploadedDocument, User,
};
use folio_cms::error::CmsServiceError;
use folio_cms::usecase::token::JwtSettings;
use folio_domain::search::SearchQuery;
use folio_domain::visibility::Visibility;

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "Author@123";

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: TEST_SECRET.to_owned(),
        access_ttl_secs: 300,
        refresh_ttl_secs: 86_400,
    }
}

pub fn test_user(email: &str, username: &str, is_admin: bool) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        username: username.to_owned(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        phone: "1234567890".to_owned(),
        address: Some("Some Address".to_owned()),
        city: Some("Some City".to_owned()),
        state: Some("Some State".to_owned()),
        country: Some("Some Country".to_owned()),
        pincode: "123456".to_owned(),
        is_admin,
        created_at: Utc::now(),
    }
}

pub fn author() -> User {
    test_user("author@example.com", "author", false)
}

pub fn admin() -> User {
    test_user("admin@example.com", "admin", true)
}

pub fn caller(user: &User) -> Caller {
    Caller::from(user.clone())
}

pub fn pdf_upload() -> Option<DocumentInput> {
    Some(DocumentInput::File(UploadedDocument {
        file_name: Some("dummy.pdf".to_owned()),
        content_type: Some("application/pdf".to_owned()),
        data: Bytes::from_static(folio_testing::multipart::dummy_pdf()),
    }))
}

pub fn content_fields(title: &str, body: &str, summary: &str) -> ContentFields {
    ContentFields {
        title: Some(title.to_owned()),
        body: Some(body.to_owned()),
        summary: Some(summary.to_owned()),
        document: pdf_upload(),
        categories: None,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CmsServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CmsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, CmsServiceError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, CmsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username))
    }

    async fn create(&self, user: &User) -> Result<(), CmsServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockCategoryRepo ─────────────────────────────────────────────────────────

pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Clone)]
pub struct MockCategoryRepo {
    pub categories: Arc<Vec<Category>>,
}

impl MockCategoryRepo {
    pub fn new(names: &[&str]) -> Self {
        let categories = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: (*name).to_owned(),
            })
            .collect();
        Self {
            categories: Arc::new(categories),
        }
    }

    pub fn name(&self, id: i32) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}

impl CategoryRepository for MockCategoryRepo {
    async fn find_existing(&self, ids: &[i32]) -> Result<Vec<i32>, CmsServiceError> {
        Ok(self
            .categories
            .iter()
            .map(|c| c.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── MockContentRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockContentRepo {
    pub items: Arc<Mutex<Vec<ContentItem>>>,
    pub users: MockUserRepo,
    pub categories: MockCategoryRepo,
    pub fail_writes: bool,
}

impl MockContentRepo {
    pub fn new(users: MockUserRepo, categories: MockCategoryRepo) -> Self {
        Self {
            items: Arc::new(Mutex::new(vec![])),
            users,
            categories,
            fail_writes: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn items_handle(&self) -> Arc<Mutex<Vec<ContentItem>>> {
        Arc::clone(&self.items)
    }

    fn searchable(&self, item: &ContentItem, search: &SearchQuery) -> bool {
        let mut fields = vec![item.title.as_str(), item.body.as_str(), item.summary.as_str()];
        fields.extend(item.category_ids.iter().filter_map(|id| self.categories.name(*id)));
        search.matches(&fields)
    }
}

impl ContentRepository for MockContentRepo {
    async fn list(
        &self,
        visibility: Visibility,
        search: Option<&SearchQuery>,
    ) -> Result<Vec<ContentItem>, CmsServiceError> {
        let mut items: Vec<ContentItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| visibility.permits(item.author_id))
            .filter(|item| search.is_none_or(|s| self.searchable(item, s)))
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn find(
        &self,
        visibility: Visibility,
        id: i32,
    ) -> Result<Option<ContentItem>, CmsServiceError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id && visibility.permits(item.author_id))
            .cloned())
    }

    async fn create(&self, item: &NewContentItem) -> Result<i32, CmsServiceError> {
        if self.fail_writes {
            return Err(anyhow::anyhow!("database unavailable").into());
        }
        let author_email = self
            .users
            .find_by_id(item.author_id)
            .await?
            .map(|u| u.email)
            .unwrap_or_default();
        let mut items = self.items.lock().unwrap();
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        items.push(ContentItem {
            id,
            title: item.title.clone(),
            body: item.body.clone(),
            summary: item.summary.clone(),
            document: item.document.clone(),
            author_id: item.author_id,
            author_email,
            category_ids: item.category_ids.clone(),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &ContentChanges) -> Result<(), CmsServiceError> {
        if self.fail_writes {
            return Err(anyhow::anyhow!("database unavailable").into());
        }
        let mut items = self.items.lock().unwrap();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(());
        };
        if let Some(ref title) = changes.title {
            item.title = title.clone();
        }
        if let Some(ref body) = changes.body {
            item.body = body.clone();
        }
        if let Some(ref summary) = changes.summary {
            item.summary = summary.clone();
        }
        if let Some(ref document) = changes.document {
            item.document = document.clone();
        }
        if let Some(ref category_ids) = changes.category_ids {
            item.category_ids = category_ids.clone();
        }
        Ok(())
    }

    async fn delete(&self, visibility: Visibility, id: i32) -> Result<bool, CmsServiceError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| !(item.id == id && visibility.permits(item.author_id)));
        Ok(items.len() < before)
    }
}

// ── MockStorage ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockStorage {
    pub files: Arc<Mutex<Vec<String>>>,
}

impl MockStorage {
    pub fn files_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.files)
    }
}

impl DocumentStorage for MockStorage {
    async fn save(&self, file_name: &str, _data: Bytes) -> Result<String, CmsServiceError> {
        let mut files = self.files.lock().unwrap();
        let path = format!("documents/{}-{file_name}", files.len() + 1);
        files.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), CmsServiceError> {
        self.files.lock().unwrap().retain(|f| f != path);
        Ok(())
    }
}
