use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use folio_domain::field_errors::FieldErrors;
use folio_domain::visibility::Visibility;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

pub const EMAIL_MAX_LEN: usize = 254;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PHONE_MAX_LEN: usize = 10;
pub const PINCODE_MAX_LEN: usize = 6;
pub const PLACE_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 30;
pub const BODY_MAX_LEN: usize = 300;
pub const SUMMARY_MAX_LEN: usize = 60;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Identity resolved from a bearer access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn visibility(&self) -> Visibility {
        Visibility::for_caller(self.id, self.is_admin)
    }
}

impl From<User> for Caller {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// A content item joined with its author's email and category ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub summary: String,
    /// Stored path relative to the media root.
    pub document: String,
    pub author_id: Uuid,
    pub author_email: String,
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub title: String,
    pub body: String,
    pub summary: String,
    pub document: String,
    pub author_id: Uuid,
    pub category_ids: Vec<i32>,
}

/// Partial update. `None` leaves the column untouched; `category_ids: Some`
/// replaces the whole set.
#[derive(Debug, Clone, Default)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<String>,
    pub document: Option<String>,
    pub category_ids: Option<Vec<i32>>,
}

impl ContentChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.summary.is_none()
            && self.document.is_none()
            && self.category_ids.is_none()
    }
}

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// What the client sent in the `document` field.
#[derive(Debug, Clone)]
pub enum DocumentInput {
    File(UploadedDocument),
    /// A plain value where a file was expected.
    NotAFile,
}

/// Raw content fields as received, before validation.
#[derive(Debug, Clone, Default)]
pub struct ContentFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<String>,
    pub document: Option<DocumentInput>,
    /// Raw category references; each must parse as an existing category id.
    pub categories: Option<Vec<String>>,
}

// ── Field validation ─────────────────────────────────────────────────────────

pub fn too_long(max_len: usize) -> String {
    format!("Ensure this field has no more than {max_len} characters.")
}

/// Validate a required text field. Surrounding whitespace is trimmed first.
/// Records an error and returns `None` when the value is missing, blank, or too long.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max_len: usize,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    if value.chars().count() > max_len {
        errors.add(field, too_long(max_len));
        return None;
    }
    Some(value.to_owned())
}

/// Validate an optional text field. Blank values are kept as empty strings.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Option<String> {
    let value = value?.trim().to_owned();
    match max_len {
        Some(max_len) if value.chars().count() > max_len => {
            errors.add(field, too_long(max_len));
            None
        }
        _ => Some(value),
    }
}

/// Address-shaped check: a non-empty local part and a dotted domain of
/// alphanumeric/hyphen labels, or `localhost`.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(|c| c.is_whitespace() || c == '@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.chars().count() >= 2 && !tld.chars().all(|c| c.is_ascii_digit())
}

/// Lower-case the domain part; the local part is case-sensitive.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_owned(),
    }
}

/// Read a form boolean. Absent means `None`; anything unrecognised is a
/// field error.
pub fn optional_bool(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<bool> {
    let value = value?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => {
            errors.add(field, INVALID_BOOLEAN);
            None
        }
    }
}

/// Letters, digits and `@ . + - _` only.
pub fn validate_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}
