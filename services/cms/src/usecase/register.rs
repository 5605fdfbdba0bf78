use chrono::Utc;
use uuid::Uuid;

use folio_domain::field_errors::FieldErrors;

use crate::domain::password::{hash_password, validate_password};
use crate::domain::repository::UserRepository;
use crate::domain::types::{
    EMAIL_MAX_LEN, INVALID_EMAIL, INVALID_USERNAME, PHONE_MAX_LEN, PINCODE_MAX_LEN,
    PLACE_MAX_LEN, USERNAME_MAX_LEN, User, normalize_email, optional_bool, optional_text,
    required_text, validate_email, validate_username,
};
use crate::error::CmsServiceError;

pub const EMAIL_TAKEN: &str = "user with this email already exists.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Registration payload as received. Absent fields are `None`.
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub pincode: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub is_admin: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    /// Validate every field, then create the user. All offending fields are
    /// reported together.
    pub async fn execute(&self, input: RegisterInput) -> Result<User, CmsServiceError> {
        let mut errors = FieldErrors::new();

        let email = required_text(&mut errors, "email", input.email, EMAIL_MAX_LEN)
            .and_then(|email| {
                if validate_email(&email) {
                    Some(normalize_email(&email))
                } else {
                    errors.add("email", INVALID_EMAIL);
                    None
                }
            });
        let username = required_text(&mut errors, "username", input.username, USERNAME_MAX_LEN)
            .and_then(|username| {
                if validate_username(&username) {
                    Some(username)
                } else {
                    errors.add("username", INVALID_USERNAME);
                    None
                }
            });
        let password = required_text(&mut errors, "password", input.password, usize::MAX);
        if let Some(ref password) = password {
            for problem in validate_password(password) {
                errors.add("password", problem);
            }
        }
        let phone = required_text(&mut errors, "phone", input.phone, PHONE_MAX_LEN);
        let pincode = required_text(&mut errors, "pincode", input.pincode, PINCODE_MAX_LEN);
        let address = optional_text(&mut errors, "address", input.address, None);
        let city = optional_text(&mut errors, "city", input.city, Some(PLACE_MAX_LEN));
        let state = optional_text(&mut errors, "state", input.state, Some(PLACE_MAX_LEN));
        let country = optional_text(&mut errors, "country", input.country, Some(PLACE_MAX_LEN));
        let is_admin = optional_bool(&mut errors, "is_admin", input.is_admin).unwrap_or(false);

        if let Some(ref email) = email {
            if self.users.email_exists(email).await? {
                errors.add("email", EMAIL_TAKEN);
            }
        }
        if let Some(ref username) = username {
            if self.users.username_exists(username).await? {
                errors.add("username", USERNAME_TAKEN);
            }
        }

        // Any missing required value has already been recorded in `errors`.
        let (Some(email), Some(username), Some(password), Some(phone), Some(pincode)) =
            (email, username, password, phone, pincode)
        else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let user = User {
            id: Uuid::now_v7(),
            email,
            username,
            password_hash: hash_password(&password)?,
            phone,
            address,
            city,
            state,
            country,
            pincode,
            is_admin,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}
