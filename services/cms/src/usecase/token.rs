use folio_auth_types::token::{
    TokenType, issue_token, validate_access_token, validate_refresh_token,
};
use folio_domain::field_errors::FieldErrors;

use crate::domain::password::verify_password;
use crate::domain::repository::UserRepository;
use crate::domain::types::{BLANK, Caller, REQUIRED, required_text};
use crate::error::CmsServiceError;

/// Signing secret and lifetimes for issued tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl JwtSettings {
    fn sign(&self, user_id: uuid::Uuid, token_type: TokenType) -> Result<String, CmsServiceError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };
        let issued = issue_token(user_id, token_type, ttl, &self.secret)
            .map_err(|e| CmsServiceError::Internal(e.into()))?;
        Ok(issued.token)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt: JwtSettings,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<TokenPair, CmsServiceError> {
        let mut errors = FieldErrors::new();
        let email = required_text(&mut errors, "email", input.email, usize::MAX);
        // Passwords are compared verbatim, surrounding whitespace included.
        let password = match input.password {
            None => {
                errors.add("password", REQUIRED);
                None
            }
            Some(p) if p.is_empty() => {
                errors.add("password", BLANK);
                None
            }
            Some(p) => Some(p),
        };
        let (Some(email), Some(password)) = (email, password) else {
            return Err(errors.into());
        };

        // Unknown email and wrong password are indistinguishable to the client.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(CmsServiceError::InvalidCredentials)?;
        if !verify_password(&password, &user.password_hash)? {
            return Err(CmsServiceError::InvalidCredentials);
        }

        Ok(TokenPair {
            access: self.jwt.sign(user.id, TokenType::Access)?,
            refresh: self.jwt.sign(user.id, TokenType::Refresh)?,
        })
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt: JwtSettings,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Exchange a refresh token for a new access token.
    pub async fn execute(&self, refresh_token: Option<&str>) -> Result<String, CmsServiceError> {
        let refresh_token = match refresh_token.map(str::trim) {
            None => return Err(CmsServiceError::field("refresh", REQUIRED)),
            Some("") => return Err(CmsServiceError::field("refresh", BLANK)),
            Some(token) => token,
        };
        let info = validate_refresh_token(refresh_token, &self.jwt.secret)
            .map_err(|_| CmsServiceError::InvalidRefreshToken)?;
        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(CmsServiceError::InvalidRefreshToken)?;
        self.jwt.sign(user.id, TokenType::Access)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> AuthenticateUseCase<U> {
    /// Resolve a bearer access token to a caller. The admin flag comes from the
    /// stored user, not the token.
    pub async fn execute(&self, bearer: Option<&str>) -> Result<Caller, CmsServiceError> {
        let token = bearer.ok_or(CmsServiceError::InvalidToken)?;
        let info = validate_access_token(token, &self.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            CmsServiceError::InvalidToken
        })?;
        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(CmsServiceError::InvalidToken)?;
        Ok(Caller::from(user))
    }
}
