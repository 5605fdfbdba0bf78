//! Mock auth helpers for tests.
//!
//! Protected routes expect `Authorization: Bearer <access token>`. `MockAuth`
//! signs real tokens with a test secret so the full validation path runs.

use uuid::Uuid;

use folio_auth_types::token::{TokenType, issue_token};

/// Configurable identity to sign tokens for.
pub struct MockAuth {
    pub user_id: Uuid,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid, secret: &str) -> Self {
        Self {
            user_id,
            secret: secret.to_owned(),
        }
    }

    /// A valid access token (5 minutes).
    pub fn access_token(&self) -> String {
        self.sign(TokenType::Access)
    }

    /// A valid refresh token (1 day).
    pub fn refresh_token(&self) -> String {
        self.sign(TokenType::Refresh)
    }

    fn sign(&self, token_type: TokenType) -> String {
        let ttl = match token_type {
            TokenType::Access => 300,
            TokenType::Refresh => 86_400,
        };
        issue_token(self.user_id, token_type, ttl, &self.secret)
            .unwrap()
            .token
    }
}
