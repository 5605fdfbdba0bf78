//! JWT access/refresh token issuing and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access-token lifetime in seconds (5 minutes).
pub const DEFAULT_ACCESS_TOKEN_TTL: u64 = 300;

/// Default refresh-token lifetime in seconds (1 day).
pub const DEFAULT_REFRESH_TOKEN_TTL: u64 = 86_400;

/// Distinguishes the two halves of a token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `token_type` | custom | `access` or `refresh` |
/// | `jti` | `jti` | unique token id |
/// | `iat` | `iat` | issued at, seconds since epoch |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: u64,
    pub exp: u64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// Identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub token_type: TokenType,
    pub expires_at: u64,
}

/// Errors returned by [`validate_access_token`] and [`validate_refresh_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token type")]
    WrongTokenType,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a token of the given type for `user_id`, valid for `ttl_secs`.
pub fn issue_token(
    user_id: Uuid,
    token_type: TokenType,
    ttl_secs: u64,
    secret: &str,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let iat = now_secs();
    let exp = iat + ttl_secs;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        token_type,
        jti: Uuid::new_v4().to_string(),
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(IssuedToken {
        token,
        expires_at: exp,
    })
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

fn validate_typed(token: &str, secret: &str, expected: TokenType) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.token_type != expected {
        return Err(AuthError::WrongTokenType);
    }
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        token_type: claims.token_type,
        expires_at: claims.exp,
    })
}

/// Validate a bearer access token.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_typed(token, secret, TokenType::Access)
}

/// Validate a refresh token presented to the refresh endpoint.
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_typed(token, secret, TokenType::Refresh)
}
