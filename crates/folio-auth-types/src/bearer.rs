//! `Authorization: Bearer <token>` header parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

/// Extract the bearer token from request headers.
///
/// Returns `None` when the header is absent, not a bearer credential, or empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_owned())
        .filter(|token| !token.is_empty())
}
