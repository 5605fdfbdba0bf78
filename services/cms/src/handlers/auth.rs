//! Bearer-token caller extractor for protected routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use folio_auth_types::bearer::bearer_token;

use crate::domain::types::Caller;
use crate::error::CmsServiceError;
use crate::state::AppState;
use crate::usecase::token::AuthenticateUseCase;

/// Rejects with 401 `INVALID_TOKEN` before the handler body runs.
impl FromRequestParts<AppState> for Caller {
    type Rejection = CmsServiceError;

    // Read headers synchronously and return a 'static future; see axum-core's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = bearer_token(&parts.headers);
        let usecase = AuthenticateUseCase {
            users: state.user_repo(),
            jwt_secret: state.jwt.secret.clone(),
        };
        async move { usecase.execute(bearer.as_deref()).await }
    }
}
