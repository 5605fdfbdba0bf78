use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::CmsServiceError;
use crate::handlers::form::PlainForm;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase, RefreshTokenUseCase};

// ── POST /login/ ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

pub async fn login(
    State(state): State<AppState>,
    form: PlainForm,
) -> Result<Json<TokenPairResponse>, CmsServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt: state.jwt.clone(),
    };
    let pair = usecase
        .execute(LoginInput {
            email: form.text("email"),
            password: form.text("password"),
        })
        .await?;
    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

// ── POST /login/refresh/ ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    form: PlainForm,
) -> Result<Json<AccessTokenResponse>, CmsServiceError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt: state.jwt.clone(),
    };
    let access = usecase.execute(form.text("refresh").as_deref()).await?;
    Ok(Json(AccessTokenResponse { access }))
}
