use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::domain::types::User;
use crate::error::CmsServiceError;
use crate::handlers::form::PlainForm;
use crate::state::AppState;
use crate::usecase::register::{RegisterInput, RegisterUseCase};

// ── POST /api/register/ ──────────────────────────────────────────────────────

fn register_input(form: &PlainForm) -> RegisterInput {
    RegisterInput {
        email: form.text("email"),
        username: form.text("username"),
        password: form.text("password"),
        phone: form.text("phone"),
        pincode: form.text("pincode"),
        address: form.text("address"),
        city: form.text("city"),
        state: form.text("state"),
        country: form.text("country"),
        is_admin: form.text("is_admin"),
    }
}

/// Public user representation. The password hash never leaves the service.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub username: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            username: user.username,
            phone: user.phone,
            address: user.address,
            city: user.city,
            state: user.state,
            country: user.country,
            pincode: user.pincode,
            is_admin: user.is_admin,
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    form: PlainForm,
) -> Result<(StatusCode, Json<UserResponse>), CmsServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(register_input(&form)).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
