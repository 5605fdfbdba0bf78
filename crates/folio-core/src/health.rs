use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness only. Readiness is service-specific.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
