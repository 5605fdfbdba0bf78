use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use folio_core::health::healthz;
use folio_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    content::{
        create_content, delete_content, get_content, list_content, patch_content, replace_content,
    },
    health::readyz,
    register::register,
    token::{login, refresh_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    let media = media_mount(&state.media_url).map(|mount| (mount, state.storage.root.clone()));

    let mut router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/api/register/", post(register))
        .route("/login/", post(login))
        .route("/login/refresh/", post(refresh_token))
        // Content
        .route("/api/content/", get(list_content).post(create_content))
        .route(
            "/api/content/{id}/",
            get(get_content)
                .put(replace_content)
                .patch(patch_content)
                .delete(delete_content),
        )
        .with_state(state);

    if let Some((mount, root)) = media {
        router = router.nest_service(&mount, ServeDir::new(root));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

/// Local mount point for stored documents. Absolute URLs (a CDN, say) are
/// served elsewhere, and `/` would shadow the API.
fn media_mount(media_url: &str) -> Option<String> {
    let mount = media_url.trim_end_matches('/');
    if mount.starts_with('/') && mount.len() > 1 {
        Some(mount.to_owned())
    } else {
        None
    }
}
