use sea_orm::Database;
use tracing::info;

use folio_cms::config::CmsConfig;
use folio_cms::infra::storage::LocalDocumentStorage;
use folio_cms::router::build_router;
use folio_cms::state::AppState;
use folio_cms::usecase::token::JwtSettings;
use folio_core::config::Config;
use folio_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CmsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt: JwtSettings {
            secret: config.jwt_secret,
            access_ttl_secs: config.access_token_ttl_secs,
            refresh_ttl_secs: config.refresh_token_ttl_secs,
        },
        storage: LocalDocumentStorage::new(&config.media_root),
        media_url: config.media_url,
        max_upload_bytes: config.max_upload_bytes,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.cms_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(media_root = %config.media_root, "cms service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
