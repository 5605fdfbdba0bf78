use serde::Deserialize;

use folio_auth_types::token::{DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL};
use folio_core::config::Config;

/// CMS service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct CmsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// TCP port to listen on. Env var: `CMS_PORT`.
    #[serde(default = "default_port")]
    pub cms_port: u16,
    /// Directory that holds uploaded documents.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// URL prefix under which stored documents are served.
    #[serde(default = "default_media_url")]
    pub media_url: String,
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,
    /// Request body cap, uploads included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Config for CmsConfig {}

fn default_port() -> u16 {
    8000
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_media_url() -> String {
    "/media/".to_owned()
}

fn default_access_ttl() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL
}

fn default_refresh_ttl() -> u64 {
    DEFAULT_REFRESH_TOKEN_TTL
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
