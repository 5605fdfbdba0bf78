use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::domain::repository::DocumentStorage;
use crate::error::CmsServiceError;

/// Directory under the media root that receives uploads.
pub const DOCUMENTS_DIR: &str = "documents";

const MAX_NAME_LEN: usize = 50;

/// Documents stored as plain files below `root`.
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    pub root: PathBuf,
}

impl LocalDocumentStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

/// Keep the last path segment, replace anything outside `[A-Za-z0-9._-]`,
/// and cap the length. Never returns an empty or dot-only name.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.len() > MAX_NAME_LEN {
        // Keep the extension when truncating.
        match cleaned.rsplit_once('.') {
            Some((stem, ext)) if ext.len() < MAX_NAME_LEN / 2 => {
                format!("{}.{ext}", &stem[..MAX_NAME_LEN - ext.len() - 1])
            }
            _ => cleaned[..MAX_NAME_LEN].to_owned(),
        }
    } else {
        cleaned.to_owned()
    };
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.' || c == '_') {
        "document".to_owned()
    } else {
        cleaned
    }
}

async fn ensure_parent(path: &Path) -> Result<(), CmsServiceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}

impl DocumentStorage for LocalDocumentStorage {
    async fn save(&self, file_name: &str, data: Bytes) -> Result<String, CmsServiceError> {
        let path = format!(
            "{DOCUMENTS_DIR}/{}-{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(file_name)
        );
        let full_path = self.resolve(&path);
        ensure_parent(&full_path).await?;
        fs::write(&full_path, &data)
            .await
            .with_context(|| format!("write document {path}"))?;
        tracing::debug!(path, bytes = data.len(), "stored document");
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), CmsServiceError> {
        match fs::remove_file(self.resolve(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove document {path}"))
                .into()),
        }
    }
}
