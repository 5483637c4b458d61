//! Avatar Upload Storage
//!
//! Files land in `<root>/avatars/<YYYY>/<MM>/<random>-<file name>`; callers
//! store the path relative to `<root>` (`avatars/2025/03/9f2c41d0e8a7b356-me.png`),
//! which is also the URL suffix under `/uploads/`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

use crate::crypto::random_hex;

/// 2 MiB
pub const MAX_AVATAR_BYTES: usize = 2 << 20;

/// Lowercase extensions accepted for avatars
pub const AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Upload errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Avatar must be a .jpg, .jpeg or .png file")]
    Extension,

    #[error("Avatar must not be larger than {max} bytes")]
    TooLarge { max: usize },

    #[error("Avatar file name is invalid")]
    FileName,

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Rejections caused by the uploaded file itself
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UploadError::Io(_))
    }
}

/// Strip directories and anything outside `[A-Za-z0-9._-]`
pub fn sanitize_file_name(raw: &str) -> Result<String, UploadError> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
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

    if cleaned.is_empty() || cleaned.starts_with('.') {
        return Err(UploadError::FileName);
    }
    Ok(cleaned)
}

/// Check extension and size, returning the sanitized name
pub fn check_avatar(file_name: &str, size: usize) -> Result<String, UploadError> {
    let name = sanitize_file_name(file_name)?;
    let extension = Path::new(&name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(UploadError::Extension)?;

    if !AVATAR_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::Extension);
    }
    if size > MAX_AVATAR_BYTES {
        return Err(UploadError::TooLarge {
            max: MAX_AVATAR_BYTES,
        });
    }
    Ok(name)
}

/// Local directory holding uploaded files
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and write an avatar under a fresh name, returning its relative path
    pub async fn store_avatar(
        &self,
        file_name: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, UploadError> {
        let name = format!("{}-{}", random_hex(8), check_avatar(file_name, bytes.len())?);

        let year = format!("{:04}", now.year());
        let month = format!("{:02}", now.month());
        let dir = self.root.join("avatars").join(&year).join(&month);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), bytes).await?;

        let relative = format!("avatars/{year}/{month}/{name}");
        tracing::debug!(path = %relative, size = bytes.len(), "Stored avatar");
        Ok(relative)
    }

    /// Delete a file written by [`Self::store_avatar`]
    pub async fn remove(&self, relative: &str) -> Result<(), UploadError> {
        if relative.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(UploadError::FileName);
        }
        tokio::fs::remove_file(self.root.join(relative)).await?;
        tracing::debug!(path = %relative, "Removed upload");
        Ok(())
    }
}
