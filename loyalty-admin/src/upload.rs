//! Uploaded file validation and storage
//!
//! Files are validated in memory (size, extension, decodable image content)
//! before anything touches the disk, then written under
//! `<upload_dir>/<folder>/<prefix>-<millis>-<rand>.<ext>` and served from
//! `/uploads/<folder>/<file>`.

use std::path::{Path, PathBuf};

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::util::random_suffix;

/// URL prefix the upload directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Limits for one kind of upload
#[derive(Debug, Clone, Copy)]
pub struct UploadRule {
    pub folder: &'static str,
    pub prefix: &'static str,
    pub max_bytes: usize,
    pub extensions: &'static [&'static str],
    pub too_large_message: &'static str,
}

impl UploadRule {
    /// Request body limit for a multipart form carrying one such file
    pub fn body_limit(&self) -> usize {
        self.max_bytes + 1024 * 1024
    }
}

/// Business logos (firm creation)
pub const LOGO: UploadRule = UploadRule {
    folder: "logos",
    prefix: "logo",
    max_bytes: 5 * 1024 * 1024,
    extensions: &["jpeg", "jpg", "png", "gif"],
    too_large_message: "File too large (Max: 5MB)",
};

/// Campaign header images
pub const CAMPAIGN_HEADER: UploadRule = UploadRule {
    folder: "campaigns",
    prefix: "campaign",
    max_bytes: 10 * 1024 * 1024,
    extensions: &["jpeg", "jpg", "png", "gif", "webp"],
    too_large_message: "Dosya boyutu çok büyük (Max: 10MB)",
};

/// A file part read from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default()
    }
}

/// A file written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    /// Public URL path, e.g. `/uploads/logos/logo-1700000000000-42.png`
    pub url: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Empty file")]
    Empty,
    #[error("{message}")]
    TooLarge { size: usize, message: &'static str },
    #[error("Only image files are allowed!")]
    UnsupportedFormat(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Empty => AppError::new(ErrorCode::EmptyFile),
            UploadError::TooLarge { size, message } => {
                AppError::with_message(ErrorCode::FileTooLarge, message).with_detail("size", size)
            }
            UploadError::UnsupportedFormat(ext) => {
                AppError::new(ErrorCode::UnsupportedFileFormat).with_detail("extension", ext)
            }
            UploadError::InvalidImage(reason) => {
                AppError::new(ErrorCode::InvalidImageFile).with_detail("reason", reason)
            }
            UploadError::Io(io) => {
                tracing::error!(error = %io, "Failed to store upload");
                AppError::new(ErrorCode::FileStorageFailed).with_detail("error", io.to_string())
            }
        }
    }
}

/// Check size, extension and content; returns the extension to store under.
pub fn validate(rule: &UploadRule, file: &UploadedFile) -> Result<String, UploadError> {
    if file.data.is_empty() {
        return Err(UploadError::Empty);
    }
    if file.data.len() > rule.max_bytes {
        return Err(UploadError::TooLarge {
            size: file.data.len(),
            message: rule.too_large_message,
        });
    }

    let ext = file.extension();
    if !rule.extensions.contains(&ext.as_str()) {
        return Err(UploadError::UnsupportedFormat(ext));
    }

    let format = image::guess_format(&file.data)
        .map_err(|e| UploadError::InvalidImage(e.to_string()))?;
    let content_allowed = format
        .extensions_str()
        .iter()
        .any(|e| rule.extensions.contains(e));
    if !content_allowed {
        return Err(UploadError::UnsupportedFormat(format!("{format:?}")));
    }
    image::load_from_memory_with_format(&file.data, format)
        .map_err(|e| UploadError::InvalidImage(e.to_string()))?;

    Ok(ext)
}

/// Upload directory on local disk
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-kind folders
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for rule in [LOGO, CAMPAIGN_HEADER] {
            tokio::fs::create_dir_all(self.root.join(rule.folder)).await?;
        }
        Ok(())
    }

    /// Validate and write a file
    pub async fn store(
        &self,
        rule: &UploadRule,
        file: &UploadedFile,
    ) -> Result<StoredFile, UploadError> {
        let ext = validate(rule, file)?;
        let name = format!(
            "{}-{}-{}.{}",
            rule.prefix,
            shared::util::now_millis(),
            random_suffix(),
            ext
        );

        let dir = self.root.join(rule.folder);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(&name);
        tokio::fs::write(&path, &file.data).await?;

        tracing::info!(path = %path.display(), bytes = file.data.len(), "Upload stored");
        Ok(StoredFile {
            path,
            url: format!("{PUBLIC_PREFIX}/{}/{name}", rule.folder),
        })
    }

    /// Best-effort removal after a failed insert
    pub async fn remove(&self, file: &StoredFile) {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!(path = %file.path.display(), error = %e, "Failed to remove upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn file(name: &str, data: Vec<u8>) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            data,
        }
    }

    #[test]
    fn test_validate_accepts_real_png() {
        assert_eq!(validate(&LOGO, &file("Logo.PNG", png_bytes())).unwrap(), "png");
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let err = validate(&LOGO, &file("logo.webp", png_bytes())).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat(ext) if ext == "webp"));
        let err = validate(&LOGO, &file("logo", png_bytes())).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validate_rejects_non_image_content() {
        let err = validate(&CAMPAIGN_HEADER, &file("x.jpg", b"plain text, not an image".to_vec()));
        assert!(matches!(err, Err(UploadError::InvalidImage(_))));
    }

    #[test]
    fn test_validate_size_limit_message() {
        let big = vec![0u8; CAMPAIGN_HEADER.max_bytes + 1];
        let err = validate(&CAMPAIGN_HEADER, &file("big.png", big)).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::FileTooLarge);
        assert_eq!(app.message, "Dosya boyutu çok büyük (Max: 10MB)");

        let err = validate(&LOGO, &file("empty.png", Vec::new())).unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }

    #[tokio::test]
    async fn test_store_writes_under_folder_and_remove_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());

        let stored = store
            .store(&CAMPAIGN_HEADER, &file("header.png", png_bytes()))
            .await
            .unwrap();
        assert!(stored.url.starts_with("/uploads/campaigns/campaign-"));
        assert!(stored.url.ends_with(".png"));
        assert!(stored.path.starts_with(dir.path().join("campaigns")));
        assert!(stored.path.exists());

        store.remove(&stored).await;
        assert!(!stored.path.exists());
    }

    #[tokio::test]
    async fn test_rejected_file_is_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        let result = store.store(&LOGO, &file("logo.gif", b"nope".to_vec())).await;
        assert!(result.is_err());
        assert!(!dir.path().join("logos").exists());
    }
}
