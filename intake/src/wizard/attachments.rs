// Vaccination-card attachments
// Held in memory (or as a path read at upload time) until the final submission.

use crate::i18n::{self, ErrorKey, Key, Language};
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_FILES: usize = 10;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/heic",
    "image/heif",
];

/// Extensions accepted whatever the declared type (HEIC/HEIF often arrive without one).
const HEIF_EXTENSIONS: &[&str] = &["heic", "heif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentLimits {
    pub max_files: usize,
    pub max_file_size: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Memory(Vec<u8>),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub content: FileContent,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            content: FileContent::Memory(bytes),
        }
    }

    /// File picked from disk; content is read when uploading.
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let meta = std::fs::metadata(path).map_err(|source| AttachmentError::Io {
            name: name.clone(),
            source,
        })?;
        if !meta.is_file() {
            return Err(AttachmentError::Io {
                name,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        Ok(Self {
            media_type: guess_media_type(path).to_string(),
            name,
            size: meta.len(),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    pub async fn read_content(&self) -> std::io::Result<Vec<u8>> {
        match &self.content {
            FileContent::Memory(bytes) => Ok(bytes.clone()),
            FileContent::Path(path) => tokio::fs::read(path).await,
        }
    }

    fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    }

    pub fn is_allowed_type(&self) -> bool {
        let declared = self.media_type.trim().to_ascii_lowercase();
        ALLOWED_MEDIA_TYPES.contains(&declared.as_str())
            || HEIF_EXTENSIONS.contains(&self.extension().as_str())
    }

    /// Short type marker for list entries.
    pub fn icon(&self) -> &'static str {
        if self.media_type.eq_ignore_ascii_case("application/pdf") || self.extension() == "pdf" {
            "[PDF]"
        } else {
            "[IMG]"
        }
    }

    pub fn human_size(&self) -> String {
        human_size(self.size)
    }
}

pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

/// Media type from the file extension; unknown extensions map to `application/octet-stream`.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("too many files (maximum {max})")]
    TooManyFiles { max: usize },

    #[error("{name} exceeds the maximum size of {max} bytes")]
    FileTooLarge { name: String, max: u64 },

    #[error("{name}: media type '{media_type}' is not allowed")]
    FileTypeNotAllowed { name: String, media_type: String },

    #[error("{name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl AttachmentError {
    pub fn key(&self) -> ErrorKey {
        match self {
            AttachmentError::TooManyFiles { .. } => ErrorKey::TooManyFiles,
            AttachmentError::FileTooLarge { .. } => ErrorKey::FileTooLarge,
            AttachmentError::FileTypeNotAllowed { .. } => ErrorKey::FileTypeNotAllowed,
            AttachmentError::Io { .. } => ErrorKey::FileUnreadable,
        }
    }

    /// Localized message for the rejection dialog.
    pub fn message(&self, lang: Language) -> String {
        let args: Vec<(&str, String)> = match self {
            AttachmentError::TooManyFiles { max } => vec![("max", max.to_string())],
            AttachmentError::FileTooLarge { name, max } => {
                vec![("name", name.clone()), ("max", human_size(*max))]
            }
            AttachmentError::FileTypeNotAllowed { name, .. } | AttachmentError::Io { name, .. } => {
                vec![("name", name.clone())]
            }
        };
        i18n::t_args(lang, Key::Error(self.key()), &args)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentList {
    limits: AttachmentLimits,
    files: Vec<UploadedFile>,
}

impl AttachmentList {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            limits,
            files: Vec::new(),
        }
    }

    pub fn limits(&self) -> AttachmentLimits {
        self.limits
    }

    /// Checks run in order: count, size, type.
    pub fn add(&mut self, file: UploadedFile) -> Result<(), AttachmentError> {
        if self.files.len() >= self.limits.max_files {
            return Err(AttachmentError::TooManyFiles {
                max: self.limits.max_files,
            });
        }
        if file.size > self.limits.max_file_size {
            return Err(AttachmentError::FileTooLarge {
                name: file.name,
                max: self.limits.max_file_size,
            });
        }
        if !file.is_allowed_type() {
            return Err(AttachmentError::FileTypeNotAllowed {
                name: file.name,
                media_type: file.media_type,
            });
        }

        info!(
            "[PHASE: attachments] [STEP: add] Attached {} ({}, {})",
            file.name,
            file.media_type,
            file.human_size()
        );
        self.files.push(file);
        Ok(())
    }

    /// Remove by index; later entries shift down so indices stay dense.
    pub fn remove(&mut self, index: usize) -> Option<UploadedFile> {
        if index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);
        debug!(
            "[PHASE: attachments] [STEP: remove] Removed {} (index {})",
            removed.name, index
        );
        Some(removed)
    }

    pub fn entries(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
