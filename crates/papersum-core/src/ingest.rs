//! Loading local text files into the analysis buffer.
//!
//! Only plain text and markdown are accepted, judged by declared media type
//! or filename extension. Content must decode as UTF-8.

use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

pub const ACCEPTED_MEDIA_TYPES: &[&str] = &["text/plain", "text/markdown"];
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".txt", ".md"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid file type: {name}")]
    InvalidType { name: String },
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("file is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),
}

/// A file the user picked, before it has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Display name (final path component).
    pub name: String,
    pub path: PathBuf,
    /// Declared media type, if known.
    pub media_type: Option<String>,
}

impl FileCandidate {
    /// Describe a local file, deriving the media type from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for_path(&path).map(str::to_string);
        Self {
            name,
            path,
            media_type,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// Best-effort media type from a path's extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "txt" | "text" => Some("text/plain"),
        "md" | "markdown" => Some("text/markdown"),
        "html" | "htm" => Some("text/html"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Whether `candidate` passes the type gate.
pub fn is_accepted(candidate: &FileCandidate) -> bool {
    let type_ok = candidate.media_type.as_deref().is_some_and(|mt| {
        let essence = mt.split(';').next().unwrap_or("").trim();
        ACCEPTED_MEDIA_TYPES
            .iter()
            .any(|accepted| essence.eq_ignore_ascii_case(accepted))
    });
    let name = candidate.name.to_ascii_lowercase();
    let ext_ok = ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
    type_ok || ext_ok
}

pub fn check_file_type(candidate: &FileCandidate) -> Result<(), IngestError> {
    if is_accepted(candidate) {
        Ok(())
    } else {
        Err(IngestError::InvalidType {
            name: candidate.name.clone(),
        })
    }
}

/// Read the whole file and decode it strictly as UTF-8.
pub async fn read_text_file(path: &Path) -> Result<String, IngestError> {
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes)?;
    tracing::debug!(path = %path.display(), chars = text.chars().count(), "read text file");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> FileCandidate {
        FileCandidate {
            name: name.into(),
            path: PathBuf::from(name),
            media_type: None,
        }
    }

    #[test]
    fn accepts_by_extension() {
        assert!(is_accepted(&named("notes.txt")));
        assert!(is_accepted(&named("README.md")));
        assert!(is_accepted(&named("SHOUTING.TXT")));
    }

    #[test]
    fn accepts_by_media_type() {
        assert!(is_accepted(&named("blob").with_media_type("text/plain")));
        assert!(is_accepted(&named("blob").with_media_type("text/markdown")));
        assert!(is_accepted(
            &named("blob").with_media_type("text/plain; charset=utf-8")
        ));
    }

    #[test]
    fn rejects_other_types() {
        assert!(!is_accepted(&named("paper.pdf")));
        assert!(!is_accepted(&named("page.html").with_media_type("text/html")));
        assert!(!is_accepted(&named("data").with_media_type("application/json")));
        assert!(!is_accepted(&named("markdown")));
    }

    #[test]
    fn from_path_derives_media_type() {
        let c = FileCandidate::from_path("/tmp/dir/abstract.md");
        assert_eq!(c.name, "abstract.md");
        assert_eq!(c.media_type.as_deref(), Some("text/markdown"));
        let c = FileCandidate::from_path("/tmp/dir/notes.text");
        assert_eq!(c.media_type.as_deref(), Some("text/plain"));
        assert!(is_accepted(&c));
    }

    #[test]
    fn check_file_type_names_rejected_file() {
        let err = check_file_type(&named("slides.pptx")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidType { ref name } if name == "slides.pptx"));
    }

    #[tokio::test]
    async fn reads_utf8_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "héllo wörld\n").unwrap();
        assert_eq!(read_text_file(&path).await.unwrap(), "héllo wörld\n");
    }

    #[tokio::test]
    async fn invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();
        let err = read_text_file(&path).await.unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text_file(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, IngestError::Read(_)));
    }
}
