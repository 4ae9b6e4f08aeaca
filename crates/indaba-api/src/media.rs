//! Blob storage for uploads (résumés, article images).
//!
//! Files live under a configured directory and are served back under
//! `/uploads/{name}`. Stored names are prefixed with a SHA-256 content hash
//! so re-uploads of the same bytes deduplicate and names never collide.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// On-disk blob store rooted at one directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
  dir: PathBuf,
}

impl MediaStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// Persist `bytes` and return the stored file name.
  pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, ApiError> {
    let safe = sanitize_filename(filename);
    if safe.is_empty() {
      return Err(ApiError::BadRequest("empty filename".to_string()));
    }

    let digest = Sha256::digest(bytes);
    let name = format!("{}-{safe}", &hex::encode(digest)[..16]);

    tokio::fs::create_dir_all(&self.dir).await?;
    tokio::fs::write(self.dir.join(&name), bytes).await?;
    Ok(name)
  }

  /// Read a stored blob back. `None` if the name is unknown or unsafe.
  pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, ApiError> {
    // Stored names never contain path separators; reject anything that
    // could escape the media dir.
    if name.contains('/') || name.contains('\\') || name.contains("..") {
      return Ok(None);
    }
    match tokio::fs::read(self.dir.join(name)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

/// Keep only characters safe in a flat file name.
fn sanitize_filename(name: &str) -> String {
  Path::new(name)
    .file_name()
    .map(|f| f.to_string_lossy().into_owned())
    .unwrap_or_default()
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    .collect()
}

/// Content type inferred from the file extension; octet-stream otherwise.
pub fn content_type_for(name: &str) -> &'static str {
  match name.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
    Some("pdf") => "application/pdf",
    Some("doc") => "application/msword",
    Some("docx") => {
      "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }
    Some("png") => "image/png",
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("mp4") => "video/mp4",
    _ => "application/octet-stream",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn filename_stripped_to_safe_characters() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("my résumé (final).pdf"), "myrsumfinal.pdf");
    assert_eq!(sanitize_filename("cv_2026-08.docx"), "cv_2026-08.docx");
  }

  #[test]
  fn content_types() {
    assert_eq!(content_type_for("a.pdf"), "application/pdf");
    assert_eq!(content_type_for("b.JPG"), "image/jpeg");
    assert_eq!(content_type_for("noext"), "application/octet-stream");
  }

  #[tokio::test]
  async fn save_and_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());

    let name = store.save("resume.pdf", b"fake pdf bytes").await.unwrap();
    assert!(name.ends_with("-resume.pdf"));

    let bytes = store.read(&name).await.unwrap().unwrap();
    assert_eq!(bytes, b"fake pdf bytes");
  }

  #[tokio::test]
  async fn read_rejects_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());
    assert!(store.read("../secret").await.unwrap().is_none());
  }
}
