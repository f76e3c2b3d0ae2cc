//! Local storage for uploaded meeting recordings.

use crate::error::{ReferatError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sanitize an upload filename: strip any path components and replace
/// spaces with underscores.
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.replace(' ', "_")
}

/// Store uploaded bytes under the upload directory, creating it as needed.
///
/// Returns the path the recording was written to.
pub fn save_upload(upload_dir: &Path, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let filename = sanitize_filename(original_name);
    if filename.is_empty() {
        return Err(ReferatError::Storage(
            "upload has no usable filename".to_string(),
        ));
    }

    std::fs::create_dir_all(upload_dir)?;
    let path = upload_dir.join(filename);
    std::fs::write(&path, bytes)?;
    debug!(path = %path.display(), size = bytes.len(), "upload stored");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_spaces_and_strips_paths() {
        assert_eq!(sanitize_filename("team standup.mp4"), "team_standup.mp4");
        assert_eq!(sanitize_filename("../../etc/some file"), "some_file");
        assert_eq!(sanitize_filename("plain.wav"), "plain.wav");
    }

    #[test]
    fn test_save_upload_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");

        let path = save_upload(&upload_dir, "weekly sync.mp4", b"fake media").unwrap();
        assert_eq!(path.file_name().unwrap(), "weekly_sync.mp4");
        assert_eq!(std::fs::read(&path).unwrap(), b"fake media");
    }

    #[test]
    fn test_save_upload_rejects_empty_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_upload(dir.path(), "", b"x").is_err());
    }
}
