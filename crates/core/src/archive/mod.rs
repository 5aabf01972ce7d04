//! Archive extraction for attachments.
//!
//! Three container formats share one contract: the target directory is
//! created if needed, the archive is unpacked into it, and failures are
//! reported rather than raised. Members already written before a failure
//! stay on disk.

mod rarfile;
mod sevenzip;
mod zipfile;

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("unsupported archive type: {0}")]
    Unsupported(String),

    #[error("failed to create directory {0}: {1}")]
    CreateDir(String, #[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("7z error: {0}")]
    SevenZip(String),

    #[error("rar error: {0}")]
    Rar(String),
}

/// Supported container formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZip,
    Rar,
}

impl ArchiveFormat {
    /// Detect the format from the extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "zip" => Some(Self::Zip),
            "7z" => Some(Self::SevenZip),
            "rar" => Some(Self::Rar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::SevenZip => "7z",
            Self::Rar => "rar",
        }
    }

    fn extract(
        self,
        path: &Path,
        target_dir: &Path,
        password: Option<&str>,
    ) -> Result<(), ArchiveError> {
        match self {
            Self::Zip => zipfile::extract(path, target_dir, password),
            Self::SevenZip => sevenzip::extract(path, target_dir, password),
            Self::Rar => rarfile::extract(path, target_dir, password),
        }
    }
}

/// True if `name` has a `.zip`, `.7z` or `.rar` extension.
pub fn is_archive(name: &str) -> bool {
    ArchiveFormat::from_path(Path::new(name)).is_some()
}

/// Extract `path` into `target_dir`, returning the first error.
///
/// An empty password is treated as no password.
pub fn try_extract_archive(
    path: &Path,
    target_dir: &Path,
    password: Option<&str>,
) -> Result<(), ArchiveError> {
    fs::create_dir_all(target_dir)
        .map_err(|e| ArchiveError::CreateDir(target_dir.display().to_string(), e))?;

    let format = ArchiveFormat::from_path(path)
        .ok_or_else(|| ArchiveError::Unsupported(path.display().to_string()))?;

    let password = password.filter(|p| !p.is_empty());
    tracing::debug!("Extracting {} archive {}", format.as_str(), path.display());
    format.extract(path, target_dir, password)
}

/// Extract `path` into `target_dir`. Logs and returns `false` on any failure.
pub fn extract_archive(path: &Path, target_dir: &Path, password: Option<&str>) -> bool {
    match try_extract_archive(path, target_dir, password) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to extract archive {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("file.zip", true)]
    #[case("file.7z", true)]
    #[case("file.rar", true)]
    #[case("FILE.ZIP", true)]
    #[case("Backup.Rar", true)]
    #[case("file.txt", false)]
    #[case("file.pdf", false)]
    #[case("zip", false)]
    #[case("archive.zip.bak", false)]
    fn detects_archives(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_archive(name), expected);
    }

    #[test]
    fn format_from_path() {
        assert_eq!(ArchiveFormat::from_path(Path::new("a/b.7Z")), Some(ArchiveFormat::SevenZip));
        assert_eq!(ArchiveFormat::from_path(Path::new("b.rar")), Some(ArchiveFormat::Rar));
        assert_eq!(ArchiveFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn unsupported_extension_fails_after_creating_target() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("notes.txt");
        fs::write(&src, "text").unwrap();
        let target = tmp.path().join("out");

        let err = try_extract_archive(&src, &target, None).unwrap_err();
        assert!(matches!(err, ArchiveError::Unsupported(_)));
        assert!(target.is_dir());
    }

    #[rstest]
    #[case("broken.zip")]
    #[case("broken.7z")]
    #[case("broken.rar")]
    fn corrupt_archives_report_failure(#[case] name: &str) {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join(name);
        fs::write(&src, b"this is not an archive").unwrap();

        assert!(!extract_archive(&src, &tmp.path().join("out"), Some("pw")));
    }

    #[test]
    fn missing_archive_reports_failure() {
        let tmp = TempDir::new().unwrap();
        assert!(!extract_archive(&tmp.path().join("gone.zip"), &tmp.path().join("out"), None));
    }
}
