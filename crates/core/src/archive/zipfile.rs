use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

use super::ArchiveError;

/// Unpack a ZIP archive. The password is only applied to encrypted entries.
pub(super) fn extract(
    path: &Path,
    target_dir: &Path,
    password: Option<&str>,
) -> Result<(), ArchiveError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    for i in 0..archive.len() {
        let mut entry = match password {
            Some(pw) => archive.by_index_decrypt(i, pw.as_bytes())?,
            None => archive.by_index(i)?,
        };

        // Reject names that would escape the target (absolute, `..`)
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe zip entry {} in {}", entry.name(), path.display());
            continue;
        };
        let out = target_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }

        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&out)?;
        io::copy(&mut entry, &mut file)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::archive::{ArchiveError, extract_archive, try_extract_archive};
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::AesMode;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)], password: Option<&str>) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            let options = match password {
                Some(pw) => SimpleFileOptions::default().with_aes_encryption(AesMode::Aes256, pw),
                None => SimpleFileOptions::default(),
            };
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_nested_entries() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("bundle.zip");
        write_zip(&src, &[("a.txt", "alpha"), ("docs/b.txt", "beta")], None);

        let target = tmp.path().join("bundle_extracted");
        assert!(extract_archive(&src, &target, None));
        assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(target.join("docs/b.txt")).unwrap(), "beta");
    }

    #[test]
    fn password_is_ignored_for_plain_entries() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("plain.zip");
        write_zip(&src, &[("a.txt", "alpha")], None);

        let target = tmp.path().join("out");
        assert!(extract_archive(&src, &target, Some("7281")));
        assert!(target.join("a.txt").is_file());
    }

    #[test]
    fn decrypts_with_configured_password() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("secret.zip");
        write_zip(&src, &[("s.txt", "hidden")], Some("7281"));

        let target = tmp.path().join("out");
        assert!(extract_archive(&src, &target, Some("7281")));
        assert_eq!(fs::read_to_string(target.join("s.txt")).unwrap(), "hidden");
    }

    #[test]
    fn wrong_or_missing_password_fails() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("secret.zip");
        write_zip(&src, &[("s.txt", "hidden")], Some("7281"));

        let err = try_extract_archive(&src, &tmp.path().join("wrong"), Some("0000")).unwrap_err();
        assert!(matches!(err, ArchiveError::Zip(_)));
        assert!(!extract_archive(&src, &tmp.path().join("none"), None));
    }
}
