use std::path::Path;

use unrar::Archive;

use super::ArchiveError;

fn rar_error(e: impl std::fmt::Display) -> ArchiveError {
    ArchiveError::Rar(e.to_string())
}

pub(super) fn extract(
    path: &Path,
    target_dir: &Path,
    password: Option<&str>,
) -> Result<(), ArchiveError> {
    let archive = match password {
        Some(pw) => Archive::with_password(path, pw.as_bytes()),
        None => Archive::new(path),
    };
    let mut archive = archive.open_for_processing().map_err(rar_error)?;

    while let Some(header) = archive.read_header().map_err(rar_error)? {
        archive = if header.entry().is_file() {
            header.extract_with_base(target_dir).map_err(rar_error)?
        } else {
            header.skip().map_err(rar_error)?
        };
    }

    Ok(())
}
