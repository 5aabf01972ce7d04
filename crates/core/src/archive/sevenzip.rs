use std::path::Path;

use sevenz_rust::Password;

use super::ArchiveError;

pub(super) fn extract(
    path: &Path,
    target_dir: &Path,
    password: Option<&str>,
) -> Result<(), ArchiveError> {
    let result = match password {
        Some(pw) => {
            sevenz_rust::decompress_file_with_password(path, target_dir, Password::from(pw))
        }
        None => sevenz_rust::decompress_file(path, target_dir),
    };
    result.map_err(|e| ArchiveError::SevenZip(e.to_string()))
}
