//! Downloading the contents of a linked remote folder.

use std::path::Path;

use super::client::{EntryKind, RemoteError, RemoteStorage};

/// Result of fetching one remote folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The link did not resolve to a folder path; nothing was requested.
    Unresolved,
    /// Every direct file child was downloaded.
    Complete { downloaded: usize },
    /// Listing or a download failed; earlier downloads are kept.
    Failed { downloaded: usize },
}

impl FetchOutcome {
    pub fn downloaded(&self) -> usize {
        match self {
            Self::Unresolved => 0,
            Self::Complete { downloaded } | Self::Failed { downloaded } => *downloaded,
        }
    }
}

/// Download the direct file children of `remote_path` into `local_dir`.
///
/// Sub-folders are not descended into. The first error stops this folder.
pub fn fetch_remote_folder(
    storage: &dyn RemoteStorage,
    remote_path: Option<&str>,
    local_dir: &Path,
) -> FetchOutcome {
    let Some(remote_path) = remote_path else {
        tracing::warn!("Could not resolve remote folder path");
        return FetchOutcome::Unresolved;
    };

    let mut downloaded = 0;
    match download_files(storage, remote_path, local_dir, &mut downloaded) {
        Ok(()) => FetchOutcome::Complete { downloaded },
        Err(e) => {
            tracing::warn!("Failed to download folder {}: {}", remote_path, e);
            FetchOutcome::Failed { downloaded }
        }
    }
}

fn download_files(
    storage: &dyn RemoteStorage,
    remote_path: &str,
    local_dir: &Path,
    downloaded: &mut usize,
) -> Result<(), RemoteError> {
    for entry in storage.list_dir(remote_path)? {
        if entry.kind != EntryKind::File {
            continue;
        }
        let (Some(path), Some(name)) = (entry.path.as_deref(), entry.name.as_deref()) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        // Last component only, so the file lands inside local_dir
        let Some(file_name) = Path::new(name).file_name() else {
            continue;
        };

        storage.download(path, &local_dir.join(file_name))?;
        tracing::info!("  Downloaded {}", name);
        *downloaded += 1;
    }
    Ok(())
}
