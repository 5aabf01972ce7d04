//! In-memory remote store, for dry runs and tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::client::{EntryKind, RemoteEntry, RemoteError, RemoteStorage};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    folders: HashMap<String, Vec<RemoteEntry>>,
    files: HashMap<String, Vec<u8>>,
    listed: RefCell<Vec<String>>,
    downloaded: RefCell<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file named `name` to `folder`; its remote path is `folder/name`.
    pub fn with_file(mut self, folder: &str, name: &str, contents: &[u8]) -> Self {
        let path = format!("{folder}/{name}");
        self.files.insert(path.clone(), contents.to_vec());
        self.with_entry(
            folder,
            RemoteEntry { kind: EntryKind::File, name: Some(name.to_string()), path: Some(path) },
        )
    }

    /// Add a sub-folder entry to `folder`.
    pub fn with_dir(self, folder: &str, name: &str) -> Self {
        let path = format!("{folder}/{name}");
        self.with_entry(
            folder,
            RemoteEntry { kind: EntryKind::Dir, name: Some(name.to_string()), path: Some(path) },
        )
    }

    /// Add an arbitrary listing entry to `folder`, creating the folder if needed.
    pub fn with_entry(mut self, folder: &str, entry: RemoteEntry) -> Self {
        self.folders.entry(folder.to_string()).or_default().push(entry);
        self
    }

    /// Folder paths passed to `list_dir`, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.listed.borrow().clone()
    }

    /// Remote paths successfully downloaded, in call order.
    pub fn downloaded(&self) -> Vec<String> {
        self.downloaded.borrow().clone()
    }
}

impl RemoteStorage for MemoryStorage {
    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        self.listed.borrow_mut().push(path.to_string());
        self.folders.get(path).cloned().ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }

    fn download(&self, remote_path: &str, local_path: &Path) -> Result<(), RemoteError> {
        let contents = self
            .files
            .get(remote_path)
            .ok_or_else(|| RemoteError::NotFound(remote_path.to_string()))?;
        fs::write(local_path, contents)
            .map_err(|e| RemoteError::Write(local_path.display().to_string(), e))?;
        self.downloaded.borrow_mut().push(remote_path.to_string());
        Ok(())
    }
}
