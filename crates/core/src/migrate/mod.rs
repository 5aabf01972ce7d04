//! Migration orchestration.
//!
//! A run creates the output root, enumerates the vault once, then makes
//! three independent passes over the full note list (clean, link,
//! attachment) and finally re-reads the copied link notes to download
//! their remote folders. Every stage runs to completion before the next.

mod passes;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::ResolvedConfig;
use crate::remote::RemoteStorage;
use crate::vault::{
    NoteClass, RemoteLinkPattern, VaultWalker, WalkedFile, classify, extract_attachment_names,
};

pub use report::{AttachmentStats, CopyStats, MigrationReport, RemoteStats};

/// Flat folder for notes without links or attachments.
pub const CLEAN_DIR: &str = "clean_notes";
/// Per-note folders for notes with remote links.
pub const LINK_DIR: &str = "link_notes";
/// Per-note folders for notes with attachments.
pub const ATTACHMENT_DIR: &str = "attachment_notes";
/// Folder inside a link note's folder receiving downloaded files.
pub const REMOTE_CONTENTS_DIR: &str = "remote_contents";

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("invalid remote domain '{0}': {1}")]
    Domain(String, #[source] regex::Error),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read note {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub vault_root: PathBuf,
    pub attachments_dir: PathBuf,
    pub output_dir: PathBuf,
    pub excluded_folders: Vec<PathBuf>,
    /// Applied to every password-protected archive.
    pub archive_password: Option<String>,
    pub remote_domain: String,
}

impl From<&ResolvedConfig> for MigrationConfig {
    fn from(rc: &ResolvedConfig) -> Self {
        Self {
            vault_root: rc.vault_root.clone(),
            attachments_dir: rc.attachments_dir.clone(),
            output_dir: rc.output_dir.clone(),
            excluded_folders: rc.excluded_folders.clone(),
            archive_password: rc.archive.password.clone(),
            remote_domain: rc.remote.domain.clone(),
        }
    }
}

/// Classification of a single note, without copying anything.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedNote {
    pub path: PathBuf,
    #[serde(flatten)]
    pub class: NoteClass,
    pub attachment_refs: usize,
    pub link_refs: usize,
}

pub struct Migrator<'a> {
    config: &'a MigrationConfig,
    storage: &'a dyn RemoteStorage,
    links: RemoteLinkPattern,
}

impl<'a> Migrator<'a> {
    pub fn new(
        config: &'a MigrationConfig,
        storage: &'a dyn RemoteStorage,
    ) -> Result<Self, MigrateError> {
        let links = RemoteLinkPattern::new(&config.remote_domain)
            .map_err(|e| MigrateError::Domain(config.remote_domain.clone(), e))?;
        Ok(Self { config, storage, links })
    }

    /// Run every stage and return the collected counters.
    ///
    /// Only failing to create the output tree is an error; everything else
    /// is logged and counted.
    pub fn run(&self) -> Result<MigrationReport, MigrateError> {
        tracing::info!("Preparing output directory {}", self.config.output_dir.display());
        create_dir(&self.config.output_dir)?;

        let notes = self.find_notes();
        tracing::info!("Found {} notes", notes.len());

        let mut report = MigrationReport { notes_found: notes.len(), ..Default::default() };

        tracing::info!("Copying clean notes");
        report.clean = self.copy_clean_notes(&notes)?;

        tracing::info!("Copying notes with remote links");
        report.links = self.copy_link_notes(&notes)?;

        tracing::info!("Copying notes with attachments");
        report.attachments = self.copy_attachment_notes(&notes)?;

        tracing::info!("Downloading remote folder contents");
        report.remote = self.download_remote_contents()?;

        Ok(report)
    }

    /// Every note under the vault root. A walk error yields no notes at all.
    pub fn find_notes(&self) -> Vec<WalkedFile> {
        let mut excluded = self.config.excluded_folders.clone();
        excluded.push(self.config.output_dir.clone());

        match VaultWalker::with_exclusions(&self.config.vault_root, excluded).and_then(|walker| {
            tracing::debug!("Walking notes under {}", walker.root().display());
            walker.walk()
        }) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Failed to enumerate notes: {}", e);
                Vec::new()
            }
        }
    }

    /// Classify every note without writing anything. Unreadable notes are logged and left out.
    pub fn scan(&self) -> Vec<ScannedNote> {
        self.find_notes()
            .into_iter()
            .filter_map(|note| match read_note(&note.absolute_path) {
                Ok(content) => Some(ScannedNote {
                    class: classify(&content, &self.links),
                    attachment_refs: extract_attachment_names(&content).len(),
                    link_refs: self.links.extract(&content).len(),
                    path: note.relative_path,
                }),
                Err(e) => {
                    tracing::warn!("{}", e);
                    None
                }
            })
            .collect()
    }
}

fn create_dir(path: &Path) -> Result<(), MigrateError> {
    fs::create_dir_all(path)
        .map_err(|source| MigrateError::CreateDir { path: path.display().to_string(), source })
}

fn read_note(path: &Path) -> Result<String, MigrateError> {
    fs::read_to_string(path)
        .map_err(|source| MigrateError::Read { path: path.display().to_string(), source })
}

fn copy_file(from: &Path, to: &Path) -> Result<(), MigrateError> {
    fs::copy(from, to).map(|_| ()).map_err(|source| MigrateError::Copy {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    })
}
