//! The copy passes and the remote materialization pass.

use std::path::{Component, Path, PathBuf};

use super::report::{AttachmentStats, CopyStats, RemoteStats};
use super::{
    ATTACHMENT_DIR, CLEAN_DIR, LINK_DIR, MigrateError, Migrator, REMOTE_CONTENTS_DIR,
    copy_file, create_dir, read_note,
};
use crate::archive::{extract_archive, is_archive};
use crate::remote::{FetchOutcome, fetch_remote_folder, resolve_remote_path};
use crate::vault::{VaultWalker, WalkedFile, extract_attachment_names, has_attachments};

impl Migrator<'_> {
    /// Copy notes with neither links nor attachments into the flat clean folder.
    pub fn copy_clean_notes(&self, notes: &[WalkedFile]) -> Result<CopyStats, MigrateError> {
        let clean_dir = self.config.output_dir.join(CLEAN_DIR);
        create_dir(&clean_dir)?;

        let mut stats = CopyStats::default();
        for note in notes {
            match self.copy_clean_note(note, &clean_dir) {
                Ok(true) => stats.copied += 1,
                Ok(false) => stats.skipped += 1,
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", note.relative_path.display(), e);
                    stats.failed += 1;
                }
            }
        }
        Ok(stats)
    }

    fn copy_clean_note(&self, note: &WalkedFile, clean_dir: &Path) -> Result<bool, MigrateError> {
        let content = read_note(&note.absolute_path)?;
        if self.links.is_present(&content) || has_attachments(&content) {
            tracing::debug!("Skipped (has links or attachments): {}", note.file_name());
            return Ok(false);
        }

        copy_file(&note.absolute_path, &clean_dir.join(note.file_name()))?;
        tracing::info!("Copied note: {}", note.file_name());
        Ok(true)
    }

    /// Copy notes with remote links into `link_notes/<stem>/`.
    pub fn copy_link_notes(&self, notes: &[WalkedFile]) -> Result<CopyStats, MigrateError> {
        let link_dir = self.config.output_dir.join(LINK_DIR);
        create_dir(&link_dir)?;

        let mut stats = CopyStats::default();
        for note in notes {
            match self.copy_link_note(note, &link_dir) {
                Ok(true) => stats.copied += 1,
                Ok(false) => stats.skipped += 1,
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", note.relative_path.display(), e);
                    stats.failed += 1;
                }
            }
        }
        Ok(stats)
    }

    fn copy_link_note(&self, note: &WalkedFile, link_dir: &Path) -> Result<bool, MigrateError> {
        let content = read_note(&note.absolute_path)?;
        if !self.links.is_present(&content) {
            return Ok(false);
        }

        let note_dir = link_dir.join(note.stem());
        create_dir(&note_dir)?;
        copy_file(&note.absolute_path, &note_dir.join(note.file_name()))?;
        tracing::info!("Copied note with remote links: {}", note.file_name());
        Ok(true)
    }

    /// Copy notes with attachments into `attachment_notes/<stem>/`, along with
    /// every attachment that resolves, extracting archives next to them.
    pub fn copy_attachment_notes(
        &self,
        notes: &[WalkedFile],
    ) -> Result<AttachmentStats, MigrateError> {
        let attachment_dir = self.config.output_dir.join(ATTACHMENT_DIR);
        create_dir(&attachment_dir)?;

        let mut stats = AttachmentStats::default();
        for note in notes {
            match self.copy_attachment_note(note, &attachment_dir, &mut stats) {
                Ok(true) => stats.notes.copied += 1,
                Ok(false) => stats.notes.skipped += 1,
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", note.relative_path.display(), e);
                    stats.notes.failed += 1;
                }
            }
        }
        Ok(stats)
    }

    fn copy_attachment_note(
        &self,
        note: &WalkedFile,
        attachment_dir: &Path,
        stats: &mut AttachmentStats,
    ) -> Result<bool, MigrateError> {
        let content = read_note(&note.absolute_path)?;
        if !has_attachments(&content) {
            return Ok(false);
        }

        let note_dir = attachment_dir.join(note.stem());
        create_dir(&note_dir)?;
        copy_file(&note.absolute_path, &note_dir.join(note.file_name()))?;
        tracing::info!("Copied note with attachments: {}", note.file_name());

        for name in extract_attachment_names(&content) {
            self.copy_attachment(&name, &note_dir, stats);
        }
        Ok(true)
    }

    fn copy_attachment(&self, name: &str, note_dir: &Path, stats: &mut AttachmentStats) {
        let source = self.config.attachments_dir.join(name);
        let relative = contained_path(name);
        if !source.is_file() || relative.as_os_str().is_empty() {
            tracing::warn!("  Attachment not found: {}", name);
            stats.attachments_missing += 1;
            return;
        }

        let dest = note_dir.join(&relative);
        let copied = match dest.parent() {
            Some(parent) => create_dir(parent),
            None => Ok(()),
        }
        .and_then(|()| copy_file(&source, &dest));
        if let Err(e) = copied {
            tracing::warn!("  Failed to copy attachment {}: {}", name, e);
            stats.attachments_failed += 1;
            return;
        }
        tracing::info!("  Copied attachment: {}", name);
        stats.attachments_copied += 1;

        if !is_archive(name) {
            return;
        }

        let extract_dir = note_dir.join(format!(
            "{}_extracted",
            relative.with_extension("").to_string_lossy()
        ));
        if extract_archive(&dest, &extract_dir, self.config.archive_password.as_deref()) {
            tracing::info!("  Extracted archive: {}", name);
            stats.archives_extracted += 1;
        } else {
            stats.archives_failed += 1;
        }
    }

    /// Re-read the copied link notes and download each linked folder into
    /// `remote_contents/` next to the copy.
    pub fn download_remote_contents(&self) -> Result<RemoteStats, MigrateError> {
        let link_dir = self.config.output_dir.join(LINK_DIR);
        create_dir(&link_dir)?;

        let mut stats = RemoteStats::default();
        let copies = match VaultWalker::new(&link_dir).and_then(|walker| walker.walk()) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Failed to enumerate link notes: {}", e);
                return Ok(stats);
            }
        };

        // Note copies sit at `<stem>/<note>.md`; deeper files are downloaded content.
        for copy in copies.iter().filter(|f| f.relative_path.components().count() == 2) {
            self.download_note_links(copy, &mut stats);
        }
        Ok(stats)
    }

    fn download_note_links(&self, copy: &WalkedFile, stats: &mut RemoteStats) {
        let content = match read_note(&copy.absolute_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("{}", e);
                stats.notes_failed += 1;
                return;
            }
        };

        let links = self.links.extract(&content);
        let Some(note_dir) = copy.absolute_path.parent().filter(|_| !links.is_empty()) else {
            return;
        };
        stats.notes_with_links += 1;

        let contents_dir = note_dir.join(REMOTE_CONTENTS_DIR);
        if let Err(e) = create_dir(&contents_dir) {
            tracing::warn!("{}", e);
            stats.notes_failed += 1;
            return;
        }

        for link in &links {
            tracing::info!("Downloading remote folder for {}: {}", copy.file_name(), link);
            let remote_path = resolve_remote_path(link, self.links.domain());
            match fetch_remote_folder(self.storage, remote_path.as_deref(), &contents_dir) {
                FetchOutcome::Unresolved => stats.folders_unresolved += 1,
                FetchOutcome::Complete { downloaded } => {
                    stats.folders_fetched += 1;
                    stats.files_downloaded += downloaded;
                }
                FetchOutcome::Failed { downloaded } => {
                    stats.folders_failed += 1;
                    stats.files_downloaded += downloaded;
                }
            }
        }
    }
}

/// Keep only the normal components of an attachment name so its copy stays
/// inside the note folder (`../a.png` and `/a.png` both become `a.png`).
fn contained_path(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contained_path_drops_escaping_components() {
        assert_eq!(contained_path("img/a.png"), PathBuf::from("img/a.png"));
        assert_eq!(contained_path("../a.png"), PathBuf::from("a.png"));
        assert_eq!(contained_path("/abs/a.png"), PathBuf::from("abs/a.png"));
        assert_eq!(contained_path("./a.png"), PathBuf::from("a.png"));
        assert!(contained_path("").as_os_str().is_empty());
    }
}
