//! Counters collected during a migration run.

use serde::Serialize;

/// Counters for a pass that copies matching notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
    /// Notes copied into the category.
    pub copied: usize,
    /// Notes that did not belong to the category.
    pub skipped: usize,
    /// Notes that could not be read or copied.
    pub failed: usize,
}

/// Counters for the attachment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachmentStats {
    pub notes: CopyStats,
    pub attachments_copied: usize,
    pub attachments_missing: usize,
    pub attachments_failed: usize,
    pub archives_extracted: usize,
    pub archives_failed: usize,
}

/// Counters for the remote materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoteStats {
    /// Copied notes that contained at least one remote link.
    pub notes_with_links: usize,
    /// Copied notes that could not be read or prepared.
    pub notes_failed: usize,
    pub folders_fetched: usize,
    pub folders_failed: usize,
    pub folders_unresolved: usize,
    pub files_downloaded: usize,
}

/// Summary of a full migration run. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub notes_found: usize,
    pub clean: CopyStats,
    pub links: CopyStats,
    pub attachments: AttachmentStats,
    pub remote: RemoteStats,
}

impl MigrationReport {
    /// Notes that failed in any of the three copy passes.
    pub fn notes_failed(&self) -> usize {
        self.clean.failed + self.links.failed + self.attachments.notes.failed
    }
}
