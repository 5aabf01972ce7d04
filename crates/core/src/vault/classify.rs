//! Note classification by content.

use serde::Serialize;

use super::extractor::{MARKDOWN_EMBED_RE, RemoteLinkPattern, WIKI_EMBED_RE};

/// Which predicates a note satisfies. Both may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NoteClass {
    pub remote_links: bool,
    pub attachments: bool,
}

impl NoteClass {
    /// Neither remote links nor attachments.
    pub fn is_clean(&self) -> bool {
        !self.remote_links && !self.attachments
    }
}

pub fn has_remote_links(text: &str, pattern: &RemoteLinkPattern) -> bool {
    pattern.is_present(text)
}

pub fn has_attachments(text: &str) -> bool {
    MARKDOWN_EMBED_RE.is_match(text) || WIKI_EMBED_RE.is_match(text)
}

pub fn classify(text: &str, pattern: &RemoteLinkPattern) -> NoteClass {
    NoteClass {
        remote_links: has_remote_links(text, pattern),
        attachments: has_attachments(text),
    }
}
