//! Vault file discovery and content inspection.
//!
//! This module walks vault directories, classifies notes by what they
//! embed or link to, and extracts attachment and remote-link references.

pub mod classify;
pub mod extractor;
pub mod walker;

pub use classify::{NoteClass, classify, has_attachments, has_remote_links};
pub use extractor::{RemoteLinkPattern, extract_attachment_names, extract_remote_links};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};
