//! Remote-storage links: resolving them to folders and fetching contents.

pub mod client;
pub mod fetch;
pub mod memory;
pub mod resolver;

pub use client::{DiskClient, EntryKind, RemoteEntry, RemoteError, RemoteStorage};
pub use fetch::{FetchOutcome, fetch_remote_folder};
pub use memory::MemoryStorage;
pub use resolver::resolve_remote_path;
