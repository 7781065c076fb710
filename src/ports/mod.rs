//! Port traits defining external boundaries.
//!
//! The only boundary is the host filesystem. Implementations live in
//! `src/adapters/`.

pub mod filesystem;

pub use filesystem::{DirMode, EntryKind, EntryMetadata, FileOptions, FileSystem, FsFuture};
