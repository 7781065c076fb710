//! Replaying adapter that serves recorded interactions.

pub mod filesystem;

pub use filesystem::ReplayingFileSystem;
