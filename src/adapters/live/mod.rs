//! Live adapter backed by the host filesystem.

pub mod filesystem;

pub use filesystem::LiveFileSystem;
