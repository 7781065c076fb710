//! Operations layered on top of the filesystem port.
//!
//! Each operation is a single sequential async unit: it awaits one
//! primitive call at a time and keeps no state between calls.

pub mod ensure;
pub mod path;
pub mod probe;
pub mod remove;
pub mod text;

pub use ensure::ensure_dir;
pub use probe::exists;
pub use remove::remove_recursive;
pub use text::{read_text, write_text, ReadTextOptions, WriteTextOptions};
