//! Implementations of the filesystem port.

pub mod live;
pub mod recording;
pub mod replaying;
