//! Text commands: `read` and `write`.

use std::path::Path;

use crate::context::ServiceContext;
use crate::encoding::Encoding;
use crate::open_mode::OpenMode;
use crate::ops::{self, ReadTextOptions, WriteTextOptions};

/// Print a file decoded with `encoding`.
///
/// # Errors
///
/// Returns the read's error message.
pub async fn read(
    ctx: &ServiceContext,
    path: &Path,
    encoding: Encoding,
    flag: OpenMode,
) -> Result<String, String> {
    let options = ReadTextOptions { encoding, flag };
    ops::read_text(ctx.fs.as_ref(), path, &options).await.map_err(|e| e.to_string())
}

/// Write (or append) `data` to a file.
///
/// # Errors
///
/// Returns the write's error message.
pub async fn write(
    ctx: &ServiceContext,
    path: &Path,
    data: &str,
    encoding: Encoding,
    flag: OpenMode,
    mode: Option<u32>,
) -> Result<String, String> {
    let options = WriteTextOptions { encoding, flag, mode };
    ops::write_text(ctx.fs.as_ref(), path, data, &options).await.map_err(|e| e.to_string())?;
    Ok(String::new())
}
