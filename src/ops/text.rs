//! Text file read/write with encoding and open-mode defaults.

use std::io;
use std::path::Path;

use crate::encoding::Encoding;
use crate::error::FsError;
use crate::open_mode::OpenMode;
use crate::ports::filesystem::{FileOptions, FileSystem};

/// Options for [`read_text`]. Defaults to UTF-8 and `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadTextOptions {
    /// Encoding used to decode the file bytes.
    pub encoding: Encoding,
    /// Open mode.
    pub flag: OpenMode,
}

/// Options for [`write_text`]. Defaults to UTF-8 and `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteTextOptions {
    /// Encoding used to turn the text into bytes.
    pub encoding: Encoding,
    /// Open mode; the `a` family appends.
    pub flag: OpenMode,
    /// Permission bits for a newly created file.
    pub mode: Option<u32>,
}

impl Default for WriteTextOptions {
    fn default() -> Self {
        Self { encoding: Encoding::Utf8, flag: OpenMode::Write, mode: None }
    }
}

impl WriteTextOptions {
    /// Default options with an append flag.
    #[must_use]
    pub fn append() -> Self {
        Self { flag: OpenMode::Append, ..Self::default() }
    }
}

/// Reads the whole file at `path` as text.
///
/// # Errors
///
/// Any failure to open or read the file, unchanged.
pub async fn read_text(
    fs: &dyn FileSystem,
    path: &Path,
    options: &ReadTextOptions,
) -> Result<String, FsError> {
    let bytes = fs.read_file(path, options.flag).await?;
    Ok(options.encoding.decode(&bytes))
}

/// Writes `data` to `path`, appending when the flag is an append mode and
/// truncating otherwise.
///
/// # Errors
///
/// [`FsError::Other`] with `InvalidData` when `data` cannot be encoded, or
/// any failure to open or write the file.
pub async fn write_text(
    fs: &dyn FileSystem,
    path: &Path,
    data: &str,
    options: &WriteTextOptions,
) -> Result<(), FsError> {
    let bytes = options.encoding.encode(data).map_err(|e| FsError::Other {
        op: "write",
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    let file_options = FileOptions { flag: options.flag, mode: options.mode };
    if options.flag.is_append() {
        fs.append_file(path, &bytes, file_options).await
    } else {
        fs.write_file(path, &bytes, file_options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fsawait_text_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn append_then_read_back() {
        let dir = scratch_dir();
        let file = dir.join("greeting.txt");
        let append = WriteTextOptions::append();

        write_text(&LiveFileSystem, &file, "hello", &append).await.unwrap();
        let text = read_text(&LiveFileSystem, &file, &ReadTextOptions::default()).await.unwrap();
        assert_eq!(text, "hello");

        write_text(&LiveFileSystem, &file, "world", &append).await.unwrap();
        let text = read_text(&LiveFileSystem, &file, &ReadTextOptions::default()).await.unwrap();
        assert_eq!(text, "helloworld");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn default_write_truncates() {
        let dir = scratch_dir();
        let file = dir.join("note.txt");
        let options = WriteTextOptions::default();

        write_text(&LiveFileSystem, &file, "first draft", &options).await.unwrap();
        write_text(&LiveFileSystem, &file, "final", &options).await.unwrap();

        let text = read_text(&LiveFileSystem, &file, &ReadTextOptions::default()).await.unwrap();
        assert_eq!(text, "final");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn honours_encoding() {
        let dir = scratch_dir();
        let file = dir.join("latin1.txt");
        let options = WriteTextOptions { encoding: Encoding::Latin1, ..WriteTextOptions::default() };

        write_text(&LiveFileSystem, &file, "café", &options).await.unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), vec![0x63, 0x61, 0x66, 0xe9]);

        let read = ReadTextOptions { encoding: Encoding::Hex, ..ReadTextOptions::default() };
        let hex = read_text(&LiveFileSystem, &file, &read).await.unwrap();
        assert_eq!(hex, "636166e9");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn bad_hex_is_rejected_before_touching_disk() {
        let dir = scratch_dir();
        let file = dir.join("never.bin");
        let options = WriteTextOptions { encoding: Encoding::Hex, ..WriteTextOptions::default() };

        let err = write_text(&LiveFileSystem, &file, "xyz", &options).await.unwrap_err();
        match err {
            FsError::Other { source, .. } => assert_eq!(source.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected Other, got {other:?}"),
        }
        assert!(!file.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn reading_a_missing_file_is_not_found() {
        let dir = scratch_dir();
        let err = read_text(&LiveFileSystem, &dir.join("absent"), &ReadTextOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound { op: "read", .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exclusive_append_applies_mode_on_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir();
        let file = dir.join("log.txt");
        let options = WriteTextOptions {
            flag: OpenMode::AppendExclusive,
            mode: Some(0o600),
            ..WriteTextOptions::default()
        };

        write_text(&LiveFileSystem, &file, "entry", &options).await.unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);

        let err = write_text(&LiveFileSystem, &file, "again", &options).await.unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
