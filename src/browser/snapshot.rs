//! Locked-file snapshots of the cookie database
//!
//! A running browser holds its cookie database open for exclusive write
//! access, so a normal open fails. The snapshot opens the file through a
//! handle with full sharing (read, write, delete) and copies the exact
//! byte length reported up front into a private temp file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::ExportError;

const CHUNK_SIZE: usize = 1024 * 1024;
const SHORT_READ_RETRIES: u32 = 3;

/// Temporary byte-for-byte copy of a cookie database.
/// The file is removed when the snapshot is dropped.
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    /// Copy `src` into a uniquely named file under `temp_dir`.
    pub fn capture(src: &Path, temp_dir: &Path) -> Result<Snapshot, ExportError> {
        let data = read_locked(src)?;

        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Cookies".to_string());
        let path = temp_dir.join(format!("cookiedump_{}_{}", Uuid::new_v4(), file_name));

        // Guard first so a failed write still cleans up the partial file.
        let snapshot = Snapshot { path };
        fs::write(&snapshot.path, &data)?;

        tracing::debug!(
            "copied {} bytes from {} to {}",
            data.len(),
            src.display(),
            snapshot.path.display()
        );
        Ok(snapshot)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Read the full contents of a possibly-locked file.
///
/// The length is taken from metadata before reading; the loop then reads
/// until exactly that many bytes are in hand, tolerating a bounded number
/// of transient zero-length reads.
fn read_locked(path: &Path) -> Result<Vec<u8>, ExportError> {
    let mut file = open_shared(path)?;

    let size = file.metadata()?.len() as usize;
    if size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} reports zero size", path.display()),
        )
        .into());
    }

    let mut data = Vec::with_capacity(size);
    let mut buf = vec![0u8; CHUNK_SIZE.min(size)];
    let mut short_reads = 0;

    while data.len() < size {
        let want = buf.len().min(size - data.len());
        let n = file.read(&mut buf[..want])?;
        if n == 0 {
            short_reads += 1;
            if short_reads > SHORT_READ_RETRIES {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "short read: {} of {} bytes from {}",
                        data.len(),
                        size,
                        path.display()
                    ),
                )
                .into());
            }
            continue;
        }
        short_reads = 0;
        data.extend_from_slice(&buf[..n]);
    }

    Ok(data)
}

/// Open with FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE so
/// the open succeeds while the browser holds the database.
#[cfg(windows)]
fn open_shared(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_SHARE_READ: u32 = 0x00000001;
    const FILE_SHARE_WRITE: u32 = 0x00000002;
    const FILE_SHARE_DELETE: u32 = 0x00000004;

    OpenOptions::new()
        .read(true)
        .share_mode(FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE)
        .open(path)
}

#[cfg(not(windows))]
fn open_shared(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}
