//! # Device File Transport
//!
//! Talks to a printer through a character device, normally the Linux
//! `usblp` node (`/dev/usb/lp0`). The node is opened read-write so status
//! replies can be read back on the same descriptor.
//!
//! ## Permissions
//!
//! `usblp` nodes belong to the `lp` group on most distributions:
//!
//! ```bash
//! sudo usermod -aG lp $USER
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Backend;
use crate::error::TransportError;
use crate::protocol::status::STATUS_LEN;

/// A printer reached through a device node.
pub struct FileBackend {
    file: File,
    path: PathBuf,
}

impl FileBackend {
    /// Open the device read-write.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (user not in the `lp` group)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => TransportError::NotFound(path.display().to_string()),
                _ => TransportError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to open {}: {}", path.display(), e),
                )),
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.file.write_all(data)?;
        self.file.flush()?;
        Ok(())
    }

    fn read_status(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
        if !wait_readable(&self.file, timeout)? {
            return Ok(None);
        }

        let mut buf = [0u8; STATUS_LEN];
        let n = match self.file.read(&mut buf) {
            Ok(n) => n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => 0,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            // Nothing to read yet; don't spin on EOF.
            std::thread::sleep(timeout);
            return Ok(None);
        }
        Ok(Some(buf[..n].to_vec()))
    }
}

/// Wait until the descriptor has data or `timeout` passes.
#[cfg(unix)]
fn wait_readable(file: &File, timeout: Duration) -> Result<bool, TransportError> {
    use std::os::unix::io::AsRawFd;

    let mut pfd = libc::pollfd {
        fd: file.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout_ms = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

    let result = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if result < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err.into());
    }
    Ok(result > 0 && pfd.revents & libc::POLLIN != 0)
}

#[cfg(not(unix))]
fn wait_readable(_file: &File, timeout: Duration) -> Result<bool, TransportError> {
    // No poll(2); status replies are not read on this platform.
    std::thread::sleep(timeout);
    Ok(false)
}
