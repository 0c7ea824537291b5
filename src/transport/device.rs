//! # Device Node Transport
//!
//! Writes command batches to a printer exposed as a character device.
//!
//! ## Supported Devices
//!
//! | Connection | Typical node |
//! |------------|--------------|
//! | USB printer class | `/dev/usb/lp0` |
//! | USB serial adapter | `/dev/ttyUSB0` |
//! | RS-232 | `/dev/ttyS0` |
//!
//! ## TTY Configuration
//!
//! Serial nodes are switched to raw mode so the `GW` raster payload passes
//! through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL cleared
//! - **No software flow control**: IXON, IXOFF, IXANY cleared (0x11 and 0x13
//!   occur in raster data)
//! - **No output processing**: OPOST cleared, so `\n` is never expanded
//! - **8-bit characters**: CS8, no parity
//!
//! USB printer class nodes are not ttys and are used as-is.
//!
//! ## Chunked Writes
//!
//! Large batches (mostly graphics) are written in 4096 byte chunks with a
//! short pause between them.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::thread;
use std::time::Duration;

use super::{DeviceHandle, Transport};
use crate::error::LabelError;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Transport
///
/// ## Example
///
/// ```no_run
/// use eplabel::transport::{DeviceHandle, Transport};
/// use eplabel::protocol::commands;
///
/// let mut transport = DeviceHandle::new("/dev/usb/lp0").open()?;
/// transport.write_all(&commands::auto_sense())?;
///
/// # Ok::<(), eplabel::error::LabelError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open the device behind `handle` for writing.
    ///
    /// ## Errors
    ///
    /// `Transport` if the node does not exist, permission is denied (the
    /// user may need to be in the `lp` or `dialout` group), or a tty cannot
    /// be switched to raw mode.
    pub fn open(handle: &DeviceHandle) -> Result<Self, LabelError> {
        let path = handle.path();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            LabelError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let fd = file.as_raw_fd();
        if is_tty(fd) {
            configure_tty_raw(fd)?;
        }
        log::debug!("opened printer device {}", path.display());

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for DeviceTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| LabelError::Transport(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file
                    .write_all(chunk)
                    .map_err(|e| LabelError::Transport(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| LabelError::Transport(format!("Flush failed: {}", e)))
    }
}

fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Put a tty into raw 8-bit mode.
fn configure_tty_raw(fd: i32) -> Result<(), LabelError> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(LabelError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(LabelError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let handle = DeviceHandle::new("/nonexistent/eplabel-test-device");
        assert!(matches!(handle.open(), Err(LabelError::Transport(_))));
    }

    #[test]
    fn test_writes_to_plain_file() {
        let path = std::env::temp_dir().join(format!("eplabel-device-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let mut transport = DeviceHandle::new(&path).open().unwrap();
        transport.set_chunk_size(3);
        transport.set_chunk_delay(Duration::ZERO);
        transport.write_all(b"N\nP1\n").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"N\nP1\n");
        std::fs::remove_file(&path).unwrap();
    }
}
