//! # Printer Transport Layer
//!
//! Gets a finished raster job to the printer and waits for it to come out.
//!
//! ## Printer Identifiers
//!
//! | Identifier | Backend |
//! |------------|---------|
//! | `usb://0x04f9:0x209b` | [`usb`]: USB printer class device found by vendor/product id |
//! | `usb://0x04f9:0x209b/000G0Z123456` | same, restricted to one serial number |
//! | `file:///dev/usb/lp0` or `/dev/usb/lp0` | [`file`]: device node opened directly |
//! | `tcp://192.168.1.20` | [`network`]: raw TCP, port 9100 unless given |
//!
//! ## Blocking Send
//!
//! [`send`] writes the whole job, then reads status replies until the
//! printer reports "printing completed" or an error. If neither arrives
//! within [`STATUS_WAIT`], the job is assumed printed and a warning is
//! logged.

pub mod file;
pub mod network;
pub mod usb;

pub use file::FileBackend;
pub use network::NetworkBackend;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::TransportError;
use crate::protocol::status::{self, StatusType};

/// How long to wait for the printer to confirm a job.
pub const STATUS_WAIT: Duration = Duration::from_secs(10);

/// How long each status read waits for data.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default raw printing port for network printers.
pub const DEFAULT_TCP_PORT: u16 = 9100;

/// A connection to a printer.
pub trait Backend: Send {
    /// Write all bytes and flush.
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Read one status reply, waiting at most `timeout`. `None` means nothing arrived.
    fn read_status(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError>;
}

/// Where the printer is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterIdentifier {
    Usb {
        vendor: u16,
        product: u16,
        serial: Option<String>,
    },
    File(PathBuf),
    Tcp {
        host: String,
        port: u16,
    },
}

fn parse_hex_id(s: &str) -> Option<u16> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).ok()
}

impl FromStr for PrinterIdentifier {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TransportError::Identifier(s.to_string());

        if let Some(rest) = s.strip_prefix("usb://") {
            let (ids, serial) = match rest.split_once('/') {
                Some((ids, serial)) if !serial.is_empty() => (ids, Some(serial.to_string())),
                Some((ids, _)) => (ids, None),
                None => (rest, None),
            };
            let (vendor, product) = ids.split_once(':').ok_or_else(invalid)?;
            return Ok(Self::Usb {
                vendor: parse_hex_id(vendor).ok_or_else(invalid)?,
                product: parse_hex_id(product).ok_or_else(invalid)?,
                serial,
            });
        }

        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::File(PathBuf::from(path)));
        }

        if let Some(address) = s.strip_prefix("tcp://") {
            let (host, port) = match address.rsplit_once(':') {
                Some((host, port)) => (host, port.parse().map_err(|_| invalid())?),
                None => (address, DEFAULT_TCP_PORT),
            };
            if host.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::Tcp {
                host: host.to_string(),
                port,
            });
        }

        if s.starts_with('/') {
            return Ok(Self::File(PathBuf::from(s)));
        }

        Err(invalid())
    }
}

impl fmt::Display for PrinterIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usb {
                vendor,
                product,
                serial,
            } => {
                write!(f, "usb://0x{:04x}:0x{:04x}", vendor, product)?;
                if let Some(serial) = serial {
                    write!(f, "/{}", serial)?;
                }
                Ok(())
            }
            Self::File(path) => write!(f, "file://{}", path.display()),
            Self::Tcp { host, port } => write!(f, "tcp://{}:{}", host, port),
        }
    }
}

/// Open the backend that matches an identifier.
pub fn open(identifier: &PrinterIdentifier) -> Result<Box<dyn Backend>, TransportError> {
    match identifier {
        PrinterIdentifier::Usb {
            vendor,
            product,
            serial,
        } => Ok(Box::new(usb::open(*vendor, *product, serial.as_deref())?)),
        PrinterIdentifier::File(path) => Ok(Box::new(FileBackend::open(path)?)),
        PrinterIdentifier::Tcp { host, port } => Ok(Box::new(NetworkBackend::connect(host, *port)?)),
    }
}

/// What is known about a job once [`send`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Written without waiting for the printer.
    Sent,
    /// The printer reported the job as printed.
    Printed,
    /// Written, but the printer never confirmed it.
    Unconfirmed,
}

/// Send a job and, when `blocking`, wait for the printer's verdict.
pub fn send(
    backend: &mut dyn Backend,
    instructions: &[u8],
    blocking: bool,
) -> Result<SendOutcome, TransportError> {
    send_with_wait(backend, instructions, blocking, STATUS_WAIT)
}

pub(crate) fn send_with_wait(
    backend: &mut dyn Backend,
    instructions: &[u8],
    blocking: bool,
    wait: Duration,
) -> Result<SendOutcome, TransportError> {
    backend.write_all(instructions)?;
    log::debug!("Sent {} bytes to printer", instructions.len());

    if !blocking {
        return Ok(SendOutcome::Sent);
    }

    let start = Instant::now();
    while start.elapsed() < wait {
        let Some(raw) = backend.read_status(POLL_INTERVAL)? else {
            continue;
        };
        let Some(reply) = status::parse(&raw) else {
            log::debug!("Ignoring {} bytes that are not a status reply", raw.len());
            continue;
        };

        match reply.status_type {
            StatusType::PrintingCompleted => return Ok(SendOutcome::Printed),
            StatusType::ErrorOccurred => {
                return Err(TransportError::Printer(reply.errors.join(", ")));
            }
            _ if reply.has_errors() => {
                return Err(TransportError::Printer(reply.errors.join(", ")));
            }
            other => log::debug!("Printer status: {:?}, phase {:?}", other, reply.phase),
        }
    }

    log::warn!(
        "Printer did not confirm the job within {} seconds",
        wait.as_secs_f32()
    );
    Ok(SendOutcome::Unconfirmed)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryBackend;
    use super::*;

    #[test]
    fn test_parse_usb_identifier() {
        let id: PrinterIdentifier = "usb://0x04f9:0x209b".parse().unwrap();
        assert_eq!(
            id,
            PrinterIdentifier::Usb {
                vendor: 0x04f9,
                product: 0x209b,
                serial: None
            }
        );
        assert_eq!(id.to_string(), "usb://0x04f9:0x209b");
    }

    #[test]
    fn test_parse_usb_identifier_with_serial() {
        let id: PrinterIdentifier = "usb://04F9:209B/000G0Z123456".parse().unwrap();
        assert_eq!(
            id,
            PrinterIdentifier::Usb {
                vendor: 0x04f9,
                product: 0x209b,
                serial: Some("000G0Z123456".to_string())
            }
        );
    }

    #[test]
    fn test_parse_file_and_tcp() {
        assert_eq!(
            "file:///dev/usb/lp0".parse::<PrinterIdentifier>().unwrap(),
            PrinterIdentifier::File(PathBuf::from("/dev/usb/lp0"))
        );
        assert_eq!(
            "/dev/usb/lp1".parse::<PrinterIdentifier>().unwrap(),
            PrinterIdentifier::File(PathBuf::from("/dev/usb/lp1"))
        );
        assert_eq!(
            "tcp://192.168.1.20".parse::<PrinterIdentifier>().unwrap(),
            PrinterIdentifier::Tcp {
                host: "192.168.1.20".to_string(),
                port: 9100
            }
        );
        assert_eq!(
            "tcp://printer.local:9101".parse::<PrinterIdentifier>().unwrap().to_string(),
            "tcp://printer.local:9101"
        );
    }

    #[test]
    fn test_reject_bad_identifiers() {
        for bad in ["usb://04f9", "usb://zz:209b", "lpt1", "tcp://", "tcp://host:port", "file://"] {
            assert!(
                matches!(bad.parse::<PrinterIdentifier>(), Err(TransportError::Identifier(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_blocking_send_waits_for_completion() {
        let mut backend = MemoryBackend::replying(vec![
            status::frame(0x00, 0x00, 0, 0).to_vec(),
            status::frame(0x06, 0x01, 0, 0).to_vec(),
            status::frame(0x01, 0x00, 0, 0).to_vec(),
        ]);
        let outcome = send(&mut backend, b"job", true).unwrap();
        assert_eq!(outcome, SendOutcome::Printed);
        assert_eq!(backend.written.lock().unwrap().as_slice(), b"job");
        assert!(backend.replies.lock().unwrap().is_empty());
    }

    #[test]
    fn test_printer_error_fails_send() {
        let mut backend = MemoryBackend::replying(vec![status::frame(0x02, 0x00, 0x01, 0).to_vec()]);
        match send(&mut backend, b"job", true) {
            Err(TransportError::Printer(msg)) => assert_eq!(msg, "No media when printing"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_blocking_send_does_not_read() {
        let mut backend = MemoryBackend::replying(vec![status::frame(0x02, 0x00, 0x01, 0).to_vec()]);
        assert_eq!(send(&mut backend, b"job", false).unwrap(), SendOutcome::Sent);
        assert_eq!(backend.replies.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_silent_printer_is_unconfirmed() {
        let mut backend = MemoryBackend::default();
        let outcome =
            send_with_wait(&mut backend, b"job", true, Duration::from_millis(20)).unwrap();
        assert_eq!(outcome, SendOutcome::Unconfirmed);
    }

    #[test]
    fn test_garbage_replies_are_skipped() {
        let mut backend = MemoryBackend::replying(vec![
            vec![0xFF; 5],
            status::frame(0x01, 0x00, 0, 0).to_vec(),
        ]);
        assert_eq!(send(&mut backend, b"job", true).unwrap(), SendOutcome::Printed);
    }
}
