//! # Network Transport
//!
//! Raw TCP printing (port 9100) for QL models with Ethernet or Wi-Fi.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::Backend;
use crate::error::TransportError;
use crate::protocol::status::STATUS_LEN;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct NetworkBackend {
    stream: TcpStream,
}

impl NetworkBackend {
    pub fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let addr = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| TransportError::NotFound(format!("cannot resolve {}", host)))?;
        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)?;
        log::info!("Connected to network printer at {}", addr);
        Ok(Self { stream })
    }
}

impl Backend for NetworkBackend {
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(data)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read_status(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
        self.stream.set_read_timeout(Some(timeout.max(Duration::from_millis(1))))?;
        let mut buf = [0u8; STATUS_LEN];
        match self.stream.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(n) => Ok(Some(buf[..n].to_vec())),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
