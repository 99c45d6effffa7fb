//! TCP sender for remote document delivery
//!
//! Ships each document as one newline-delimited line over a TCP stream.
//! Suitable for collectors that ingest NDJSON; anything beyond a single
//! reconnect attempt (batching, spooling, backoff) belongs in a dedicated
//! sender implementation.

use super::LogSender;
use crate::core::error::{Result, SinkError};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Sender that delivers documents to a remote TCP collector
///
/// # Example
///
/// ```no_run
/// use logship::prelude::*;
/// use std::sync::Arc;
///
/// let sender = Arc::new(TcpSender::connect("logs.internal:8071")?);
/// let sink = ShipperSink::new(sender, Level::Info);
/// # Ok::<(), logship::SinkError>(())
/// ```
pub struct TcpSender {
    stream: Mutex<Option<TcpStream>>,
    address: String,
    reconnect_on_error: bool,
}

impl TcpSender {
    /// Connect to a collector endpoint
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Construction`] if the connection cannot be
    /// established.
    pub fn connect(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream =
            Self::open(&address).map_err(|e| SinkError::construction(address.clone(), e))?;

        Ok(Self {
            stream: Mutex::new(Some(stream)),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable the single reconnect-and-resend attempt on send
    /// failure
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn open(address: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(address)?;

        // Timeouts prevent hanging; TCP_NODELAY keeps latency low
        stream.set_write_timeout(Some(Duration::from_secs(5)))?;
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        stream.set_nodelay(true)?;

        Ok(stream)
    }

    fn transmit(&self, bytes: &[u8]) -> io::Result<()> {
        let mut guard = self.stream.lock();

        let result = match guard.as_mut() {
            Some(stream) => stream.write_all(bytes),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "stream not connected",
            )),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // connection lost
                *guard = None;

                if !self.reconnect_on_error {
                    return Err(e);
                }

                match Self::open(&self.address) {
                    Ok(mut stream) => {
                        stream.write_all(bytes)?;
                        *guard = Some(stream);
                        Ok(())
                    }
                    Err(reconnect_err) => Err(io::Error::new(
                        e.kind(),
                        format!("send failed: {} (reconnect: {})", e, reconnect_err),
                    )),
                }
            }
        }
    }
}

impl LogSender for TcpSender {
    fn send(&self, payload: &[u8]) -> io::Result<()> {
        let mut framed = Vec::with_capacity(payload.len() + 1);
        framed.extend_from_slice(payload);
        framed.push(b'\n');
        self.transmit(&framed)
    }

    fn sync(&self) -> io::Result<()> {
        if let Some(stream) = self.stream.lock().as_mut() {
            stream.flush()?;
        }
        Ok(())
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        self.transmit(buf)?;
        Ok(buf.len())
    }
}

impl Drop for TcpSender {
    fn drop(&mut self) {
        let _ = self.sync();
    }
}
