//! Transport boundary for shipped log documents

pub mod tcp;

pub use tcp::TcpSender;

use std::io;

/// Capability contract for the transport collaborator.
///
/// A sender owns delivery entirely: buffering, batching, and any retry or
/// backoff policy happen behind this trait. The sink hands over one
/// serialized document per [`send`](LogSender::send) call and never retries
/// on its own.
pub trait LogSender: Send + Sync {
    /// Transmit one already-serialized document
    fn send(&self, payload: &[u8]) -> io::Result<()>;

    /// Flush or await outstanding deliveries
    fn sync(&self) -> io::Result<()>;

    /// Raw byte channel outside the document path; not used by the sink's
    /// write path
    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize>;
}
