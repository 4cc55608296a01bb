//! Scoped stream copy.
//!
//! [`pump`] moves bytes from a reader to a writer one chunk at a time and always shuts the
//! writer down before returning, so callers get a single completion signal and never have to
//! remember to flush on the error path.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Bytes held in memory at any point of a transfer.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Which end of the transfer failed.
#[derive(Debug, Error)]
pub enum PumpError {
    #[error("source read failed: {0}")]
    Source(#[source] std::io::Error),

    #[error("sink write failed: {0}")]
    Sink(#[source] std::io::Error),
}

/// Copy every byte of `source` into `sink`, returning the number of bytes copied.
///
/// Both ends are taken by value and dropped on return. The sink is shut down (flushed) on
/// success and on failure; a shutdown error is only reported when the copy itself succeeded.
pub async fn pump<R, W>(mut source: R, mut sink: W) -> Result<u64, PumpError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    let outcome = loop {
        let n = match source.read(&mut buf).await {
            Ok(0) => break Ok(total),
            Ok(n) => n,
            Err(e) => break Err(PumpError::Source(e)),
        };
        if let Err(e) = sink.write_all(&buf[..n]).await {
            break Err(PumpError::Sink(e));
        }
        total += n as u64;
    };

    let closed = sink.shutdown().await;

    match (outcome, closed) {
        (Ok(total), Ok(())) => Ok(total),
        (Ok(_), Err(e)) => Err(PumpError::Sink(e)),
        (Err(e), _) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Yields `good` bytes, then fails.
    struct FailingReader {
        good: Vec<u8>,
        served: bool,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.served {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "client went away",
                )));
            }
            self.served = true;
            buf.put_slice(&self.good);
            Poll::Ready(Ok(()))
        }
    }

    /// Records whether it was shut down.
    #[derive(Default)]
    struct TrackingWriter {
        data: Vec<u8>,
        shut_down: bool,
    }

    impl AsyncWrite for TrackingWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<io::Result<()>> {
            self.shut_down = true;
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn copies_payload_larger_than_one_chunk() {
        let payload: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let mut sink = TrackingWriter::default();

        let copied = pump(payload.as_slice(), &mut sink).await.unwrap();

        assert_eq!(copied, payload.len() as u64);
        assert_eq!(sink.data, payload);
        assert!(sink.shut_down);
    }

    #[tokio::test]
    async fn empty_source_copies_nothing() {
        let mut sink = TrackingWriter::default();
        let copied = pump(&b""[..], &mut sink).await.unwrap();
        assert_eq!(copied, 0);
        assert!(sink.shut_down);
    }

    #[tokio::test]
    async fn source_failure_still_shuts_down_sink() {
        let reader = FailingReader {
            good: b"partial".to_vec(),
            served: false,
        };
        let mut sink = TrackingWriter::default();

        let err = pump(reader, &mut sink).await.unwrap_err();

        assert!(matches!(
            err,
            PumpError::Source(ref e) if e.kind() == io::ErrorKind::ConnectionReset
        ));
        assert_eq!(sink.data, b"partial");
        assert!(sink.shut_down);
    }
}
