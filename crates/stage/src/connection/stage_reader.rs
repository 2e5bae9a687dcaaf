use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{error, info, warn};

use crate::codec::StageDecoder;
use crate::error::DecodeError;

/// Initial capacity of the read buffer.
pub const DEFAULT_READ_CAPACITY: usize = 8 * 1024;

/// Decodes values from an async byte stream.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `C`: The decoding context type
/// * `T`: The decoded value type
#[derive(Debug)]
pub struct StageReader<R, C, T> {
    framed_read: FramedRead<R, StageDecoder<C, T>>,
}

impl<R, C, T> StageReader<R, C, T>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R, decoder: StageDecoder<C, T>) -> Self {
        Self::with_capacity(reader, decoder, DEFAULT_READ_CAPACITY)
    }

    pub fn with_capacity(reader: R, decoder: StageDecoder<C, T>, capacity: usize) -> Self {
        Self { framed_read: FramedRead::with_capacity(reader, decoder, capacity) }
    }

    pub fn decoder(&self) -> &StageDecoder<C, T> {
        self.framed_read.decoder()
    }

    pub fn decoder_mut(&mut self) -> &mut StageDecoder<C, T> {
        self.framed_read.decoder_mut()
    }

    /// Number of bytes read from the stream but not decoded yet.
    pub fn buffered(&self) -> usize {
        self.framed_read.read_buffer().len()
    }

    pub fn into_inner(self) -> R {
        self.framed_read.into_inner()
    }

    /// Waits for the next decoded value.
    ///
    /// Returns `None` once the stream has ended and every buffered value has
    /// been handed out.
    pub async fn next_frame(&mut self) -> Option<Result<T, DecodeError>> {
        self.framed_read.next().await
    }

    /// Decodes values until the stream ends, passing each one to `f`.
    ///
    /// A decode error ends processing; the error is logged and returned, and
    /// the caller is expected to close the connection. Malformed input is
    /// logged at `error`, a failing or truncated stream at `warn`.
    pub async fn process<F>(mut self, mut f: F) -> Result<(), DecodeError>
    where
        F: FnMut(T),
    {
        loop {
            match self.next_frame().await {
                Some(Ok(value)) => f(value),

                Some(Err(e)) if e.is_decode() => {
                    error!(cause = %e, "can't decode next value, connection shutdown");
                    return Err(e);
                }

                Some(Err(e)) => {
                    warn!(cause = %e, "stream failed before the value was complete, connection shutdown");
                    return Err(e);
                }

                None => {
                    info!("cant read more bytes, break this connection down");
                    return Ok(());
                }
            }
        }
    }
}
