use std::fmt;
use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::error::DecodeError;
use crate::stage::{NextStep, Stage};

/// Drives a stage machine against a connection buffer.
///
/// # State Machine
///
/// - `Incomplete`: return `Ok(None)`, the buffer is kept as is for the retry
/// - `Continue(next)`: `next` becomes the current stage and is evaluated
///   right away, the bytes already buffered may satisfy it
/// - `Emit(value)`: the current stage goes back to the initial stage and
///   `value` is returned
///
/// Bytes buffered while a stage is incomplete are unbounded unless a limit is
/// set with [`with_max_buffer`](Self::with_max_buffer).
///
/// Any error is fatal. Once an evaluation fails, every later call returns
/// [`DecodeError::Failed`]; the connection should be closed.
///
/// An initial stage that emits without consuming anything would emit forever,
/// every stage machine must consume at least one byte per emitted value.
pub struct StageDecoder<C, T> {
    context: C,
    initial: Stage<C, T>,
    current: Stage<C, T>,
    max_buffer: Option<usize>,
    mid_frame: bool,
    failed: bool,
}

impl<C, T> StageDecoder<C, T> {
    /// Creates a decoder that starts, and restarts after each value, at `initial`.
    pub fn new(context: C, initial: Stage<C, T>) -> Self {
        Self { context, current: initial.clone(), initial, max_buffer: None, mid_frame: false, failed: false }
    }

    /// Sets the maximum number of bytes that may sit in the buffer while the
    /// current stage still reports `Incomplete`.
    ///
    /// A value longer than the limit can then only be decoded when it arrives
    /// in one chunk, so pick a limit above the largest legal frame.
    #[must_use]
    pub fn with_max_buffer(mut self, max_buffer: usize) -> Self {
        self.max_buffer = Some(max_buffer);
        self
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn max_buffer(&self) -> Option<usize> {
        self.max_buffer
    }

    /// Returns true if a previous evaluation failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Returns true if part of a value has been decoded and the rest is
    /// still missing.
    pub fn is_mid_frame(&self) -> bool {
        self.mid_frame
    }

    /// Drops any partially evaluated stage and starts over at the initial one.
    ///
    /// The context and the failed flag are left untouched.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.mid_frame = false;
    }

    fn drive(&mut self, src: &mut BytesMut) -> Result<Option<T>, DecodeError> {
        loop {
            let before = src.len();
            let step = self.current.evaluate(&mut self.context, src)?;
            if src.len() < before {
                self.mid_frame = true;
            }

            match step {
                NextStep::Incomplete => {
                    if let Some(max_buffer) = self.max_buffer {
                        ensure!(src.len() <= max_buffer, DecodeError::too_large_buffer(src.len(), max_buffer));
                    }
                    return Ok(None);
                }
                NextStep::Continue(next) => {
                    trace!(buffered = src.len(), "continue with next stage");
                    self.current = next;
                    self.mid_frame = true;
                }
                NextStep::Emit(value) => {
                    trace!(remaining = src.len(), "emit decoded value");
                    self.current = self.initial.clone();
                    self.mid_frame = false;
                    return Ok(Some(value));
                }
            }
        }
    }
}

impl<C, T> Decoder for StageDecoder<C, T> {
    type Item = T;
    type Error = DecodeError;

    /// Evaluates stages until a value is emitted or more bytes are needed.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` when a value was decoded
    /// - `Ok(None)` when more data is needed
    /// - `Err(DecodeError)` when the input is malformed or the buffer limit
    ///   was exceeded
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        ensure!(!self.failed, DecodeError::Failed);

        self.drive(src).inspect_err(|e| {
            trace!(cause = %e, "stage evaluation failed");
            self.failed = true;
        })
    }

    /// Decodes what is left once the stream has ended.
    ///
    /// Bytes that still cannot complete a value are a truncated frame, and so
    /// is a value whose first part was already consumed, even when nothing is
    /// left in the buffer.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(value) = self.decode(buf)? {
            return Ok(Some(value));
        }

        ensure!(
            buf.is_empty() && !self.mid_frame,
            DecodeError::io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream ended inside a frame with {} undecoded bytes", buf.len())
            ))
        );

        Ok(None)
    }
}

impl<C, T> fmt::Debug for StageDecoder<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageDecoder")
            .field("max_buffer", &self.max_buffer)
            .field("mid_frame", &self.mid_frame)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
