use std::io;
use thiserror::Error;

/// Hard decoding failures.
///
/// "Not enough bytes yet" is never an error, it is [`NextStep::Incomplete`](crate::stage::NextStep::Incomplete).
/// Every variant here is fatal for the connection that produced it: the
/// decoder has no well defined point to resume from.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid {encoding} text: {reason}")]
    InvalidEncoding { encoding: &'static str, reason: String },

    #[error("protocol violation: {reason}")]
    Protocol { reason: String },

    #[error("buffered bytes too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeBuffer { current_size: usize, max_size: usize },

    #[error("decoder has already failed, connection must be closed")]
    Failed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DecodeError {
    pub fn invalid_encoding<S: ToString>(encoding: &'static str, reason: S) -> Self {
        Self::InvalidEncoding { encoding, reason: reason.to_string() }
    }

    pub fn protocol<S: ToString>(reason: S) -> Self {
        Self::Protocol { reason: reason.to_string() }
    }

    pub fn too_large_buffer(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeBuffer { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true if the error was raised by the stages themselves rather
    /// than by the underlying stream.
    #[inline]
    pub fn is_decode(&self) -> bool {
        !matches!(self, DecodeError::Io { .. })
    }
}
