//! Character decoding used by line oriented stages.
//!
//! The codec is always passed in explicitly, there is no process wide
//! default charset.

use crate::error::DecodeError;

/// Decodes a complete byte sequence into a `String`.
///
/// A failure means the bytes are malformed for this encoding. It is a
/// protocol error, never a request for more data.
pub trait TextCodec {
    /// Short lowercase name used in error messages.
    fn name(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;
}

/// UTF-8, rejecting invalid sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

/// 7-bit US-ASCII, rejecting any byte above `0x7f`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascii;

/// ISO-8859-1. Every byte maps to the code point of the same value, so
/// decoding cannot fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl TextCodec for Utf8 {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(e) => Err(DecodeError::invalid_encoding(self.name(), e)),
        }
    }
}

impl TextCodec for Ascii {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
            let reason = format!("invalid byte {:#04x} at offset {offset}", bytes[offset]);
            return Err(DecodeError::invalid_encoding(self.name(), reason));
        }

        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

impl TextCodec for Latin1 {
    fn name(&self) -> &'static str {
        "latin-1"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}
