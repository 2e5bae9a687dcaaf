//! Stage builders for common protocol reading intents.
//!
//! Every combinator takes a continuation `k` and returns a [`Stage`](crate::stage::Stage).
//! The stage gates on the buffered bytes and returns
//! [`NextStep::Incomplete`](crate::stage::NextStep::Incomplete) without touching
//! the buffer until its condition holds, then hands over to `k` in the same
//! evaluation.
//!
//! - Byte counts: [`ensure_bytes`], [`read_bytes`] and their `_dynamic` variants
//! - Delimiters: [`ensure_delimiter`], [`ensure_delimiter_dynamic`]
//! - Lines: [`read_line`]
//! - Fixed width integers: [`read_u8`], [`read_u16_be`], [`read_u32_be`]
//!
//! The `_dynamic` variants take a getter over the decoding context instead of
//! a constant. The getter runs on every evaluation, so a threshold parsed by an
//! earlier stage (a length prefix, say) is picked up on each retry.
//!
//! # Example
//!
//! Length prefixed frames: a big endian `u16` length followed by that many
//! bytes.
//!
//! ```no_run
//! use bytes::Bytes;
//! use micro_stage::combinator::{read_bytes_dynamic, read_u16_be};
//! use micro_stage::stage::{NextStep, Stage};
//!
//! #[derive(Default)]
//! struct Frame {
//!     length: usize,
//! }
//!
//! fn body() -> Stage<Frame, Bytes> {
//!     read_bytes_dynamic(|frame: &Frame| frame.length, |_, bytes| Ok(NextStep::Emit(bytes)))
//! }
//!
//! fn header() -> Stage<Frame, Bytes> {
//!     read_u16_be(|frame: &mut Frame, length| {
//!         frame.length = usize::from(length);
//!         Ok(body().into())
//!     })
//! }
//! ```

mod count;
mod delimiter;
mod line;

pub use count::{ensure_bytes, ensure_bytes_dynamic, read_bytes, read_bytes_dynamic, read_u8, read_u16_be, read_u32_be};
pub use delimiter::{ensure_delimiter, ensure_delimiter_dynamic};
pub use line::read_line;
