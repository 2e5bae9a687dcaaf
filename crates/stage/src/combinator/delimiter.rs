//! Delimiter search.
//!
//! The scan starts from the read position on every evaluation. A stream that
//! trickles in many small fragments before the delimiter shows up is scanned
//! again each time, which is quadratic in the worst case. In exchange the
//! stage keeps no scan state and stays freely clonable.

use bytes::BytesMut;
use tracing::trace;

use crate::buffer::Cursor;
use crate::stage::{NextStep, Stage, StageResult, stage};

/// Waits until `delimiter` is buffered, then calls `k` with `n`, the number
/// of bytes up to and including the first delimiter.
///
/// Nothing is consumed here. `k` must consume exactly `n` bytes, otherwise
/// the next stage starts in the middle of a field.
pub fn ensure_delimiter<C, T, K>(delimiter: u8, k: K) -> Stage<C, T>
where
    K: Fn(&mut C, usize, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
{
    ensure_delimiter_dynamic(move |_: &C| delimiter, k)
}

/// Like [`ensure_delimiter`], with the delimiter read from the context on
/// every evaluation.
pub fn ensure_delimiter_dynamic<C, T, G, K>(get_delimiter: G, k: K) -> Stage<C, T>
where
    G: Fn(&C) -> u8 + Send + Sync + 'static,
    K: Fn(&mut C, usize, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
{
    stage(move |context, buf| {
        let delimiter = get_delimiter(context);
        match buf.find_byte(delimiter) {
            Some(offset) => {
                let n = offset + 1;
                trace!(delimiter, n, "found delimiter");
                k(context, n, buf)
            }
            None => {
                trace!(delimiter, scanned = buf.available(), "delimiter not found");
                Ok(NextStep::Incomplete)
            }
        }
    })
}
