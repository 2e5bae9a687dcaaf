//! The stage algebra: [`Stage`], [`NextStep`] and the two structural builders
//! [`stage`] and [`proxy`].
//!
//! A stage is one step of an incremental decoder. Evaluating it against the
//! buffered bytes yields exactly one [`NextStep`]:
//!
//! - [`NextStep::Incomplete`]: more bytes are needed, nothing was consumed
//! - [`NextStep::Emit`]: a complete value was decoded
//! - [`NextStep::Continue`]: decoding proceeds right away with another stage
//!
//! Stages carry no state of their own. Whatever has been parsed so far lives
//! in an explicit decoding context `C`, handed to every stage as `&mut C` by
//! the driving loop ([`StageDecoder`](crate::codec::StageDecoder)).

mod next_step;
pub use next_step::NextStep;

use std::fmt;
use std::sync::Arc;

use bytes::BytesMut;

use crate::error::DecodeError;

/// The result of evaluating a stage once.
pub type StageResult<C, T> = Result<NextStep<C, T>, DecodeError>;

type StageFn<C, T> = dyn Fn(&mut C, &mut BytesMut) -> StageResult<C, T> + Send + Sync;

/// An immutable evaluation step of an incremental decoder.
///
/// Cloning a stage is cheap, clones share the same evaluation function.
pub struct Stage<C, T> {
    f: Arc<StageFn<C, T>>,
}

impl<C, T> Stage<C, T> {
    /// Wraps an evaluation function as a stage. See [`stage`].
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut C, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Evaluates this stage against the current buffer.
    ///
    /// On `Ok(NextStep::Incomplete)` the buffer is left exactly as it was.
    #[inline]
    pub fn evaluate(&self, context: &mut C, buf: &mut BytesMut) -> StageResult<C, T> {
        (self.f)(context, buf)
    }
}

impl<C, T> Clone for Stage<C, T> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

impl<C, T> fmt::Debug for Stage<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").finish_non_exhaustive()
    }
}

/// Builds a stage from an evaluation function.
///
/// This is the terminal constructor every other combinator goes through.
pub fn stage<C, T, F>(f: F) -> Stage<C, T>
where
    F: Fn(&mut C, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
{
    Stage::new(f)
}

/// Builds a stage that asks `factory` for a fresh stage on every evaluation
/// and delegates to it.
///
/// Parameters baked into the produced stage (a byte count, a delimiter) are
/// therefore recomputed each time the stage is retried, from the context as
/// it is at that moment.
pub fn proxy<C, T, F>(factory: F) -> Stage<C, T>
where
    F: Fn(&C) -> Stage<C, T> + Send + Sync + 'static,
{
    stage(move |context, buf| {
        let next = factory(context);
        next.evaluate(context, buf)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_stage_emits() {
        let s: Stage<(), u8> = stage(|_, buf| match buf.peek_byte(0) {
            Some(b) => {
                buf.read_bytes(1);
                Ok(NextStep::Emit(b))
            }
            None => Ok(NextStep::Incomplete),
        });

        let mut buffer = BytesMut::from(&b"xy"[..]);
        let step = s.evaluate(&mut (), &mut buffer).unwrap();
        assert_eq!(step.into_emitted(), Some(b'x'));
        assert_eq!(&buffer[..], b"y");

        let mut empty = BytesMut::new();
        assert!(s.evaluate(&mut (), &mut empty).unwrap().is_incomplete());
    }

    #[test]
    fn test_clone_shares_function() {
        let s: Stage<usize, ()> = stage(|count, _| {
            *count += 1;
            Ok(NextStep::Incomplete)
        });
        let cloned = s.clone();

        let mut count = 0;
        let mut buffer = BytesMut::new();
        s.evaluate(&mut count, &mut buffer).unwrap();
        cloned.evaluate(&mut count, &mut buffer).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_proxy_calls_factory_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = Arc::clone(&calls);

        let s: Stage<usize, usize> = proxy(move |&threshold| {
            factory_calls.fetch_add(1, Ordering::SeqCst);
            stage(move |_, buf| {
                if buf.available() < threshold {
                    return Ok(NextStep::Incomplete);
                }
                Ok(NextStep::Emit(threshold))
            })
        });

        let mut threshold = 4;
        let mut buffer = BytesMut::from(&b"abc"[..]);
        assert!(s.evaluate(&mut threshold, &mut buffer).unwrap().is_incomplete());

        threshold = 2;
        let step = s.evaluate(&mut threshold, &mut buffer).unwrap();
        assert_eq!(step.into_emitted(), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
