//! Byte count gates and fixed size reads.

use bytes::{Buf, Bytes, BytesMut};
use tracing::trace;

use crate::buffer::Cursor;
use crate::stage::{NextStep, Stage, StageResult, stage};

/// Waits until at least `count` bytes are buffered, then calls `k` with the
/// buffer.
///
/// Never consumes anything itself; `k` decides how the bytes are read.
pub fn ensure_bytes<C, T, K>(count: usize, k: K) -> Stage<C, T>
where
    K: Fn(&mut C, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
{
    ensure_bytes_dynamic(move |_: &C| count, k)
}

/// Like [`ensure_bytes`], with the count read from the context on every
/// evaluation.
pub fn ensure_bytes_dynamic<C, T, G, K>(get_count: G, k: K) -> Stage<C, T>
where
    G: Fn(&C) -> usize + Send + Sync + 'static,
    K: Fn(&mut C, &mut BytesMut) -> StageResult<C, T> + Send + Sync + 'static,
{
    stage(move |context, buf| {
        let count = get_count(context);
        if buf.available() < count {
            trace!(available = buf.available(), required = count, "need more bytes");
            return Ok(NextStep::Incomplete);
        }

        k(context, buf)
    })
}

/// Waits until at least `count` bytes are buffered, consumes exactly `count`
/// of them and passes them to `k`.
pub fn read_bytes<C, T, K>(count: usize, k: K) -> Stage<C, T>
where
    K: Fn(&mut C, Bytes) -> StageResult<C, T> + Send + Sync + 'static,
{
    read_bytes_dynamic(move |_: &C| count, k)
}

/// Like [`read_bytes`], with the count read from the context on every
/// evaluation.
pub fn read_bytes_dynamic<C, T, G, K>(get_count: G, k: K) -> Stage<C, T>
where
    G: Fn(&C) -> usize + Send + Sync + 'static,
    K: Fn(&mut C, Bytes) -> StageResult<C, T> + Send + Sync + 'static,
{
    stage(move |context, buf| {
        let count = get_count(context);
        if buf.available() < count {
            trace!(available = buf.available(), required = count, "need more bytes");
            return Ok(NextStep::Incomplete);
        }

        let bytes = buf.read_bytes(count);
        k(context, bytes)
    })
}

/// Reads a single byte.
pub fn read_u8<C, T, K>(k: K) -> Stage<C, T>
where
    K: Fn(&mut C, u8) -> StageResult<C, T> + Send + Sync + 'static,
{
    read_bytes(1, move |context, mut bytes| k(context, bytes.get_u8()))
}

/// Reads a big endian `u16`.
pub fn read_u16_be<C, T, K>(k: K) -> Stage<C, T>
where
    K: Fn(&mut C, u16) -> StageResult<C, T> + Send + Sync + 'static,
{
    read_bytes(2, move |context, mut bytes| k(context, bytes.get_u16()))
}

/// Reads a big endian `u32`.
pub fn read_u32_be<C, T, K>(k: K) -> Stage<C, T>
where
    K: Fn(&mut C, u32) -> StageResult<C, T> + Send + Sync + 'static,
{
    read_bytes(4, move |context, mut bytes| k(context, bytes.get_u32()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_bytes(_: &mut (), bytes: Bytes) -> StageResult<(), Bytes> {
        Ok(NextStep::Emit(bytes))
    }

    #[test]
    fn test_ensure_bytes_does_not_consume() {
        let s: Stage<(), usize> = ensure_bytes(4, |_, buf| Ok(NextStep::Emit(buf.available())));

        let mut buffer = BytesMut::from(&b"abc"[..]);
        assert!(s.evaluate(&mut (), &mut buffer).unwrap().is_incomplete());
        assert_eq!(&buffer[..], b"abc");

        buffer.extend_from_slice(b"de");
        let step = s.evaluate(&mut (), &mut buffer).unwrap();
        assert_eq!(step.into_emitted(), Some(5));
        assert_eq!(&buffer[..], b"abcde");
    }

    #[test]
    fn test_read_bytes_exact() {
        let s = read_bytes(5, emit_bytes);

        let mut buffer = BytesMut::from(&b"hello"[..]);
        let bytes = s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap();
        assert_eq!(&bytes[..], b"hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_read_bytes_leaves_rest() {
        let s = read_bytes(3, emit_bytes);

        let mut buffer = BytesMut::from(&b"abcdef"[..]);
        let bytes = s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap();
        assert_eq!(&bytes[..], b"abc");
        assert_eq!(&buffer[..], b"def");
    }

    #[test]
    fn test_read_bytes_incomplete() {
        let s = read_bytes(8, emit_bytes);

        let mut buffer = BytesMut::from(&b"1234567"[..]);
        for _ in 0..3 {
            assert!(s.evaluate(&mut (), &mut buffer).unwrap().is_incomplete());
            assert_eq!(buffer.len(), 7);
        }
    }

    #[test]
    fn test_read_zero_bytes() {
        let s = read_bytes(0, emit_bytes);

        let mut buffer = BytesMut::new();
        let bytes = s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_read_bytes_dynamic_uses_latest_count() {
        let s: Stage<usize, Bytes> = read_bytes_dynamic(|count: &usize| *count, |_, bytes| Ok(NextStep::Emit(bytes)));

        let mut count = 6;
        let mut buffer = BytesMut::from(&b"abcd"[..]);
        assert!(s.evaluate(&mut count, &mut buffer).unwrap().is_incomplete());

        count = 2;
        let bytes = s.evaluate(&mut count, &mut buffer).unwrap().into_emitted().unwrap();
        assert_eq!(&bytes[..], b"ab");
        assert_eq!(&buffer[..], b"cd");
    }

    #[test]
    fn test_ensure_bytes_dynamic() {
        let s: Stage<usize, ()> = ensure_bytes_dynamic(|count: &usize| *count, |_, _| Ok(NextStep::Emit(())));

        let mut count = 3;
        let mut buffer = BytesMut::from(&b"ab"[..]);
        assert!(s.evaluate(&mut count, &mut buffer).unwrap().is_incomplete());

        count = 1;
        assert!(s.evaluate(&mut count, &mut buffer).unwrap().is_emit());
        assert_eq!(&buffer[..], b"ab");
    }

    #[test]
    fn test_read_integers() {
        let mut buffer = BytesMut::from(&[0x01, 0x02, 0x03, 0x00, 0x00, 0x01, 0x00, 0xff][..]);

        let s: Stage<(), u32> = read_u8(|_, b| Ok(NextStep::Emit(u32::from(b))));
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted(), Some(1));

        let s: Stage<(), u32> = read_u16_be(|_, v| Ok(NextStep::Emit(u32::from(v))));
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted(), Some(0x0203));

        let s: Stage<(), u32> = read_u32_be(|_, v| Ok(NextStep::Emit(v)));
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted(), Some(0x0000_0100));

        let s: Stage<(), u32> = read_u16_be(|_, v| Ok(NextStep::Emit(u32::from(v))));
        assert!(s.evaluate(&mut (), &mut buffer).unwrap().is_incomplete());
        assert_eq!(&buffer[..], &[0xff]);
    }
}
