//! Line reading on top of [`ensure_delimiter`].

use crate::buffer::Cursor;
use crate::combinator::ensure_delimiter;
use crate::stage::{Stage, StageResult};
use crate::text::TextCodec;

/// Reads one `\n` terminated line and decodes it with `codec`.
///
/// With `remove_lf` the terminator is stripped, `\r\n` and bare `\n` alike.
/// Otherwise the line is decoded as received, terminator included. A line
/// the codec rejects fails with
/// [`DecodeError::InvalidEncoding`](crate::DecodeError::InvalidEncoding).
pub fn read_line<C, T, D, K>(remove_lf: bool, codec: D, k: K) -> Stage<C, T>
where
    D: TextCodec + Send + Sync + 'static,
    K: Fn(&mut C, String) -> StageResult<C, T> + Send + Sync + 'static,
{
    ensure_delimiter(b'\n', move |context, n, buf| {
        let line = buf.read_bytes(n);
        let end = if remove_lf { content_len(&line) } else { n };
        let text = codec.decode(&line[..end])?;
        k(context, text)
    })
}

/// Length of a terminated line without its `\n` or `\r\n`.
#[inline]
fn content_len(line: &[u8]) -> usize {
    match line {
        [.., b'\r', b'\n'] => line.len() - 2,
        _ => line.len() - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::stage::NextStep;
    use crate::text::{Ascii, Latin1, Utf8};
    use bytes::BytesMut;

    fn emit_line(_: &mut (), line: String) -> StageResult<(), String> {
        Ok(NextStep::Emit(line))
    }

    #[test]
    fn test_strip_crlf() {
        let s = read_line(true, Utf8, emit_line);

        let mut buffer = BytesMut::from(&b"hello\r\n"[..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_keep_terminator() {
        let s = read_line(false, Utf8, emit_line);

        let mut buffer = BytesMut::from(&b"hello\r\n"[..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "hello\r\n");
    }

    #[test]
    fn test_strip_bare_lf() {
        let s = read_line(true, Ascii, emit_line);

        let mut buffer = BytesMut::from(&b"one\ntwo\r\n"[..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "one");
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "two");
    }

    #[test]
    fn test_empty_lines() {
        let s = read_line(true, Utf8, emit_line);

        let mut buffer = BytesMut::from(&b"\r\n\n"[..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "");
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "");
    }

    #[test]
    fn test_cr_only_inside_line() {
        let s = read_line(true, Utf8, emit_line);

        let mut buffer = BytesMut::from(&b"a\rb\n"[..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "a\rb");
    }

    #[test]
    fn test_partial_line() {
        let s = read_line(true, Utf8, emit_line);

        let mut buffer = BytesMut::from(&b"hel"[..]);
        assert!(s.evaluate(&mut (), &mut buffer).unwrap().is_incomplete());
        assert_eq!(&buffer[..], b"hel");

        buffer.extend_from_slice(b"lo\r");
        assert!(s.evaluate(&mut (), &mut buffer).unwrap().is_incomplete());

        buffer.extend_from_slice(b"\n");
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "hello");
    }

    #[test]
    fn test_codec_is_injected() {
        let s = read_line(true, Latin1, emit_line);

        let mut buffer = BytesMut::from(&[b'n', 0xe9, b'e', b'\n'][..]);
        assert_eq!(s.evaluate(&mut (), &mut buffer).unwrap().into_emitted().unwrap(), "née");
    }

    #[test]
    fn test_invalid_encoding_is_error() {
        let s = read_line(true, Utf8, emit_line);

        let mut buffer = BytesMut::from(&[0xff, 0xfe, b'\r', b'\n'][..]);
        let result = s.evaluate(&mut (), &mut buffer);
        assert!(matches!(result, Err(DecodeError::InvalidEncoding { encoding: "utf-8", .. })));
    }
}
