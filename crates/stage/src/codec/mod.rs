//! The driving loop, as a [`tokio_util::codec::Decoder`].
//!
//! [`StageDecoder`] owns the decoding context and the current stage of one
//! connection. The buffer belongs to whoever calls `decode`, usually a
//! `FramedRead`, which appends arriving bytes and calls back until the decoder
//! reports that it needs more.
//!
//! # Example
//!
//! ```no_run
//! use bytes::BytesMut;
//! use micro_stage::codec::StageDecoder;
//! use micro_stage::combinator::read_line;
//! use micro_stage::stage::NextStep;
//! use micro_stage::text::Utf8;
//! use tokio_util::codec::Decoder;
//!
//! let initial = read_line(true, Utf8, |_: &mut (), line| Ok(NextStep::Emit(line)));
//! let mut decoder = StageDecoder::new((), initial);
//!
//! let mut buffer = BytesMut::from(&b"first\r\nsec"[..]);
//! assert_eq!(decoder.decode(&mut buffer).unwrap().as_deref(), Some("first"));
//! assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
//! ```

mod stage_decoder;

pub use stage_decoder::StageDecoder;
