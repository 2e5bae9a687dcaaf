//! Reading decoded values off a live stream.
//!
//! [`StageReader`] plugs a [`StageDecoder`](crate::codec::StageDecoder) into a
//! `FramedRead` over any `AsyncRead`, so bytes are read, buffered and decoded
//! in one loop. Each connection gets its own reader; nothing is shared.

mod stage_reader;

pub use stage_reader::DEFAULT_READ_CAPACITY;
pub use stage_reader::StageReader;
