//! Incremental, resumable decoders for byte-stream protocols
//!
//! Bytes from a connection arrive in chunks of any size at any time. This
//! crate lets a protocol author describe "read N bytes", "read until a
//! delimiter" or "read a line" as small composable stages, without ever
//! assuming that a whole message is already buffered and without blocking
//! while waiting for the rest.
//!
//! # Example
//!
//! ```no_run
//! use micro_stage::codec::StageDecoder;
//! use micro_stage::combinator::read_line;
//! use micro_stage::connection::StageReader;
//! use micro_stage::stage::NextStep;
//! use micro_stage::text::Utf8;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let tcp_listener = TcpListener::bind("127.0.0.1:7878").await.expect("bind server error");
//!     let (tcp_stream, _remote_addr) = tcp_listener.accept().await.expect("failed to accept");
//!
//!     let initial = read_line(true, Utf8, |_: &mut (), line| Ok(NextStep::Emit(line)));
//!     let reader = StageReader::new(tcp_stream, StageDecoder::new((), initial));
//!
//!     match reader.process(|line| info!(%line, "receive line")).await {
//!         Ok(()) => info!("finished process, connection shutdown"),
//!         Err(e) => error!(cause = %e, "decode error, connection shutdown"),
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`stage`]: the [`Stage`](stage::Stage) / [`NextStep`](stage::NextStep)
//!   algebra and the structural builders `stage` and `proxy`
//! - [`combinator`]: stage builders for byte counts, delimiters and lines
//! - [`buffer`]: the cursor operations stages use on the connection buffer
//! - [`text`]: character codecs injected into line reading
//! - [`codec`]: [`StageDecoder`](codec::StageDecoder), the driving loop as a
//!   `tokio_util` decoder
//! - [`connection`]: [`StageReader`](connection::StageReader), decoding off
//!   an `AsyncRead`
//!
//! # Core Components
//!
//! ## Stages
//!
//! A stage evaluates the buffered bytes to exactly one outcome: `Incomplete`
//! (nothing consumed, wait for more bytes), `Emit(value)` or
//! `Continue(next_stage)`. A stage that reports `Incomplete` leaves the
//! buffer exactly as it found it, so retrying after every arrival never reads
//! a byte twice.
//!
//! ## Decoding Context
//!
//! State parsed by one stage and needed by a later one, a length prefix for
//! example, lives in an explicit context value owned by the decoder and
//! passed `&mut` to every stage. The `_dynamic` combinators read their byte
//! count or delimiter from it on every evaluation.
//!
//! ## Error Handling
//!
//! Waiting for data is never an error. [`DecodeError`] is reserved for
//! malformed input, protocol violations raised by continuations, exceeding the
//! buffer limit and I/O failures. Every one of them is fatal for the
//! connection.
//!
//! # Limitations
//!
//! - Delimiter search rescans the buffered bytes on every retry
//! - Buffered but undecoded bytes are unbounded unless
//!   [`StageDecoder::with_max_buffer`](codec::StageDecoder::with_max_buffer) sets a limit

pub mod buffer;
pub mod codec;
pub mod combinator;
pub mod connection;
pub mod stage;
pub mod text;

mod error;
pub use error::DecodeError;

mod utils;
pub(crate) use utils::ensure;
