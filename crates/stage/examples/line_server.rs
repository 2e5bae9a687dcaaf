//! A tiny line protocol server.
//!
//! ```text
//! PING\r\n                      -> +PONG
//! ECHO <text>\r\n               -> +<text>
//! DATA <len>\r\n<len bytes>\r\n -> +<len> bytes
//! ```
//!
//! Try it with `nc 127.0.0.1 7878`.

use bytes::Bytes;
use micro_stage::DecodeError;
use micro_stage::codec::StageDecoder;
use micro_stage::combinator::{read_bytes, read_bytes_dynamic, read_line};
use micro_stage::connection::StageReader;
use micro_stage::stage::{NextStep, Stage, StageResult};
use micro_stage::text::Utf8;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug)]
enum Command {
    Ping,
    Echo(String),
    Data(Bytes),
}

#[derive(Debug, Default)]
struct Session {
    data_len: usize,
}

fn command() -> Stage<Session, Command> {
    read_line(true, Utf8, parse_command)
}

fn parse_command(session: &mut Session, line: String) -> StageResult<Session, Command> {
    let (name, arg) = line.split_once(' ').unwrap_or((line.as_str(), ""));
    match name {
        "PING" => Ok(NextStep::Emit(Command::Ping)),
        "ECHO" => Ok(NextStep::Emit(Command::Echo(arg.to_string()))),
        "DATA" => {
            session.data_len = arg
                .parse::<usize>()
                .map_err(|e| DecodeError::protocol(format!("invalid DATA length {arg:?}: {e}")))?;
            Ok(NextStep::Continue(data()))
        }
        _ => Err(DecodeError::protocol(format!("unknown command {name:?}"))),
    }
}

fn data() -> Stage<Session, Command> {
    read_bytes_dynamic(
        |session: &Session| session.data_len,
        |_, bytes| {
            // the payload is followed by its own CRLF
            Ok(NextStep::Continue(read_bytes(2, move |_, crlf| {
                if &crlf[..] != b"\r\n" {
                    return Err(DecodeError::protocol("DATA payload must end with CRLF"));
                }
                Ok(NextStep::Emit(Command::Data(bytes.clone())))
            })))
        },
    )
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 7878, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:7878").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        tokio::spawn(async move {
            let (reader, mut writer) = tcp_stream.into_split();
            let decoder = StageDecoder::new(Session::default(), command()).with_max_buffer(1024 * 1024);
            let mut reader = StageReader::new(reader, decoder);

            loop {
                let reply = match reader.next_frame().await {
                    Some(Ok(Command::Ping)) => "+PONG\r\n".to_string(),
                    Some(Ok(Command::Echo(text))) => format!("+{text}\r\n"),
                    Some(Ok(Command::Data(bytes))) => format!("+{} bytes\r\n", bytes.len()),
                    Some(Err(e)) => {
                        error!(%remote_addr, cause = %e, "can't decode command, connection shutdown");
                        let reply = format!("-ERR {e}\r\n");
                        let _ = writer.write_all(reply.as_bytes()).await;
                        return;
                    }
                    None => {
                        info!(%remote_addr, "finished process, connection shutdown");
                        return;
                    }
                };

                if let Err(e) = writer.write_all(reply.as_bytes()).await {
                    warn!(%remote_addr, cause = %e, "failed to write reply");
                    return;
                }
            }
        });
    }
}
