//! Reads an event-stream from stdin and prints the JSON payload of every event on its own line.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Write};
use std::process;

use serde_json::Value;
use ssestream::{Decoder, Stream};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stream: Stream<Value, _> = Stream::new(Decoder::new(stdin.lock()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    while stream.advance() {
        if let Some(value) = stream.current_ref() {
            if let Err(err) = writeln!(out, "{}", value) {
                eprintln!("error: {}", err);
                process::exit(1);
            }
        }
    }

    if let Some(err) = stream.err() {
        eprintln!("error: {}", err);
        for cause in err.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        process::exit(1);
    }
}
