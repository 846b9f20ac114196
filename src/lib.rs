//! # ssestream
//!
//! ssestream decodes a Server-Sent Events body into typed values, one event at a time. The
//! `Decoder` splits the `text/event-stream` format into `Event`s; the `Stream` deserializes the
//! `data` of each event from JSON.
//!
//! # Examples
//!
//! ```no_run
//! use serde::Deserialize;
//! use ssestream::reqwest::open;
//! use reqwest::blocking::Client;
//! use reqwest::Url;
//!
//! #[derive(Deserialize)]
//! struct Delta {
//!     text: String,
//! }
//!
//! fn main() {
//!     let url = Url::parse("http://example.com/stream").unwrap();
//!     let mut stream = open::<Delta>(&Client::new(), url);
//!     while stream.advance() {
//!         print!("{}", stream.current_ref().unwrap().text);
//!     }
//!     if let Some(err) = stream.err() {
//!         eprintln!("{}", err);
//!     }
//! }
//! ```
//!

#[macro_use]
extern crate error_chain;

pub mod error;

// Generic text/event-stream parsing and serialization.
pub mod event;

// Line-by-line frame decoding over a byte source.
pub mod decoder;

// Deserializing iteration on top of the decoder.
pub mod stream;

// HTTP interface
#[cfg(feature = "with-reqwest")]
pub mod reqwest;

pub use decoder::{Decoder, DEFAULT_MAX_LINE_LEN};
pub use error::{Error, ErrorKind, Result};
pub use event::Event;
pub use stream::Stream;
