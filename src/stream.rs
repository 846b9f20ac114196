//! Typed, pull-based iteration over an event-stream.

use std::io::BufRead;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::decoder::Decoder;
use super::error::*;

/// A stream of values of type `T`, each decoded from the `data` field of one event.
///
/// Drive it with `advance`, read the value with `current`, and check `err` once `advance`
/// returns `false`:
///
/// ```
/// # use std::io::Cursor;
/// # use ssestream::{Decoder, Stream};
/// let input = Cursor::new("data: [1, 2]\n\ndata: [3]\n\n");
/// let mut stream: Stream<Vec<u32>, _> = Stream::new(Decoder::new(input));
/// let mut sum = 0;
/// while stream.advance() {
///     sum += stream.current().iter().sum::<u32>();
/// }
/// assert!(stream.err().is_none());
/// assert_eq!(sum, 6);
/// ```
///
/// Once `advance` has returned `false` the stream never moves again. Dropping the stream
/// releases the byte source; `close` does so early.
#[derive(Debug)]
pub struct Stream<T, R> {
    decoder: Option<Decoder<R>>,
    err: Option<Error>,
    current: Option<T>,
    has_next: bool,
}

impl<T, R: BufRead> Stream<T, R> {
    /// Constructs a stream reading from `decoder`.
    pub fn new(decoder: Decoder<R>) -> Stream<T, R> {
        Stream::from_parts(Some(decoder), None)
    }
}

impl<T, R> Stream<T, R> {
    /// Constructs a stream from a possibly missing decoder and an error that already occurred.
    ///
    /// With `err` set, the stream starts out failed. Without a decoder, the first `advance`
    /// fails with `ErrorKind::NilDecoder`.
    pub fn from_parts(decoder: Option<Decoder<R>>, err: Option<Error>) -> Stream<T, R> {
        Stream {
            decoder,
            err,
            current: None,
            has_next: true,
        }
    }

    /// Returns the most recently decoded value, or `T::default()` if there is none yet.
    pub fn current(&self) -> T
    where
        T: Clone + Default,
    {
        self.current.clone().unwrap_or_default()
    }

    /// Returns the most recently decoded value, if any.
    pub fn current_ref(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Returns the error that stopped the stream, if any.
    ///
    /// `None` after `advance` returned `false` means the stream ended cleanly.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Returns `true` if the stream reached the end of input without error.
    pub fn is_exhausted(&self) -> bool {
        !self.has_next && self.err.is_none()
    }

    /// Releases the underlying byte source.
    ///
    /// Does nothing if there is no decoder.
    pub fn close(&mut self) -> Result<()>
    where
        R: BufRead,
    {
        match self.decoder.as_mut() {
            Some(decoder) => decoder.close(),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: Error) {
        debug!(error = %err, "event stream failed");
        self.err = Some(err);
    }
}

impl<T: DeserializeOwned, R: BufRead> Stream<T, R> {
    /// Moves to the next value.
    ///
    /// Blocks until a complete event has been read and decoded. Returns `false` at the end of
    /// input or on error, and from then on without reading again.
    pub fn advance(&mut self) -> bool {
        if self.err.is_some() || !self.has_next {
            return false;
        }

        let decoder = match self.decoder.as_mut() {
            Some(decoder) => decoder,
            None => {
                self.fail(ErrorKind::NilDecoder.into());
                return false;
            }
        };

        let event = match decoder.read_event() {
            Ok(Some(event)) => event,
            Ok(None) => {
                debug!("event stream exhausted");
                self.has_next = false;
                return false;
            }
            Err(err) => {
                self.fail(err);
                return false;
            }
        };

        match serde_json::from_str(&event.data).chain_err(|| ErrorKind::Unmarshal) {
            Ok(value) => {
                self.current = Some(value);
                true
            }
            Err(err) => {
                warn!(id = ?event.id, event_type = ?event.event_type, "undecodable event data");
                self.fail(err);
                false
            }
        }
    }
}

impl<T, R> From<Result<Decoder<R>>> for Stream<T, R> {
    fn from(result: Result<Decoder<R>>) -> Stream<T, R> {
        match result {
            Ok(decoder) => Stream::from_parts(Some(decoder), None),
            Err(err) => Stream::from_parts(None, Some(err)),
        }
    }
}
