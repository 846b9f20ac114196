//! Incremental decoding of an event-stream into discrete `Event`s.

use std::io::{BufRead, Read};

use tracing::{debug, trace, warn};

use super::error::*;
use super::event::{parse_event_line, Event, ParseResult};

/// Longest line the decoder accepts, in bytes, including the line terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Reads `Event`s from a buffered byte source, line by line.
///
/// The decoder owns the source exclusively. Each call to `read_event` blocks until a frame is
/// terminated by a blank line, the source ends, or reading fails. A frame that is still
/// accumulating when the source ends is dropped.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: Option<R>,
    buf: Vec<u8>,
    max_line_len: usize,
    done: bool,
}

impl<R: BufRead> Decoder<R> {
    /// Constructs a decoder over `reader` with the default line length limit.
    pub fn new(reader: R) -> Decoder<R> {
        Decoder::with_max_line_len(reader, DEFAULT_MAX_LINE_LEN)
    }

    /// Constructs a decoder that fails on lines longer than `max_line_len` bytes, terminator
    /// included.
    pub fn with_max_line_len(reader: R, max_line_len: usize) -> Decoder<R> {
        Decoder {
            reader: Some(reader),
            buf: Vec::new(),
            max_line_len,
            done: false,
        }
    }

    /// Reads the next non-empty event.
    ///
    /// Returns `Ok(None)` at the end of input. Once the source has ended or failed, this keeps
    /// returning `Ok(None)` without reading again. After `close`, it fails with
    /// `ErrorKind::Closed`.
    pub fn read_event(&mut self) -> Result<Option<Event>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Err(ErrorKind::Closed.into()),
        };
        if self.done {
            return Ok(None);
        }

        let mut event = Event::new();
        loop {
            self.buf.clear();
            let read = match read_line(reader, &mut self.buf, self.max_line_len) {
                Ok(read) => read,
                Err(err) => {
                    self.done = true;
                    return Err(err);
                }
            };

            if read == 0 {
                self.done = true;
                if !event.is_empty() {
                    warn!(id = ?event.id, "event stream ended inside a frame, dropping it");
                }
                debug!("end of event stream");
                return Ok(None);
            }

            // Invalid UTF-8 is replaced, not treated as a read failure.
            let line = String::from_utf8_lossy(&self.buf);
            match parse_event_line(&line, &mut event) {
                ParseResult::Next => (), // okay, just continue
                ParseResult::Dispatch => {
                    if !event.is_empty() {
                        trace!(id = ?event.id, event_type = ?event.event_type, "dispatching event");
                        return Ok(Some(event));
                    }
                }
            }
        }
    }

    /// Releases the byte source.
    ///
    /// Only the first call drops the source; later calls do nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.reader.take().is_some() {
            debug!("closed event stream");
        }
        Ok(())
    }

    /// Returns `true` once `close` has released the byte source.
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> Result<usize> {
    let read = reader
        .by_ref()
        .take((limit as u64).saturating_add(1))
        .read_until(b'\n', buf)?;
    if read > limit {
        return Err(ErrorKind::LineTooLong(limit).into());
    }
    Ok(read)
}

/// Iterate over the decoder to get events.
impl<R: BufRead> Iterator for Decoder<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Result<Event>> {
        self.read_event().transpose()
    }
}
