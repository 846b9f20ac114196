use std::fmt;
use std::time::Duration;

use tracing::trace;

/// A single Server-Sent Event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Corresponds to the `id` field.
    pub id: Option<String>,
    /// Corresponds to the `event` field.
    pub event_type: Option<String>,
    /// All `data` fields concatenated by newlines.
    pub data: String,
    /// Reconnection time. The `retry` field is read but never applied, so the decoder leaves this
    /// as `None`.
    pub retry: Option<Duration>,
}

/// Possible results from parsing a single event-stream line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Line parsed successfully, but the event is not complete yet.
    Next,
    /// Blank line: the event is complete now, if it is not empty. Pass a new (empty) event for
    /// the next call.
    Dispatch,
}

/// Parse a single line of an event-stream.
///
/// The line may end with a newline. Surrounding whitespace is trimmed from the whole line, and
/// again from the field name and the field value.
///
/// You will have to call this function multiple times until it returns `ParseResult::Dispatch`.
/// A dispatched event may still be empty (blank lines before any field); such events carry
/// nothing and should be skipped. Make sure to clear the event struct for the next line, then.
///
/// # Examples
///
/// ```
/// # use ssestream::event::{Event, ParseResult, parse_event_line};
/// let mut event = Event::new();
/// assert_eq!(parse_event_line("id: 42", &mut event), ParseResult::Next);
/// assert_eq!(parse_event_line("data: foo", &mut event), ParseResult::Next);
/// assert_eq!(parse_event_line("data: bar", &mut event), ParseResult::Next);
/// assert_eq!(parse_event_line("", &mut event), ParseResult::Dispatch);
/// // The event is finished now.
/// assert_eq!(event.id, Some("42".into()));
/// assert_eq!(event.data, "foo\nbar");
/// // Now clear and continue.
/// event.clear();
/// // ...
/// ```
pub fn parse_event_line(line: &str, event: &mut Event) -> ParseResult {
    let line = line.trim();
    if line.is_empty() {
        return ParseResult::Dispatch;
    }
    if line.starts_with(':') {
        // comment
        return ParseResult::Next;
    }

    // Lines without a colon are not fields.
    if let Some(pos) = line.find(':') {
        let (field, value) = line.split_at(pos);
        let field = field.trim();
        let value = value[1..].trim();

        match field {
            "data" => {
                if !event.data.is_empty() {
                    event.data.push('\n');
                }
                event.data.push_str(value);
            }
            "event" => event.event_type = non_empty(value),
            "id" => event.id = non_empty(value),
            "retry" => trace!(value, "discarding retry field"),
            _ => trace!(field, "ignoring unknown field"),
        }
    }

    ParseResult::Next
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Event {
    /// Creates an empty event.
    pub fn new() -> Event {
        Event::default()
    }

    /// Returns `true` if the event is empty.
    ///
    /// An event is empty if it has no id or event type and its data field is empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.event_type.is_none() && self.data.is_empty()
    }

    /// Makes the event empty.
    pub fn clear(&mut self) {
        self.id = None;
        self.event_type = None;
        self.data.clear();
        self.retry = None;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref id) = self.id {
            writeln!(f, "id: {}", id)?;
        }
        if let Some(ref event_type) = self.event_type {
            writeln!(f, "event: {}", event_type)?;
        }
        if !self.data.is_empty() {
            for line in self.data.split('\n') {
                writeln!(f, "data: {}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(lines: &[&str]) -> Event {
        let mut event = Event::new();
        for line in lines {
            parse_event_line(line, &mut event);
        }
        event
    }

    fn data(data: &str) -> Event {
        Event { data: data.to_string(), ..Event::new() }
    }

    #[test]
    fn basic_event_display() {
        assert_eq!("data: hello world\n", data("hello world").to_string());
        assert_eq!(
            "id: foo\ndata: hello world\n",
            Event { id: Some("foo".to_string()), ..data("hello world") }.to_string());
        assert_eq!(
            "event: bar\ndata: hello world\n",
            Event { event_type: Some("bar".to_string()), ..data("hello world") }.to_string());
        assert_eq!("id: 7\n", Event { id: Some("7".to_string()), ..Event::new() }.to_string());
    }

    #[test]
    fn multiline_event_display() {
        assert_eq!("data: hello\ndata: world\n", data("hello\nworld").to_string());
        assert_eq!("data: hello\ndata: \ndata: world\n", data("hello\n\nworld").to_string());
    }

    #[test]
    fn data_lines_are_joined_with_newlines() {
        let event = parse_all(&["data: a", "data: b", "data:c"]);
        assert_eq!(event.data, "a\nb\nc");
    }

    #[test]
    fn empty_data_line_adds_no_leading_separator() {
        assert_eq!(parse_all(&["data:", "data: b"]).data, "b");
        assert_eq!(parse_all(&["data: a", "data:", "data: b"]).data, "a\n\nb");
    }

    #[test]
    fn whitespace_is_trimmed_around_name_and_value() {
        let event = parse_all(&["  data :   {\"x\": 1}  \r\n", " event\t: ping \n"]);
        assert_eq!(event.data, "{\"x\": 1}");
        assert_eq!(event.event_type, Some("ping".into()));
    }

    #[test]
    fn value_keeps_everything_after_first_colon() {
        let event = parse_all(&["data: http://example.com:80/a"]);
        assert_eq!(event.data, "http://example.com:80/a");
    }

    #[test]
    fn last_id_and_event_win() {
        let event = parse_all(&["id: 1", "event: a", "id: 2", "event: b"]);
        assert_eq!(event.id, Some("2".into()));
        assert_eq!(event.event_type, Some("b".into()));
    }

    #[test]
    fn empty_id_resets_the_field() {
        let event = parse_all(&["id: 1", "id:"]);
        assert_eq!(event.id, None);
        assert!(event.is_empty());
    }

    #[test]
    fn comments_never_touch_state() {
        let event = parse_all(&[": data: nope", "data: yes", ":id: 3", ":"]);
        assert_eq!(event, data("yes"));
    }

    #[test]
    fn retry_unknown_and_colonless_lines_are_ignored() {
        let event = parse_all(&["retry: 1000", "retry: soon", "foo: bar", "data", "justtext"]);
        assert!(event.is_empty());
        assert_eq!(event.retry, None);
    }

    #[test]
    fn blank_lines_dispatch() {
        let mut event = Event::new();
        assert_eq!(parse_event_line("\n", &mut event), ParseResult::Dispatch);
        assert_eq!(parse_event_line("   \r\n", &mut event), ParseResult::Dispatch);
        assert_eq!(parse_event_line("data: x", &mut event), ParseResult::Next);
        assert_eq!(parse_event_line(": hi", &mut event), ParseResult::Next);
    }

    #[test]
    fn clear_resets_everything() {
        let mut event = parse_all(&["id: 1", "event: e", "data: d"]);
        event.clear();
        assert!(event.is_empty());
    }
}
