//! # reqwest-based event-stream input
//!
//! Checks a blocking `reqwest` response and hands its body to a `Decoder`.

mod errors {
    error_chain! {
        links {
            Decode(crate::error::Error, crate::error::ErrorKind);
        }

        foreign_links {
            Reqwest(::reqwest::Error);
        }

        errors {
            Http(status: ::reqwest::StatusCode) {
                description("HTTP request failed")
                display("HTTP status code: {}", status)
            }

            NoContentType {
                description("missing Content-Type header")
                display("missing Content-Type header")
            }

            InvalidContentType(content_type: String) {
                description("unexpected Content-Type header")
                display("unexpected Content-Type: {}", content_type)
            }
        }
    }
}
pub use self::errors::*;

use std::io::BufReader;

use ::reqwest::blocking::{Client, Response};
use ::reqwest::header::{ACCEPT, CONTENT_TYPE};
use ::reqwest::Url;
use mime::Mime;
use tracing::debug;

use super::decoder::Decoder;
use super::stream::Stream;

/// Decoder over the body of a blocking response.
pub type ResponseDecoder = Decoder<BufReader<Response>>;

/// Typed stream over the body of a blocking response.
pub type ResponseStream<T> = Stream<T, BufReader<Response>>;

/// Sends a GET request for an event-stream and returns a decoder over the response body.
pub fn connect(client: &Client, url: Url) -> Result<ResponseDecoder> {
    let res = client
        .get(url)
        .header(ACCEPT, mime::TEXT_EVENT_STREAM.as_ref())
        .send()?;
    from_response(res)
}

/// Returns a decoder over the body of `res`.
///
/// Fails unless the status is successful and the Content-Type is `text/event-stream`. Content
/// type parameters such as `charset` are ignored.
pub fn from_response(res: Response) -> Result<ResponseDecoder> {
    let status = res.status();
    if !status.is_success() {
        return Err(ErrorKind::Http(status).into());
    }

    let content_type = match res.headers().get(CONTENT_TYPE) {
        Some(value) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        None => return Err(ErrorKind::NoContentType.into()),
    };
    match content_type.parse::<Mime>() {
        Ok(ref ty) if ty.type_() == mime::TEXT && ty.subtype() == mime::EVENT_STREAM => (),
        _ => return Err(ErrorKind::InvalidContentType(content_type).into()),
    }

    debug!(%status, url = %res.url(), "opened event stream");
    Ok(Decoder::new(BufReader::new(res)))
}

/// Like `connect`, but wraps the outcome in a typed stream.
///
/// A failed request becomes the stream's error, chained under `ErrorKind::Open`.
pub fn open<T>(client: &Client, url: Url) -> ResponseStream<T> {
    Stream::from(connect(client, url).map_err(into_stream_error))
}

/// Like `from_response`, but wraps the outcome in a typed stream.
pub fn stream<T>(res: Response) -> ResponseStream<T> {
    Stream::from(from_response(res).map_err(into_stream_error))
}

fn into_stream_error(err: Error) -> crate::error::Error {
    crate::error::Error::with_chain(err, crate::error::ErrorKind::Open)
}
