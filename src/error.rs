//! Errors reported by the decoder and the typed stream.

error_chain! {
    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        NilDecoder {
            description("decoder is nil")
            display("decoder is nil")
        }

        Unmarshal {
            description("failed to unmarshal event data")
            display("failed to unmarshal event data")
        }

        LineTooLong(limit: usize) {
            description("event-stream line too long")
            display("event-stream line exceeds {} bytes", limit)
        }

        Open {
            description("failed to open event stream")
            display("failed to open event stream")
        }

        Closed {
            description("event stream closed")
            display("read on closed event stream")
        }
    }
}
