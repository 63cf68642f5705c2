//! Validation and decoding of HTTP responses delivered through callbacks.
//!
//! Every step is a pure function from one `Result` to the next, so a chain
//! stops at the first failure:
//!
//! ```text
//! RawResponse ─► validate_session_response ─► check_2xx ─► decode (text | JSON)
//! ```
//!
//! Typical use pairs a callback-style client with [`await_one`](crate::await_one):
//!
//! ```rust
//! use fanin::response::{validate_text, RawResponse};
//! use fanin::{await_one, Completion, Deadline};
//! use std::time::Duration;
//!
//! let outcome = await_one(
//!     |done: Completion<RawResponse>| {
//!         std::thread::spawn(move || done.complete(RawResponse::ok(200, b"pong".to_vec())));
//!     },
//!     Deadline::after(Duration::from_secs(1)),
//! )
//! .map(validate_text);
//!
//! assert_eq!(outcome.success().unwrap().unwrap(), Some("pong".to_string()));
//! ```

mod encode;
mod error;
mod validate;

pub use encode::{encode_json_string, encode_utf8};
pub use error::{ResponseError, TransportError};
pub use validate::{
    check_2xx, decode_body, is_2xx, validate_json, validate_json_as, validate_session_response,
    validate_text,
};

/// Everything a callback-style HTTP client hands back: an optional body, an
/// optional response status, and an optional transport error.
#[derive(Debug, Default)]
pub struct RawResponse {
    /// Body bytes, if any were received.
    pub body: Option<Vec<u8>>,
    /// HTTP status, if an HTTP response was received at all.
    pub status: Option<u16>,
    /// Transport failure, if any.
    pub error: Option<TransportError>,
}

impl RawResponse {
    /// A response with a status and body.
    pub fn ok(status: u16, body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            status: Some(status),
            error: None,
        }
    }

    /// A response with a status and no body.
    pub fn empty(status: u16) -> Self {
        Self {
            body: None,
            status: Some(status),
            error: None,
        }
    }

    /// A transport failure.
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<TransportError>,
    {
        Self {
            body: None,
            status: None,
            error: Some(error.into()),
        }
    }
}

/// A response known to have come from an HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Option<Vec<u8>>,
}

/// An [`HttpResponse`] whose body has been decoded as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body.
    pub body: Option<String>,
}
