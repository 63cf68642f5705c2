use std::string::FromUtf8Error;
use thiserror::Error;

/// Boxed error reported by the transport that produced a response.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a response was rejected by the validation chain.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The transport reported an error instead of a response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
    /// Neither an error nor an HTTP response was delivered.
    #[error("did not receive a meaningful HTTP response")]
    NoHttpResponse,
    /// The status code was outside 200..=299.
    #[error("got non-2xx status code: {0}")]
    Status(u16),
    /// The body was not valid UTF-8.
    #[error("could not decode body as UTF-8 ({len} bytes)")]
    Undecodable {
        /// Body length in bytes.
        len: usize,
        /// Underlying decode error.
        #[source]
        source: FromUtf8Error,
    },
    /// A JSON body was required but the response had none.
    #[error("no JSON returned")]
    MissingJson,
    /// The body was not valid JSON, or did not match the requested type.
    #[error("invalid JSON body: {0}")]
    Json(#[source] serde_json::Error),
    /// A value could not be serialized to JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<FromUtf8Error> for ResponseError {
    fn from(source: FromUtf8Error) -> Self {
        Self::Undecodable {
            len: source.as_bytes().len(),
            source,
        }
    }
}
