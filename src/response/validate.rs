use super::{HttpResponse, RawResponse, ResponseError, TextResponse};
use serde::de::DeserializeOwned;

/// Whether `status` is a success code (200..=299).
#[inline]
pub const fn is_2xx(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Separates transport failures from real HTTP responses.
///
/// A transport error wins over anything else in `raw`.
pub fn validate_session_response(raw: RawResponse) -> Result<HttpResponse, ResponseError> {
    if let Some(error) = raw.error {
        return Err(ResponseError::Transport(error));
    }
    let status = raw.status.ok_or(ResponseError::NoHttpResponse)?;
    Ok(HttpResponse {
        status,
        body: raw.body,
    })
}

/// Decodes the body as UTF-8. A missing body stays `None`.
pub fn decode_body(response: HttpResponse) -> Result<TextResponse, ResponseError> {
    let body = response.body.map(String::from_utf8).transpose()?;
    Ok(TextResponse {
        status: response.status,
        body,
    })
}

/// Rejects responses whose status is not 2xx.
pub fn check_2xx(response: HttpResponse) -> Result<HttpResponse, ResponseError> {
    if is_2xx(response.status) {
        Ok(response)
    } else {
        Err(ResponseError::Status(response.status))
    }
}

/// Session check, 2xx check, then parse the body as a JSON value.
pub fn validate_json(raw: RawResponse) -> Result<serde_json::Value, ResponseError> {
    validate_json_as(raw)
}

/// Session check, 2xx check, then deserialize the body into `T`.
pub fn validate_json_as<T>(raw: RawResponse) -> Result<T, ResponseError>
where
    T: DeserializeOwned,
{
    validate_session_response(raw)
        .and_then(check_2xx)
        .and_then(|response| {
            let body = response.body.ok_or(ResponseError::MissingJson)?;
            serde_json::from_slice(&body).map_err(ResponseError::Json)
        })
}

/// Session check, 2xx check, then decode the optional body as UTF-8 text.
pub fn validate_text(raw: RawResponse) -> Result<Option<String>, ResponseError> {
    validate_session_response(raw)
        .and_then(check_2xx)
        .and_then(decode_body)
        .map(|text| text.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::io;

    #[test]
    fn test_is_2xx_bounds() {
        assert!(!is_2xx(199));
        assert!(is_2xx(200));
        assert!(is_2xx(204));
        assert!(is_2xx(299));
        assert!(!is_2xx(300));
        assert!(!is_2xx(404));
    }

    #[test]
    fn test_transport_error_wins() {
        let mut raw = RawResponse::failed(io::Error::new(io::ErrorKind::TimedOut, "connect"));
        raw.status = Some(200);
        raw.body = Some(b"{}".to_vec());

        let err = validate_session_response(raw).unwrap_err();
        assert!(matches!(err, ResponseError::Transport(_)));
        assert_eq!(err.to_string(), "transport error: connect");
    }

    #[test]
    fn test_missing_http_response() {
        let err = validate_session_response(RawResponse::default()).unwrap_err();
        assert!(matches!(err, ResponseError::NoHttpResponse));
    }

    #[test]
    fn test_decode_body() {
        let text = decode_body(HttpResponse {
            status: 200,
            body: Some("héllo".as_bytes().to_vec()),
        })
        .unwrap();
        assert_eq!(text.body.as_deref(), Some("héllo"));

        let empty = decode_body(HttpResponse {
            status: 204,
            body: None,
        })
        .unwrap();
        assert_eq!(empty.body, None);

        let err = decode_body(HttpResponse {
            status: 200,
            body: Some(vec![0xff, 0xfe]),
        })
        .unwrap_err();
        assert!(matches!(err, ResponseError::Undecodable { len: 2, .. }));
    }

    #[test]
    fn test_validate_json() {
        let raw = RawResponse::ok(201, br#"{"id": 7, "tags": ["a"]}"#.to_vec());
        let value = validate_json(raw).unwrap();
        assert_eq!(value, json!({ "id": 7, "tags": ["a"] }));
    }

    #[test]
    fn test_validate_json_failures() {
        assert!(matches!(
            validate_json(RawResponse::ok(500, b"{}".to_vec())),
            Err(ResponseError::Status(500))
        ));
        assert!(matches!(
            validate_json(RawResponse::empty(200)),
            Err(ResponseError::MissingJson)
        ));
        assert!(matches!(
            validate_json(RawResponse::ok(200, b"not json".to_vec())),
            Err(ResponseError::Json(_))
        ));
    }

    #[test]
    fn test_validate_json_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Ack {
            id: u32,
        }

        let ack: Ack = validate_json_as(RawResponse::ok(200, br#"{"id": 3}"#.to_vec())).unwrap();
        assert_eq!(ack, Ack { id: 3 });

        let raw = RawResponse::ok(200, br#"{"id": "x"}"#.to_vec());
        let err = validate_json_as::<Ack>(raw).unwrap_err();
        assert!(matches!(err, ResponseError::Json(_)));
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(
            validate_text(RawResponse::ok(200, b"ok".to_vec())).unwrap(),
            Some("ok".to_string())
        );
        assert_eq!(validate_text(RawResponse::empty(204)).unwrap(), None);

        let err = validate_text(RawResponse::ok(302, b"moved".to_vec())).unwrap_err();
        assert_eq!(err.to_string(), "got non-2xx status code: 302");
    }
}
