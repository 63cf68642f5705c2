use super::ResponseError;
use serde::Serialize;

/// Serializes `value` into a JSON string for a request body.
pub fn encode_json_string<T>(value: &T) -> Result<String, ResponseError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(ResponseError::Encode)
}

/// UTF-8 bytes of `text`, ready to send as a body.
pub fn encode_utf8(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;
    use serde_json::json;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[test]
    fn test_encode_json_string() {
        let body = encode_json_string(&json!({ "message": "hi", "user_id": 4 })).unwrap();
        let back: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(back["user_id"], 4);
    }

    #[test]
    fn test_encode_json_string_error() {
        let err = encode_json_string(&Unencodable).unwrap_err();
        assert!(matches!(err, ResponseError::Encode(_)));
    }

    #[test]
    fn test_encode_utf8() {
        assert_eq!(encode_utf8("añb"), vec![b'a', 0xc3, 0xb1, b'b']);
    }
}
