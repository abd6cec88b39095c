//! HTTP helpers for Lambda functions.

use lambda_http::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::MessageBody;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(data)?))?;

    Ok(response)
}

/// Create a `{"message": ...}` response.
pub fn message_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &MessageBody::new(message))
}

/// Create a `{"message": ..., "error": ...}` response.
pub fn error_response(
    status: u16,
    message: impl Into<String>,
    error: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &MessageBody::with_error(message, error))
}

/// Attach the CORS headers every endpoint answers with.
pub fn with_cors(
    mut response: Response<Body>,
    allow_methods: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_str(allow_methods)?);
    Ok(response)
}

/// Parse request body as JSON, returning a 400 response on failure.
///
/// Returns `Ok(Ok(T))` on successful parse, `Ok(Err(Response))` on parse error (400),
/// or `Err(lambda_http::Error)` on serialization failure.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> Result<Result<T, Response<Body>>, lambda_http::Error> {
    match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => Ok(Ok(parsed)),
        Err(e) => {
            let response = message_response(400, format!("Invalid request body: {}", e))?;
            Ok(Err(response))
        }
    }
}

/// Macro to parse request body, returning early with 400 on parse error.
///
/// Usage:
/// ```ignore
/// let request: MyRequest = parse_body!(event.body());
/// ```
#[macro_export]
macro_rules! parse_body {
    ($body:expr) => {
        match $crate::http::parse_json_body($body)? {
            Ok(parsed) => parsed,
            Err(response) => return Ok(response),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscribeRequest;

    #[test]
    fn test_cors_headers() {
        let response = with_cors(message_response(200, "ok").unwrap(), "OPTIONS,GET").unwrap();
        let headers = response.headers();

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "OPTIONS,GET");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_parse_json_body_rejects_garbage() {
        let parsed = parse_json_body::<SubscribeRequest>(&Body::from("not json")).unwrap();
        let response = parsed.unwrap_err();
        assert_eq!(response.status(), 400);

        let parsed = parse_json_body::<SubscribeRequest>(&Body::from(r#"{"email":"a@b.c"}"#)).unwrap();
        assert_eq!(parsed.unwrap().email.as_deref(), Some("a@b.c"));
    }
}
