//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// JSON fields whose values must never be written to the logs.
const REDACTED_FIELDS: [&str; 3] = ["password", "phoneNumber", "email"];

const REDACTED_VALUE: &str = "********";

const REDACTED_BODY: &str = "<malformed body with credentials redacted>";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
/// Credentials in JSON request bodies are replaced with asterisks before
/// logging, whatever the content type says. The bodies passed on are the
/// original bytes.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    log_request(&parts, &redact_credentials(&String::from_utf8_lossy(&body_bytes)));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Replace the values of credential fields in a JSON object with asterisks.
///
/// Text that does not parse but names a credential field is replaced
/// entirely. Any other text is returned unchanged.
fn redact_credentials(body_text: &str) -> String {
    let mut value: Value = match serde_json::from_str(body_text) {
        Ok(value) => value,
        Err(_) if REDACTED_FIELDS.iter().any(|field| body_text.contains(field)) => {
            return REDACTED_BODY.to_owned();
        }
        Err(_) => return body_text.to_string(),
    };

    let Some(object) = value.as_object_mut() else {
        return body_text.to_string();
    };

    for field in REDACTED_FIELDS {
        if let Some(field_value) = object.get_mut(field) {
            *field_value = Value::from(REDACTED_VALUE);
        }
    }

    value.to_string()
}

fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT;

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}
