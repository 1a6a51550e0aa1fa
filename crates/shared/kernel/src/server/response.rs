use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use ncss_derive::api_model;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// `200 OK` with a UTF-8 plain-text body.
pub fn plain_text(body: impl Into<String>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], body.into()).into_response()
}

#[api_model]
/// Error payload sent with every failed request.
pub struct ErrorBody {
    /// HTTP status code, repeated from the response line
    pub error: u16,
    /// Human-readable reason
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { error: status.as_u16(), message: message.into() }
    }
}

/// `status` with an [`ErrorBody`] JSON payload.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(status, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn plain_text_sets_content_type() {
        let response = plain_text("eleven");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_PLAIN_UTF8);

        let body = response.into_body().collect().await.expect("body").to_bytes();
        assert_eq!(&body[..], b"eleven");
    }

    #[tokio::test]
    async fn error_response_repeats_status_in_body() {
        let response = error_response(StatusCode::NOT_FOUND, "Unit 'bogus' not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json, serde_json::json!({ "error": 404, "message": "Unit 'bogus' not found" }));
    }
}
