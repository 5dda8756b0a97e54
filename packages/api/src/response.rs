//! Response decoding shared by every endpoint.
//!
//! The body is always read as text first so decode failures can log what
//! the server actually sent. Non-success statuses are turned into
//! [`ApiError::Unauthorized`] or [`ApiError::Status`] carrying the
//! server's `detail` message when one is present.

use crime_report_api_models::ApiErrorBody;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Reads a response and decodes its body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let url = response.url().to_string();
    let status = response.status();
    let text = response.text().await?;
    decode(status, &url, &text)
}

/// Decodes an already-read response body.
pub(crate) fn decode<T: DeserializeOwned>(
    status: StatusCode,
    url: &str,
    text: &str,
) -> Result<T, ApiError> {
    if !status.is_success() {
        let err = error_for_status(status, text);
        log::warn!("Request failed\n  url: {url}\n  status: {status}\n  error: {err}");
        return Err(err);
    }

    serde_json::from_str(text).map_err(|e| {
        log::error!(
            "JSON parse failed\n  \
             url: {url}\n  \
             status: {status}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {}",
            text.len(),
            preview(text),
        );
        ApiError::Decode {
            message: format!("JSON parse failed: {e} (status={status})"),
        }
    })
}

/// Maps a non-success status and its body onto an [`ApiError`].
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { detail },
        _ => ApiError::Status {
            status: status.as_u16(),
            detail,
        },
    }
}

fn preview(text: &str) -> String {
    if text.len() > BODY_PREVIEW_LEN {
        let end = (0..=BODY_PREVIEW_LEN)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_report_api_models::EmailResponse;

    const URL: &str = "http://localhost/api/users/email";

    #[test]
    fn success_decodes_body() {
        let resp: EmailResponse = decode(StatusCode::OK, URL, r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(resp.email, "a@b.c");
    }

    #[test]
    fn unauthorized_carries_detail() {
        let err = decode::<EmailResponse>(
            StatusCode::UNAUTHORIZED,
            URL,
            r#"{"detail": "Token has expired"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.detail(), Some("Token has expired"));
    }

    #[test]
    fn forbidden_is_unauthorized() {
        let err = error_for_status(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, ApiError::Unauthorized { detail: None }));
    }

    #[test]
    fn server_error_keeps_status_and_detail() {
        let err = error_for_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "Database connection failed"}"#,
        );
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail.as_deref(), Some("Database connection failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_has_no_detail() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn garbled_success_body_is_decode_error() {
        let err = decode::<EmailResponse>(StatusCode::OK, URL, "{\"email\":").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(400);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert!(p.len() <= BODY_PREVIEW_LEN + 3);
    }
}
