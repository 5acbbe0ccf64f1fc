use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong between a page and the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(" – {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Aborted,
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

impl ApiError {
    /// Builds a `Status` error from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            message: server_message(body),
        }
    }

    /// Message shown in notifications: what the server said, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(m), .. } => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }
}

/// `{"message": "..."}` wins; a short plain-text body is used as is.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<MessageBody>(body) {
        Ok(parsed) => parsed.message.filter(|m| !m.trim().is_empty()),
        Err(_) if !body.starts_with('{') && !body.starts_with('<') && body.len() <= 200 => {
            Some(body.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_message_is_extracted() {
        let err = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert_eq!(err.to_string(), "HTTP 401 – Invalid credentials");
    }

    #[test]
    fn plain_text_body_is_used_when_short() {
        let err = ApiError::from_response(409, "Email already registered");
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[test]
    fn html_or_empty_bodies_fall_back() {
        let html = ApiError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(html.user_message("Login failed"), "Login failed");

        let empty = ApiError::from_response(500, "");
        assert_eq!(empty.user_message("Login failed"), "Login failed");
        assert_eq!(empty.to_string(), "HTTP 500");
    }

    #[test]
    fn json_without_message_falls_back() {
        let err = ApiError::from_response(400, r#"{"error":"bad"}"#);
        assert_eq!(err.user_message("nope"), "nope");
    }

    #[test]
    fn non_status_errors_use_fallback() {
        assert_eq!(ApiError::Aborted.user_message("x"), "x");
        assert!(ApiError::Aborted.is_aborted());
        assert!(!ApiError::Decode("y".into()).is_aborted());
    }
}
