use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Credentials rejected, or the session stayed invalid after a re-login.
    #[error("{}", describe_status(*status))]
    Authentication { status: StatusCode },

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("No XSRF-TOKEN cookie in session response")]
    MissingXsrfToken,

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Connection has been released - create a new client")]
    ConnectionReleased,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn authentication(status: StatusCode) -> Self {
        ApiError::Authentication { status }
    }

    /// Build a status error, preferring the response body as message.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            describe_status(status)
        } else {
            Self::truncate_body(body.trim())
        };
        ApiError::Status { status, message }
    }

    /// HTTP status associated with this error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Authentication { status } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }
}

/// "<code> <phrase>: <description>" for the statuses the portal is known to
/// return; everything else falls back to the canonical reason phrase.
pub fn describe_status(status: StatusCode) -> String {
    let description = match status.as_u16() {
        400 => Some("Bad request syntax or unsupported method"),
        401 => Some("No permission -- see authorization schemes"),
        403 => Some("Request forbidden -- authorization will not help"),
        404 => Some("Nothing matches the given URI"),
        405 => Some("Specified method is invalid for this resource"),
        408 => Some("Request timed out; try again later"),
        409 => Some("Request conflict"),
        429 => Some("The user has sent too many requests in a given amount of time (\"rate limiting\")"),
        500 => Some("Server got itself in trouble"),
        502 => Some("Invalid responses from another server/proxy"),
        503 => Some("The server cannot process the request due to a high load"),
        504 => Some("The gateway server did not receive a timely response"),
        _ => None,
    };
    let phrase = status.canonical_reason().unwrap_or("Unknown Status");
    match description {
        Some(description) => format!("{} {}: {}", status.as_u16(), phrase, description),
        None => format!("{} {}", status.as_u16(), phrase),
    }
}
