use thiserror::Error;

/// Classification of a failed request, derived from the HTTP status or from
/// the transport failure that prevented a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401: missing, expired or invalid credential.
    Authentication,
    /// 403: valid session, insufficient role.
    Authorization,
    /// 404.
    NotFound,
    /// 409: e.g. an idempotency key reused with a divergent payload.
    Conflict,
    /// Any other 4xx.
    Validation,
    /// 5xx.
    Server,
    /// The request never reached the server or the response never arrived.
    Network,
    /// No response within the configured request timeout.
    TimedOut,
}

impl ErrorKind {
    /// Classify a non-2xx HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Validation,
        }
    }
}

/// The single error shape surfaced by the request gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    /// `None` when no response was received.
    pub status: Option<u16>,
    pub kind: ErrorKind,
}

impl RequestError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            kind: ErrorKind::from_status(status),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            kind: ErrorKind::Network,
        }
    }

    pub fn timed_out(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            kind: ErrorKind::TimedOut,
        }
    }

    /// Whether the outcome of the request is ambiguous or transient, so that
    /// resubmitting under the same idempotency key is the correct response.
    pub fn is_retry_safe(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Network | ErrorKind::TimedOut | ErrorKind::Server
        )
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RequestError::timed_out(e.to_string())
        } else if let Some(status) = e.status() {
            RequestError::http(status.as_u16(), e.to_string())
        } else {
            RequestError::network(e.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum CashMeError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no token received")]
    MissingToken,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("transfer attempt already completed")]
    AttemptCompleted,

    #[error("invalid OAuth callback: {0}")]
    InvalidCallback(String),
}

impl CashMeError {
    /// The request error, if this failure came back from the gateway.
    pub fn request(&self) -> Option<&RequestError> {
        match self {
            CashMeError::Request(e) => Some(e),
            _ => None,
        }
    }

    /// The HTTP status, if one was received.
    pub fn status(&self) -> Option<u16> {
        self.request().and_then(|e| e.status)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.request().map(|e| e.kind)
    }
}

pub type Result<T> = std::result::Result<T, CashMeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Authorization);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
    }

    #[test]
    fn test_retry_safety() {
        assert!(RequestError::network("reset").is_retry_safe());
        assert!(RequestError::timed_out("slow").is_retry_safe());
        assert!(RequestError::http(502, "bad gateway").is_retry_safe());
        assert!(!RequestError::http(400, "bad amount").is_retry_safe());
        assert!(!RequestError::http(401, "expired").is_retry_safe());
        assert!(!RequestError::http(409, "duplicate").is_retry_safe());
    }

    #[test]
    fn test_display_is_message() {
        let err: CashMeError = RequestError::http(500, "Internal Server Error").into();
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.kind(), Some(ErrorKind::Server));
    }
}
