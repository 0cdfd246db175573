use thiserror::Error;

/// Unified error type for the entire finance-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    /// `message` is the `message` field of a JSON error body, when the
    /// server sent a non-blank one.
    #[error("HTTP {status}: {}", http_detail(.status, .message))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: String,
        operation: String,
    },

    #[error("Request cancelled: view was closed")]
    Cancelled,

    // ── Encoding ────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Client-side ─────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    pub fn http(status: u16, message: Option<String>) -> Self {
        CoreError::Http {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn unsupported(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        CoreError::Unsupported {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    /// Text suitable for the single error line a view shows.
    ///
    /// HTTP errors surface the server's own message, or the status reason
    /// when it sent none; everything else uses the Display text.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Http { status, message } => http_detail(status, message),
            CoreError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}

fn http_detail(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => reqwest::StatusCode::from_u16(*status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Request failed")
            .to_string(),
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Query strings can carry filters or tokens; keep them out of
        // user-visible messages and logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
