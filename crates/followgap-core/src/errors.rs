use std::path::PathBuf;

/// Core error type.
///
/// The adapter crate maps provider-specific failures into this type so the
/// collector and session layers can handle them uniformly (recoverable via
/// the 2FA prompt vs fatal for the run).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("two-factor authentication required")]
    TwoFactorRequired { identifier: String },

    #[error("invalid two-factor code")]
    InvalidCode,

    #[error("session expired or rejected by the provider")]
    AuthExpired,

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed input: {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
