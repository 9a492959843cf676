//! Error types for the m365-keepalive run.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Error raised by any keep-alive action or by the run itself.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The user directory could not be fetched. Nothing can run without it.
    #[error("Directory error: {0}")]
    Directory(ApiError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

impl ActivityError {
    /// Returns true if this error must abort the whole run.
    ///
    /// Everything else is logged by the orchestrator and the run moves on
    /// to the next action or user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Auth(_) | Self::Directory(_))
    }
}

/// Configuration and credential errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set. Export it or add it to a .env file")]
    MissingCredential(&'static str),

    #[error("Failed to parse embedded config.toml: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Client-credentials token errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Token endpoint returned HTTP {status}")]
    TokenRejected { status: u16 },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),
}

/// Microsoft Graph errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Graph API request failed: {0}")]
    GraphRequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),

    #[error("Unauthorized (401): Token may be expired: {body}")]
    Unauthorized { body: String },

    #[error("Forbidden (403): Insufficient permissions: {body}")]
    Forbidden { body: String },

    #[error("Rate limited (429): Too many requests: {body}")]
    RateLimited { body: String },

    #[error("Unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl ApiError {
    /// Map a non-accepted status code and its body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized { body },
            403 => Self::Forbidden { body },
            429 => Self::RateLimited { body },
            _ => Self::UnexpectedStatus { status, body },
        }
    }
}

/// Errors from the unauthenticated content sources (news feed, image repository)
/// and local staging of report files.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("News feed unavailable: {0}")]
    Feed(String),

    #[error("Image listing unavailable: {0}")]
    Listing(String),

    #[error("Download failed for {name}: {reason}")]
    Download { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let err = ActivityError::Auth(AuthError::TokenRejected { status: 400 });
        assert!(err.is_fatal());

        let err = ActivityError::Config(ConfigError::MissingCredential("CLIENT_ID"));
        assert!(err.is_fatal());

        let err = ActivityError::Directory(ApiError::Forbidden { body: String::new() });
        assert!(err.is_fatal());

        let err = ActivityError::Api(ApiError::Forbidden { body: String::new() });
        assert!(!err.is_fatal());

        let err = ActivityError::Content(ContentError::Feed("timeout".into()));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(401, String::new()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(429, String::new()),
            ApiError::RateLimited { .. }
        ));

        let err = ApiError::from_status(500, "boom".into());
        assert_eq!(err.to_string(), "Unexpected HTTP 500: boom");
    }

    #[test]
    fn test_permission_errors_keep_the_body() {
        let body = r#"{"error":{"code":"ErrorAccessDenied","message":"Access is denied."}}"#;
        let err = ApiError::from_status(403, body.to_string());

        assert!(matches!(err, ApiError::Forbidden { .. }));
        assert!(err.to_string().contains("ErrorAccessDenied"));
        assert!(ActivityError::Api(err).to_string().contains("Access is denied."));
    }

    #[test]
    fn test_missing_credential_message() {
        let err = ConfigError::MissingCredential("TENANT_ID");
        assert!(err.to_string().starts_with("TENANT_ID is not set"));
    }
}
