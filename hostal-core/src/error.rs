//! Error types for the Hostal core library.
//!
//! Every failure that can reach the user carries a short code so that
//! terminal output and logs can be matched up.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Config file, environment and value errors |
//! | E2001-E2099 | API | Transport, HTTP status and decoding errors |
//! | E3001-E3099 | Workflow | Form validation and reservation workflow errors |
//! | E9001-E9099 | General | Internal, IO and serialization errors |

use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the Hostal core library.
#[derive(Debug, Error)]
pub enum HostalError {
    // ========================================================================
    // Config Errors (E1001-E1099)
    // ========================================================================
    /// Configuration file could not be parsed
    #[error("[E1001] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// A configuration value is present but unusable
    #[error("[E1002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // API Errors (E2001-E2099)
    // ========================================================================
    /// The backend answered with a non-success status
    #[error("[E2001] API request failed with status {status}: {message}")]
    Api {
        status: u16,
        /// Backend error key such as `error.idexists`, when the body carried one
        code: Option<String>,
        message: String,
    },

    /// The backend could not be reached
    #[error("[E2002] API unavailable: {0}")]
    ApiUnavailable(String),

    /// The request did not complete in time
    #[error("[E2003] API request timed out: {0}")]
    ApiTimeout(String),

    /// The response body did not match the expected shape
    #[error("[E2004] Failed to decode API response: {0}")]
    ApiDecode(String),

    /// Request could not be built or sent
    #[error("[E2005] API request error: {0}")]
    ApiRequest(String),

    /// A create was attempted on a record that already has an identifier
    #[error("[E2006] A new {0} cannot already have an ID")]
    IdExists(String),

    /// An update was attempted on a record without an identifier
    #[error("[E2007] Cannot update {0} without an ID")]
    IdNull(String),

    // ========================================================================
    // Workflow Errors (E3001-E3099)
    // ========================================================================
    /// Form input was rejected
    #[error("[E3001] Validation failed: {0}")]
    Validation(String),

    /// Reservation status change not allowed from the current status
    #[error("[E3002] Cannot move reservation from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Record referenced by a workflow is missing
    #[error("[E3003] {entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// Internal error (bug or unexpected state)
    #[error("[E9001] Internal error: {0}")]
    Internal(String),

    /// IO operation failed
    #[error("[E9002] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization failed
    #[error("[E9003] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for Hostal operations.
pub type HostalResult<T> = Result<T, HostalError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for HostalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HostalError::ApiTimeout(err.to_string())
        } else if err.is_connect() {
            HostalError::ApiUnavailable(err.to_string())
        } else if err.is_status() {
            let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
            HostalError::Api {
                status,
                code: Some(format!("error.http.{}", status)),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            HostalError::ApiDecode(err.to_string())
        } else {
            HostalError::ApiRequest(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HostalError {
    fn from(err: serde_json::Error) -> Self {
        HostalError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for HostalError {
    fn from(err: std::io::Error) -> Self {
        HostalError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for HostalError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => HostalError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::FileParse { uri, cause } => HostalError::ConfigParseError(
                format!("Failed to parse {}: {}", uri.unwrap_or_default(), cause),
            ),
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => HostalError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => HostalError::ConfigParseError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for HostalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                let field: &str = if field == "__all__" { "form" } else { field };
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        HostalError::Validation(messages.join("; "))
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl HostalError {
    /// Returns true if this error came from talking to the backend.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            HostalError::Api { .. }
                | HostalError::ApiUnavailable(_)
                | HostalError::ApiTimeout(_)
                | HostalError::ApiDecode(_)
                | HostalError::ApiRequest(_)
                | HostalError::IdExists(_)
                | HostalError::IdNull(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HostalError::ConfigParseError(_) | HostalError::InvalidConfigValue { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HostalError::NotFound { .. } | HostalError::Api { status: 404, .. }
        )
    }

    /// Backend error key, either sent by the server or implied by the variant.
    pub fn backend_code(&self) -> Option<String> {
        match self {
            HostalError::Api { code: Some(c), .. } => Some(c.clone()),
            HostalError::Api { status, .. } => Some(format!("error.http.{}", status)),
            HostalError::IdExists(_) => Some("error.idexists".to_string()),
            HostalError::IdNull(_) => Some("error.idnull".to_string()),
            HostalError::NotFound { .. } => Some("error.entitynotfound".to_string()),
            HostalError::Validation(_) => Some("error.validation".to_string()),
            _ => None,
        }
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            HostalError::ConfigParseError(_) => "E1001",
            HostalError::InvalidConfigValue { .. } => "E1002",
            HostalError::Api { .. } => "E2001",
            HostalError::ApiUnavailable(_) => "E2002",
            HostalError::ApiTimeout(_) => "E2003",
            HostalError::ApiDecode(_) => "E2004",
            HostalError::ApiRequest(_) => "E2005",
            HostalError::IdExists(_) => "E2006",
            HostalError::IdNull(_) => "E2007",
            HostalError::Validation(_) => "E3001",
            HostalError::InvalidStatusTransition { .. } => "E3002",
            HostalError::NotFound { .. } => "E3003",
            HostalError::Internal(_) => "E9001",
            HostalError::IoError(_) => "E9002",
            HostalError::SerializationError(_) => "E9003",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            HostalError::ApiUnavailable(_) => {
                Some("Check that the backend is running and HOSTAL_API_URL is correct")
            }
            HostalError::ApiTimeout(_) => Some("Raise api.timeout_secs or try again later"),
            HostalError::Api { status: 401, .. } | HostalError::Api { status: 403, .. } => {
                Some("Set a valid token with HOSTAL_API_TOKEN")
            }
            HostalError::InvalidConfigValue { .. } | HostalError::ConfigParseError(_) => {
                Some("Run 'hostal config show' to inspect the effective configuration")
            }
            HostalError::InvalidStatusTransition { .. } => {
                Some("Run 'hostal reservations show <id>' to see the allowed actions")
            }
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        if self.is_api_error() || matches!(self, HostalError::Validation(_)) {
            warn!(error_code = %code, suggestion = suggestion, "Request failed: {}", self);
        } else {
            error!(error_code = %code, suggestion = suggestion, "Error occurred: {}", self);
        }
    }
}

// ============================================================================
// User-friendly error formatting for CLI
// ============================================================================

/// Format an error for CLI display with suggestions.
pub struct CliErrorDisplay<'a> {
    error: &'a HostalError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a HostalError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                writeln!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        Ok(())
    }
}
