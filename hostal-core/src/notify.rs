//! User-facing notifications for the outcome of an operation.

use serde::Serialize;

use crate::error::HostalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "Success",
            NotificationLevel::Info => "Info",
            NotificationLevel::Warning => "Warning",
            NotificationLevel::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn created(entity: &str) -> Self {
        Self::success(format!("{} created", entity))
    }

    pub fn updated(entity: &str) -> Self {
        Self::success(format!("{} updated", entity))
    }

    pub fn deleted(entity: &str) -> Self {
        Self::success(format!("{} deleted", entity))
    }

    pub fn activated(entity: &str) -> Self {
        Self::success(format!("{} activated", entity))
    }

    pub fn deactivated(entity: &str) -> Self {
        Self::success(format!("{} deactivated", entity))
    }

    /// Translates a failure into the text shown to the user.
    ///
    /// Known backend error keys and HTTP statuses get a friendly message;
    /// everything else falls back to the error's own text.
    pub fn from_error(error: &HostalError) -> Self {
        if let HostalError::Validation(message) = error {
            return Self::warning(format!("Please review the form: {}", message));
        }
        if let HostalError::InvalidStatusTransition { .. } = error {
            return Self::warning(error.to_string());
        }

        let known = error
            .backend_code()
            .as_deref()
            .and_then(friendly_message)
            .or_else(|| match error {
                HostalError::Api { status, .. } => friendly_message(&format!("error.http.{}", status)),
                HostalError::ApiUnavailable(_) | HostalError::ApiTimeout(_) => {
                    friendly_message("error.server.not.reachable")
                }
                _ => None,
            });

        match known {
            Some(text) => Self::error(text),
            None => Self::error(error.to_string()),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.level.label(), self.message)
    }
}

/// Friendly text for backend error keys such as `error.idexists`.
pub fn friendly_message(code: &str) -> Option<&'static str> {
    let text = match code {
        "error.idexists" => "A new record cannot already have an id",
        "error.idnull" => "The record has no id",
        "error.idinvalid" => "The id does not match the record being saved",
        "error.entitynotfound" | "error.http.404" => "The record no longer exists",
        "error.validation" | "error.http.400" => "The backend rejected the data as invalid",
        "error.concurrencyFailure" | "error.http.409" => {
            "The record was changed by someone else, reload and try again"
        }
        "error.http.401" => "Your session is not authorized, sign in again",
        "error.http.403" => "You do not have permission to do that",
        "error.http.500" => "The server failed to process the request",
        "error.http.502" | "error.http.503" | "error.http.504" => {
            "The server is temporarily unavailable"
        }
        "error.server.not.reachable" => "The server is not reachable",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_helpers() {
        let n = Notification::created("Room");
        assert_eq!(n.level, NotificationLevel::Success);
        assert_eq!(n.message, "Room created");
        assert_eq!(Notification::deactivated("Category").message, "Category deactivated");
    }

    #[test]
    fn test_backend_code_wins() {
        let err = HostalError::Api {
            status: 400,
            code: Some("error.idexists".to_string()),
            message: "A new habitacion cannot already have an ID".to_string(),
        };
        let n = Notification::from_error(&err);
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "A new record cannot already have an id");
    }

    #[test]
    fn test_status_fallback() {
        let err = HostalError::Api {
            status: 403,
            code: None,
            message: "Forbidden".to_string(),
        };
        assert_eq!(
            Notification::from_error(&err).message,
            "You do not have permission to do that"
        );
    }

    #[test]
    fn test_unknown_error_uses_own_text() {
        let err = HostalError::Api {
            status: 418,
            code: Some("error.teapot".to_string()),
            message: "short and stout".to_string(),
        };
        let n = Notification::from_error(&err);
        assert!(n.message.contains("short and stout"));
    }

    #[test]
    fn test_validation_is_a_warning() {
        let n = Notification::from_error(&HostalError::Validation("number: required".into()));
        assert_eq!(n.level, NotificationLevel::Warning);
        assert!(n.message.ends_with("number: required"));
    }

    #[test]
    fn test_unreachable() {
        let n = Notification::from_error(&HostalError::ApiUnavailable("connection refused".into()));
        assert_eq!(n.message, "The server is not reachable");
    }

    #[test]
    fn test_friendly_message_lookup() {
        assert!(friendly_message("error.entitynotfound").is_some());
        assert!(friendly_message("error.unknown").is_none());
    }
}
