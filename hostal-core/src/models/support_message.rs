use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HostalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderRole {
    Admin,
    Client,
}

impl SenderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderRole::Admin => "ADMIN",
            SenderRole::Client => "CLIENT",
        }
    }
}

impl std::fmt::Display for SenderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderRole {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalize_variant(s).as_str() {
            "ADMIN" => Ok(SenderRole::Admin),
            "CLIENT" => Ok(SenderRole::Client),
            _ => Err(super::unknown_variant("sender role", s, &["ADMIN", "CLIENT"])),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "mensaje", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "remitente", skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderRole>,

    #[serde(rename = "leido", skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,

    #[serde(rename = "fechaEnvio", skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,

    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SupportMessage {
    pub fn is_read(&self) -> bool {
        self.read.unwrap_or(false)
    }

    pub fn is_from_admin(&self) -> bool {
        self.sender == Some(SenderRole::Admin)
    }
}
