use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HostalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStateName {
    Disponible,
    Ocupada,
    Mantenimiento,
}

impl RoomStateName {
    pub const ALL: [RoomStateName; 3] = [
        RoomStateName::Disponible,
        RoomStateName::Ocupada,
        RoomStateName::Mantenimiento,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStateName::Disponible => "DISPONIBLE",
            RoomStateName::Ocupada => "OCUPADA",
            RoomStateName::Mantenimiento => "MANTENIMIENTO",
        }
    }
}

impl std::fmt::Display for RoomStateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStateName {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = super::normalize_variant(s);
        RoomStateName::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                super::unknown_variant("room state", s, &RoomStateName::ALL.map(|c| c.as_str()))
            })
    }
}

/// Operational status of a physical room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<RoomStateName>,

    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl RoomState {
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        self.name
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_name_parse() {
        assert_eq!(
            "mantenimiento".parse::<RoomStateName>().unwrap(),
            RoomStateName::Mantenimiento
        );
        assert!("closed".parse::<RoomStateName>().is_err());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(RoomStateName::Ocupada.to_string(), "OCUPADA");
        let state = RoomState::default();
        assert_eq!(state.display_name(), "-");
        assert!(!state.is_active());
    }
}
