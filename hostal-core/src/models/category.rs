use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HostalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryName {
    Simple,
    Doble,
    Suite,
    Familiar,
}

impl CategoryName {
    pub const ALL: [CategoryName; 4] = [
        CategoryName::Simple,
        CategoryName::Doble,
        CategoryName::Suite,
        CategoryName::Familiar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryName::Simple => "SIMPLE",
            CategoryName::Doble => "DOBLE",
            CategoryName::Suite => "SUITE",
            CategoryName::Familiar => "FAMILIAR",
        }
    }
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryName {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = super::normalize_variant(s);
        CategoryName::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                super::unknown_variant(
                    "room category",
                    s,
                    &CategoryName::ALL.map(|c| c.as_str()),
                )
            })
    }
}

/// A priced class of room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<CategoryName>,

    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "precioBase", skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,

    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl RoomCategory {
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn price(&self) -> f64 {
        self.base_price.unwrap_or(0.0)
    }

    pub fn display_name(&self) -> String {
        self.name
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
