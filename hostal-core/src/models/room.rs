use serde::{Deserialize, Serialize};

use super::{RoomCategory, RoomState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(rename = "capacidad", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference to an externally stored image.
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(rename = "categoriaHabitacion", skip_serializing_if = "Option::is_none")]
    pub category: Option<RoomCategory>,

    #[serde(rename = "estadoHabitacion", skip_serializing_if = "Option::is_none")]
    pub state: Option<RoomState>,
}

impl Room {
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().and_then(|c| c.id)
    }

    pub fn state_id(&self) -> Option<i64> {
        self.state.as_ref().and_then(|s| s.id)
    }

    /// Nightly price taken from the room's category.
    pub fn nightly_price(&self) -> f64 {
        self.category.as_ref().map(|c| c.price()).unwrap_or(0.0)
    }

    pub fn label(&self) -> String {
        match (&self.number, self.id) {
            (Some(number), _) => format!("Room {}", number),
            (None, Some(id)) => format!("Room #{}", id),
            (None, None) => "Room".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryName;

    #[test]
    fn test_room_wire_format() {
        let json = r#"{
            "id": 12,
            "numero": "204",
            "capacidad": 2,
            "descripcion": "Sea view",
            "imagen": "rooms/204.jpg",
            "activo": true,
            "categoriaHabitacion": {"id": 2, "nombre": "DOBLE", "precioBase": 95.0, "activo": true},
            "estadoHabitacion": {"id": 1, "nombre": "DISPONIBLE", "activo": true}
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();

        assert_eq!(room.number.as_deref(), Some("204"));
        assert_eq!(room.capacity, Some(2));
        assert_eq!(room.category_id(), Some(2));
        assert_eq!(room.state_id(), Some(1));
        assert_eq!(
            room.category.as_ref().and_then(|c| c.name),
            Some(CategoryName::Doble)
        );
        assert_eq!(room.nightly_price(), 95.0);
        assert_eq!(room.label(), "Room 204");
    }

    #[test]
    fn test_room_without_category_has_zero_price() {
        let room = Room::reference(3);
        assert_eq!(room.nightly_price(), 0.0);
        assert_eq!(room.label(), "Room #3");
        assert!(!room.is_active());
    }
}
