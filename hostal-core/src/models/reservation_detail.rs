use serde::{Deserialize, Serialize};

use super::{Reservation, Room};

/// Join record linking a reservation to a room with its priced line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "reserva", skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,

    #[serde(rename = "habitacion", skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,

    #[serde(rename = "precioUnitario", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    #[serde(rename = "nota", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReservationDetail {
    pub fn new(reservation_id: i64, room_id: i64, unit_price: f64) -> Self {
        Self {
            id: None,
            reservation: Some(Reservation::reference(reservation_id)),
            room: Some(Room::reference(room_id)),
            unit_price: Some(unit_price),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn room_id(&self) -> Option<i64> {
        self.room.as_ref().and_then(|r| r.id)
    }

    pub fn reservation_id(&self) -> Option<i64> {
        self.reservation.as_ref().and_then(|r| r.id)
    }

    pub fn price(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_detail_serializes_references() {
        let detail = ReservationDetail::new(8, 21, 120.0).with_note("late arrival");
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "reserva": {"id": 8},
                "habitacion": {"id": 21},
                "precioUnitario": 120.0,
                "nota": "late arrival"
            })
        );
        assert_eq!(detail.room_id(), Some(21));
        assert_eq!(detail.reservation_id(), Some(8));
    }
}
