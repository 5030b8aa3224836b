use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Client;
use crate::error::HostalError;

/// Lifecycle label of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckIn,
    Finalized,
    Canceled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckIn,
        ReservationStatus::Finalized,
        ReservationStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckIn => "CHECK_IN",
            ReservationStatus::Finalized => "FINALIZED",
            ReservationStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = match super::normalize_variant(s).as_str() {
            "CHECKIN" => "CHECK_IN".to_string(),
            "CANCELLED" => "CANCELED".to_string(),
            other => other.to_string(),
        };
        ReservationStatus::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                super::unknown_variant(
                    "reservation status",
                    s,
                    &ReservationStatus::ALL.map(|c| c.as_str()),
                )
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "cliente", skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,

    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Reservation {
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn client_id(&self) -> Option<i64> {
        self.client.as_ref().and_then(|c| c.id)
    }

    /// Number of nights between the start and end dates, zero when unknown.
    pub fn nights(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (end - start).num_days().max(0),
            _ => 0,
        }
    }

    /// Status as reported by the backend, `PENDING` when absent.
    pub fn current_status(&self) -> ReservationStatus {
        self.status.unwrap_or(ReservationStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_wire() {
        assert_eq!(ReservationStatus::CheckIn.to_string(), "CHECK_IN");
        assert_eq!(
            serde_json::to_string(&ReservationStatus::CheckIn).unwrap(),
            "\"CHECK_IN\""
        );
        let parsed: ReservationStatus = serde_json::from_str("\"FINALIZED\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Finalized);
    }

    #[test]
    fn test_status_from_user_input() {
        assert_eq!(
            "check-in".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckIn
        );
        assert_eq!(
            "checkin".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckIn
        );
        assert_eq!(
            "cancelled".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Canceled
        );
        assert!("archived".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_nights() {
        let reservation = Reservation {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 4),
            ..Default::default()
        };
        assert_eq!(reservation.nights(), 3);

        let inverted = Reservation {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 4),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        };
        assert_eq!(inverted.nights(), 0);
        assert_eq!(Reservation::default().nights(), 0);
    }

    #[test]
    fn test_reservation_wire_format() {
        let json = r#"{"id":5,"cliente":{"id":3,"nombre":"Luis"},"fechaInicio":"2025-06-10","fechaFin":"2025-06-12","estado":"CONFIRMED","activo":true}"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.client_id(), Some(3));
        assert_eq!(reservation.current_status(), ReservationStatus::Confirmed);
        assert_eq!(reservation.nights(), 2);
    }
}
