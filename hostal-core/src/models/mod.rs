mod category;
mod client;
mod reservation;
mod reservation_detail;
mod room;
mod room_state;
mod support_message;

pub use category::{CategoryName, RoomCategory};
pub use client::Client;
pub use reservation::{Reservation, ReservationStatus};
pub use reservation_detail::ReservationDetail;
pub use room::Room;
pub use room_state::{RoomState, RoomStateName};
pub use support_message::{SenderRole, SupportMessage};

use crate::error::HostalError;

/// Error returned when a fixed-set name does not parse.
pub(crate) fn unknown_variant(kind: &str, value: &str, expected: &[&str]) -> HostalError {
    HostalError::Validation(format!(
        "unknown {} '{}', expected one of: {}",
        kind,
        value,
        expected.join(", ")
    ))
}

/// Normalizes user input like `check-in` or `Check In` to `CHECK_IN`.
pub(crate) fn normalize_variant(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
