//! Reservation lifecycle and room reconciliation.

mod gateway;
mod reconcile;
mod status;
mod workflow;

pub use gateway::ReservationGateway;
pub use reconcile::{plan_room_changes, RoomChangePlan};
pub use status::{available_actions, check_transition, StatusAction};
pub use workflow::{
    advance, create_reservation, edit_reservation, load_overview, CreatedReservation,
    OverviewLine, ReconcileReport, ReservationOverview,
};
