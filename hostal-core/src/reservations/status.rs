use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HostalError, HostalResult};
use crate::models::ReservationStatus;

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Finalized | ReservationStatus::Canceled
        )
    }

    /// The next step on the happy path, if any.
    pub fn next(&self) -> Option<ReservationStatus> {
        match self {
            ReservationStatus::Pending => Some(ReservationStatus::Confirmed),
            ReservationStatus::Confirmed => Some(ReservationStatus::CheckIn),
            ReservationStatus::CheckIn => Some(ReservationStatus::Finalized),
            ReservationStatus::Finalized | ReservationStatus::Canceled => None,
        }
    }

    pub fn allowed_transitions(&self) -> Vec<ReservationStatus> {
        let mut allowed: Vec<_> = self.next().into_iter().collect();
        if !self.is_terminal() {
            allowed.push(ReservationStatus::Canceled);
        }
        allowed
    }

    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

/// User-facing action that moves a reservation along its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusAction {
    Confirm,
    CheckIn,
    Finalize,
    Cancel,
}

impl StatusAction {
    pub const ALL: [StatusAction; 4] = [
        StatusAction::Confirm,
        StatusAction::CheckIn,
        StatusAction::Finalize,
        StatusAction::Cancel,
    ];

    pub fn target(&self) -> ReservationStatus {
        match self {
            StatusAction::Confirm => ReservationStatus::Confirmed,
            StatusAction::CheckIn => ReservationStatus::CheckIn,
            StatusAction::Finalize => ReservationStatus::Finalized,
            StatusAction::Cancel => ReservationStatus::Canceled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "Confirm",
            StatusAction::CheckIn => "Check in",
            StatusAction::Finalize => "Finalize",
            StatusAction::Cancel => "Cancel",
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "confirm",
            StatusAction::CheckIn => "check-in",
            StatusAction::Finalize => "finalize",
            StatusAction::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for StatusAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusAction {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "confirm" => Ok(StatusAction::Confirm),
            "check-in" | "checkin" => Ok(StatusAction::CheckIn),
            "finalize" | "finalise" => Ok(StatusAction::Finalize),
            "cancel" => Ok(StatusAction::Cancel),
            _ => Err(HostalError::Validation(format!(
                "unknown action '{}', expected one of: confirm, check-in, finalize, cancel",
                s
            ))),
        }
    }
}

/// Actions to offer for a reservation in `status`, in display order.
pub fn available_actions(status: ReservationStatus) -> Vec<StatusAction> {
    StatusAction::ALL
        .into_iter()
        .filter(|action| status.can_transition_to(action.target()))
        .collect()
}

/// Resolves the status `action` leads to, rejecting it when not offered.
pub fn check_transition(
    current: ReservationStatus,
    action: StatusAction,
) -> HostalResult<ReservationStatus> {
    let target = action.target();
    if current.can_transition_to(target) {
        Ok(target)
    } else {
        Err(HostalError::InvalidStatusTransition {
            from: current.to_string(),
            to: target.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut status = ReservationStatus::Pending;
        let mut visited = vec![status];
        while let Some(next) = status.next() {
            status = next;
            visited.push(status);
        }
        assert_eq!(
            visited,
            vec![
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
                ReservationStatus::CheckIn,
                ReservationStatus::Finalized,
            ]
        );
    }

    #[test]
    fn test_cancel_reachable_from_non_terminal() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckIn,
        ] {
            assert!(status.can_transition_to(ReservationStatus::Canceled));
        }
        assert!(!ReservationStatus::Finalized.can_transition_to(ReservationStatus::Canceled));
        assert!(!ReservationStatus::Canceled.can_transition_to(ReservationStatus::Canceled));
    }

    #[test]
    fn test_no_skipping_steps() {
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::CheckIn));
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Finalized));
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            available_actions(ReservationStatus::Pending),
            vec![StatusAction::Confirm, StatusAction::Cancel]
        );
        assert_eq!(
            available_actions(ReservationStatus::Confirmed),
            vec![StatusAction::CheckIn, StatusAction::Cancel]
        );
        assert_eq!(
            available_actions(ReservationStatus::CheckIn),
            vec![StatusAction::Finalize, StatusAction::Cancel]
        );
        assert!(available_actions(ReservationStatus::Finalized).is_empty());
        assert!(available_actions(ReservationStatus::Canceled).is_empty());
    }

    #[test]
    fn test_check_transition() {
        assert_eq!(
            check_transition(ReservationStatus::Confirmed, StatusAction::CheckIn).unwrap(),
            ReservationStatus::CheckIn
        );
        let err = check_transition(ReservationStatus::Finalized, StatusAction::Cancel).unwrap_err();
        assert_eq!(err.error_code(), "E3002");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("check_in".parse::<StatusAction>().unwrap(), StatusAction::CheckIn);
        assert_eq!("Check In".parse::<StatusAction>().unwrap(), StatusAction::CheckIn);
        assert_eq!("CANCEL".parse::<StatusAction>().unwrap(), StatusAction::Cancel);
        assert!("reopen".parse::<StatusAction>().is_err());
        for action in StatusAction::ALL {
            assert_eq!(action.command().parse::<StatusAction>().unwrap(), action);
        }
    }
}
