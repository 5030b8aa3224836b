use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::ReservationDetail;

/// What has to change so that a reservation's detail lines match a room selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomChangePlan {
    /// Rooms selected but not yet linked, ascending.
    pub to_add: Vec<i64>,
    /// Linked lines that are no longer selected, or duplicate another line.
    pub to_remove: Vec<ReservationDetail>,
    /// Lines that stay as they are.
    pub kept: Vec<ReservationDetail>,
}

impl RoomChangePlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn remove_ids(&self) -> Vec<i64> {
        self.to_remove.iter().filter_map(|d| d.id).collect()
    }
}

/// Diffs the selected room ids against the existing detail lines.
///
/// Lines without an id cannot be deleted and are ignored. Lines without a
/// room are removed. When several lines point at the same selected room the
/// one with the lowest id is kept.
pub fn plan_room_changes(selected: &[i64], existing: &[ReservationDetail]) -> RoomChangePlan {
    let selected: BTreeSet<i64> = selected.iter().copied().collect();

    let mut by_room: BTreeMap<i64, Vec<&ReservationDetail>> = BTreeMap::new();
    let mut to_remove = Vec::new();

    for detail in existing.iter().filter(|d| d.id.is_some()) {
        match detail.room_id() {
            Some(room_id) => by_room.entry(room_id).or_default().push(detail),
            None => to_remove.push(detail.clone()),
        }
    }

    let mut kept = Vec::new();
    for (room_id, mut details) in by_room.iter().map(|(k, v)| (*k, v.clone())) {
        details.sort_by_key(|d| d.id);
        if selected.contains(&room_id) {
            let mut iter = details.into_iter();
            if let Some(first) = iter.next() {
                kept.push(first.clone());
            }
            to_remove.extend(iter.cloned());
        } else {
            to_remove.extend(details.into_iter().cloned());
        }
    }

    let to_add = selected
        .iter()
        .copied()
        .filter(|room_id| !by_room.contains_key(room_id))
        .collect();

    to_remove.sort_by_key(|d| (d.room_id(), d.id));

    RoomChangePlan {
        to_add,
        to_remove,
        kept,
    }
}
