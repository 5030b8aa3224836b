//! Client-side filters applied to fetched collections before rendering.
//!
//! An empty filter keeps every record, and filtering never reorders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    CategoryName, Reservation, ReservationStatus, Room, RoomCategory, RoomState, RoomStateName,
    SenderRole, SupportMessage,
};

fn matches_text(needle: Option<&str>, haystacks: &[Option<&str>]) -> bool {
    let needle = match needle.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_lowercase(),
        _ => return true,
    };

    haystacks
        .iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(&needle))
}

fn in_price_range(price: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
}

pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    fn apply_owned(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    /// Matched against number, description, category and state names.
    pub text: Option<String>,
    pub category: Option<CategoryName>,
    pub state: Option<RoomStateName>,
    pub min_capacity: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub active_only: bool,
}

impl ListFilter<Room> for RoomFilter {
    fn matches(&self, room: &Room) -> bool {
        let category_name = room.category.as_ref().and_then(|c| c.name);
        let state_name = room.state.as_ref().and_then(|s| s.name);

        let text_ok = matches_text(
            self.text.as_deref(),
            &[
                room.number.as_deref(),
                room.description.as_deref(),
                category_name.map(|c| c.as_str()),
                state_name.map(|s| s.as_str()),
            ],
        );

        text_ok
            && self.category.map_or(true, |c| category_name == Some(c))
            && self.state.map_or(true, |s| state_name == Some(s))
            && self
                .min_capacity
                .map_or(true, |min| room.capacity.unwrap_or(0) >= min)
            && in_price_range(room.nightly_price(), self.min_price, self.max_price)
            && (!self.active_only || room.is_active())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub text: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub active_only: bool,
}

impl ListFilter<RoomCategory> for CategoryFilter {
    fn matches(&self, category: &RoomCategory) -> bool {
        matches_text(
            self.text.as_deref(),
            &[
                category.name.map(|n| n.as_str()),
                category.description.as_deref(),
            ],
        ) && in_price_range(category.price(), self.min_price, self.max_price)
            && (!self.active_only || category.is_active())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomStateFilter {
    pub text: Option<String>,
    pub active_only: bool,
}

impl ListFilter<RoomState> for RoomStateFilter {
    fn matches(&self, state: &RoomState) -> bool {
        matches_text(
            self.text.as_deref(),
            &[state.name.map(|n| n.as_str()), state.description.as_deref()],
        ) && (!self.active_only || state.is_active())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub client_id: Option<i64>,
    /// Matched against the client's name and email.
    pub text: Option<String>,
    /// Keeps reservations whose stay overlaps `[from, to]`.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub active_only: bool,
}

impl ListFilter<Reservation> for ReservationFilter {
    fn matches(&self, reservation: &Reservation) -> bool {
        let client = reservation.client.as_ref();
        let text_ok = matches_text(
            self.text.as_deref(),
            &[
                client.and_then(|c| c.first_name.as_deref()),
                client.and_then(|c| c.last_name.as_deref()),
                client.and_then(|c| c.email.as_deref()),
            ],
        );

        let overlaps = match (self.from, self.to) {
            (None, None) => true,
            (from, to) => {
                let starts_before_end = match (to, reservation.start_date) {
                    (Some(to), Some(start)) => start <= to,
                    (Some(_), None) => false,
                    (None, _) => true,
                };
                let ends_after_start = match (from, reservation.end_date) {
                    (Some(from), Some(end)) => end >= from,
                    (Some(_), None) => false,
                    (None, _) => true,
                };
                starts_before_end && ends_after_start
            }
        };

        text_ok
            && overlaps
            && self
                .status
                .map_or(true, |s| reservation.current_status() == s)
            && self
                .client_id
                .map_or(true, |id| reservation.client_id() == Some(id))
            && (!self.active_only || reservation.is_active())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageFilter {
    pub unread_only: bool,
    pub sender: Option<SenderRole>,
    pub text: Option<String>,
}

impl ListFilter<SupportMessage> for MessageFilter {
    fn matches(&self, message: &SupportMessage) -> bool {
        matches_text(self.text.as_deref(), &[message.text.as_deref()])
            && self.sender.map_or(true, |s| message.sender == Some(s))
            && (!self.unread_only || !message.is_read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;

    fn room(id: i64, number: &str, category: CategoryName, price: f64, active: bool) -> Room {
        Room {
            id: Some(id),
            number: Some(number.to_string()),
            capacity: Some(2),
            description: Some(format!("Room {} description", number)),
            active: Some(active),
            category: Some(RoomCategory {
                id: Some(1),
                name: Some(category),
                base_price: Some(price),
                ..Default::default()
            }),
            state: Some(RoomState {
                id: Some(1),
                name: Some(RoomStateName::Disponible),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn rooms() -> Vec<Room> {
        vec![
            room(1, "101", CategoryName::Simple, 50.0, true),
            room(2, "102", CategoryName::Doble, 90.0, true),
            room(3, "201", CategoryName::Suite, 250.0, false),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_all_in_order() {
        let rooms = rooms();
        let filtered = RoomFilter::default().apply(&rooms);
        let ids: Vec<_> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_room_text_filter_is_case_insensitive() {
        let rooms = rooms();
        let filter = RoomFilter {
            text: Some("SUITE".to_string()),
            ..Default::default()
        };
        let filtered = filter.apply(&rooms);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, Some(3));

        let filter = RoomFilter {
            text: Some("10".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rooms).len(), 2);
    }

    #[test]
    fn test_blank_text_matches_everything() {
        let rooms = rooms();
        let filter = RoomFilter {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rooms).len(), 3);
    }

    #[test]
    fn test_room_price_range_inclusive() {
        let rooms = rooms();
        let filter = RoomFilter {
            min_price: Some(50.0),
            max_price: Some(90.0),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&rooms).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_room_active_and_category() {
        let rooms = rooms();
        let filter = RoomFilter {
            active_only: true,
            ..Default::default()
        };
        assert_eq!(filter.apply(&rooms).len(), 2);

        let filter = RoomFilter {
            category: Some(CategoryName::Doble),
            state: Some(RoomStateName::Disponible),
            ..Default::default()
        };
        assert_eq!(filter.apply_owned(rooms).len(), 1);
    }

    #[test]
    fn test_category_filter() {
        let categories = vec![
            RoomCategory {
                id: Some(1),
                name: Some(CategoryName::Simple),
                description: Some("Single bed".to_string()),
                base_price: Some(40.0),
                active: Some(true),
            },
            RoomCategory {
                id: Some(2),
                name: Some(CategoryName::Suite),
                description: Some("Ocean suite".to_string()),
                base_price: Some(300.0),
                active: Some(false),
            },
        ];

        let filter = CategoryFilter {
            text: Some("bed".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&categories).len(), 1);

        let filter = CategoryFilter {
            min_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(filter.apply(&categories)[0].id, Some(2));

        let filter = CategoryFilter {
            active_only: true,
            max_price: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(filter.apply(&categories)[0].id, Some(1));
    }

    fn reservation(id: i64, status: ReservationStatus, start: u32, end: u32) -> Reservation {
        Reservation {
            id: Some(id),
            client: Some(Client {
                id: Some(id * 10),
                first_name: Some("Marta".to_string()),
                last_name: Some(format!("Guest{}", id)),
                ..Default::default()
            }),
            start_date: NaiveDate::from_ymd_opt(2025, 7, start),
            end_date: NaiveDate::from_ymd_opt(2025, 7, end),
            status: Some(status),
            active: Some(true),
        }
    }

    #[test]
    fn test_reservation_filter_status_and_client() {
        let reservations = vec![
            reservation(1, ReservationStatus::Pending, 1, 3),
            reservation(2, ReservationStatus::Confirmed, 5, 8),
            reservation(3, ReservationStatus::Pending, 10, 12),
        ];

        let filter = ReservationFilter {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        };
        assert_eq!(filter.apply(&reservations).len(), 2);

        let filter = ReservationFilter {
            client_id: Some(20),
            ..Default::default()
        };
        assert_eq!(filter.apply(&reservations)[0].id, Some(2));

        let filter = ReservationFilter {
            text: Some("guest3".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&reservations)[0].id, Some(3));
    }

    #[test]
    fn test_reservation_filter_date_overlap() {
        let reservations = vec![
            reservation(1, ReservationStatus::Pending, 1, 3),
            reservation(2, ReservationStatus::Confirmed, 5, 8),
            reservation(3, ReservationStatus::Pending, 10, 12),
        ];

        let filter = ReservationFilter {
            from: NaiveDate::from_ymd_opt(2025, 7, 3),
            to: NaiveDate::from_ymd_opt(2025, 7, 6),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&reservations).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);

        let filter = ReservationFilter {
            from: NaiveDate::from_ymd_opt(2025, 7, 11),
            ..Default::default()
        };
        assert_eq!(filter.apply(&reservations)[0].id, Some(3));
    }

    #[test]
    fn test_message_filter() {
        let messages = vec![
            SupportMessage {
                id: Some(1),
                text: Some("Need towels".to_string()),
                sender: Some(SenderRole::Client),
                read: Some(false),
                ..Default::default()
            },
            SupportMessage {
                id: Some(2),
                text: Some("On the way".to_string()),
                sender: Some(SenderRole::Admin),
                read: Some(true),
                ..Default::default()
            },
        ];

        let filter = MessageFilter {
            unread_only: true,
            ..Default::default()
        };
        assert_eq!(filter.apply(&messages)[0].id, Some(1));

        let filter = MessageFilter {
            sender: Some(SenderRole::Admin),
            ..Default::default()
        };
        assert_eq!(filter.apply(&messages)[0].id, Some(2));
    }
}
