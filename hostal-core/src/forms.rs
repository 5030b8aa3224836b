//! Form state for the create/edit dialogs.
//!
//! Each form validates itself before it is turned into a resource, so the
//! backend only ever sees input that passed the same rules the dialogs show.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::NaiveDate;
use validator::{Validate, ValidationError};

use crate::api::ApiClient;
use crate::error::{HostalError, HostalResult};
use crate::models::{
    CategoryName, Client, Reservation, ReservationStatus, Room, RoomCategory, RoomState,
    RoomStateName, SupportMessage,
};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn non_negative_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(error("price_not_finite", "must be a finite amount"));
    }
    if price < 0.0 {
        return Err(error("price_negative", "must not be negative"));
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

fn unique_ids(ids: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(error("duplicate_room", "each room can only be selected once"))
    }
}

fn positive_ids(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.iter().all(|id| *id > 0) {
        Ok(())
    } else {
        Err(error("invalid_room", "room ids must be positive"))
    }
}

fn validate_room_ids(ids: &Vec<i64>) -> Result<(), ValidationError> {
    positive_ids(ids)?;
    unique_ids(ids)
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    non_negative_price(price)
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    not_blank(text)
}

fn validate_stay(form: &ReservationForm) -> Result<(), ValidationError> {
    if form.end_date <= form.start_date {
        return Err(error("date_range", "end date must be after start date"));
    }
    Ok(())
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// ============================================================================
// Room
// ============================================================================

#[derive(Debug, Clone, Validate)]
pub struct RoomForm {
    #[validate(length(min = 1, max = 10, message = "must be between 1 and 10 characters"))]
    pub number: String,

    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10 guests"))]
    pub capacity: u32,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,

    pub image: Option<String>,

    #[validate(range(min = 1, message = "a category is required"))]
    pub category_id: i64,

    #[validate(range(min = 1, message = "a room state is required"))]
    pub state_id: i64,

    pub active: bool,
}

impl RoomForm {
    pub fn from_room(room: &Room) -> Self {
        Self {
            number: room.number.clone().unwrap_or_default(),
            capacity: room.capacity.unwrap_or(1),
            description: room.description.clone(),
            image: room.image.clone(),
            category_id: room.category_id().unwrap_or(0),
            state_id: room.state_id().unwrap_or(0),
            active: room.is_active(),
        }
    }

    pub fn into_room(self, id: Option<i64>) -> HostalResult<Room> {
        let number = self.number.trim().to_string();
        let form = Self { number, ..self };
        form.validate()?;

        Ok(Room {
            id,
            number: Some(form.number),
            capacity: Some(form.capacity),
            description: clean(form.description),
            image: clean(form.image),
            active: Some(form.active),
            category: Some(RoomCategory::reference(form.category_id)),
            state: Some(RoomState::reference(form.state_id)),
        })
    }

    /// Creates when `id` is `None`, otherwise updates the existing room.
    pub async fn submit(self, api: &ApiClient, id: Option<i64>) -> HostalResult<Room> {
        let room = self.into_room(id)?;
        match id {
            Some(_) => api.rooms().update(&room).await,
            None => api.rooms().create(&room).await,
        }
    }
}

// ============================================================================
// Room category
// ============================================================================

#[derive(Debug, Clone, Validate)]
pub struct CategoryForm {
    pub name: CategoryName,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub base_price: f64,

    pub active: bool,
}

impl CategoryForm {
    pub fn from_category(category: &RoomCategory) -> Option<Self> {
        Some(Self {
            name: category.name?,
            description: category.description.clone(),
            base_price: category.price(),
            active: category.is_active(),
        })
    }

    pub fn into_category(self, id: Option<i64>) -> HostalResult<RoomCategory> {
        self.validate()?;

        Ok(RoomCategory {
            id,
            name: Some(self.name),
            description: clean(self.description),
            base_price: Some(self.base_price),
            active: Some(self.active),
        })
    }

    pub async fn submit(self, api: &ApiClient, id: Option<i64>) -> HostalResult<RoomCategory> {
        let category = self.into_category(id)?;
        match id {
            Some(_) => api.categories().update(&category).await,
            None => api.categories().create(&category).await,
        }
    }
}

// ============================================================================
// Room state
// ============================================================================

#[derive(Debug, Clone, Validate)]
pub struct RoomStateForm {
    pub name: RoomStateName,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,

    pub active: bool,
}

impl RoomStateForm {
    pub fn from_state(state: &RoomState) -> Option<Self> {
        Some(Self {
            name: state.name?,
            description: state.description.clone(),
            active: state.is_active(),
        })
    }

    pub fn into_state(self, id: Option<i64>) -> HostalResult<RoomState> {
        self.validate()?;

        Ok(RoomState {
            id,
            name: Some(self.name),
            description: clean(self.description),
            active: Some(self.active),
        })
    }

    pub async fn submit(self, api: &ApiClient, id: Option<i64>) -> HostalResult<RoomState> {
        let state = self.into_state(id)?;
        match id {
            Some(_) => api.room_states().update(&state).await,
            None => api.room_states().create(&state).await,
        }
    }
}

// ============================================================================
// Reservation
// ============================================================================

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_stay", skip_on_field_errors = false))]
pub struct ReservationForm {
    #[validate(range(min = 1, message = "a client is required"))]
    pub client_id: i64,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(
        length(min = 1, message = "select at least one room"),
        custom(function = "validate_room_ids")
    )]
    pub room_ids: Vec<i64>,

    pub active: bool,
}

impl ReservationForm {
    pub fn new(client_id: i64, start_date: NaiveDate, end_date: NaiveDate, room_ids: Vec<i64>) -> Self {
        Self {
            client_id,
            start_date,
            end_date,
            room_ids,
            active: true,
        }
    }

    /// Prefills the edit dialog from a reservation and its linked rooms.
    pub fn from_reservation(reservation: &Reservation, room_ids: Vec<i64>) -> Option<Self> {
        Some(Self {
            client_id: reservation.client_id()?,
            start_date: reservation.start_date?,
            end_date: reservation.end_date?,
            room_ids,
            active: reservation.is_active(),
        })
    }

    /// Builds the reservation header; room lines are handled by the workflow.
    pub fn to_reservation(
        &self,
        id: Option<i64>,
        status: ReservationStatus,
    ) -> HostalResult<Reservation> {
        self.validate()?;

        Ok(Reservation {
            id,
            client: Some(Client::reference(self.client_id)),
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
            status: Some(status),
            active: Some(self.active),
        })
    }

    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}

// ============================================================================
// Support message
// ============================================================================

#[derive(Debug, Clone, Validate)]
pub struct SupportMessageForm {
    #[validate(
        length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"),
        custom(function = "validate_text")
    )]
    pub text: String,
}

impl SupportMessageForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn into_message(self, user_id: &str) -> HostalResult<SupportMessage> {
        let form = Self {
            text: self.text.trim().to_string(),
        };
        form.validate()?;

        if user_id.trim().is_empty() {
            return Err(HostalError::Validation(
                "user_id: a recipient is required".to_string(),
            ));
        }

        Ok(SupportMessage {
            id: None,
            text: Some(form.text),
            sender: Some(crate::models::SenderRole::Admin),
            read: Some(false),
            sent_at: Some(chrono::Utc::now()),
            user_id: Some(user_id.to_string()),
        })
    }
}
