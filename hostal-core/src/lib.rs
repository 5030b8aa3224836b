#![allow(clippy::derivable_impls, clippy::type_complexity, clippy::ptr_arg)]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod messages;
pub mod models;
pub mod notify;
pub mod reservations;

pub use api::{
    ApiClient, Page, PageRequest, Resource, ResourceService, SortDirection, SortOrder,
    MERGE_PATCH_CONTENT_TYPE, TOTAL_COUNT_HEADER,
};
pub use config::{
    default_config_file, ensure_config_dir, get_config_dir, get_config_paths, ApiConfig,
    ConfigLoadError, DisplayConfig, HostalConfig, LoggingConfig,
};
pub use error::{CliErrorDisplay, HostalError, HostalResult};
pub use filters::{
    CategoryFilter, ListFilter, MessageFilter, ReservationFilter, RoomFilter, RoomStateFilter,
};
pub use forms::{CategoryForm, ReservationForm, RoomForm, RoomStateForm, SupportMessageForm};
pub use messages::{group_conversations, unread_count, Conversation};
pub use models::{
    CategoryName, Client, Reservation, ReservationDetail, ReservationStatus, Room, RoomCategory,
    RoomState, RoomStateName, SenderRole, SupportMessage,
};
pub use notify::{friendly_message, Notification, NotificationLevel};
pub use reservations::{
    available_actions, plan_room_changes, CreatedReservation, ReconcileReport,
    ReservationGateway, ReservationOverview, RoomChangePlan, StatusAction,
};
