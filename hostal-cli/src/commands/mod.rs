pub mod categories;
pub mod config;
pub mod messages;
pub mod reservations;
pub mod rooms;
pub mod states;

pub use categories::{handle_categories_command, CategoriesCommand};
pub use config::{handle_config_command, ConfigCommand};
pub use messages::{handle_messages_command, MessagesCommand};
pub use reservations::{handle_reservations_command, ReservationsCommand};
pub use rooms::{handle_rooms_command, RoomsCommand};
pub use states::{handle_states_command, StatesCommand};
