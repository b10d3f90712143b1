//! Item service: JSON CRUD over a single item resource, plus a few demonstration routes.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod utils;

pub use app::{create_app, create_state};
pub use config::{AppConfig, ConfigMode};
pub use error::{AppError, ConfigError};
pub use model::{Item, ItemChanges, NewItem};
pub use routes::app_routes;
pub use service::{FieldErrors, FieldRules, ItemForm, ItemService};
pub use state::AppState;
pub use utils::{add_numbers, get_home_message};
