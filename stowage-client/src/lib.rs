//! Stowage client: REST access to the inventory API, per-kind list screens
//! and the `stowage` command-line front end.

pub mod api_client;
pub mod behaviors;
pub mod cli;
pub mod config;
pub mod error;
pub mod reference;
pub mod telemetry;
pub mod types;

pub use api_client::{ApiClient, ApiClientError, RestClient};
pub use behaviors::{list_page_config, ListBehavior, RestListFetcher};
pub use config::{ClientConfig, ConfigError};
pub use error::AppError;
pub use reference::ReferenceLists;
