//! Infrastructure layer: configuration, persistence and the feature services.

pub mod config;
pub mod services;
pub mod store;


pub use config::HubConfig;
pub use services::{CalendarFeed, HubServices, NotebookView, Session, SignupRequest};
pub use store::{HubStore, InMemoryHubStore, PostgresHubStore, StoreError, StoreResult};
