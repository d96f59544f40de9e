//! Core domain logic for the phone book.
//! This crate owns contact storage and the form edit-mode rules; UI surfaces
//! only issue commands and render results.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::edit_controller::{
    ActionReport, Command, CommandOutcome, ConfirmDelete, ContactField, ContactForm,
    ControllerError, ControllerResult, DeleteOutcome, EditController, EditMode,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
