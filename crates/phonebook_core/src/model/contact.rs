//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted contact record and its editable payload.
//! - Enforce the required-field rule shared by create and update.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes or gets reused.
//! - `name` and `phone` are never empty for a stored contact.
//! - Emptiness is checked on the raw string; whitespace is not trimmed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate identifier assigned by the store on create.
pub type ContactId = i64;

/// One stored address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Contact {
    /// Re-checks the required-field rule on a persisted record.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_required(&self.name, &self.phone)
    }
}

/// Editable contact fields submitted to create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactDraft {
    /// Builds a draft from raw form strings.
    ///
    /// Empty `email`/`address` become `None`; everything else is kept verbatim.
    pub fn from_fields(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: non_empty(email.into()),
            address: non_empty(address.into()),
        }
    }

    /// Validates the required fields.
    ///
    /// # Errors
    /// - `NameRequired` when `name` is the empty string (checked first).
    /// - `PhoneRequired` when `phone` is the empty string.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_required(&self.name, &self.phone)
    }
}

/// Required-field violations for contact payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    NameRequired,
    PhoneRequired,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name and Phone are required: name is empty"),
            Self::PhoneRequired => write!(f, "Name and Phone are required: phone is empty"),
        }
    }
}

impl Error for ContactValidationError {}

fn validate_required(name: &str, phone: &str) -> Result<(), ContactValidationError> {
    if name.is_empty() {
        return Err(ContactValidationError::NameRequired);
    }
    if phone.is_empty() {
        return Err(ContactValidationError::PhoneRequired);
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
