//! Domain model for the phone book.
//!
//! # Responsibility
//! - Define the canonical contact record used by storage and the controller.
//!
//! # Invariants
//! - Every stored contact is identified by a stable integer `ContactId`.
//! - Deletion is permanent; there are no tombstones.

pub mod contact;
