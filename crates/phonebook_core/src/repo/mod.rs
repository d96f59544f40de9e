//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract used by the edit controller.
//! - Isolate SQLite query details from controller logic.
//!
//! # Invariants
//! - Repository writes must enforce `ContactDraft::validate()` before SQL.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod contact_repo;
