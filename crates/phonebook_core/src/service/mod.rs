//! Core use-case services.
//!
//! # Responsibility
//! - Bind form state and user commands to record-store operations.
//! - Keep presentation surfaces decoupled from storage details.

pub mod edit_controller;
