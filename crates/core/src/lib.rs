//! Shared domain layer for the showtrack workspace.
//!
//! Pure types and policy data only. This crate performs no I/O, so both the
//! storage layer and the application layer can depend on it freely.

pub mod authorization;
pub mod types;
