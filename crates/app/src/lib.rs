//! Application layer: use cases, credential and token services, and the
//! error taxonomy they speak.
//!
//! Each use case is a thin shell around a single repository capability
//! (see [`use_cases`]); the Postgres wiring that satisfies those
//! capabilities lives in [`adapters`].

pub mod adapters;
pub mod auth;
pub mod error;
pub mod use_cases;
