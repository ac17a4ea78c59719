//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - The entity struct returned by its repository (`FromRow` where it maps
//!   straight onto a table row)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates, where the
//!   entity supports them

pub mod actor;
pub mod episode;
pub mod schedule;
pub mod show;
pub mod user;
