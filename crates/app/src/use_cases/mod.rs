//! Use-case shells over per-capability repository traits.
//!
//! Every operation follows the same discipline: one start event, exactly
//! one repository call, then either one finish event or (for the error
//! kinds the operation documents) one failure event with the error
//! re-raised unchanged. Undocumented kinds, `Storage` included, propagate
//! bare with no extra event.

pub mod actors;
pub mod auth;
pub mod episodes;
pub mod schedule;
pub mod shows;
