//! Domain module - entities, value types, and domain errors
//!
//! Pure business logic: no filesystem access, no async, no adapters.

pub mod errors;
pub mod font;
pub mod newtypes;
