//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `constants.rs` — fixed platform paths, container/service names, keys.
//! - `models.rs` — serde DTOs for on-disk JSON artifacts.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.

pub mod constants;
pub mod models;
