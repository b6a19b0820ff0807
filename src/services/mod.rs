//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `toggle.rs` — sniffer toggle state machine (fetch/mutate/publish/restart).
//! - `fragment.rs` — supervisor stanza line operations and env directives.
//! - `store.rs` — remote fragment capability; docker/systemctl implementation.
//! - `capture.rs` — timestamped capture target path builder.
//! - `im_mode.rs` — module host management mode file edits.
//! - `configdb.rs` — CONFIG_DB JSON table access.
//! - `output.rs` — table output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod capture;
pub mod configdb;
pub mod fragment;
pub mod im_mode;
pub mod output;
pub mod store;
pub mod toggle;
