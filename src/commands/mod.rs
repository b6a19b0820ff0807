//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `sniffer.rs` — SDK sniffer enable/disable with restart confirmation.
//! - `im.rs` — module host management mode enabled/disabled.
//! - `syslog.rs` — syslog server and rate-limit views.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output stable; operators script against it.

pub mod im;
pub mod sniffer;
pub mod syslog;

pub use im::handle_im_commands;
pub use sniffer::handle_sdk_commands;
pub use syslog::handle_syslog_commands;
