//! Sortlint core library.
//!
//! This crate exposes programmatic APIs for checking and fixing the sort
//! order of members in JSON documents according to TOML policies listed in
//! an index file.
//!
//! High-level modules:
//! - `engine`: Comparator, violation scan, fix planning and diagnostics over
//!   opaque sortable items.
//! - `extract`: Adapters from JSON nodes (objects, string enums, string
//!   arrays) to sortable items, plus path selectors.
//! - `lint`: Policy-driven order lint producing issues and a summary.
//! - `format`: Applies fix plans to files (write/preview).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Index, policy and lint output structs.
//! - `output`: Human/JSON printers for lint/format.
//! - `cli`, `logging`, `utils`, `error`: Binary plumbing and shared helpers.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod format;
pub mod lint;
pub mod logging;
pub mod models;
pub mod output;
pub mod utils;

pub use error::{Result, SortlintError};
