//! # dangle-cli
//!
//! Command-line auditor for dangling A and CNAME records.
//!
//! ## Features
//!
//! - **Zone audit**: pages through a hosted zone and checks every target
//!   against the address and name inventories
//! - **Two reports**: recognized and unknown targets, as CSV or JSON Lines
//! - **Configuration file**: defaults for every flag, managed with
//!   `dangle config`

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
