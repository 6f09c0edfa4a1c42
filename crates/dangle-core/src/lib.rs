//! Core types and traits for the dangle DNS zone auditor.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: the provider's record-set wire model, normalized zone records
//!   and classification results
//! - **Errors**: fatal errors with [`DangleError`], per-record
//!   [`ExtractionError`]s
//! - **Source**: the [`RecordSetSource`] seam the zone walker pages through
//!
//! # Example
//!
//! ```rust,ignore
//! use dangle_core::{RecordSetPage, Result};
//!
//! fn count_records(page: &RecordSetPage) -> Result<usize> {
//!     println!("truncated: {}", page.is_truncated);
//!     Ok(page.resource_record_sets.len())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/dangle-core/0.3.0")]

mod error;
mod source;
pub mod types;

pub use error::{DangleError, ExtractionError, Result};
pub use source::{ListRecordSetsRequest, RecordSetSource};
pub use types::*;
