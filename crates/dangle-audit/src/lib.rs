//! Reconciles a DNS zone against allocated-address and host-name inventories.
//!
//! Every A and CNAME record in a zone is reduced to its targets, and each
//! target is checked against the addresses and names the organization still
//! holds. Targets that match nothing are reported as unknown: candidates for
//! dangling records and subdomain takeover.
//!
//! # Example
//!
//! ```rust,ignore
//! use dangle_audit::{Audit, Auditor, Inventory, Reporter, ReportFormat, RipeDomains, ZoneWalker};
//!
//! let inventory = Inventory::load("public.csv", "elbs.txt")?;
//! let ripe = RipeDomains::default();
//! let walker = ZoneWalker::new(&client, "Z1D633PJN98FT9");
//! let mut reporter = Reporter::new(recognized_file, unknown_file, ReportFormat::Csv)?;
//!
//! let summary = Audit::new(walker, Auditor::new(&inventory, &ripe))
//!     .run(&mut reporter)
//!     .await?;
//! println!("{} unknown targets", summary.unknown);
//! ```

#![doc(html_root_url = "https://docs.rs/dangle-audit/0.3.0")]

mod audit;
pub mod classifier;
pub mod extract;
pub mod inventory;
pub mod report;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use audit::{Audit, Auditor};
pub use classifier::{DomainMatcher, MatcherSpec, RipeDomains, RIPE_ANNOTATION};
pub use extract::{extract, targets};
pub use inventory::Inventory;
pub use report::{AuditSummary, MalformedRecord, ReportFormat, Reporter};
pub use walker::ZoneWalker;
