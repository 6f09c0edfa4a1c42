//! Finds dangling A and CNAME records in a hosted DNS zone.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dangle::audit::{Audit, Auditor, Inventory, ReportFormat, Reporter, RipeDomains, ZoneWalker};
//! use dangle::ZoneClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> dangle::Result<()> {
//!     let client = ZoneClient::new("https://dns-gateway.example.com", "token")?;
//!     let inventory = Inventory::load("public.csv", "elbs.txt")?;
//!     let ripe = RipeDomains::default();
//!
//!     let mut reporter = Reporter::new(std::io::stdout(), std::io::sink(), ReportFormat::Csv)?;
//!     let summary = Audit::new(
//!         ZoneWalker::new(&client, "Z1D633PJN98FT9"),
//!         Auditor::new(&inventory, &ripe),
//!     )
//!     .run(&mut reporter)
//!     .await?;
//!
//!     eprintln!("{} unknown targets", summary.unknown);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dangle/0.3.0")]

// Re-export core types
pub use dangle_core::*;

// Re-export client
pub use dangle_client::{RateLimit, TransportConfig, ZoneClient, ZoneClientBuilder};

pub use dangle_audit as audit;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
