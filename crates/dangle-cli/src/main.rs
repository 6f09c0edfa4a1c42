//! dangle - dangling DNS record auditor
//!
//! Walks a hosted zone and sorts every A and CNAME target into recognized
//! and unknown reports.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dangle_cli::run().await
}
