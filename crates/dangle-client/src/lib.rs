//! HTTP client for a DNS provider's record-set listing API.
//!
//! This crate provides [`ZoneClient`], which pages through a hosted zone's
//! record sets and implements [`dangle_core::RecordSetSource`] for the zone
//! walker.
//!
//! The client has no built-in endpoint. It expects a gateway that serves
//! `GET {endpoint}/2013-04-01/hostedzone/{zone}/rrset` with optional `name`,
//! `type`, `identifier` and `maxitems` query parameters, accepts an
//! `Authorization: Bearer` credential, and answers with the PascalCase JSON
//! form of [`dangle_core::RecordSetPage`]. Errors come back as
//! `{"Error":{"Code":..,"Message":..}}` or `{"message":..}`.

#![doc(html_root_url = "https://docs.rs/dangle-client/0.3.0")]

mod client;
mod config;
pub mod api;

pub use client::{ZoneClient, ZoneClientBuilder};
pub use config::*;
pub use dangle_core::{DangleError, Result};
