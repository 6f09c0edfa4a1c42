//! The seam between the zone walker and the DNS provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RecordSetPage, StartPosition};

/// Parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecordSetsRequest {
    /// Hosted zone to list
    pub zone_id: String,
    /// Where to continue from; `None` starts at the zone apex
    pub start: Option<StartPosition>,
    /// Upper bound on record sets per page
    pub max_items: Option<u32>,
}

impl ListRecordSetsRequest {
    /// A request for the first page of a zone
    #[must_use]
    pub fn first_page(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            start: None,
            max_items: None,
        }
    }
}

/// Anything that can hand out pages of a zone's record sets
#[async_trait]
pub trait RecordSetSource: Send + Sync {
    /// Fetch one page
    async fn list_record_sets(&self, request: &ListRecordSetsRequest) -> Result<RecordSetPage>;
}
