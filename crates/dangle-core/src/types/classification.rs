use serde::{Deserialize, Serialize};

use super::RecordType;

/// Marker written in place of a ripe annotation for alias targets
pub const ALIAS_MARKER: &str = "alias";

/// Which report a result belongs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStream {
    /// Target found in the inventory
    Recognized,
    /// Target absent from the inventory; the actionable finding
    Unknown,
}

/// Verdict for one (record, target) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Position of the record in zone traversal order
    pub sequence: u64,
    /// Record name
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Normalized target
    pub target: String,
    /// Target came from an alias
    pub alias: bool,
    /// Ripe-domain annotation; never set for alias targets
    pub ripe: Option<String>,
    /// Target was found in the inventory
    pub recognized: bool,
}

impl ClassificationResult {
    /// Report the result is routed to
    #[must_use]
    pub const fn stream(&self) -> ReportStream {
        if self.recognized {
            ReportStream::Recognized
        } else {
            ReportStream::Unknown
        }
    }

    /// Trailing report column: `alias` for alias targets, otherwise the ripe
    /// annotation or an empty string
    #[must_use]
    pub fn annotation(&self) -> &str {
        if self.alias {
            ALIAS_MARKER
        } else {
            self.ripe.as_deref().unwrap_or("")
        }
    }
}
