use serde::{Deserialize, Serialize};

/// One page of a zone's record sets, as returned by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSetPage {
    /// Record sets on this page, in zone order
    #[serde(default)]
    pub resource_record_sets: Vec<ResourceRecordSet>,

    /// More record sets follow this page
    #[serde(default)]
    pub is_truncated: bool,

    /// Name of the first record set on the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_record_name: Option<String>,

    /// Type of the first record set on the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_record_type: Option<String>,

    /// Set identifier of the first record set on the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_record_identifier: Option<String>,
}

impl RecordSetPage {
    /// Cursor to continue from, if the page is truncated.
    ///
    /// Returns `None` for the last page, and also for a truncated page that
    /// came back without a next record name.
    #[must_use]
    pub fn next_position(&self) -> Option<StartPosition> {
        if !self.is_truncated {
            return None;
        }

        let name = self.next_record_name.clone()?;
        Some(StartPosition {
            name,
            record_type: self.next_record_type.clone(),
            identifier: self.next_record_identifier.clone(),
        })
    }
}

/// Continuation cursor for a record-set listing.
///
/// The provider's continuation is only defined when all three fields are
/// sent back together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPosition {
    /// Record name to start from
    pub name: String,
    /// Record type to start from
    pub record_type: Option<String>,
    /// Set identifier to start from (weighted, latency, failover sets)
    pub identifier: Option<String>,
}

/// A record set exactly as the provider returns it.
///
/// Every field tolerates an unexpected JSON type so that one odd record never
/// fails the page it arrived on. Extraction decides what is usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    /// Fully-qualified name, usually with a trailing root dot
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SOA, ...)
    #[serde(default, rename = "Type", deserialize_with = "lenient::string")]
    pub record_type: String,

    /// Distinguishes record sets sharing a name and type
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub set_identifier: Option<String>,

    /// Time to live in seconds (absent for alias records)
    #[serde(
        default,
        rename = "TTL",
        deserialize_with = "lenient::ttl",
        skip_serializing_if = "Option::is_none"
    )]
    pub ttl: Option<u32>,

    /// Alias to another provider-managed resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasValue>,

    /// Literal record values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<RecordValues>,
}

impl ResourceRecordSet {
    /// A record set carrying literal values
    #[must_use]
    pub fn literal<I, S>(name: impl Into<String>, record_type: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            set_identifier: None,
            ttl: Some(300),
            alias_target: None,
            resource_records: Some(RecordValues::Structured(
                values
                    .into_iter()
                    .map(|v| ResourceRecord { value: v.into() })
                    .collect(),
            )),
        }
    }

    /// A record set aliasing another provider resource
    #[must_use]
    pub fn alias(
        name: impl Into<String>,
        record_type: impl Into<String>,
        dns_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            set_identifier: None,
            ttl: None,
            alias_target: Some(AliasValue::Structured(AliasTarget {
                dns_name: dns_name.into(),
                hosted_zone_id: None,
                evaluate_target_health: None,
            })),
            resource_records: None,
        }
    }
}

/// Target of an alias record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    /// Name of the aliased resource, usually with a trailing root dot
    #[serde(rename = "DNSName")]
    pub dns_name: String,

    /// Zone of the aliased resource
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub hosted_zone_id: Option<String>,

    /// Whether the provider health-checks the target
    #[serde(
        default,
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluate_target_health: Option<bool>,
}

/// Alias target of a record set.
///
/// An alias without a string `DNSName` is kept verbatim in
/// [`AliasValue::Unstructured`] and rejected later, per record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AliasValue {
    /// The documented object form
    Structured(AliasTarget),
    /// Any other JSON shape
    Unstructured(serde_json::Value),
}

impl AliasValue {
    /// Aliased name as sent, if the alias is well formed
    #[must_use]
    pub fn dns_name(&self) -> Option<&str> {
        match self {
            Self::Structured(target) => Some(&target.dns_name),
            Self::Unstructured(_) => None,
        }
    }
}

/// Literal values of a record set.
///
/// The provider documents a list of `{"Value": ...}` objects. Anything else is
/// kept verbatim in [`RecordValues::Unstructured`] so that one odd record
/// does not fail the whole page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordValues {
    /// The documented list form
    Structured(Vec<ResourceRecord>),
    /// Any other JSON shape
    Unstructured(serde_json::Value),
}

/// A single literal value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    /// Record value (an address for A, a host name for CNAME)
    pub value: String,
}

/// Field deserializers that accept any JSON type instead of failing.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings pass through, null is absent, anything else is rendered as JSON
    fn render(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Value::deserialize(deserializer).map(|v| render(v).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Value::deserialize(deserializer).map(render)
    }

    /// Whole seconds as a number or a numeric string, otherwise absent
    pub fn ttl<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
