use serde::{Deserialize, Serialize};
use std::fmt;

/// Record types the audit looks at. Everything else in a zone is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// Canonical-name record
    #[serde(rename = "CNAME")]
    Cname,
}

impl RecordType {
    /// Parse a provider type string; `None` for types the audit ignores
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "CNAME" => Some(Self::Cname),
            _ => None,
        }
    }

    /// Provider spelling of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized A or CNAME record.
///
/// Names, alias targets and values are in [`normalize_name`] form. When
/// `alias_target` is `None`, `values` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Record name
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Alias target, if the record is an alias
    pub alias_target: Option<String>,
    /// Literal targets in provider order
    pub values: Vec<String>,
}

impl ZoneRecord {
    /// Returns true if this record aliases another provider resource
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        self.alias_target.is_some()
    }
}

/// One effective target of a zone record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Normalized target string
    pub value: String,
    /// Target came from an alias rather than a literal value
    pub is_alias: bool,
}

impl Target {
    /// An alias target
    #[must_use]
    pub fn alias(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_alias: true,
        }
    }

    /// A literal target
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_alias: false,
        }
    }
}

/// Strip trailing root dots from a DNS name.
///
/// The provider terminates fully-qualified names with a dot; inventories
/// do not.
#[must_use]
pub fn strip_root_dot(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Canonical form of a DNS name for comparison.
///
/// Surrounding whitespace and root dots are removed and ASCII letters are
/// lowercased. Zone names, targets and inventory entries all pass through
/// here before they are compared.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    strip_root_dot(name.trim()).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audited_types_only() {
        assert_eq!(RecordType::parse("A"), Some(RecordType::A));
        assert_eq!(RecordType::parse("CNAME"), Some(RecordType::Cname));
        for other in ["AAAA", "MX", "TXT", "NS", "SOA", "a", "cname", ""] {
            assert_eq!(RecordType::parse(other), None, "{other}");
        }
    }

    #[test]
    fn record_type_round_trips_through_display() {
        for ty in [RecordType::A, RecordType::Cname] {
            assert_eq!(RecordType::parse(&ty.to_string()), Some(ty));
        }
        assert_eq!(serde_json::to_string(&RecordType::Cname).unwrap(), "\"CNAME\"");
    }

    #[test]
    fn strips_root_dot() {
        assert_eq!(strip_root_dot("foo.example.com."), "foo.example.com");
        assert_eq!(strip_root_dot("foo.example.com"), "foo.example.com");
        assert_eq!(strip_root_dot("."), "");
    }

    #[test]
    fn normalizes_case_and_root_dot() {
        assert_eq!(normalize_name(" Shop.CloudFront.NET. "), "shop.cloudfront.net");
        assert_eq!(normalize_name("203.0.113.5."), "203.0.113.5");
        assert_eq!(normalize_name("."), "");
    }
}
