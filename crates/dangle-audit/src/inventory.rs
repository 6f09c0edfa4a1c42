//! Known public addresses and host names.

use dangle_core::{normalize_name, DangleError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+\.){3}[0-9]+$").expect("dotted-quad pattern is valid"));

/// Addresses and names currently allocated to the organization.
///
/// Built once before the walk and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    ips: HashSet<String>,
    names: HashSet<String>,
}

impl Inventory {
    /// Read both inventory files.
    ///
    /// `ip_path` holds one address or host name per line; `name_path` holds
    /// host names only.
    pub fn load(ip_path: impl AsRef<Path>, name_path: impl AsRef<Path>) -> Result<Self> {
        let ip_source = read_source(ip_path.as_ref())?;
        let name_source = read_source(name_path.as_ref())?;

        let inventory = Self::from_lines(ip_source.lines(), name_source.lines());
        info!(
            ips = inventory.ip_count(),
            names = inventory.name_count(),
            "inventory loaded"
        );
        Ok(inventory)
    }

    /// Build from in-memory line sequences.
    ///
    /// Every line is normalized first (trimmed, root dot stripped,
    /// lowercased). Lines from `ip_lines` are then addresses when they are a
    /// dotted quad, names when they contain a dot, and dropped otherwise.
    /// Every non-empty line from `name_lines` is a name.
    pub fn from_lines<'a, I, N>(ip_lines: I, name_lines: N) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        N: IntoIterator<Item = &'a str>,
    {
        let mut inventory = Self::default();

        for line in ip_lines {
            let line = normalize_name(line);
            if line.is_empty() {
                continue;
            }
            if DOTTED_QUAD.is_match(&line) {
                inventory.ips.insert(line);
            } else if line.contains('.') {
                inventory.names.insert(line);
            }
        }

        for line in name_lines {
            let line = normalize_name(line);
            if !line.is_empty() {
                inventory.names.insert(line);
            }
        }

        inventory
    }

    /// Returns true if `ip` is a known address.
    ///
    /// Lookups are exact; callers pass normalized targets.
    #[must_use]
    pub fn is_known_ip(&self, ip: &str) -> bool {
        self.ips.contains(ip)
    }

    /// Returns true if `name` is a known host name (normalized form)
    #[must_use]
    pub fn is_known_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of known addresses
    #[must_use]
    pub fn ip_count(&self) -> usize {
        self.ips.len()
    }

    /// Number of known host names
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DangleError::Inventory {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_addresses_from_names() {
        let inventory = Inventory::from_lines(
            [
                "203.0.113.5",
                "ec2-203-0-113-5.us-west-2.compute.amazonaws.com",
                "",
                "localhost",
                "  198.51.100.7  ",
            ],
            [],
        );

        assert!(inventory.is_known_ip("203.0.113.5"));
        assert!(inventory.is_known_ip("198.51.100.7"));
        assert!(inventory.is_known_name("ec2-203-0-113-5.us-west-2.compute.amazonaws.com"));
        assert!(!inventory.is_known_name("localhost"));
        assert!(!inventory.is_known_ip("localhost"));
        assert_eq!(inventory.ip_count(), 2);
        assert_eq!(inventory.name_count(), 1);
    }

    #[test]
    fn ip_membership_is_exact() {
        let inventory = Inventory::from_lines(["203.0.113.5"], []);
        assert!(inventory.is_known_ip("203.0.113.5"));
        for near in ["203.0.113.6", "203.0.113.50", "203.0.113.", "303.0.113.5", " 203.0.113.5"] {
            assert!(!inventory.is_known_ip(near), "{near}");
        }
    }

    #[test]
    fn name_source_is_unfiltered() {
        let inventory = Inventory::from_lines(
            [],
            ["my-lb-1234.us-west-2.elb.amazonaws.com", "intranet", "10.0.0.1"],
        );
        assert!(inventory.is_known_name("intranet"));
        assert!(inventory.is_known_name("10.0.0.1"));
        assert!(!inventory.is_known_ip("10.0.0.1"));
        assert_eq!(inventory.name_count(), 3);
    }

    #[test]
    fn names_lose_root_dot() {
        let inventory = Inventory::from_lines(["foo.example.com."], ["bar.example.com."]);
        assert!(inventory.is_known_name("foo.example.com"));
        assert!(inventory.is_known_name("bar.example.com"));
    }

    #[test]
    fn address_with_root_dot_is_still_an_address() {
        let inventory = Inventory::from_lines(["203.0.113.5.", " 198.51.100.7.. "], []);
        assert!(inventory.is_known_ip("203.0.113.5"));
        assert!(inventory.is_known_ip("198.51.100.7"));
        assert!(!inventory.is_known_name("203.0.113.5"));
        assert_eq!(inventory.ip_count(), 2);
        assert_eq!(inventory.name_count(), 0);
    }

    #[test]
    fn names_are_lowercased() {
        let inventory = Inventory::from_lines(
            ["Foo.Example.COM."],
            ["My-LB-1234.us-west-2.ELB.amazonaws.com"],
        );
        assert!(inventory.is_known_name("foo.example.com"));
        assert!(inventory.is_known_name("my-lb-1234.us-west-2.elb.amazonaws.com"));
        assert!(!inventory.is_known_name("Foo.Example.COM"));
    }

    #[test]
    fn loads_from_files() {
        let mut ips = tempfile::NamedTempFile::new().unwrap();
        writeln!(ips, "203.0.113.5\nec2-1.compute.amazonaws.com\n").unwrap();
        let mut names = tempfile::NamedTempFile::new().unwrap();
        writeln!(names, "my-lb.elb.amazonaws.com\r").unwrap();

        let inventory = Inventory::load(ips.path(), names.path()).unwrap();
        assert!(inventory.is_known_ip("203.0.113.5"));
        assert!(inventory.is_known_name("ec2-1.compute.amazonaws.com"));
        assert!(inventory.is_known_name("my-lb.elb.amazonaws.com"));
    }

    #[test]
    fn missing_file_is_an_inventory_error() {
        let names = tempfile::NamedTempFile::new().unwrap();
        let err = Inventory::load("/nonexistent/public.csv", names.path()).unwrap_err();
        assert!(matches!(err, DangleError::Inventory { ref path, .. } if path.ends_with("public.csv")));
    }
}
