//! Ripe-domain classification.
//!
//! Some targets live under domains owned by a trusted provider subsystem
//! (compute, mail sending, CDN) or by the organization itself. Those are
//! revalidated elsewhere and are safe to point an alias at, so literal targets
//! under them carry an annotation in the reports.

use dangle_core::{normalize_name, DangleError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Annotation attached to targets under a ripe domain
pub const RIPE_ANNOTATION: &str = "Can be alias";

/// Suffixes recognized out of the box
const DEFAULT_SUFFIXES: [&str; 3] = ["amazonaws.com", "amazonses.com", "cloudfront.net"];

/// One ripe-domain rule
#[derive(Debug, Clone)]
pub enum DomainMatcher {
    /// Target is a strict subdomain of `suffix` (ASCII case-insensitive)
    Suffix {
        /// Domain suffix without a leading dot
        suffix: String,
        /// Annotation to report
        annotation: String,
    },
    /// Target matches `regex` in full
    Pattern {
        /// Compiled, anchored expression
        regex: Regex,
        /// Annotation to report
        annotation: String,
    },
}

impl DomainMatcher {
    /// Suffix rule with the standard annotation
    #[must_use]
    pub fn suffix(suffix: &str) -> Self {
        Self::Suffix {
            suffix: normalize_suffix(suffix),
            annotation: RIPE_ANNOTATION.to_string(),
        }
    }

    /// Pattern rule with the standard annotation; the expression is anchored
    /// to the whole target
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| DangleError::Config(format!("invalid ripe-domain pattern {pattern:?}: {e}")))?;
        Ok(Self::Pattern {
            regex,
            annotation: RIPE_ANNOTATION.to_string(),
        })
    }

    /// Replace the annotation
    #[must_use]
    pub fn with_annotation(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Suffix { annotation, .. } | Self::Pattern { annotation, .. } => {
                *annotation = text.into();
            }
        }
        self
    }

    /// Annotation if `target` matches this rule
    #[must_use]
    pub fn annotate(&self, target: &str) -> Option<&str> {
        let hit = match self {
            Self::Suffix { suffix, .. } => is_subdomain_of(target, suffix),
            Self::Pattern { regex, .. } => regex.is_match(target),
        };

        if hit {
            Some(match self {
                Self::Suffix { annotation, .. } | Self::Pattern { annotation, .. } => annotation,
            })
        } else {
            None
        }
    }
}

/// Serializable form of a [`DomainMatcher`], as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatcherSpec {
    /// See [`DomainMatcher::Suffix`]
    Suffix {
        /// Domain suffix
        suffix: String,
        /// Annotation override
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotation: Option<String>,
    },
    /// See [`DomainMatcher::Pattern`]
    Pattern {
        /// Regular expression
        pattern: String,
        /// Annotation override
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotation: Option<String>,
    },
}

impl MatcherSpec {
    /// Compile into a matcher
    pub fn compile(&self) -> Result<DomainMatcher> {
        let (matcher, annotation) = match self {
            Self::Suffix { suffix, annotation } => (DomainMatcher::suffix(suffix), annotation),
            Self::Pattern {
                pattern,
                annotation,
            } => (DomainMatcher::pattern(pattern)?, annotation),
        };

        Ok(match annotation {
            Some(text) => matcher.with_annotation(text.clone()),
            None => matcher,
        })
    }
}

/// Ordered ripe-domain rules; the first match wins
#[derive(Debug, Clone)]
pub struct RipeDomains {
    matchers: Vec<DomainMatcher>,
}

impl Default for RipeDomains {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES.iter().map(|s| DomainMatcher::suffix(s)).collect())
    }
}

impl RipeDomains {
    /// Use exactly `matchers`, in order
    #[must_use]
    pub const fn new(matchers: Vec<DomainMatcher>) -> Self {
        Self { matchers }
    }

    /// Defaults followed by the compiled `specs`
    pub fn with_specs<'a>(specs: impl IntoIterator<Item = &'a MatcherSpec>) -> Result<Self> {
        let mut ripe = Self::default();
        for spec in specs {
            ripe.matchers.push(spec.compile()?);
        }
        Ok(ripe)
    }

    /// Append a rule
    #[must_use]
    pub fn with(mut self, matcher: DomainMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Annotation of the first matching rule
    #[must_use]
    pub fn classify(&self, target: &str) -> Option<&str> {
        self.matchers.iter().find_map(|m| m.annotate(target))
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if there are no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

fn normalize_suffix(suffix: &str) -> String {
    normalize_name(suffix.trim().trim_start_matches('.'))
}

/// `target` ends with `.suffix`, matching at a label boundary.
///
/// Both sides are already normalized, so the comparison is exact.
fn is_subdomain_of(target: &str, suffix: &str) -> bool {
    let (target, suffix) = (target.as_bytes(), suffix.as_bytes());
    if suffix.is_empty() || target.len() <= suffix.len() {
        return false;
    }

    let split = target.len() - suffix.len();
    target[split - 1] == b'.' && &target[split..] == suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdn_subdomain_is_ripe() {
        let ripe = RipeDomains::default();
        assert_eq!(ripe.classify("d111111abcdef8.cloudfront.net"), Some(RIPE_ANNOTATION));
        assert_eq!(ripe.classify("d111111abcdef8.cloudfrontx.net"), None);
    }

    #[test]
    fn suffix_needs_label_boundary() {
        let ripe = RipeDomains::default();
        assert_eq!(ripe.classify("notamazonaws.com"), None);
        assert_eq!(ripe.classify("amazonaws.com"), None);
        assert_eq!(ripe.classify("amazonaws.com.evil.net"), None);
        assert!(ripe.classify("ec2-203-0-113-5.compute-1.amazonaws.com").is_some());
        assert!(ripe.classify("email-smtp.amazonses.com").is_some());
        assert!(ripe.classify(&normalize_name("Shop.CloudFront.NET.")).is_some());
    }

    #[test]
    fn configured_suffix_is_normalized() {
        let ripe = RipeDomains::new(vec![DomainMatcher::suffix(" .Example.COM. ")]);
        assert!(ripe.classify("shop.example.com").is_some());
        assert_eq!(ripe.classify("example.com"), None);
    }

    #[test]
    fn addresses_are_not_ripe() {
        assert_eq!(RipeDomains::default().classify("203.0.113.5"), None);
    }

    #[test]
    fn first_match_wins() {
        let ripe = RipeDomains::new(vec![
            DomainMatcher::suffix("example.com").with_annotation("own apex"),
            DomainMatcher::suffix("www.example.com").with_annotation("never reached"),
        ]);
        assert_eq!(ripe.classify("a.www.example.com"), Some("own apex"));
    }

    #[test]
    fn patterns_are_anchored() {
        let matcher = DomainMatcher::pattern(r"[a-z0-9-]+\.herokuapp\.com").unwrap();
        assert!(matcher.annotate("my-app.herokuapp.com").is_some());
        assert!(matcher.annotate("my-app.herokuapp.com.attacker.net").is_none());
        assert!(matcher.annotate("x.my-app.herokuapp.com").is_none());
    }

    #[test]
    fn bad_pattern_is_config_error() {
        let err = DomainMatcher::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, DangleError::Config(_)));
    }

    #[test]
    fn specs_extend_defaults() {
        let specs = vec![
            MatcherSpec::Suffix {
                suffix: ".example.com.".into(),
                annotation: None,
            },
            MatcherSpec::Pattern {
                pattern: r"[a-z]+\.azurewebsites\.net".into(),
                annotation: Some("app service".into()),
            },
        ];
        let ripe = RipeDomains::with_specs(&specs).unwrap();
        assert_eq!(ripe.len(), 5);
        assert_eq!(ripe.classify("api.example.com"), Some(RIPE_ANNOTATION));
        assert_eq!(ripe.classify("shop.azurewebsites.net"), Some("app service"));
    }

    #[test]
    fn spec_deserializes_from_tagged_form() {
        let spec: MatcherSpec =
            serde_json::from_str(r#"{"kind": "suffix", "suffix": "example.com"}"#).unwrap();
        assert_eq!(
            spec,
            MatcherSpec::Suffix {
                suffix: "example.com".into(),
                annotation: None
            }
        );
    }

    #[test]
    fn classification_is_repeatable() {
        let ripe = RipeDomains::default();
        let first = ripe.classify("d111111abcdef8.cloudfront.net");
        assert_eq!(first, ripe.classify("d111111abcdef8.cloudfront.net"));
    }
}
