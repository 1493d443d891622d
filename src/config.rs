//! Render configuration.
//!
//! A [`PlotConfig`] is built once per invocation, either from defaults, a YAML
//! file (see `config_loader`) or command-line flags, and is passed explicitly
//! into the classifier and the graph assemblers.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Filter used when none is configured
pub const MATCH_ALL: &str = ".*";

/// Which naming conventions apply to the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Generic OVN: every matching switch is a regular switch
    Ovn,
    /// ovn-kubernetes: join, external and node-local switches are recognised
    OvnKubernetes,
    /// Pick one of the above from the switch names
    #[default]
    Auto,
}

/// Which graph assembly strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// One node per switch and router, with level seeding for a stable layout
    #[default]
    Compact,
    /// One cluster per switch and router, one node per port
    Detailed,
}

/// Regular expression matched (unanchored) against entity names
///
/// An empty pattern matches everything.
#[derive(Clone, Default)]
pub struct Filter(Option<Regex>);

impl Filter {
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        if pattern.is_empty() {
            return Ok(Self(None));
        }
        Regex::new(pattern)
            .map(|re| Self(Some(re)))
            .map_err(|e| ValidationError::InvalidFilter(e.to_string()))
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.0.as_ref().map_or(true, |re| re.is_match(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref().map_or(MATCH_ALL, Regex::as_str)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.as_str()).finish()
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Self::new(&pattern).map_err(serde::de::Error::custom)
    }
}

/// Render parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub mode: Mode,
    pub filter: Filter,
    pub format: Format,
}

impl PlotConfig {
    pub fn new(mode: Mode, filter: Filter, format: Format) -> Self {
        Self { mode, filter, format }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::new("").unwrap();
        assert_eq!(filter.as_str(), MATCH_ALL);
        assert!(filter.is_match("anything"));
    }

    #[test]
    fn test_anchored_filter() {
        let filter: Filter = "^foo$".parse().unwrap();
        assert!(filter.is_match("foo"));
        assert!(!filter.is_match("foo-bar"));
    }

    #[test]
    fn test_invalid_filter() {
        assert!(matches!(
            Filter::new("("),
            Err(ValidationError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_config_defaults_from_yaml() {
        let config: PlotConfig = serde_yaml::from_str("filter: node1").unwrap();
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.format, Format::Compact);
        assert!(config.filter.is_match("node1"));
    }

    #[test]
    fn test_mode_names() {
        let config: PlotConfig =
            serde_yaml::from_str("mode: ovn-kubernetes\nformat: detailed").unwrap();
        assert_eq!(config.mode, Mode::OvnKubernetes);
        assert_eq!(config.format, Format::Detailed);
    }
}
