//! Northbound entity types.
//!
//! These mirror the rows of the OVN northbound tables that the plotter reads:
//! logical switches and their ports, logical routers, router ports and
//! static routes. All of them are plain snapshots; nothing here talks to a
//! database.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option key on a router-bound switch port naming its peer router port
pub const ROUTER_PORT_OPTION: &str = "router-port";

/// A logical switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub name: String,
}

/// Type tag of a logical switch port
///
/// OVN stores the type as a free-form string. Only `router` changes how a
/// port is drawn; every other value (including the empty string) is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PortType {
    Router,
    #[default]
    Plain,
    Other(String),
}

impl PortType {
    pub fn is_router(&self) -> bool {
        matches!(self, Self::Router)
    }
}

impl From<String> for PortType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "router" => Self::Router,
            "" => Self::Plain,
            _ => Self::Other(value),
        }
    }
}

impl From<PortType> for String {
    fn from(value: PortType) -> Self {
        match value {
            PortType::Router => "router".to_string(),
            PortType::Plain => String::new(),
            PortType::Other(other) => other,
        }
    }
}

/// A logical switch port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    #[serde(rename = "type", default)]
    pub port_type: PortType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl Port {
    /// Name of the associated router port, if the option is present
    pub fn router_port(&self) -> Option<&str> {
        self.options.get(ROUTER_PORT_OPTION).map(String::as_str)
    }
}

/// A logical router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    pub name: String,
}

/// A logical router port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterPort {
    pub name: String,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub mac: String,
}

/// A logical router static route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub ip_prefix: String,
    pub nexthop: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_type_from_string() {
        assert_eq!(PortType::from("router".to_string()), PortType::Router);
        assert_eq!(PortType::from(String::new()), PortType::Plain);
        assert_eq!(
            PortType::from("localnet".to_string()),
            PortType::Other("localnet".to_string())
        );
        assert!(!PortType::Other("patch".to_string()).is_router());
    }

    #[test]
    fn test_port_defaults_to_plain() {
        let port: Port = serde_yaml::from_str("name: web-vm1").unwrap();
        assert_eq!(port.port_type, PortType::Plain);
        assert!(port.router_port().is_none());
    }

    #[test]
    fn test_router_port_option() {
        let yaml = r#"
name: jtor-ovn_cluster_router
type: router
options:
  router-port: rtoj-ovn_cluster_router
"#;
        let port: Port = serde_yaml::from_str(yaml).unwrap();
        assert!(port.port_type.is_router());
        assert_eq!(port.router_port(), Some("rtoj-ovn_cluster_router"));
    }
}
