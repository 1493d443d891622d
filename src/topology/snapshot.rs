//! File-backed northbound snapshot.
//!
//! A snapshot is an export of the logical switch and router tables with ports
//! and routes nested under their owners. It can be written as YAML or JSON:
//!
//! ```yaml
//! switches:
//!   - name: join
//!     ports:
//!       - name: jtor-ovn_cluster_router
//!         type: router
//!         options:
//!           router-port: rtoj-ovn_cluster_router
//! routers:
//!   - name: ovn_cluster_router
//!     ports:
//!       - name: rtoj-ovn_cluster_router
//!         networks: ["100.64.0.1/16"]
//!         mac: "0a:58:64:40:00:01"
//!     static_routes:
//!       - ip_prefix: 10.244.0.0/24
//!         nexthop: 100.64.0.2
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use super::client::{ClientError, TopologyClient};
use super::types::{Port, Router, RouterPort, StaticRoute, Switch};

/// Errors that can occur while loading a snapshot file
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Cannot open snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML snapshot {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchEntry {
    pub name: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterEntry {
    pub name: String,
    #[serde(default)]
    pub ports: Vec<RouterPort>,
    /// `None` when the export carried no route list for this router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_routes: Option<Vec<StaticRoute>>,
}

/// An immutable copy of the northbound tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub switches: Vec<SwitchEntry>,
    #[serde(default)]
    pub routers: Vec<RouterEntry>,
}

impl Snapshot {
    fn switch(&self, name: &str) -> Result<&SwitchEntry, ClientError> {
        self.switches
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ClientError::UnknownSwitch(name.to_string()))
    }

    fn router(&self, name: &str) -> Result<&RouterEntry, ClientError> {
        self.routers
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ClientError::UnknownRouter(name.to_string()))
    }
}

impl TopologyClient for Snapshot {
    fn list_switches(&self) -> Result<Vec<Switch>, ClientError> {
        Ok(self
            .switches
            .iter()
            .map(|s| Switch { name: s.name.clone() })
            .collect())
    }

    fn list_ports(&self, switch: &str) -> Result<Vec<Port>, ClientError> {
        Ok(self.switch(switch)?.ports.clone())
    }

    fn list_routers(&self) -> Result<Vec<Router>, ClientError> {
        Ok(self
            .routers
            .iter()
            .map(|r| Router { name: r.name.clone() })
            .collect())
    }

    fn list_router_ports(&self, router: &str) -> Result<Vec<RouterPort>, ClientError> {
        Ok(self.router(router)?.ports.clone())
    }

    fn list_static_routes(&self, router: &str) -> Result<Vec<StaticRoute>, ClientError> {
        self.router(router)?
            .static_routes
            .clone()
            .ok_or_else(|| ClientError::NoStaticRoutes(router.to_string()))
    }
}

/// Load a snapshot from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    info!("Loading northbound snapshot from: {:?}", path);

    let file = File::open(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path.extension().map_or(false, |ext| ext == "json");
    let snapshot: Snapshot = if is_json {
        serde_json::from_reader(file).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_reader(file).map_err(|source| SnapshotError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    info!(
        "Snapshot contains {} switches and {} routers",
        snapshot.switches.len(),
        snapshot.routers.len()
    );
    Ok(snapshot)
}
