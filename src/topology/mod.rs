//! Logical network topology module.
//!
//! This module contains the northbound entity types, the client interface the
//! plotter reads them through, and a file-backed snapshot implementation of
//! that interface.

pub mod client;
pub mod snapshot;
pub mod types;

// Re-export key types and functions for easier access
pub use client::{ClientError, TopologyClient};
pub use snapshot::{load_snapshot, Snapshot, SnapshotError};
pub use types::{Port, PortType, Router, RouterPort, StaticRoute, Switch, ROUTER_PORT_OPTION};
