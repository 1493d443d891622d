//! Read-only access to the northbound tables.

use super::types::{Port, Router, RouterPort, StaticRoute, Switch};

/// Errors returned by a topology client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Logical switch not found: {0}")]
    UnknownSwitch(String),

    #[error("Logical router not found: {0}")]
    UnknownRouter(String),

    /// The router has no static route list. Callers may treat this as "no routes".
    #[error("No static routes recorded for router {0}")]
    NoStaticRoutes(String),

    #[error("Northbound transport error: {0}")]
    Transport(String),
}

/// Listing operations over the northbound entity tables.
///
/// Every call is a blocking, read-only round-trip. Implementations should serve
/// all calls of one render from a consistent snapshot if reproducible output
/// matters to the caller.
pub trait TopologyClient {
    fn list_switches(&self) -> Result<Vec<Switch>, ClientError>;

    fn list_ports(&self, switch: &str) -> Result<Vec<Port>, ClientError>;

    fn list_routers(&self) -> Result<Vec<Router>, ClientError>;

    fn list_router_ports(&self, router: &str) -> Result<Vec<RouterPort>, ClientError>;

    fn list_static_routes(&self, router: &str) -> Result<Vec<StaticRoute>, ClientError>;
}
