//! Topology plotting.
//!
//! Classification runs once per render and feeds one of two interchangeable
//! graph assemblers:
//!
//! - [`compact::CompactAssembler`]: one node per switch and router, invisible
//!   spacers carrying network labels, seeded layout levels
//! - [`detailed::DetailedAssembler`]: one cluster per switch and router, one
//!   node per port, port-to-port edges

pub mod classifier;
pub mod compact;
pub mod detailed;
pub mod mode;
pub mod style;

pub use classifier::{Category, Classification};
pub use compact::CompactAssembler;
pub use detailed::DetailedAssembler;
pub use mode::ResolvedMode;
pub use style::NodeStyle;

use crate::config::Format;
use crate::dot::Graph;
use crate::topology::{ClientError, Port};

/// Errors that abort a render
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// A listing call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A router-bound port lacks its router-port option
    #[error("router-port option not found for port {port} in switch {switch}")]
    MissingRouterPort { switch: String, port: String },
}

/// Turns a classified topology into a graph description
pub trait GraphAssembler {
    fn assemble(&self, topology: &Classification) -> Result<Graph, PlotError>;
}

/// The assembler for an output format
pub fn assembler_for(format: Format) -> Box<dyn GraphAssembler> {
    match format {
        Format::Compact => Box::new(CompactAssembler),
        Format::Detailed => Box::new(DetailedAssembler),
    }
}

/// Router port referenced by a router-bound switch port
pub(crate) fn router_port_of<'p>(switch: &str, port: &'p Port) -> Result<&'p str, PlotError> {
    port.router_port().ok_or_else(|| PlotError::MissingRouterPort {
        switch: switch.to_string(),
        port: port.name.clone(),
    })
}

/// Empty left-to-right graph with the shared edge defaults
pub(crate) fn base_graph(penwidth: &str) -> Graph {
    let mut graph = Graph::new();
    graph
        .attr("rankdir", "LR")
        .edge_default("fontname", "arial")
        .edge_default("fontsize", "9")
        .edge_default("penwidth", penwidth)
        .edge_default("arrowhead", "none");
    graph
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::topology::Snapshot;

    /// Parse an inline YAML snapshot
    pub fn snapshot(yaml: &str) -> Snapshot {
        serde_yaml::from_str(yaml).expect("fixture snapshot parses")
    }
}
