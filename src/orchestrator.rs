//! End-to-end rendering.
//!
//! One call to [`plot_topology`] is one render: it lists and classifies the
//! topology, assembles the graph with the configured strategy and serializes
//! it. Nothing is kept between calls, and a failure discards everything built
//! so far.

use log::info;

use crate::config::PlotConfig;
use crate::plot::{assembler_for, Classification, PlotError};
use crate::topology::TopologyClient;

/// Render the topology behind `client` as DOT text
pub fn plot_topology(client: &dyn TopologyClient, config: &PlotConfig) -> Result<String, PlotError> {
    info!(
        "Plotting topology (mode: {:?}, format: {:?}, filter: {})",
        config.mode,
        config.format,
        config.filter.as_str()
    );

    let topology = Classification::build(client, config)?;
    let graph = assembler_for(config.format).assemble(&topology)?;

    info!(
        "Assembled graph with {} nodes and {} edges",
        graph.nodes().len(),
        graph.edges().len()
    );
    Ok(graph.to_dot())
}
