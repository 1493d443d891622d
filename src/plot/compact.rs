//! Compact strategy.
//!
//! Every switch and router collapses to a single node. Invisible level nodes
//! are drawn first so Graphviz keeps a stable left-to-right rank order, and
//! router links pass through a zero-size spacer that carries the network label
//! without taking up a rank of its own.

use log::debug;

use super::classifier::{Category, Classification};
use super::mode::CLUSTER_ROUTER;
use super::{base_graph, router_port_of, GraphAssembler, PlotError};
use crate::dot::Graph;
use crate::registry::NodeRegistry;

const PENWIDTH: &str = "2.0";
const NETWORK_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Copy, Default)]
pub struct CompactAssembler;

impl GraphAssembler for CompactAssembler {
    fn assemble(&self, topology: &Classification) -> Result<Graph, PlotError> {
        let mut nl = NodeRegistry::new(base_graph(PENWIDTH));

        nl.draw_levels(topology.mode().levels());

        // Node switches: switch -> spacer -> router, leaves on the left.
        for ls in topology.switches_in(&[Category::Regular]) {
            for lsp in topology.ports(&ls.name) {
                if !lsp.port_type.is_router() {
                    let leaf = nl.get_leaf(&lsp.name);
                    let sw = nl.get_switch(&ls.name);
                    nl.graph_mut().add_edge(leaf, sw);
                    continue;
                }
                let rp_name = router_port_of(&ls.name, lsp)?;
                let Some((lr, lrp)) = topology.find_router_for_port(rp_name) else {
                    debug!("No plotted router for {}/{}", ls.name, lsp.name);
                    continue;
                };
                let label = lrp.networks.join(NETWORK_SEPARATOR);
                let sw = nl.get_switch(&ls.name);
                let spacer = nl.get_spacer(&format!("{}spacer1{}", ls.name, lr.name));
                let router = nl.get_router(&lr.name);
                nl.graph_mut().add_edge(sw, spacer).label(&label);
                nl.graph_mut().add_edge(spacer, router);
            }
        }

        // Join switches: the cluster router sits left of the join switch,
        // gateway routers to its right.
        for ls in topology.switches_in(&[Category::Join]) {
            for lsp in topology.ports(&ls.name) {
                if !lsp.port_type.is_router() {
                    let sw = nl.get_switch(&ls.name);
                    let leaf = nl.get_leaf(&lsp.name);
                    nl.graph_mut().add_edge(sw, leaf);
                    continue;
                }
                let rp_name = router_port_of(&ls.name, lsp)?;
                let Some((lr, lrp)) = topology.find_router_for_port(rp_name) else {
                    continue;
                };
                let label = lrp.networks.join(NETWORK_SEPARATOR);
                if lr.name == CLUSTER_ROUTER {
                    let router = nl.get_router(&lr.name);
                    let spacer =
                        nl.get_spacer(&format!("{}{}spacer1", CLUSTER_ROUTER, ls.name));
                    let sw = nl.get_switch(&ls.name);
                    nl.graph_mut().add_edge(router, spacer).label(&label);
                    nl.graph_mut().add_edge(spacer, sw);
                } else if topology.filter().is_match(&lr.name) {
                    let sw = nl.get_switch(&ls.name);
                    let spacer = nl.get_spacer(&format!("{}spacer1", lr.name));
                    let router = nl.get_router(&lr.name);
                    nl.graph_mut().add_edge(sw, spacer);
                    nl.graph_mut().add_edge(spacer, router).label(&label);
                }
            }
        }

        // External and node-local switches hang off their router, no spacer.
        for ls in topology.switches_in(&[Category::External, Category::NodeLocal]) {
            for lsp in topology.ports(&ls.name) {
                if lsp.port_type.is_router() {
                    let rp_name = router_port_of(&ls.name, lsp)?;
                    if let Some((lr, _)) = topology.find_router_for_port(rp_name) {
                        let router = nl.get_router(&lr.name);
                        let sw = nl.get_switch(&ls.name);
                        nl.graph_mut().add_edge(router, sw);
                    }
                } else {
                    let sw = nl.get_switch(&ls.name);
                    let leaf = nl.get_leaf(&lsp.name);
                    nl.graph_mut().add_edge(sw, leaf);
                }
            }
        }

        Ok(nl.into_graph())
    }
}
