//! Detailed strategy.
//!
//! Every plotted switch and every router in the router set becomes a cluster
//! holding one node per port, and routers get an extra node tabulating their
//! static routes. Router-bound switch ports connect straight to their router
//! port. Layout is not stabilised, so this works best with a narrow filter.

use log::debug;
use std::collections::HashMap;

use super::classifier::Classification;
use super::{base_graph, router_port_of, GraphAssembler, PlotError};
use crate::dot::{escape_html, AttrValue, Graph, NodeId};
use crate::registry::NodeRegistry;
use crate::topology::{RouterPort, StaticRoute};

const PENWIDTH: &str = "4.0";
const ROUTER_CLUSTER_COLOR: &str = "0.7 0.7 1.0";
const SWITCH_CLUSTER_COLOR: &str = "0.4 1.0 0.6";

#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedAssembler;

impl GraphAssembler for DetailedAssembler {
    fn assemble(&self, topology: &Classification) -> Result<Graph, PlotError> {
        let mut registry = NodeRegistry::new(base_graph(PENWIDTH));
        // Only router ports drawn here are valid peers for switch ports.
        let mut router_ports: HashMap<String, NodeId> = HashMap::new();

        for lr in topology.routers() {
            let cluster = registry.graph_mut().add_cluster(&lr.name);
            registry
                .graph_mut()
                .cluster_mut(cluster)
                .attr("style", "filled")
                .attr("color", ROUTER_CLUSTER_COLOR);

            if let Some(routes) = topology.static_routes(&lr.name) {
                let node = registry.get_node_in(&format!("routes-{}", lr.name), Some(cluster));
                registry
                    .graph_mut()
                    .node_mut(node)
                    .attr("shape", "box")
                    .attr("style", "filled")
                    .attr("label", AttrValue::Html(routes_table(routes)));
            }

            for lrp in topology.router_ports(&lr.name) {
                let node = registry.get_node_in(&lrp.name, Some(cluster));
                registry
                    .graph_mut()
                    .node_mut(node)
                    .attr("label", AttrValue::Html(router_port_table(lrp)))
                    .attr("shape", "none")
                    .attr("style", "filled")
                    .attr("color", "white");
                router_ports.insert(lrp.name.clone(), node);
            }
        }

        for ls in topology.plotted_switches() {
            let cluster = registry.graph_mut().add_cluster(&ls.name);
            registry
                .graph_mut()
                .cluster_mut(cluster)
                .attr("style", "filled")
                .attr("color", SWITCH_CLUSTER_COLOR);

            for lsp in topology.ports(&ls.name) {
                let peer = if lsp.port_type.is_router() {
                    let rp_name = router_port_of(&ls.name, lsp)?;
                    router_ports.get(rp_name).copied()
                } else {
                    None
                };

                let node = registry.get_node_in(&lsp.name, Some(cluster));
                registry
                    .graph_mut()
                    .node_mut(node)
                    .attr("shape", "box")
                    .attr("style", "filled")
                    .attr("color", "white");

                // A switch port named like a router port resolves to that node.
                if let Some(peer) = peer.filter(|peer| *peer != node) {
                    registry.graph_mut().add_edge(node, peer);
                } else if peer.is_none() && lsp.port_type.is_router() {
                    debug!("No plotted router port for {}/{}", ls.name, lsp.name);
                }
            }
        }

        Ok(registry.into_graph())
    }
}

fn router_port_table(lrp: &RouterPort) -> String {
    let networks: Vec<String> = lrp.networks.iter().map(|n| escape_html(n)).collect();
    format!(
        "<table><tr><td>Name</td><td>Networks</td><td>MAC</td></tr>\
         <tr><td port='main'>{}</td><td>{}</td><td>{}</td></tr></table>",
        escape_html(&lrp.name),
        networks.join("<br />"),
        escape_html(&lrp.mac)
    )
}

fn routes_table(routes: &[StaticRoute]) -> String {
    let mut table = String::from(
        "<table BORDER='0' CELLBORDER='0' CELLSPACING='0' CELLPADDING='0'>\
         <tr><td>IPPrefix</td><td>Nexthop</td><td>OutputPort</td><td>Policy</td></tr>",
    );
    for route in routes {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&route.ip_prefix),
            escape_html(&route.nexthop),
            escape_html(route.output_port.as_deref().unwrap_or_default()),
            escape_html(route.policy.as_deref().unwrap_or_default())
        ));
    }
    table.push_str("</table>");
    table
}
