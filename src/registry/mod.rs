//! # Node Registry
//!
//! Memoizes graph nodes by name for one rendering pass. The first lookup of a
//! name creates the node; every later lookup returns the same [`NodeId`], so
//! edges referring to a name always share one endpoint.
//!
//! A registry owns the [`Graph`] it fills and is consumed when the pass ends
//! (see [`NodeRegistry::into_graph`]); it is never shared between renders.

use std::collections::HashMap;

use crate::dot::{ClusterId, Graph, NodeId};
use crate::plot::style::NodeStyle;

/// Name-to-node memo table over a graph under construction
#[derive(Debug, Default)]
pub struct NodeRegistry {
    graph: Graph,
    nodes: HashMap<String, NodeId>,
}

impl NodeRegistry {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            nodes: HashMap::new(),
        }
    }

    /// Retrieve a top-level node, creating it if it does not exist
    pub fn get_node(&mut self, name: &str) -> NodeId {
        self.get_node_in(name, None)
    }

    /// Retrieve a node, creating it inside `cluster` if it does not exist.
    ///
    /// An existing node keeps the cluster it was created in.
    pub fn get_node_in(&mut self, name: &str, cluster: Option<ClusterId>) -> NodeId {
        if let Some(id) = self.nodes.get(name) {
            return *id;
        }
        let id = self.graph.add_node(name, cluster);
        self.nodes.insert(name.to_string(), id);
        id
    }

    /// Retrieve a top-level node and apply `style` to it
    pub fn get_styled(&mut self, name: &str, style: NodeStyle) -> NodeId {
        let id = self.get_node(name);
        style.apply(&mut self.graph, id)
    }

    pub fn get_switch(&mut self, name: &str) -> NodeId {
        self.get_styled(name, NodeStyle::Switch)
    }

    pub fn get_router(&mut self, name: &str) -> NodeId {
        self.get_styled(name, NodeStyle::Router)
    }

    pub fn get_leaf(&mut self, name: &str) -> NodeId {
        self.get_styled(name, NodeStyle::Leaf)
    }

    pub fn get_spacer(&mut self, name: &str) -> NodeId {
        self.get_styled(name, NodeStyle::Spacer)
    }

    /// Look a node up without creating it
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.nodes.get(name).copied()
    }

    /// Draw `levels` invisible nodes named "1".."levels" chained by invisible edges
    pub fn draw_levels(&mut self, levels: usize) {
        let mut previous: Option<NodeId> = None;
        for level in 1..=levels {
            let current = self.get_styled(&level.to_string(), NodeStyle::Level);
            if let Some(previous) = previous {
                self.graph.add_edge(previous, current).attr("style", "invis");
            }
            previous = Some(current);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[cfg(test)]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}
