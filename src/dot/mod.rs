//! Graphviz DOT graph description.
//!
//! A small in-memory model of a directed graph: graph attributes, default edge
//! attributes, clusters, nodes and edges. Nodes and edges keep insertion order
//! and attributes are sorted, so the same sequence of calls always yields the
//! same text.

use std::collections::BTreeMap;

/// Handle to a node in a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Handle to a cluster subgraph in a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId(usize);

/// An attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Quoted and escaped string
    Text(String),
    /// HTML-like label, emitted between angle brackets
    Html(String),
}

impl AttrValue {
    fn write_to(&self, output: &mut String) {
        match self {
            Self::Text(text) => output.push_str(&format!("\"{}\"", escape(text))),
            Self::Html(html) => output.push_str(&format!("<{html}>")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

pub type Attrs = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub cluster: Option<ClusterId>,
    pub attrs: Attrs,
}

impl Node {
    /// Set an attribute, replacing any earlier value
    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Cluster {
    pub name: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub attrs: Attrs,
}

impl Edge {
    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn label(&mut self, label: &str) -> &mut Self {
        self.attr("label", label)
    }
}

/// A directed graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    attrs: Attrs,
    edge_defaults: Attrs,
    clusters: Vec<Cluster>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a graph attribute
    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Set an attribute applied to every edge
    pub fn edge_default(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.edge_defaults.insert(key.to_string(), value.into());
        self
    }

    /// Add a cluster subgraph labelled with its name
    pub fn add_cluster(&mut self, name: &str) -> ClusterId {
        let mut attrs = Attrs::new();
        attrs.insert("label".to_string(), AttrValue::from(name));
        self.clusters.push(Cluster {
            name: name.to_string(),
            attrs,
        });
        ClusterId(self.clusters.len() - 1)
    }

    pub fn cluster_mut(&mut self, id: ClusterId) -> &mut Cluster {
        &mut self.clusters[id.0]
    }

    /// Add a node. Names are not deduplicated here; see `NodeRegistry`.
    pub fn add_node(&mut self, name: &str, cluster: Option<ClusterId>) -> NodeId {
        self.nodes.push(Node {
            name: name.to_string(),
            cluster,
            attrs: Attrs::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> &mut Edge {
        self.edges.push(Edge {
            from,
            to,
            attrs: Attrs::new(),
        });
        let last = self.edges.len() - 1;
        &mut self.edges[last]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Render as DOT text
    pub fn to_dot(&self) -> String {
        let estimated_size = self.nodes.len() * 60 + self.edges.len() * 40 + 128;
        let mut output = String::with_capacity(estimated_size);

        output.push_str("digraph {\n");
        for (key, value) in &self.attrs {
            write_indent(&mut output, 1);
            output.push_str(&format!("{key}="));
            value.write_to(&mut output);
            output.push_str(";\n");
        }
        if !self.edge_defaults.is_empty() {
            write_indent(&mut output, 1);
            output.push_str("edge");
            write_attrs(&mut output, &self.edge_defaults);
            output.push_str(";\n");
        }

        for (index, cluster) in self.clusters.iter().enumerate() {
            write_indent(&mut output, 1);
            output.push_str(&format!("subgraph \"cluster_{}\" {{\n", escape(&cluster.name)));
            for (key, value) in &cluster.attrs {
                write_indent(&mut output, 2);
                output.push_str(&format!("{key}="));
                value.write_to(&mut output);
                output.push_str(";\n");
            }
            for node in self
                .nodes
                .iter()
                .filter(|n| n.cluster == Some(ClusterId(index)))
            {
                write_node(&mut output, node, 2);
            }
            write_indent(&mut output, 1);
            output.push_str("}\n");
        }

        for node in self.nodes.iter().filter(|n| n.cluster.is_none()) {
            write_node(&mut output, node, 1);
        }

        for edge in &self.edges {
            write_indent(&mut output, 1);
            output.push_str(&format!(
                "\"{}\" -> \"{}\"",
                escape(&self.nodes[edge.from.0].name),
                escape(&self.nodes[edge.to.0].name)
            ));
            write_attrs(&mut output, &edge.attrs);
            output.push_str(";\n");
        }

        output.push('}');
        output
    }
}

impl Cluster {
    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }
}

/// Escape special characters for quoted DOT strings.
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape text placed inside an HTML-like label.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

fn write_attrs(output: &mut String, attrs: &Attrs) {
    if attrs.is_empty() {
        return;
    }
    output.push_str(" [");
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        output.push_str(&format!("{key}="));
        value.write_to(output);
    }
    output.push(']');
}

fn write_node(output: &mut String, node: &Node, level: usize) {
    write_indent(output, level);
    output.push_str(&format!("\"{}\"", escape(&node.name)));
    write_attrs(output, &node.attrs);
    output.push_str(";\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        assert_eq!(Graph::new().to_dot(), "digraph {\n}");
    }

    #[test]
    fn test_nodes_edges_and_attributes() {
        let mut g = Graph::new();
        g.attr("rankdir", "LR");
        g.edge_default("arrowhead", "none");
        let a = g.add_node("a", None);
        let b = g.add_node("b \"quoted\"", None);
        g.node_mut(a).attr("shape", "oval");
        g.add_edge(a, b).label("10.0.0.0/24");

        let dot = g.to_dot();
        assert!(dot.contains("  rankdir=\"LR\";\n"));
        assert!(dot.contains("  edge [arrowhead=\"none\"];\n"));
        assert!(dot.contains("  \"a\" [shape=\"oval\"];\n"));
        assert!(dot.contains("  \"b \\\"quoted\\\"\";\n"));
        assert!(dot.contains("  \"a\" -> \"b \\\"quoted\\\"\" [label=\"10.0.0.0/24\"];\n"));
    }

    #[test]
    fn test_clusters_hold_their_nodes() {
        let mut g = Graph::new();
        let c = g.add_cluster("r1");
        g.cluster_mut(c).attr("style", "filled");
        let n = g.add_node("rp0", Some(c));
        g.node_mut(n).attr("label", AttrValue::Html("<table></table>".to_string()));

        let dot = g.to_dot();
        assert!(dot.contains("subgraph \"cluster_r1\" {\n    label=\"r1\";\n    style=\"filled\";\n    \"rp0\" [label=<<table></table>>];\n  }\n"));
    }

    #[test]
    fn test_last_attribute_write_wins() {
        let mut g = Graph::new();
        let n = g.add_node("x", None);
        g.node_mut(n).attr("color", "red").attr("color", "blue");
        assert!(g.to_dot().contains("\"x\" [color=\"blue\"];"));
    }
}
