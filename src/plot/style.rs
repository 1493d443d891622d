//! Presentation attributes for plotted nodes.

use crate::dot::{Graph, NodeId};

/// Visual category of a compact-mode node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// Logical switch of any category
    Switch,
    Router,
    /// Plain switch port
    Leaf,
    /// Zero-size node carrying an edge label
    Spacer,
    /// Invisible rank seed
    Level,
}

impl NodeStyle {
    /// Attribute table for this style
    pub fn attributes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Switch => &[("shape", "diamond"), ("color", "seagreen")],
            Self::Router => &[("shape", "octagon"), ("color", "salmon")],
            Self::Leaf => &[("shape", "oval")],
            Self::Spacer => &[
                ("shape", "point"),
                ("width", "0"),
                ("height", "0"),
                ("label", ""),
            ],
            Self::Level => &[("shape", "point"), ("style", "invis")],
        }
    }

    /// Apply this style to a node. Repeated calls are idempotent.
    pub fn apply(self, graph: &mut Graph, node: NodeId) -> NodeId {
        let target = graph.node_mut(node);
        for (key, value) in self.attributes() {
            target.attr(key, *value);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::AttrValue;

    #[test]
    fn test_apply_is_idempotent() {
        let mut g = Graph::new();
        let n = g.add_node("sw", None);
        NodeStyle::Switch.apply(&mut g, n);
        let once = g.node(n).attrs.clone();
        NodeStyle::Switch.apply(&mut g, n);
        assert_eq!(g.node(n).attrs, once);
        assert_eq!(once.get("shape"), Some(&AttrValue::from("diamond")));
    }

    #[test]
    fn test_spacer_is_zero_size_and_unlabelled() {
        let mut g = Graph::new();
        let n = g.add_node("aspacer1b", None);
        NodeStyle::Spacer.apply(&mut g, n);
        let attrs = &g.node(n).attrs;
        assert_eq!(attrs.get("width"), Some(&AttrValue::from("0")));
        assert_eq!(attrs.get("label"), Some(&AttrValue::from("")));
    }
}
