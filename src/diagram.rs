//! Graphviz renderings of a [`TransformGraph`], for documentation.
//!
//! A diagram is a snapshot: building one reads the graph and never changes it.

use crate::frames::FrameKind;
use crate::graph::{TransformGraph, TransformKind};

/// The label of the node that stands for every frame outside the diagram.
pub const OTHER_FRAMES: &str = "Other frames";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramNode {
    Frame(FrameKind),
    /// Everything that isn't drawn, reachable through ICRS.
    Placeholder,
}

impl DiagramNode {
    fn id(&self) -> &'static str {
        match self {
            DiagramNode::Frame(kind) => kind.name(),
            DiagramNode::Placeholder => "other_frames",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramLink {
    pub from: DiagramNode,
    pub to: DiagramNode,
    /// `None` for the links to the placeholder, which aren't real transforms.
    pub kind: Option<TransformKind>,
}

/// A reduced view of a transform graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDiagram {
    nodes: Vec<DiagramNode>,
    links: Vec<DiagramLink>,
}

/// Builds a diagram of the frames in `graph` named in `keep`, plus a placeholder for all other
/// frames linked both ways to ICRS.
///
/// Names that don't match any [`FrameKind::name`] are ignored.
#[must_use]
pub fn pruned(graph: &TransformGraph, keep: &[&str]) -> GraphDiagram {
    let mut kinds: Vec<FrameKind> = graph
        .kinds()
        .into_iter()
        .filter(|kind| keep.contains(&kind.name()))
        .collect();
    if !kinds.contains(&FrameKind::Icrs) {
        kinds.push(FrameKind::Icrs);
    }
    kinds.sort();
    tracing::debug!(kept = kinds.len(), "pruning transform graph");

    let mut links: Vec<DiagramLink> = graph
        .edges()
        .filter(|(from, to, _)| kinds.contains(from) && kinds.contains(to))
        .map(|(from, to, edge)| DiagramLink {
            from: DiagramNode::Frame(from),
            to: DiagramNode::Frame(to),
            kind: Some(edge.kind()),
        })
        .collect();
    let icrs = DiagramNode::Frame(FrameKind::Icrs);
    links.push(DiagramLink {
        from: DiagramNode::Placeholder,
        to: icrs,
        kind: None,
    });
    links.push(DiagramLink {
        from: icrs,
        to: DiagramNode::Placeholder,
        kind: None,
    });

    let mut nodes: Vec<DiagramNode> = kinds.into_iter().map(DiagramNode::Frame).collect();
    nodes.push(DiagramNode::Placeholder);

    GraphDiagram { nodes, links }
}

fn color(kind: Option<TransformKind>) -> &'static str {
    match kind {
        None => "#000000",
        Some(TransformKind::Function) => "#783001",
        Some(TransformKind::Matrix) => "#7570b3",
        Some(TransformKind::Affine) => "#555555",
    }
}

impl GraphDiagram {
    #[must_use]
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    #[must_use]
    pub fn links(&self) -> &[DiagramLink] {
        &self.links
    }

    /// Renders the diagram in the Graphviz DOT language.
    ///
    /// Nodes are filled light cyan, except for the [solar](FrameKind::is_solar) frames which are
    /// white. Links are colored by the kind of transform.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph TransformGraph {\n");
        dot.push_str("    node [style=filled fillcolor=lightcyan]\n");
        for node in &self.nodes {
            let line = match node {
                DiagramNode::Frame(kind) if kind.is_solar() => {
                    format!("    {} [fillcolor=white label=\"{kind}\"]\n", node.id())
                }
                DiagramNode::Frame(kind) => format!("    {} [label=\"{kind}\"]\n", node.id()),
                DiagramNode::Placeholder => {
                    format!("    {} [shape=box3d label=\"{OTHER_FRAMES}\"]\n", node.id())
                }
            };
            dot.push_str(&line);
        }
        for link in &self.links {
            dot.push_str(&format!(
                "    {} -> {} [color=\"{}\"]\n",
                link.from.id(),
                link.to.id(),
                color(link.kind)
            ));
        }
        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruning_leaves_the_graph_alone() {
        let graph = TransformGraph::solar();
        let before = graph.edges().count();
        let diagram = pruned(&graph, &["heliocentric"]);
        assert_eq!(graph.edges().count(), before);

        assert_eq!(
            diagram.nodes(),
            [
                DiagramNode::Frame(FrameKind::Icrs),
                DiagramNode::Frame(FrameKind::Heliocentric),
                DiagramNode::Placeholder
            ]
        );
        // the self-transform, plus the placeholder links
        assert_eq!(diagram.links().len(), 3);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let diagram = pruned(&TransformGraph::solar(), &["galactic", "icrs"]);
        assert_eq!(
            diagram.nodes(),
            [DiagramNode::Frame(FrameKind::Icrs), DiagramNode::Placeholder]
        );
    }

    #[test]
    fn dot_has_a_line_per_node_and_link() {
        let diagram = pruned(&TransformGraph::solar(), &["heliocentric", "helioprojective"]);
        let dot = diagram.to_dot();
        // header, node defaults and closing brace
        assert_eq!(dot.lines().count(), 3 + diagram.nodes().len() + diagram.links().len());
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn heliographic_diagram() {
        let diagram = pruned(
            &TransformGraph::solar(),
            &["heliographic_stonyhurst", "heliographic_carrington", "hcrs"],
        );
        insta::assert_snapshot!(diagram.to_dot(), @r##"
        digraph TransformGraph {
            node [style=filled fillcolor=lightcyan]
            icrs [label="icrs"]
            hcrs [label="hcrs"]
            heliographic_stonyhurst [fillcolor=white label="heliographic_stonyhurst"]
            heliographic_carrington [fillcolor=white label="heliographic_carrington"]
            other_frames [shape=box3d label="Other frames"]
            icrs -> hcrs [color="#555555"]
            hcrs -> icrs [color="#555555"]
            hcrs -> heliographic_stonyhurst [color="#555555"]
            heliographic_stonyhurst -> hcrs [color="#555555"]
            heliographic_stonyhurst -> heliographic_carrington [color="#783001"]
            heliographic_carrington -> heliographic_stonyhurst [color="#783001"]
            heliographic_stonyhurst -> heliographic_stonyhurst [color="#783001"]
            heliographic_carrington -> heliographic_carrington [color="#783001"]
            other_frames -> icrs [color="#000000"]
            icrs -> other_frames [color="#000000"]
        }
        "##);
    }
}
