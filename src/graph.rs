//! The registry of transforms between frame kinds.

use crate::coordinate::Coordinate;
use crate::error::{Result, TransformError};
use crate::frames::{Frame, FrameKind};
use crate::transforms::{self, AffineParts};
use crate::Transformer;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A transform that computes the destination coordinate itself.
pub type FunctionTransform = fn(&Transformer, &Coordinate, &Frame) -> Result<Coordinate>;

/// A transform that describes the destination as a rotation and translation of the source.
pub type AffineTransform = fn(&Transformer, &Coordinate, &Frame) -> Result<AffineParts>;

/// How an edge in the graph computes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransformKind {
    Function,
    /// A pure rotation. None of the solar transforms are of this kind.
    Matrix,
    Affine,
}

impl Display for TransformKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformKind::Function => "function",
            TransformKind::Matrix => "matrix",
            TransformKind::Affine => "affine",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Edge {
    Function(FunctionTransform),
    Affine(AffineTransform),
}

impl Edge {
    #[must_use]
    pub fn kind(&self) -> TransformKind {
        match self {
            Edge::Function(_) => TransformKind::Function,
            Edge::Affine(_) => TransformKind::Affine,
        }
    }
}

/// Transforms between frame kinds, and the paths they make up.
///
/// Edges are kept in registration order, which is also the order in which path search
/// considers them.
#[derive(Debug, Clone, Default)]
pub struct TransformGraph {
    edges: Vec<(FrameKind, FrameKind, Edge)>,
}

impl TransformGraph {
    /// A graph without any transforms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph of all transforms between the solar frames.
    #[must_use]
    pub fn solar() -> Self {
        use FrameKind::*;

        let mut graph = Self::new();
        graph.register(Icrs, Hcrs, Edge::Affine(transforms::icrs_to_hcrs));
        graph.register(Hcrs, Icrs, Edge::Affine(transforms::hcrs_to_icrs));
        graph.register(Hcrs, HeliographicStonyhurst, Edge::Affine(transforms::hcrs_to_hgs));
        graph.register(HeliographicStonyhurst, Hcrs, Edge::Affine(transforms::hgs_to_hcrs));
        graph.register(
            HeliographicStonyhurst,
            HeliographicCarrington,
            Edge::Function(transforms::hgs_to_hgc),
        );
        graph.register(
            HeliographicCarrington,
            HeliographicStonyhurst,
            Edge::Function(transforms::hgc_to_hgs),
        );
        graph.register(Heliocentric, Helioprojective, Edge::Function(transforms::hcc_to_hpc));
        graph.register(Helioprojective, Heliocentric, Edge::Function(transforms::hpc_to_hcc));
        graph.register(Heliocentric, HeliographicStonyhurst, Edge::Function(transforms::hcc_to_hgs));
        graph.register(HeliographicStonyhurst, Heliocentric, Edge::Function(transforms::hgs_to_hcc));
        graph.register(Helioprojective, Helioprojective, Edge::Function(transforms::hpc_to_hpc));
        graph.register(
            HeliographicStonyhurst,
            HeliographicStonyhurst,
            Edge::Function(transforms::hgs_to_hgs),
        );
        graph.register(
            HeliographicCarrington,
            HeliographicCarrington,
            Edge::Function(transforms::hgc_to_hgc),
        );
        graph.register(Heliocentric, Heliocentric, Edge::Function(transforms::hcc_to_hcc));
        graph
    }

    /// Registers `edge` as the transform from `from` to `to`.
    ///
    /// An existing transform between the same kinds is replaced, keeping its place in the
    /// registration order.
    pub fn register(&mut self, from: FrameKind, to: FrameKind, edge: Edge) {
        if let Some(existing) = self
            .edges
            .iter_mut()
            .find(|(f, t, _)| *f == from && *t == to)
        {
            tracing::warn!(%from, %to, "replacing already registered transform");
            existing.2 = edge;
        } else {
            tracing::trace!(%from, %to, kind = %edge.kind(), "registered transform");
            self.edges.push((from, to, edge));
        }
    }

    /// The transform registered from `from` to `to`, if any.
    #[must_use]
    pub fn edge(&self, from: FrameKind, to: FrameKind) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, edge)| edge)
    }

    /// Every registered transform, in registration order.
    pub fn edges(&self) -> impl Iterator<Item = (FrameKind, FrameKind, &Edge)> + '_ {
        self.edges.iter().map(|(from, to, edge)| (*from, *to, edge))
    }

    /// The kinds that have at least one registered transform, in order of first registration.
    #[must_use]
    pub fn kinds(&self) -> Vec<FrameKind> {
        let mut kinds = Vec::new();
        for (from, to, _) in &self.edges {
            for kind in [*from, *to] {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    fn successors(&self, of: FrameKind) -> impl Iterator<Item = FrameKind> + '_ {
        self.edges
            .iter()
            .filter(move |(from, to, _)| *from == of && *to != of)
            .map(|(_, to, _)| *to)
    }

    /// The shortest sequence of kinds leading from `from` to `to`, both included.
    ///
    /// A kind with a transform onto itself has the direct path `[from, to]`. Otherwise a path
    /// from a kind to itself leaves through a neighboring kind and comes back. Among equally
    /// short paths, the one through the earliest registered transforms wins.
    pub fn shortest_path(&self, from: FrameKind, to: FrameKind) -> Result<Vec<FrameKind>> {
        if self.edge(from, to).is_some() {
            return Ok(vec![from, to]);
        }

        let mut previous: HashMap<FrameKind, FrameKind> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(kind) = queue.pop_front() {
            for next in self.successors(kind) {
                if next == to {
                    let mut path = vec![to, kind];
                    let mut current = kind;
                    while let Some(&before) = previous.get(&current) {
                        path.push(before);
                        current = before;
                    }
                    path.reverse();
                    return Ok(path);
                }
                if next != from && !previous.contains_key(&next) {
                    previous.insert(next, kind);
                    queue.push_back(next);
                }
            }
        }

        Err(TransformError::NoTransformPath { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use FrameKind::*;

    #[rstest]
    #[case(HeliographicStonyhurst, HeliographicCarrington, vec![HeliographicStonyhurst, HeliographicCarrington])]
    #[case(Helioprojective, HeliographicStonyhurst, vec![Helioprojective, Heliocentric, HeliographicStonyhurst])]
    #[case(Icrs, Helioprojective, vec![Icrs, Hcrs, HeliographicStonyhurst, Heliocentric, Helioprojective])]
    #[case(HeliographicCarrington, Hcrs, vec![HeliographicCarrington, HeliographicStonyhurst, Hcrs])]
    #[case(Helioprojective, Helioprojective, vec![Helioprojective, Helioprojective])]
    #[case(Hcrs, Hcrs, vec![Hcrs, Icrs, Hcrs])]
    #[case(Icrs, Icrs, vec![Icrs, Hcrs, Icrs])]
    fn shortest_paths(#[case] from: FrameKind, #[case] to: FrameKind, #[case] expected: Vec<FrameKind>) {
        assert_eq!(TransformGraph::solar().shortest_path(from, to).unwrap(), expected);
    }

    #[test]
    fn missing_paths_are_reported() {
        let mut graph = TransformGraph::new();
        graph.register(Icrs, Hcrs, Edge::Affine(transforms::icrs_to_hcrs));
        assert_eq!(
            graph.shortest_path(Hcrs, Icrs),
            Err(TransformError::NoTransformPath { from: Hcrs, to: Icrs })
        );
        assert_eq!(
            graph.shortest_path(Helioprojective, Icrs),
            Err(TransformError::NoTransformPath {
                from: Helioprojective,
                to: Icrs
            })
        );
    }

    #[test]
    fn registering_twice_replaces_in_place() {
        let mut graph = TransformGraph::solar();
        let before: Vec<_> = graph.edges().map(|(from, to, _)| (from, to)).collect();

        graph.register(Hcrs, HeliographicStonyhurst, Edge::Function(transforms::hgs_to_hgs));

        let after: Vec<_> = graph.edges().map(|(from, to, _)| (from, to)).collect();
        assert_eq!(before, after);
        assert_eq!(
            graph.edge(Hcrs, HeliographicStonyhurst).map(Edge::kind),
            Some(TransformKind::Function)
        );
    }

    #[test]
    fn solar_graph_kinds() {
        let graph = TransformGraph::solar();
        assert_eq!(graph.edges().count(), 14);
        let mut kinds = graph.kinds();
        kinds.sort();
        assert_eq!(kinds, FrameKind::ALL.to_vec());
        assert!(graph
            .edges()
            .all(|(_, _, edge)| edge.kind() != TransformKind::Matrix));
    }
}
