use crate::config::TransformConfig;
use crate::coordinate::Coordinate;
use crate::ephemeris::{Ephemeris, LowPrecisionEphemeris};
use crate::error::{Result, TransformError};
use crate::frames::Frame;
use crate::graph::{Edge, TransformGraph};
use std::sync::Arc;

/// Moves coordinates between frames.
///
/// A transformer owns the [graph](TransformGraph) of pairwise transforms, the
/// [configuration](TransformConfig) they read their constants and tolerances from, and the
/// [ephemeris](Ephemeris) that positions the Sun and the Earth. It is immutable once built, and
/// can be shared freely between threads.
///
/// ```
/// use helioframes::{Frame, ObsTime, Observer, Representation, Transformer};
/// use uom::si::angle::degree;
/// use uom::si::f64::{Angle, Length};
/// use uom::si::length::meter;
///
/// let transformer = Transformer::default();
/// let obstime = ObsTime::from_ymd_hms(2021, 5, 1, 0, 0, 0).unwrap();
///
/// let surface = Frame::stonyhurst(obstime).realize(Representation::spherical(
///     Angle::new::<degree>(30.),
///     Angle::new::<degree>(10.),
///     Length::new::<meter>(6.955_08e8),
/// ));
/// let seen = transformer
///     .transform(&surface, &Frame::helioprojective(obstime, Observer::earth()))
///     .unwrap();
///
/// // west of disk center, as seen from the Earth
/// let (tx, _, _) = seen.spherical();
/// assert!(tx.get::<degree>() > 0.);
/// ```
#[derive(Debug, Clone)]
pub struct Transformer {
    graph: TransformGraph,
    config: TransformConfig,
    ephemeris: Arc<dyn Ephemeris>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformConfig::default(), Arc::new(LowPrecisionEphemeris))
    }
}

impl Transformer {
    /// A transformer over all the solar frames.
    #[must_use]
    pub fn new(config: TransformConfig, ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self::with_graph(TransformGraph::solar(), config, ephemeris)
    }

    /// A transformer over a custom set of transforms.
    #[must_use]
    pub fn with_graph(graph: TransformGraph, config: TransformConfig, ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self {
            graph,
            config,
            ephemeris,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &TransformGraph {
        &self.graph
    }

    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    #[must_use]
    pub fn ephemeris(&self) -> &dyn Ephemeris {
        self.ephemeris.as_ref()
    }

    /// Expresses `coordinate` in the frame `target`.
    ///
    /// `"earth"` observers on either frame are first resolved to the Earth's location, if the
    /// frame has an obstime. The transform then follows the shortest path in the graph, passing
    /// through intermediate frames whose parameters come from `target` where it has them, and
    /// from the coordinate's frame otherwise.
    pub fn transform(&self, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
        let source = coordinate.frame().resolve_observer(self)?;
        let target = target.resolve_observer(self)?;

        if source == target && self.graph.edge(source.kind(), target.kind()).is_none() {
            return Ok(target.realize(*coordinate.data()));
        }

        let path = self.graph.shortest_path(source.kind(), target.kind())?;
        tracing::debug!(
            from = %source.kind(),
            to = %target.kind(),
            hops = path.len() - 1,
            "transforming coordinate"
        );

        let mut current = source.realize(*coordinate.data());
        for (i, hop) in path.windows(2).enumerate() {
            let (from, to) = (hop[0], hop[1]);
            let next = if i + 2 == path.len() {
                target.clone()
            } else {
                Frame::intermediate(to, &source, &target)
            };
            let edge = self
                .graph
                .edge(from, to)
                .ok_or(TransformError::NoTransformPath { from, to })?;
            tracing::trace!(%from, %to, kind = %edge.kind(), frame = %next, "applying transform");

            current = match edge {
                Edge::Function(transform) => transform(self, &current, &next)?,
                Edge::Affine(transform) => {
                    let parts = transform(self, &current, &next)?;
                    next.realize(parts.apply(current.data())?)
                }
            };
        }
        Ok(current)
    }

    /// [`transform`](Transformer::transform)s every coordinate, stopping at the first failure.
    pub fn transform_many(&self, coordinates: &[Coordinate], target: &Frame) -> Result<Vec<Coordinate>> {
        coordinates
            .iter()
            .map(|coordinate| self.transform(coordinate, target))
            .collect()
    }
}
