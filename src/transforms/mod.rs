//! The pairwise transforms between solar frames.
//!
//! Every function here has one of two shapes: a [function transform](crate::Edge::Function)
//! that computes the destination coordinate directly, or an [affine
//! transform](crate::Edge::Affine) that returns the [`AffineParts`] to apply to the source's
//! cartesian position. They are meant to be registered in a [`TransformGraph`](crate::TransformGraph)
//! and called by a [`Transformer`](crate::Transformer), which takes care of composing them into
//! paths and building the intermediate frames.
//!
//! Transforms that need to pass through other frames (eg, between two helioprojective frames with
//! different observers) call back into the transformer for their inner hops.

use crate::error::{Result, TransformError};
use crate::representation::Representation;
use crate::{Matrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod heliocentric;
mod heliographic;
mod inertial;

pub use heliocentric::{hcc_to_hcc, hcc_to_hgs, hcc_to_hpc, hgs_to_hcc, hpc_to_hcc, hpc_to_hpc};
pub use heliographic::{hgc_to_hgc, hgc_to_hgs, hgs_to_hgc, hgs_to_hgs};
pub use inertial::{hcrs_to_hgs, hcrs_to_hgs_many, hcrs_to_icrs, hgs_to_hcrs, icrs_to_hcrs};

/// A rotation followed by a translation, `dest = matrix * src + offset`.
///
/// The offset is in meters, in the destination's axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineParts {
    matrix: Matrix3,
    offset: Vector3,
}

impl AffineParts {
    #[must_use]
    pub fn new(matrix: Matrix3, offset: Vector3) -> Self {
        Self { matrix, offset }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// The translation, in meters.
    #[must_use]
    pub fn offset(&self) -> &Vector3 {
        &self.offset
    }

    /// The transform that undoes this one, assuming the matrix is orthonormal.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let matrix = self.matrix.transpose();
        Self::new(matrix, -(matrix * self.offset))
    }

    /// Applies the transform to `data`, keeping its representation.
    ///
    /// Points with only a direction can be rotated, but not translated.
    pub fn apply(&self, data: &Representation) -> Result<Representation> {
        if data.is_direction_only() {
            if self.offset != Vector3::zeros() {
                return Err(TransformError::InsufficientPosition);
            }
            return Ok(data.rotate_direction(&self.matrix));
        }
        let position = data.position_meters()?;
        Ok(data.like(self.matrix * position + self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::angle::degree;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    fn quarter_turn_and_shift() -> AffineParts {
        AffineParts::new(
            Matrix3::new(0., -1., 0., 1., 0., 0., 0., 0., 1.),
            Vector3::new(1., 2., 3.),
        )
    }

    #[test]
    fn inverse_undoes_the_transform() {
        let parts = quarter_turn_and_shift();
        let point = Representation::cartesian(m(4.), m(-5.), m(6.));
        let there = parts.apply(&point).unwrap();
        assert_relative_eq!(parts.inverse().apply(&there).unwrap(), point, epsilon = 1e-12);
    }

    #[test]
    fn apply_keeps_the_representation() {
        let there = quarter_turn_and_shift()
            .apply(&Representation::spherical(d(0.), d(0.), m(1.)))
            .unwrap();
        assert!(matches!(there, Representation::Spherical { .. }));
        let (_, _, distance) = there.to_spherical();
        assert_relative_eq!(
            distance.physical().unwrap().get::<meter>(),
            Vector3::new(1., 3., 3.).norm(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn directions_rotate_without_an_offset() {
        let rotation = AffineParts::new(*quarter_turn_and_shift().matrix(), Vector3::zeros());
        assert_relative_eq!(
            rotation.apply(&Representation::unit_spherical(d(10.), d(20.))).unwrap(),
            Representation::unit_spherical(d(100.), d(20.)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn directions_cannot_be_translated() {
        assert_eq!(
            quarter_turn_and_shift().apply(&Representation::unit_spherical(d(10.), d(20.))),
            Err(TransformError::InsufficientPosition)
        );
    }
}
