use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a frame cuts its longitude axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WrapAt {
    /// Longitudes in [-180°, 180°), as in Stonyhurst and helioprojective frames.
    HalfTurn,
    /// Longitudes in [0°, 360°), as in Carrington frames.
    FullTurn,
}

/// An angle that compares equal to itself modulo a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundedAngle {
    angle: Angle,
}

impl BoundedAngle {
    pub fn new(angle: impl Into<Angle>) -> Self {
        Self {
            // NOTE: even though we put the value into bounds here, uom may choose to store
            // the value differently-normalized, so we must normalize on output as well.
            angle: Angle::new::<radian>(Self::into_bounds(angle.into())),
        }
    }

    /// Returns the angle in [0°, 360°) in radians.
    #[must_use]
    pub fn get_bounded(self) -> f64 {
        Self::into_bounds(self.angle)
    }

    fn into_bounds(angle: Angle) -> f64 {
        let out_of_bounds: f64 = angle.get::<radian>();
        out_of_bounds.rem_euclid(Angle::FULL_TURN.get::<radian>())
    }

    /// Returns the angle in [-180°, 180°) in radians.
    #[must_use]
    pub fn to_signed_range(self) -> f64 {
        let angle = self.get_bounded();
        if angle < Angle::HALF_TURN.get::<radian>() {
            angle
        } else {
            angle - Angle::FULL_TURN.get::<radian>()
        }
    }

    pub(crate) fn wrapped(self, at: WrapAt) -> Angle {
        match at {
            WrapAt::HalfTurn => Angle::new::<radian>(self.to_signed_range()),
            WrapAt::FullTurn => Angle::new::<radian>(self.get_bounded()),
        }
    }
}

/// Every value that can be converted into an [`Angle`] can be converted into [`BoundedAngle`].
impl<U: Into<Angle>> From<U> for BoundedAngle {
    fn from(value: U) -> Self {
        BoundedAngle::new(value)
    }
}

/// Puts a freshly computed longitude into the range the destination frame uses.
pub(crate) fn wrap_longitude(longitude: Angle, at: WrapAt) -> Angle {
    BoundedAngle::new(longitude).wrapped(at)
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for BoundedAngle {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        let bounded = self.get_bounded();
        let other_bounded = other.get_bounded();

        let min = f64::min(bounded, other_bounded);
        let max = f64::max(bounded, other_bounded);

        f64::relative_eq(&min, &max, epsilon, max_relative)
            || f64::relative_eq(
                &(min + Angle::FULL_TURN.get::<radian>()),
                &max,
                epsilon,
                max_relative,
            )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for BoundedAngle {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        // this is very accurate in radians
        0.000_000_001
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Self::new(self.angle - other.angle).to_signed_range().abs() <= epsilon
    }
}
