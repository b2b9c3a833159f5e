use crate::config::SOLAR_RADIUS_METERS;
use crate::error::{Result, TransformError};
use crate::frames::{Frame, FrameKind};
use crate::representation::{Distance, Representation};
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position expressed in a particular solar [`Frame`].
///
/// Coordinates are immutable; transforming one through a [`Transformer`](crate::Transformer)
/// yields a new coordinate in the target frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    frame: Frame,
    data: Representation,
}

impl Coordinate {
    #[must_use]
    pub fn new(frame: Frame, data: Representation) -> Self {
        Self { frame, data }
    }

    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.frame.kind()
    }

    #[must_use]
    pub fn data(&self) -> &Representation {
        &self.data
    }

    #[must_use]
    pub fn into_parts(self) -> (Frame, Representation) {
        (self.frame, self.data)
    }

    /// Longitude, latitude and distance of this coordinate.
    ///
    /// In helioprojective frames these are Tx, Ty and the distance from the observer.
    #[must_use]
    pub fn spherical(&self) -> (Angle, Angle, Distance) {
        self.data.to_spherical()
    }

    /// The cartesian components of this coordinate.
    ///
    /// Fails with [`TransformError::InsufficientPosition`] if only a direction is known.
    pub fn cartesian(&self) -> Result<[Length; 3]> {
        let v = self.data.position_meters()?;
        Ok([v.x, v.y, v.z].map(Length::new::<meter>))
    }

    /// Places a distance-free helioprojective coordinate on the solar surface.
    ///
    /// The distance is where the line of sight from the observer first meets a sphere of radius
    /// `rsun` centered on the Sun, or of [`SOLAR_RADIUS_METERS`] if the frame has no `rsun`. Lines
    /// of sight that miss the Sun get a NaN distance. Coordinates that already have a physical
    /// distance are returned unchanged.
    ///
    /// Fails with [`TransformError::InvalidObserver`] unless this is a helioprojective coordinate
    /// with a geometric observer.
    pub fn calculate_distance(&self) -> Result<Coordinate> {
        self.calculate_distance_with(Length::new::<meter>(SOLAR_RADIUS_METERS))
    }

    /// As [`Coordinate::calculate_distance`], with `default_rsun` standing in for an unset `rsun`.
    pub(crate) fn calculate_distance_with(&self, default_rsun: Length) -> Result<Coordinate> {
        let Frame::Helioprojective {
            observer: Some(observer),
            rsun,
            ..
        } = &self.frame
        else {
            return Err(TransformError::invalid_observer(format!(
                "distances can only be calculated for helioprojective coordinates with a known observer, not {}",
                self.frame
            )));
        };
        let observer = observer.require_location()?;

        if !self.data.is_direction_only() {
            return Ok(self.clone());
        }

        let (tx, ty, _) = self.data.to_spherical();
        let (tx, ty) = (tx.get::<radian>(), ty.get::<radian>());
        let observer_distance = observer.radius().get::<meter>();
        let rsun = rsun.unwrap_or(default_rsun).get::<meter>();

        let cos_alpha = ty.cos() * tx.cos();
        let b = -2. * observer_distance * cos_alpha;
        let c = observer_distance * observer_distance - rsun * rsun;
        let distance = (-b - (b * b - 4. * c).sqrt()) / 2.;
        if distance.is_nan() {
            tracing::debug!(
                tx = tx.to_degrees(),
                ty = ty.to_degrees(),
                "line of sight misses the solar sphere"
            );
        }

        Ok(self.frame.realize(Representation::Spherical {
            lon: Angle::new::<radian>(tx),
            lat: Angle::new::<radian>(ty),
            distance: Distance::Physical(Length::new::<meter>(distance)),
        }))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.data, self.frame)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Coordinate {
    type Epsilon = <Representation as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Representation::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.frame == other.frame && self.data.abs_diff_eq(&other.data, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Coordinate {
    fn default_max_relative() -> Self::Epsilon {
        Representation::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.frame == other.frame && self.data.relative_eq(&other.data, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ASTRONOMICAL_UNIT_METERS, SOLAR_RADIUS_METERS};
    use crate::observer::{Observer, ObserverLocation};
    use approx::assert_relative_eq;
    use rstest::rstest;
    use uom::si::angle::{degree, second as arcsecond};

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    fn at_one_au() -> Frame {
        Frame::helioprojective(
            None,
            Observer::Location(
                ObserverLocation::new(d(0.), d(0.), Length::new::<meter>(ASTRONOMICAL_UNIT_METERS)).unwrap(),
            ),
        )
    }

    #[test]
    fn disk_center_is_one_solar_radius_closer_than_the_sun() {
        let coordinate = at_one_au().realize(Representation::unit_spherical(d(0.), d(0.)));
        let (_, _, distance) = coordinate.calculate_distance().unwrap().spherical();
        assert_relative_eq!(
            distance.physical().unwrap().get::<meter>(),
            ASTRONOMICAL_UNIT_METERS - SOLAR_RADIUS_METERS,
            max_relative = 1e-10
        );
    }

    #[rstest]
    #[case(0., 0.)]
    #[case(500., 300.)]
    #[case(-900., 100.)]
    fn on_disk_points_land_on_the_surface(#[case] tx: f64, #[case] ty: f64) {
        let coordinate = at_one_au().realize(Representation::unit_spherical(
            Angle::new::<arcsecond>(tx),
            Angle::new::<arcsecond>(ty),
        ));
        let resolved = coordinate.calculate_distance().unwrap();
        let (tx, ty, distance) = resolved.spherical();
        let distance = distance.physical().unwrap().get::<meter>();

        // the point is `distance` along the line of sight from the observer at (0, 0, D)
        let los = crate::representation::unit_vector(tx, ty);
        let from_sun = (
            distance * los.y,
            distance * los.z,
            ASTRONOMICAL_UNIT_METERS - distance * los.x,
        );
        let radius = (from_sun.0.powi(2) + from_sun.1.powi(2) + from_sun.2.powi(2)).sqrt();
        assert_relative_eq!(radius, SOLAR_RADIUS_METERS, max_relative = 1e-9);
    }

    #[test]
    fn off_disk_points_have_no_distance() {
        let coordinate = at_one_au().realize(Representation::unit_spherical(
            Angle::new::<arcsecond>(2000.),
            Angle::new::<arcsecond>(0.),
        ));
        let (_, _, distance) = coordinate.calculate_distance().unwrap().spherical();
        assert!(distance.physical().unwrap().get::<meter>().is_nan());
    }

    #[test]
    fn points_with_a_distance_are_unchanged() {
        let coordinate =
            at_one_au().realize(Representation::spherical(d(0.1), d(0.1), Length::new::<meter>(1e11)));
        assert_eq!(coordinate.calculate_distance().unwrap(), coordinate);
    }

    #[test]
    fn distance_needs_a_located_observer() {
        let labelled = Frame::helioprojective(None, Observer::earth())
            .realize(Representation::unit_spherical(d(0.), d(0.)));
        assert!(matches!(
            labelled.calculate_distance(),
            Err(TransformError::InvalidObserver { .. })
        ));

        let stonyhurst = Frame::stonyhurst(None).realize(Representation::unit_spherical(d(0.), d(0.)));
        assert!(matches!(
            stonyhurst.calculate_distance(),
            Err(TransformError::InvalidObserver { .. })
        ));
    }

    #[test]
    fn display() {
        let coordinate = Frame::stonyhurst(None).realize(Representation::unit_spherical(d(30.), d(-10.)));
        insta::assert_snapshot!(coordinate, @"(lon=30.000000°, lat=-10.000000°) in heliographic_stonyhurst(obstime=None)");
    }
}
