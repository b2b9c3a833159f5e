use crate::error::{Result, TransformError};
use crate::{Matrix3, Vector3};
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use crate::util::BoundedAngle;
#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The radial component of a spherical position.
///
/// Points that were only ever given a direction report a dimensionless distance of exactly one
/// when viewed spherically, which is what lets transforms tell "on the unit sphere" apart from
/// "one meter away".
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distance {
    Physical(Length),
    Dimensionless(f64),
}

impl Distance {
    /// Returns the distance if it carries physical units.
    #[must_use]
    pub fn physical(&self) -> Option<Length> {
        match *self {
            Distance::Physical(length) => Some(length),
            Distance::Dimensionless(_) => None,
        }
    }
}

impl From<Length> for Distance {
    fn from(length: Length) -> Self {
        Distance::Physical(length)
    }
}

/// The form in which a position is expressed, independent of which frame it is in.
///
/// Longitude is measured in the XY plane from +X towards +Y; latitude is measured from the XY
/// plane towards +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Representation {
    Cartesian {
        x: Length,
        y: Length,
        z: Length,
    },
    Spherical {
        lon: Angle,
        lat: Angle,
        distance: Distance,
    },
    /// A direction without a distance.
    UnitSpherical { lon: Angle, lat: Angle },
}

impl Representation {
    #[must_use]
    pub fn cartesian(x: impl Into<Length>, y: impl Into<Length>, z: impl Into<Length>) -> Self {
        Representation::Cartesian {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    #[must_use]
    pub fn spherical(lon: impl Into<Angle>, lat: impl Into<Angle>, distance: impl Into<Length>) -> Self {
        Representation::Spherical {
            lon: lon.into(),
            lat: lat.into(),
            distance: Distance::Physical(distance.into()),
        }
    }

    #[must_use]
    pub fn unit_spherical(lon: impl Into<Angle>, lat: impl Into<Angle>) -> Self {
        Representation::UnitSpherical {
            lon: lon.into(),
            lat: lat.into(),
        }
    }

    pub(crate) fn from_meters(v: Vector3) -> Self {
        Representation::Cartesian {
            x: Length::new::<meter>(v.x),
            y: Length::new::<meter>(v.y),
            z: Length::new::<meter>(v.z),
        }
    }

    /// Views this position spherically.
    ///
    /// Directions report a [`Distance::Dimensionless`] of one.
    #[must_use]
    pub fn to_spherical(&self) -> (Angle, Angle, Distance) {
        match *self {
            Representation::Cartesian { x, y, z } => {
                let v = meters(x, y, z);
                let lon = v.y.atan2(v.x);
                let lat = v.z.atan2(v.x.hypot(v.y));
                (
                    Angle::new::<radian>(lon),
                    Angle::new::<radian>(lat),
                    Distance::Physical(Length::new::<meter>(v.norm())),
                )
            }
            Representation::Spherical { lon, lat, distance } => (lon, lat, distance),
            Representation::UnitSpherical { lon, lat } => (lon, lat, Distance::Dimensionless(1.)),
        }
    }

    /// Returns `true` if this position has no physical distance along its direction.
    #[must_use]
    pub fn is_direction_only(&self) -> bool {
        matches!(
            self,
            Representation::UnitSpherical { .. }
                | Representation::Spherical {
                    distance: Distance::Dimensionless(_),
                    ..
                }
        )
    }

    /// The cartesian position in meters.
    ///
    /// Fails for positions that only have a direction.
    pub(crate) fn position_meters(&self) -> Result<Vector3> {
        match *self {
            Representation::Cartesian { x, y, z } => Ok(meters(x, y, z)),
            Representation::Spherical {
                lon,
                lat,
                distance: Distance::Physical(distance),
            } => Ok(unit_vector(lon, lat) * distance.get::<meter>()),
            Representation::Spherical {
                distance: Distance::Dimensionless(value),
                ..
            } => Err(TransformError::DimensionlessDistance { value }),
            Representation::UnitSpherical { .. } => Err(TransformError::InsufficientPosition),
        }
    }

    /// The unit vector pointing along this position.
    pub(crate) fn direction(&self) -> Vector3 {
        match *self {
            Representation::Cartesian { x, y, z } => meters(x, y, z).normalize(),
            Representation::Spherical { lon, lat, .. } | Representation::UnitSpherical { lon, lat } => {
                unit_vector(lon, lat)
            }
        }
    }

    /// Re-expresses a cartesian position (in meters) in the same form as `self`.
    pub(crate) fn like(&self, v: Vector3) -> Self {
        let cartesian = Self::from_meters(v);
        match self {
            Representation::Cartesian { .. } => cartesian,
            Representation::Spherical { .. } | Representation::UnitSpherical { .. } => {
                let (lon, lat, distance) = cartesian.to_spherical();
                Representation::Spherical { lon, lat, distance }
            }
        }
    }

    /// Rotates a direction-only position, keeping its dimensionless distance (if any).
    pub(crate) fn rotate_direction(&self, matrix: &Matrix3) -> Self {
        let rotated = matrix * self.direction();
        let lon = Angle::new::<radian>(rotated.y.atan2(rotated.x));
        let lat = Angle::new::<radian>(rotated.z.atan2(rotated.x.hypot(rotated.y)));
        match *self {
            Representation::Spherical { distance, .. } => Representation::Spherical { lon, lat, distance },
            _ => Representation::UnitSpherical { lon, lat },
        }
    }
}

fn meters(x: Length, y: Length, z: Length) -> Vector3 {
    Vector3::new(x.get::<meter>(), y.get::<meter>(), z.get::<meter>())
}

pub(crate) fn unit_vector(lon: Angle, lat: Angle) -> Vector3 {
    let (lon, lat) = (lon.get::<radian>(), lat.get::<radian>());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

impl Display for Representation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Representation::Cartesian { x, y, z } => write!(
                f,
                "(x={:.3} m, y={:.3} m, z={:.3} m)",
                x.get::<meter>(),
                y.get::<meter>(),
                z.get::<meter>()
            ),
            Representation::Spherical { lon, lat, distance } => {
                write!(
                    f,
                    "(lon={:.6}°, lat={:.6}°, ",
                    lon.get::<degree>(),
                    lat.get::<degree>()
                )?;
                match distance {
                    Distance::Physical(d) => write!(f, "distance={:.3} m)", d.get::<meter>()),
                    Distance::Dimensionless(d) => write!(f, "distance={d})"),
                }
            }
            Representation::UnitSpherical { lon, lat } => write!(
                f,
                "(lon={:.6}°, lat={:.6}°)",
                lon.get::<degree>(),
                lat.get::<degree>()
            ),
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Representation {
    /// In base units; radians for angles and meters for lengths.
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        // NOTE: a millimeter on the solar surface is about 1e-12 radians, so this is lenient for
        // lengths and strict for angles.
        1e-9
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.relative_eq(other, epsilon, 0.)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Representation {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        let length_eq = |a: Length, b: Length| {
            f64::relative_eq(&a.get::<meter>(), &b.get::<meter>(), epsilon, max_relative)
        };
        let lon_eq = |a: Angle, b: Angle| BoundedAngle::new(a).abs_diff_eq(&BoundedAngle::new(b), epsilon);
        let lat_eq = |a: Angle, b: Angle| {
            f64::relative_eq(&a.get::<radian>(), &b.get::<radian>(), epsilon, max_relative)
        };

        match (*self, *other) {
            (
                Representation::Cartesian { x, y, z },
                Representation::Cartesian {
                    x: ox,
                    y: oy,
                    z: oz,
                },
            ) => length_eq(x, ox) && length_eq(y, oy) && length_eq(z, oz),
            (
                Representation::Spherical { lon, lat, distance },
                Representation::Spherical {
                    lon: olon,
                    lat: olat,
                    distance: odistance,
                },
            ) => {
                let distance_eq = match (distance, odistance) {
                    (Distance::Physical(a), Distance::Physical(b)) => length_eq(a, b),
                    (Distance::Dimensionless(a), Distance::Dimensionless(b)) => {
                        f64::relative_eq(&a, &b, epsilon, max_relative)
                    }
                    _ => false,
                };
                lon_eq(lon, olon) && lat_eq(lat, olat) && distance_eq
            }
            (
                Representation::UnitSpherical { lon, lat },
                Representation::UnitSpherical { lon: olon, lat: olat },
            ) => lon_eq(lon, olon) && lat_eq(lat, olat),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[rstest]
    #[case(Representation::cartesian(m(1.), m(0.), m(0.)), 0., 0.)]
    #[case(Representation::cartesian(m(0.), m(2.), m(0.)), 90., 0.)]
    #[case(Representation::cartesian(m(0.), m(0.), m(3.)), 0., 90.)]
    #[case(Representation::cartesian(m(-1.), m(0.), m(-1.)), 180., -45.)]
    fn cartesian_to_spherical_angles(
        #[case] repr: Representation,
        #[case] lon_degrees: f64,
        #[case] lat_degrees: f64,
    ) {
        let (lon, lat, _) = repr.to_spherical();
        assert_relative_eq!(lon.get::<degree>(), lon_degrees, epsilon = 1e-12);
        assert_relative_eq!(lat.get::<degree>(), lat_degrees, epsilon = 1e-12);
    }

    #[test]
    fn spherical_position_matches_cartesian() {
        let spherical = Representation::spherical(d(30.), d(45.), m(2.));
        let v = spherical.position_meters().unwrap();
        let expected = Representation::cartesian(
            m(2. * 45f64.to_radians().cos() * 30f64.to_radians().cos()),
            m(2. * 45f64.to_radians().cos() * 30f64.to_radians().sin()),
            m(2. * 45f64.to_radians().sin()),
        );
        assert_relative_eq!(Representation::from_meters(v), expected, epsilon = 1e-12);
    }

    #[test]
    fn directions_have_no_position() {
        let unit = Representation::unit_spherical(d(10.), d(20.));
        assert!(unit.is_direction_only());
        assert_eq!(unit.position_meters(), Err(TransformError::InsufficientPosition));

        let (_, _, distance) = unit.to_spherical();
        assert_eq!(distance, Distance::Dimensionless(1.));
    }

    #[test]
    fn dimensionless_distance_is_not_a_position() {
        let repr = Representation::Spherical {
            lon: d(0.),
            lat: d(0.),
            distance: Distance::Dimensionless(2.),
        };
        assert_eq!(
            repr.position_meters(),
            Err(TransformError::DimensionlessDistance { value: 2. })
        );
    }

    #[test]
    fn like_keeps_the_form() {
        let v = Vector3::new(0., 5., 0.);
        let spherical = Representation::spherical(d(0.), d(0.), m(1.)).like(v);
        assert_relative_eq!(spherical, Representation::spherical(d(90.), d(0.), m(5.)), epsilon = 1e-12);

        let cartesian = Representation::cartesian(m(1.), m(0.), m(0.)).like(v);
        assert_eq!(cartesian, Representation::cartesian(m(0.), m(5.), m(0.)));
    }

    #[test]
    fn rotating_a_direction_keeps_it_a_direction() {
        let quarter_turn_about_z = Matrix3::new(0., -1., 0., 1., 0., 0., 0., 0., 1.);
        let unit = Representation::unit_spherical(d(10.), d(20.));
        assert_relative_eq!(
            unit.rotate_direction(&quarter_turn_about_z),
            Representation::unit_spherical(d(100.), d(20.)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(
            Representation::spherical(d(12.5), d(-3.25), m(1000.)),
            @"(lon=12.500000°, lat=-3.250000°, distance=1000.000 m)"
        );
        insta::assert_snapshot!(
            Representation::cartesian(m(1.), m(2.5), m(-3.)),
            @"(x=1.000 m, y=2.500 m, z=-3.000 m)"
        );
    }
}
