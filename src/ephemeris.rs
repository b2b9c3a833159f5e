//! Barycentric positions of the bodies the solar frames are defined relative to.
//!
//! Transforms only ever need two things from an ephemeris: where the Sun is (to move the origin
//! between [ICRS](crate::Frame::Icrs) and the heliocentric frames) and where the Earth is (to
//! orient the Stonyhurst axes). The [`Ephemeris`] trait captures exactly that, and
//! [`LowPrecisionEphemeris`] is an analytic implementation that needs no data files.

use crate::config::ASTRONOMICAL_UNIT_METERS;
use crate::error::Result;
use crate::time::ObsTime;
use crate::Vector3;
use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Obliquity of the ecliptic at J2000.0 (IAU 2006).
const OBLIQUITY_J2000_DEGREES: f64 = 23.439_279_1;

/// General precession in longitude, in degrees per Julian century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971_3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Earth,
}

/// A source of barycentric body positions.
pub trait Ephemeris: Debug + Send + Sync {
    /// Returns the position of `body` relative to the solar system barycenter, along the ICRS
    /// axes, in meters.
    fn barycentric_position(&self, body: Body, time: &ObsTime) -> Result<Vector3>;
}

/// An analytic ephemeris good to about an arc-minute.
///
/// The Earth follows the low-accuracy solar theory from Meeus' *Astronomical Algorithms*
/// (chapter 25), referred to the J2000 ecliptic. The Sun's wobble about the barycenter is modelled
/// from circular orbits of Jupiter and Saturn, which account for nearly all of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

/// A planet on a circular orbit in the ecliptic.
struct CircularOrbit {
    longitude_at_j2000_deg: f64,
    rate_deg_per_century: f64,
    semi_major_axis_au: f64,
    /// Mass relative to the Sun.
    mass_ratio: f64,
}

const JUPITER: CircularOrbit = CircularOrbit {
    longitude_at_j2000_deg: 34.396_44,
    rate_deg_per_century: 3_034.746_127_75,
    semi_major_axis_au: 5.202_6,
    mass_ratio: 1. / 1_047.348_6,
};

const SATURN: CircularOrbit = CircularOrbit {
    longitude_at_j2000_deg: 49.954_24,
    rate_deg_per_century: 1_222.493_622_01,
    semi_major_axis_au: 9.554_9,
    mass_ratio: 1. / 3_497.898,
};

impl CircularOrbit {
    /// Heliocentric ecliptic position in AU.
    fn position(&self, t: f64) -> Vector3 {
        let longitude = (self.longitude_at_j2000_deg + self.rate_deg_per_century * t).to_radians();
        Vector3::new(longitude.cos(), longitude.sin(), 0.) * self.semi_major_axis_au
    }
}

impl LowPrecisionEphemeris {
    /// Heliocentric position of the Earth in ecliptic J2000 coordinates, in AU.
    fn earth_heliocentric_ecliptic(t: f64) -> Vector3 {
        let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
        let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
        let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

        let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
            + (0.019_993 - 0.000_101 * t) * (2. * mean_anomaly).sin()
            + 0.000_289 * (3. * mean_anomaly).sin();
        let true_anomaly = mean_anomaly + center.to_radians();
        let radius = 1.000_001_018 * (1. - eccentricity * eccentricity)
            / (1. + eccentricity * true_anomaly.cos());

        // the geometric longitude of the Sun is referred to the equinox of date; the Earth is on
        // the opposite side, and precession takes us back to the J2000 equinox
        let longitude =
            (mean_longitude + center + 180. - PRECESSION_DEG_PER_CENTURY * t).to_radians();
        Vector3::new(longitude.cos(), longitude.sin(), 0.) * radius
    }

    fn sun_barycentric_ecliptic(t: f64) -> Vector3 {
        [JUPITER, SATURN]
            .iter()
            .map(|planet| -planet.position(t) * (planet.mass_ratio / (1. + planet.mass_ratio)))
            .sum()
    }
}

/// Rotates from the J2000 ecliptic onto the ICRS equator and scales AU to meters.
fn ecliptic_to_icrs_meters(v: Vector3) -> Vector3 {
    let (sin_eps, cos_eps) = OBLIQUITY_J2000_DEGREES.to_radians().sin_cos();
    Vector3::new(
        v.x,
        v.y * cos_eps - v.z * sin_eps,
        v.y * sin_eps + v.z * cos_eps,
    ) * ASTRONOMICAL_UNIT_METERS
}

impl Ephemeris for LowPrecisionEphemeris {
    fn barycentric_position(&self, body: Body, time: &ObsTime) -> Result<Vector3> {
        let t = time.centuries_since_j2000();
        let sun = Self::sun_barycentric_ecliptic(t);
        let ecliptic = match body {
            Body::Sun => sun,
            Body::Earth => sun + Self::earth_heliocentric_ecliptic(t),
        };
        Ok(ecliptic_to_icrs_meters(ecliptic))
    }
}
