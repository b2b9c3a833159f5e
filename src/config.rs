//! Tunable physical constants and numerical tolerances.
//!
//! Everything here has a sensible default, so most users never construct a [`TransformConfig`]
//! by hand. With the `serde` feature, a config can be deserialized from any self-describing
//! format; missing fields fall back to their defaults. Quantities are given in SI base units
//! (metres, radians).

use uom::si::angle::degree;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radius of the solar photosphere, as tabulated by Allen.
pub const SOLAR_RADIUS_METERS: f64 = 6.955_08e8;

/// One astronomical unit (IAU 2012 Resolution B2).
pub const ASTRONOMICAL_UNIT_METERS: f64 = 1.495_978_707e11;

/// Speed of light in vacuum.
pub const SPEED_OF_LIGHT_METERS_PER_SECOND: f64 = 299_792_458.0;

/// Right ascension of the solar north pole in ICRS (Archinal et al. 2011).
pub const SOLAR_NORTH_POLE_RA_DEGREES: f64 = 286.13;

/// Declination of the solar north pole in ICRS (Archinal et al. 2011).
pub const SOLAR_NORTH_POLE_DEC_DEGREES: f64 = 63.87;

/// Physical constants that the solar frames are defined in terms of.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolarConstants {
    /// Radius of the Sun. Used for resolving points onto the solar surface.
    pub radius: Length,
    /// Angle W₀ of the solar prime meridian east of the ascending node of the solar equator on
    /// the ICRF equator, at J2000.0.
    pub prime_meridian_at_j2000: Angle,
    /// Carrington sidereal rotation rate of the Sun, in degrees per day.
    pub sidereal_rotation_rate_deg_per_day: f64,
}

impl Default for SolarConstants {
    fn default() -> Self {
        Self {
            radius: Length::new::<meter>(SOLAR_RADIUS_METERS),
            prime_meridian_at_j2000: Angle::new::<degree>(84.176),
            sidereal_rotation_rate_deg_per_day: 14.1844,
        }
    }
}

/// Closeness test used when deciding whether two observers are the same vantage point.
///
/// Two base-unit values `a` and `b` are close if `|a - b| <= absolute + relative * |b|`.
///
/// Both bounds apply in base units, so `absolute` is in radians for longitudes and latitudes and
/// in metres for radii. A degree-based `absolute` must be converted before it is set here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    #[must_use]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-8,
        }
    }
}

/// Configuration of a [`Transformer`](crate::Transformer).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    pub constants: SolarConstants,
    pub tolerance: Tolerance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, 1.0, true)]
    #[case(1.0, 1.0 + 1e-6, true)]
    #[case(1.0, 1.0 + 1e-4, false)]
    #[case(0.0, 1e-9, true)]
    #[case(0.0, 1e-7, false)]
    #[case(1.5e11, 1.5e11 + 1e5, true)]
    fn tolerance_is_close(#[case] a: f64, #[case] b: f64, #[case] expected: bool) {
        assert_eq!(Tolerance::default().is_close(a, b), expected);
    }

    #[test]
    fn absolute_tolerance_is_in_radians_for_angles() {
        let tolerance = Tolerance::default();
        // 1e-7 degrees is well inside 1e-8 once in radians
        assert!(tolerance.is_close(0., 1e-7f64.to_radians()));
        assert!(!tolerance.is_close(0., 1e-7));
    }

    #[test]
    fn default_solar_radius() {
        assert_eq!(
            TransformConfig::default().constants.radius.get::<meter>(),
            SOLAR_RADIUS_METERS
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: TransformConfig = serde_yaml::from_str(
            "
constants:
  radius: 696000000.0
tolerance:
  relative: 1.0e-9
",
        )
        .unwrap();

        assert_eq!(config.constants.radius.get::<meter>(), 696_000_000.0);
        assert_eq!(
            config.constants.sidereal_rotation_rate_deg_per_day,
            SolarConstants::default().sidereal_rotation_rate_deg_per_day
        );
        assert_eq!(config.tolerance.relative, 1e-9);
        assert_eq!(config.tolerance.absolute, Tolerance::default().absolute);
    }
}
