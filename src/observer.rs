use crate::config::Tolerance;
use crate::error::{Result, TransformError};
use crate::time::ObsTime;
use crate::Transformer;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The label that is resolved to the Earth's location whenever an obstime is known.
pub const EARTH: &str = "earth";

/// A vantage point in heliographic Stonyhurst coordinates.
///
/// Longitude is unconstrained (it is compared and used as given); latitude is in [-90°, 90°] and
/// the radius is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObserverLocation {
    lon: Angle,
    lat: Angle,
    radius: Length,
}

impl ObserverLocation {
    /// Constructs a new observer location.
    ///
    /// Returns [`TransformError::InvalidObserver`] if the latitude is outside of [-90°, 90°] or
    /// the radius is not a finite, positive length.
    pub fn new(lon: impl Into<Angle>, lat: impl Into<Angle>, radius: impl Into<Length>) -> Result<Self> {
        let (lon, lat, radius) = (lon.into(), lat.into(), radius.into());
        if !lon.get::<radian>().is_finite() {
            return Err(TransformError::invalid_observer("longitude is not finite"));
        }
        // degree conversions may overshoot the pole by an ulp
        if !(lat.get::<radian>().abs() <= std::f64::consts::FRAC_PI_2 * (1. + f64::EPSILON)) {
            return Err(TransformError::invalid_observer(format!(
                "latitude {}° is outside of [-90°, 90°]",
                lat.get::<degree>()
            )));
        }
        let meters = radius.get::<meter>();
        if !meters.is_finite() || meters <= 0. {
            return Err(TransformError::invalid_observer(format!(
                "radius {meters} m is not a positive distance"
            )));
        }
        Ok(Self { lon, lat, radius })
    }

    #[must_use]
    pub fn lon(&self) -> Angle {
        self.lon
    }

    #[must_use]
    pub fn lat(&self) -> Angle {
        self.lat
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    fn is_close(&self, other: &Self, tolerance: &Tolerance) -> bool {
        tolerance.is_close(self.lat.get::<radian>(), other.lat.get::<radian>())
            && tolerance.is_close(self.lon.get::<radian>(), other.lon.get::<radian>())
            && tolerance.is_close(self.radius.get::<meter>(), other.radius.get::<meter>())
    }
}

impl Display for ObserverLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lon={:.6}°, lat={:.6}°, radius={:.3} m)",
            self.lon.get::<degree>(),
            self.lat.get::<degree>(),
            self.radius.get::<meter>()
        )
    }
}

/// The point a heliocentric or helioprojective frame is anchored to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Observer {
    Location(ObserverLocation),
    /// A named placeholder such as `"earth"`, not yet resolved to a location.
    Label(String),
}

impl Observer {
    #[must_use]
    pub fn label(name: impl Into<String>) -> Self {
        Observer::Label(name.into())
    }

    /// The Earth, as a label to be resolved against each frame's obstime.
    #[must_use]
    pub fn earth() -> Self {
        Observer::Label(EARTH.to_owned())
    }

    /// Resolves the Earth's location at `obstime` using the transformer's ephemeris.
    pub fn earth_at(transformer: &Transformer, obstime: ObsTime) -> Result<Self> {
        crate::sun::earth_location(transformer, obstime).map(Observer::Location)
    }

    #[must_use]
    pub fn location(&self) -> Option<&ObserverLocation> {
        match self {
            Observer::Location(location) => Some(location),
            Observer::Label(_) => None,
        }
    }

    pub(crate) fn require_location(&self) -> Result<&ObserverLocation> {
        match self {
            Observer::Location(location) => Ok(location),
            Observer::Label(label) => Err(TransformError::invalid_observer(format!(
                "observer must be a location, not the label {label:?}"
            ))),
        }
    }

    pub(crate) fn is_earth_label(&self) -> bool {
        matches!(self, Observer::Label(label) if label.eq_ignore_ascii_case(EARTH))
    }
}

impl From<ObserverLocation> for Observer {
    fn from(location: ObserverLocation) -> Self {
        Observer::Location(location)
    }
}

impl Display for Observer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Observer::Location(location) => location.fmt(f),
            Observer::Label(label) => f.write_str(label),
        }
    }
}

/// Checks whether two observers are the same vantage point.
///
/// With `label_ok`, two labels with the same text are considered equal. Any other comparison
/// involving a label fails with [`TransformError::StructuralTypeError`]. Locations are compared
/// component-wise (latitude, longitude, radius) in base units using `tolerance`.
pub fn observers_are_equal(
    a: &Observer,
    b: &Observer,
    label_ok: bool,
    tolerance: &Tolerance,
) -> Result<bool> {
    match (a, b) {
        (Observer::Label(a), Observer::Label(b)) if label_ok && a == b => Ok(true),
        (Observer::Location(a), Observer::Location(b)) => Ok(a.is_close(b, tolerance)),
        _ => Err(TransformError::StructuralTypeError {
            message: format!(
                "both observers must be heliographic Stonyhurst locations to be compared, got {a} and {b}"
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    fn at(lon: f64, lat: f64, radius: f64) -> Observer {
        Observer::Location(ObserverLocation::new(d(lon), d(lat), m(radius)).unwrap())
    }

    impl quickcheck::Arbitrary for ObserverLocation {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            // quickcheck will give us awkward f64 values -- we ignore those
            let mut normal = || loop {
                match f64::arbitrary(g) {
                    0. => break 0.,
                    f if f.is_normal() => break f,
                    _ => {}
                }
            };
            let (lon, lat, radius) = (normal(), normal(), normal());
            Self {
                lon: Angle::new::<radian>(lon.rem_euclid(std::f64::consts::TAU) - std::f64::consts::PI),
                lat: Angle::new::<radian>(
                    lat.rem_euclid(std::f64::consts::PI) - std::f64::consts::FRAC_PI_2,
                ),
                // somewhere between a few solar radii and beyond Jupiter
                radius: Length::new::<meter>(5e9 + radius.rem_euclid(1e12)),
            }
        }
    }

    #[rstest]
    #[case(d(0.), d(91.), m(1.))]
    #[case(d(0.), d(-90.5), m(1.))]
    #[case(d(0.), d(0.), m(0.))]
    #[case(d(0.), d(0.), m(-1.))]
    #[case(d(0.), d(0.), m(f64::INFINITY))]
    #[case(d(f64::NAN), d(0.), m(1.))]
    fn invalid_locations_are_rejected(#[case] lon: Angle, #[case] lat: Angle, #[case] radius: Length) {
        assert!(matches!(
            ObserverLocation::new(lon, lat, radius),
            Err(TransformError::InvalidObserver { .. })
        ));
    }

    #[rstest]
    #[case(at(10., 5., 1.5e11), at(10., 5., 1.5e11), true)]
    #[case(at(10., 5., 1.5e11), at(10., 5., 1.5e11 + 1e3), true)]
    #[case(at(10., 5., 1.5e11), at(10., 5., 1.6e11), false)]
    #[case(at(10., 5., 1.5e11), at(10.1, 5., 1.5e11), false)]
    #[case(at(10., 5., 1.5e11), at(10., -5., 1.5e11), false)]
    fn locations_compare_numerically(#[case] a: Observer, #[case] b: Observer, #[case] expected: bool) {
        assert_eq!(
            observers_are_equal(&a, &b, false, &Tolerance::default()),
            Ok(expected)
        );
    }

    #[test]
    fn equal_labels_are_equal_only_when_allowed() {
        let earth = Observer::earth();
        assert_eq!(
            observers_are_equal(&earth, &earth, true, &Tolerance::default()),
            Ok(true)
        );
        assert!(matches!(
            observers_are_equal(&earth, &earth, false, &Tolerance::default()),
            Err(TransformError::StructuralTypeError { .. })
        ));
    }

    #[test]
    fn labels_never_compare_to_locations() {
        let located = at(0., 0., 1.5e11);
        for label_ok in [true, false] {
            assert!(matches!(
                observers_are_equal(&Observer::earth(), &located, label_ok, &Tolerance::default()),
                Err(TransformError::StructuralTypeError { .. })
            ));
        }
        assert!(matches!(
            observers_are_equal(&Observer::earth(), &Observer::label("mars"), true, &Tolerance::default()),
            Err(TransformError::StructuralTypeError { .. })
        ));
    }

    #[test]
    fn labels_are_not_locations() {
        assert!(matches!(
            Observer::label("venus").require_location(),
            Err(TransformError::InvalidObserver { .. })
        ));
        assert!(Observer::label("Earth").is_earth_label());
        assert!(!Observer::label("venus").is_earth_label());
    }

    quickcheck::quickcheck! {
        fn observer_is_equal_to_itself(location: ObserverLocation) -> () {
            let observer = Observer::Location(location);
            assert_eq!(
                observers_are_equal(&observer, &observer, false, &Tolerance::default()),
                Ok(true)
            );
        }
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(at(-12.5, 7.25, 1.5e11), @"(lon=-12.500000°, lat=7.250000°, radius=150000000000.000 m)");
        insta::assert_snapshot!(Observer::earth(), @"earth");
    }
}
