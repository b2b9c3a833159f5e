//! Orientation of the Sun: its rotation axis, its prime meridian, and where the Earth sits
//! relative to both.

use crate::config::{
    SOLAR_NORTH_POLE_DEC_DEGREES, SOLAR_NORTH_POLE_RA_DEGREES, SPEED_OF_LIGHT_METERS_PER_SECOND,
};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::{Result, TransformError};
use crate::frames::FrameKind;
use crate::observer::ObserverLocation;
use crate::representation::unit_vector;
use crate::time::ObsTime;
use crate::util::{wrap_longitude, WrapAt};
use crate::{Matrix3, Transformer, Vector3};
use lazy_static::lazy_static;
use nalgebra::{Rotation3, Unit};
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

lazy_static! {
    /// Unit vector along the solar rotation axis, in ICRS axes.
    static ref SOLAR_NORTH_POLE: Vector3 = unit_vector(
        Angle::new::<degree>(SOLAR_NORTH_POLE_RA_DEGREES),
        Angle::new::<degree>(SOLAR_NORTH_POLE_DEC_DEGREES),
    );

    /// Rotates ICRS axes so that the solar north pole lies along +Z.
    static ref SUN_DETILT: Matrix3 = rotation_between(&SOLAR_NORTH_POLE, &Vector3::z());

    /// De-tilted longitude of the ascending node of the solar equator on the ICRF equator, in
    /// radians. The prime meridian is measured from here.
    static ref NODE_DETILT_LONGITUDE: f64 = detilt_longitude(&unit_vector(
        Angle::new::<degree>(SOLAR_NORTH_POLE_RA_DEGREES + 90.),
        Angle::new::<degree>(0.),
    ));
}

/// The rotation matrix that takes the direction of `from` onto the direction of `to`.
///
/// Antiparallel vectors are related by a half turn about an axis perpendicular to `from`; for
/// vectors in the XY plane that axis is Z, so the XY plane maps onto itself.
pub(crate) fn rotation_between(from: &Vector3, to: &Vector3) -> Matrix3 {
    if let Some(rotation) = Rotation3::rotation_between(from, to) {
        return rotation.into_inner();
    }
    let axis = if from.z.abs() <= f64::EPSILON * from.norm() {
        Vector3::z_axis()
    } else {
        Unit::new_normalize(from.cross(&Vector3::x()))
    };
    Rotation3::from_axis_angle(&axis, std::f64::consts::PI).into_inner()
}

fn detilt_longitude(v: &Vector3) -> f64 {
    let detilted = *SUN_DETILT * v;
    detilted.y.atan2(detilted.x)
}

/// The vector from the center of the Sun to the center of the Earth, in ICRS axes and meters.
pub(crate) fn sun_to_earth(ephemeris: &dyn Ephemeris, obstime: &ObsTime) -> Result<Vector3> {
    Ok(ephemeris.barycentric_position(Body::Earth, obstime)?
        - ephemeris.barycentric_position(Body::Sun, obstime)?)
}

/// The rotation from HCRS axes to heliographic Stonyhurst axes at `obstime`.
///
/// Z is the solar rotation axis, and X is the projection of the Sun-Earth line onto the solar
/// equator.
pub(crate) fn stonyhurst_axes(ephemeris: &dyn Ephemeris, obstime: &ObsTime) -> Result<Matrix3> {
    let mut earth = *SUN_DETILT * sun_to_earth(ephemeris, obstime)?;
    earth.z = 0.;
    Ok(rotation_between(&earth, &Vector3::x()) * *SUN_DETILT)
}

/// The Earth's location in heliographic Stonyhurst coordinates.
///
/// By construction its longitude is zero; its latitude is B0.
pub(crate) fn earth_location(transformer: &Transformer, obstime: ObsTime) -> Result<ObserverLocation> {
    let ephemeris = transformer.ephemeris();
    let earth = stonyhurst_axes(ephemeris, &obstime)? * sun_to_earth(ephemeris, &obstime)?;
    ObserverLocation::new(
        Angle::new::<radian>(earth.y.atan2(earth.x)),
        Angle::new::<radian>(earth.z.atan2(earth.x.hypot(earth.y))),
        Length::new::<meter>(earth.norm()),
    )
}

/// The heliographic latitude of the Earth, B0, at `obstime`.
pub fn b0(transformer: &Transformer, obstime: ObsTime) -> Result<Angle> {
    earth_location(transformer, obstime).map(|earth| earth.lat())
}

/// The Carrington longitude of the Sun-Earth line, L0, at `obstime`, in [0°, 360°).
///
/// This is the amount by which Carrington longitudes lead Stonyhurst longitudes. The solar prime
/// meridian is evaluated at the time light left the Sun to arrive at the Earth at `obstime`.
pub fn carrington_offset(transformer: &Transformer, obstime: Option<&ObsTime>) -> Result<Angle> {
    let obstime =
        obstime.ok_or_else(|| TransformError::missing(FrameKind::HeliographicCarrington, "obstime"))?;
    let constants = &transformer.config().constants;

    let earth = sun_to_earth(transformer.ephemeris(), obstime)?;
    let earth_longitude = detilt_longitude(&earth);

    let light_travel_seconds = earth.norm() / SPEED_OF_LIGHT_METERS_PER_SECOND;
    let emitted = obstime.offset_by_seconds(-light_travel_seconds);
    let meridian_longitude = *NODE_DETILT_LONGITUDE
        + constants.prime_meridian_at_j2000.get::<radian>()
        + (constants.sidereal_rotation_rate_deg_per_day * emitted.days_since_j2000()).to_radians();

    Ok(wrap_longitude(
        Angle::new::<radian>(earth_longitude - meridian_longitude),
        WrapAt::FullTurn,
    ))
}

/// [`carrington_offset`] for each of `obstimes`.
pub fn carrington_offsets(transformer: &Transformer, obstimes: &[ObsTime]) -> Result<Vec<Angle>> {
    obstimes
        .iter()
        .map(|obstime| carrington_offset(transformer, Some(obstime)))
        .collect()
}
