use crate::coordinate::Coordinate;
use crate::error::{Result, TransformError};
use crate::frames::Frame;
use crate::representation::Representation;
use crate::sun::carrington_offset;
use crate::time::ObsTime;
use crate::util::{wrap_longitude, WrapAt};
use crate::Transformer;
use uom::si::f64::Angle;

/// Turns every longitude in `data` by `by`, keeping latitude and distance.
fn turn_longitude(data: &Representation, by: Angle, at: WrapAt) -> Representation {
    match *data {
        Representation::UnitSpherical { lon, lat } => Representation::UnitSpherical {
            lon: wrap_longitude(lon + by, at),
            lat,
        },
        _ => {
            let (lon, lat, distance) = data.to_spherical();
            Representation::Spherical {
                lon: wrap_longitude(lon + by, at),
                lat,
                distance,
            }
        }
    }
}

/// The obstime shared by both sides of a Stonyhurst/Carrington conversion.
fn matching_obstime(coordinate: &Coordinate, target: &Frame) -> Result<ObsTime> {
    let to = target.require_obstime()?;
    let from = coordinate.frame().require_obstime()?;
    if from != to {
        return Err(TransformError::mismatched(target.kind(), "obstime"));
    }
    Ok(to)
}

/// Heliographic Stonyhurst to heliographic Carrington.
///
/// Both frames must have the same obstime.
pub fn hgs_to_hgc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let obstime = matching_obstime(coordinate, target)?;
    let offset = carrington_offset(transformer, Some(&obstime))?;
    Ok(target.realize(turn_longitude(coordinate.data(), offset, WrapAt::FullTurn)))
}

/// Heliographic Carrington to heliographic Stonyhurst.
///
/// Both frames must have the same obstime.
pub fn hgc_to_hgs(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let obstime = matching_obstime(coordinate, target)?;
    let offset = carrington_offset(transformer, Some(&obstime))?;
    Ok(target.realize(turn_longitude(coordinate.data(), -offset, WrapAt::HalfTurn)))
}

/// Between two heliographic Stonyhurst frames.
///
/// Frames at different obstimes are related through HCRS at the source obstime, which accounts
/// for the motion of both the Sun and the Earth in between.
pub fn hgs_to_hgs(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let from = coordinate.frame().obstime();
    if from == target.obstime() {
        return Ok(target.realize(*coordinate.data()));
    }
    tracing::debug!(from = ?from, to = ?target.obstime(), "stonyhurst obstimes differ, going through hcrs");
    let inertial = Frame::hcrs(from.unwrap_or_else(ObsTime::j2000));
    let inertial = transformer.transform(coordinate, &inertial)?;
    transformer.transform(&inertial, target)
}

/// Between two heliographic Carrington frames.
///
/// Frames at different obstimes are related through Stonyhurst frames at each of the obstimes.
pub fn hgc_to_hgc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let from = coordinate.frame().obstime();
    if from == target.obstime() {
        return Ok(target.realize(*coordinate.data()));
    }
    tracing::debug!(from = ?from, to = ?target.obstime(), "carrington obstimes differ, going through stonyhurst");
    let stonyhurst = transformer.transform(coordinate, &Frame::stonyhurst(from))?;
    let stonyhurst = transformer.transform(&stonyhurst, &Frame::stonyhurst(target.obstime()))?;
    transformer.transform(&stonyhurst, target)
}
