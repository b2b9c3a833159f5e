use super::AffineParts;
use crate::coordinate::Coordinate;
use crate::ephemeris::{Body, Ephemeris};
use crate::error::{Result, TransformError};
use crate::frames::{Frame, FrameKind};
use crate::sun::stonyhurst_axes;
use crate::time::ObsTime;
use crate::{Matrix3, Transformer, Vector3};

/// The affine transform from HCRS at `from` to heliographic Stonyhurst at `to`.
///
/// The rotation is evaluated at `to`. If the obstimes differ, the origin additionally moves with
/// the Sun between the two instants.
fn stonyhurst_from_hcrs(ephemeris: &dyn Ephemeris, from: &ObsTime, to: &ObsTime) -> Result<AffineParts> {
    let matrix = stonyhurst_axes(ephemeris, to)?;
    let offset = if from == to {
        Vector3::zeros()
    } else {
        let sun_now = ephemeris.barycentric_position(Body::Sun, to)?;
        let sun_then = ephemeris.barycentric_position(Body::Sun, from)?;
        matrix * (sun_now - sun_then)
    };
    Ok(AffineParts::new(matrix, offset))
}

/// HCRS to heliographic Stonyhurst.
///
/// The destination frame must have an obstime.
pub fn hcrs_to_hgs(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<AffineParts> {
    let to = target.require_obstime()?;
    let from = coordinate.frame().require_obstime()?;
    stonyhurst_from_hcrs(transformer.ephemeris(), &from, &to)
}

/// Heliographic Stonyhurst to HCRS; the inverse of [`hcrs_to_hgs`].
///
/// The source frame must have an obstime.
pub fn hgs_to_hcrs(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<AffineParts> {
    let stonyhurst = coordinate.frame().require_obstime()?;
    let inertial = target.require_obstime()?;
    Ok(stonyhurst_from_hcrs(transformer.ephemeris(), &inertial, &stonyhurst)?.inverse())
}

/// [`hcrs_to_hgs`] for batches of obstimes.
///
/// A batch of length one is paired with every element of the other batch; otherwise both batches
/// must be the same length.
pub fn hcrs_to_hgs_many(
    transformer: &Transformer,
    from: &[ObsTime],
    to: &[ObsTime],
) -> Result<Vec<AffineParts>> {
    let pairs: Vec<(&ObsTime, &ObsTime)> = match (from, to) {
        ([from], to) => to.iter().map(|to| (from, to)).collect(),
        (from, [to]) => from.iter().map(|from| (from, to)).collect(),
        (from, to) if from.len() == to.len() => from.iter().zip(to).collect(),
        _ => {
            return Err(TransformError::mismatched(
                FrameKind::HeliographicStonyhurst,
                "obstime",
            ))
        }
    };
    pairs
        .into_iter()
        .map(|(from, to)| stonyhurst_from_hcrs(transformer.ephemeris(), from, to))
        .collect()
}

/// ICRS to HCRS: a shift of the origin from the barycenter to the Sun at the HCRS obstime.
pub fn icrs_to_hcrs(transformer: &Transformer, _: &Coordinate, target: &Frame) -> Result<AffineParts> {
    let obstime = target.require_obstime()?;
    let sun = transformer
        .ephemeris()
        .barycentric_position(Body::Sun, &obstime)?;
    Ok(AffineParts::new(Matrix3::identity(), -sun))
}

/// HCRS to ICRS; the inverse of [`icrs_to_hcrs`].
pub fn hcrs_to_icrs(transformer: &Transformer, coordinate: &Coordinate, _: &Frame) -> Result<AffineParts> {
    let obstime = coordinate.frame().require_obstime()?;
    let sun = transformer
        .ephemeris()
        .barycentric_position(Body::Sun, &obstime)?;
    Ok(AffineParts::new(Matrix3::identity(), sun))
}
