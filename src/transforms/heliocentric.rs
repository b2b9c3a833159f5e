use crate::coordinate::Coordinate;
use crate::error::{Result, TransformError};
use crate::frames::Frame;
use crate::observer::{observers_are_equal, Observer};
use crate::representation::{Distance, Representation};
use crate::util::{wrap_longitude, WrapAt};
use crate::{Transformer, Vector3};
use std::borrow::Cow;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

/// Heliocentric cartesian to helioprojective.
///
/// If the frames have different observers, the point is first moved into a heliocentric frame
/// anchored to the destination's observer.
pub fn hcc_to_hpc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let target_observer = target.require_observer()?;
    let source_observer = coordinate.frame().require_observer()?;

    let coordinate = if observers_are_equal(
        source_observer,
        target_observer,
        false,
        &transformer.config().tolerance,
    )? {
        Cow::Borrowed(coordinate)
    } else {
        tracing::debug!(from = %source_observer, to = %target_observer, "realigning heliocentric frame to observer");
        let aligned = Frame::heliocentric(target.obstime(), target_observer.clone());
        Cow::Owned(transformer.transform(coordinate, &aligned)?)
    };

    let observer_distance = coordinate
        .frame()
        .require_observer()?
        .require_location()?
        .radius()
        .get::<meter>();
    let p = coordinate.data().position_meters()?;

    let depth = observer_distance - p.z;
    let distance = (p.x * p.x + p.y * p.y + depth * depth).sqrt();
    let tx = wrap_longitude(Angle::new::<radian>(p.x.atan2(depth)), WrapAt::HalfTurn);
    let ty = Angle::new::<radian>((p.y / distance).asin());

    Ok(target.realize(Representation::Spherical {
        lon: tx,
        lat: ty,
        distance: Distance::Physical(Length::new::<meter>(distance)),
    }))
}

/// Helioprojective to heliocentric cartesian.
///
/// Points without a distance are placed on the solar surface (see
/// [`Coordinate::calculate_distance`]), using the configured solar radius unless the source frame
/// pins its own. If the frames have different observers, the conversion
/// happens for the source's observer and the result is then moved to the destination's.
pub fn hpc_to_hcc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let source_observer = coordinate.frame().require_observer()?;
    let observer = source_observer.require_location()?;
    let target_observer = target.require_observer()?;

    if !observers_are_equal(
        source_observer,
        target_observer,
        false,
        &transformer.config().tolerance,
    )? {
        tracing::debug!(from = %source_observer, to = %target_observer, "converting for the source observer first");
        let own = Frame::heliocentric(coordinate.frame().obstime(), source_observer.clone());
        let own = transformer.transform(coordinate, &own)?;
        return transformer.transform(&own, target);
    }

    let resolved = coordinate.calculate_distance_with(transformer.config().constants.radius)?;
    let (tx, ty, distance) = resolved.spherical();
    let distance = match distance {
        Distance::Physical(distance) => distance.get::<meter>(),
        Distance::Dimensionless(value) => return Err(TransformError::DimensionlessDistance { value }),
    };
    let (sin_x, cos_x) = tx.get::<radian>().sin_cos();
    let (sin_y, cos_y) = ty.get::<radian>().sin_cos();

    Ok(target.realize(Representation::from_meters(Vector3::new(
        distance * cos_y * sin_x,
        distance * sin_y,
        observer.radius().get::<meter>() - distance * cos_y * cos_x,
    ))))
}

/// Heliocentric cartesian to heliographic Stonyhurst, using the heliocentric frame's observer.
pub fn hcc_to_hgs(_: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let observer = coordinate.frame().require_observer()?.require_location()?;
    let p = coordinate.data().position_meters()?;

    let (sin_b, cos_b) = observer.lat().get::<radian>().sin_cos();
    let radius = p.norm();
    let lon = p.x.atan2(p.z * cos_b - p.y * sin_b) + observer.lon().get::<radian>();
    let lat = ((p.y * cos_b + p.z * sin_b) / radius).asin();

    Ok(target.realize(Representation::Spherical {
        lon: wrap_longitude(Angle::new::<radian>(lon), WrapAt::HalfTurn),
        lat: Angle::new::<radian>(lat),
        distance: Distance::Physical(Length::new::<meter>(radius)),
    }))
}

/// Heliographic Stonyhurst to heliocentric cartesian, using the destination frame's observer.
///
/// A dimensionless distance of one is taken to mean the solar surface.
pub fn hgs_to_hcc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let (lon, lat, distance) = coordinate.spherical();
    let radius = match distance {
        Distance::Physical(radius) => radius.get::<meter>(),
        Distance::Dimensionless(value) if transformer.config().tolerance.is_close(value, 1.) => {
            transformer.config().constants.radius.get::<meter>()
        }
        Distance::Dimensionless(value) => return Err(TransformError::DimensionlessDistance { value }),
    };
    let observer = target.require_observer()?.require_location()?;

    let (sin_b, cos_b) = observer.lat().get::<radian>().sin_cos();
    let (sin_lon, cos_lon) = (lon - observer.lon()).get::<radian>().sin_cos();
    let (sin_lat, cos_lat) = lat.get::<radian>().sin_cos();

    Ok(target.realize(Representation::from_meters(Vector3::new(
        radius * cos_lat * sin_lon,
        radius * (sin_lat * cos_b - cos_lat * cos_lon * sin_b),
        radius * (sin_lat * sin_b + cos_lat * cos_lon * cos_b),
    ))))
}

/// Whether two helioprojective frames share a vantage point without any computation.
fn same_vantage_point(a: &Observer, b: &Observer, transformer: &Transformer) -> bool {
    match (a, b) {
        (Observer::Label(a), Observer::Label(b)) => a == b,
        (Observer::Location(_), Observer::Location(_)) => {
            observers_are_equal(a, b, false, &transformer.config().tolerance).unwrap_or(false)
        }
        _ => false,
    }
}

/// Between two helioprojective frames.
///
/// Frames with the same observer share their data as-is. Otherwise the point is moved through
/// heliographic Stonyhurst at the source obstime and re-projected for the destination's observer.
pub fn hpc_to_hpc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let source_observer = coordinate.frame().require_observer()?;
    let target_observer = target.require_observer()?;
    if same_vantage_point(source_observer, target_observer, transformer) {
        return Ok(target.realize(*coordinate.data()));
    }

    for observer in [target_observer, source_observer] {
        if let Observer::Label(label) = observer {
            return Err(TransformError::invalid_observer(format!(
                "cannot transform between helioprojective frames without an obstime for observer {label:?}"
            )));
        }
    }

    let stonyhurst = Frame::stonyhurst(coordinate.frame().obstime());
    let stonyhurst = transformer.transform(coordinate, &stonyhurst)?;
    transformer.transform(&stonyhurst, target)
}

/// Between two heliocentric frames.
///
/// Frames with equal observers (including equal labels) share their data as-is. Otherwise the
/// point is moved through heliographic Stonyhurst at the source obstime.
pub fn hcc_to_hcc(transformer: &Transformer, coordinate: &Coordinate, target: &Frame) -> Result<Coordinate> {
    let source_observer = coordinate.frame().require_observer()?;
    let target_observer = target.require_observer()?;
    if observers_are_equal(
        source_observer,
        target_observer,
        true,
        &transformer.config().tolerance,
    )? {
        return Ok(target.realize(*coordinate.data()));
    }

    let stonyhurst = Frame::stonyhurst(coordinate.frame().obstime());
    let stonyhurst = transformer.transform(coordinate, &stonyhurst)?;
    transformer.transform(&stonyhurst, target)
}
