//! The solar reference frames and the parameters that pin each of them down.
//!
//! A [`Frame`] is a value: it names a [`FrameKind`] and carries that kind's parameters (the
//! observation time, the observer, the solar radius). Two coordinates are only directly comparable
//! if their frames are equal, and transforms between frames are looked up by kind in a
//! [`TransformGraph`](crate::TransformGraph).

use crate::coordinate::Coordinate;
use crate::error::{Result, TransformError};
use crate::observer::Observer;
use crate::representation::Representation;
use crate::time::ObsTime;
use crate::Transformer;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kinds of frame that transforms are registered between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameKind {
    /// The barycentric inertial frame.
    Icrs,
    /// ICRS axes with the origin at the center of the Sun.
    Hcrs,
    /// Heliographic Stonyhurst: Z along the solar rotation axis, X towards the Earth's projection
    /// onto the solar equator.
    HeliographicStonyhurst,
    /// Heliographic Carrington: Stonyhurst rotated about Z to co-rotate with the Sun.
    HeliographicCarrington,
    /// Heliocentric cartesian: Z towards the observer, Y in the plane containing Z and the solar
    /// rotation axis.
    Heliocentric,
    /// Helioprojective: angles on the observer's sky, measured from the Sun's center.
    Helioprojective,
}

impl FrameKind {
    pub const ALL: [FrameKind; 6] = [
        FrameKind::Icrs,
        FrameKind::Hcrs,
        FrameKind::HeliographicStonyhurst,
        FrameKind::HeliographicCarrington,
        FrameKind::Heliocentric,
        FrameKind::Helioprojective,
    ];

    /// The stable name of this kind of frame.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FrameKind::Icrs => "icrs",
            FrameKind::Hcrs => "hcrs",
            FrameKind::HeliographicStonyhurst => "heliographic_stonyhurst",
            FrameKind::HeliographicCarrington => "heliographic_carrington",
            FrameKind::Heliocentric => "heliocentric",
            FrameKind::Helioprojective => "helioprojective",
        }
    }

    /// Looks up a kind by its [name](FrameKind::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns `true` for the frames defined in terms of the Sun's rotation axis or an observer of
    /// the Sun, as opposed to the celestial frames they are anchored to.
    #[must_use]
    pub fn is_solar(&self) -> bool {
        !matches!(self, FrameKind::Icrs | FrameKind::Hcrs)
    }
}

impl Display for FrameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully parameterized reference frame.
///
/// Parameters that are `None` are unset. Frames with unset parameters can still hold
/// coordinates, but most transforms into (or out of) them fail with
/// [`TransformError::MissingParameter`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Frame {
    Icrs,
    Hcrs {
        obstime: ObsTime,
    },
    HeliographicStonyhurst {
        obstime: Option<ObsTime>,
    },
    HeliographicCarrington {
        obstime: Option<ObsTime>,
    },
    Heliocentric {
        obstime: Option<ObsTime>,
        observer: Option<Observer>,
    },
    Helioprojective {
        obstime: Option<ObsTime>,
        observer: Option<Observer>,
        /// The radius of the sphere that distance-free points are assumed to lie on. Unset means
        /// the radius configured on the [`Transformer`] doing the conversion.
        rsun: Option<Length>,
    },
}

impl Frame {
    #[must_use]
    pub fn icrs() -> Self {
        Frame::Icrs
    }

    #[must_use]
    pub fn hcrs(obstime: ObsTime) -> Self {
        Frame::Hcrs { obstime }
    }

    #[must_use]
    pub fn stonyhurst(obstime: impl Into<Option<ObsTime>>) -> Self {
        Frame::HeliographicStonyhurst {
            obstime: obstime.into(),
        }
    }

    #[must_use]
    pub fn carrington(obstime: impl Into<Option<ObsTime>>) -> Self {
        Frame::HeliographicCarrington {
            obstime: obstime.into(),
        }
    }

    #[must_use]
    pub fn heliocentric(obstime: impl Into<Option<ObsTime>>, observer: impl Into<Option<Observer>>) -> Self {
        Frame::Heliocentric {
            obstime: obstime.into(),
            observer: observer.into(),
        }
    }

    /// A helioprojective frame that places distance-free points on the configured solar surface.
    ///
    /// Use [`Frame::with_rsun`] to pin a radius to the frame itself.
    #[must_use]
    pub fn helioprojective(
        obstime: impl Into<Option<ObsTime>>,
        observer: impl Into<Option<Observer>>,
    ) -> Self {
        Frame::Helioprojective {
            obstime: obstime.into(),
            observer: observer.into(),
            rsun: None,
        }
    }

    /// Replaces the solar radius of a helioprojective frame; other frames are returned as-is.
    #[must_use]
    pub fn with_rsun(self, radius: Length) -> Self {
        match self {
            Frame::Helioprojective {
                obstime, observer, ..
            } => Frame::Helioprojective {
                obstime,
                observer,
                rsun: Some(radius),
            },
            other => other,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Icrs => FrameKind::Icrs,
            Frame::Hcrs { .. } => FrameKind::Hcrs,
            Frame::HeliographicStonyhurst { .. } => FrameKind::HeliographicStonyhurst,
            Frame::HeliographicCarrington { .. } => FrameKind::HeliographicCarrington,
            Frame::Heliocentric { .. } => FrameKind::Heliocentric,
            Frame::Helioprojective { .. } => FrameKind::Helioprojective,
        }
    }

    #[must_use]
    pub fn obstime(&self) -> Option<ObsTime> {
        match *self {
            Frame::Icrs => None,
            Frame::Hcrs { obstime } => Some(obstime),
            Frame::HeliographicStonyhurst { obstime }
            | Frame::HeliographicCarrington { obstime }
            | Frame::Heliocentric { obstime, .. }
            | Frame::Helioprojective { obstime, .. } => obstime,
        }
    }

    #[must_use]
    pub fn observer(&self) -> Option<&Observer> {
        match self {
            Frame::Heliocentric { observer, .. } | Frame::Helioprojective { observer, .. } => {
                observer.as_ref()
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn rsun(&self) -> Option<Length> {
        match *self {
            Frame::Helioprojective { rsun, .. } => rsun,
            _ => None,
        }
    }

    /// Attaches `data` to this frame.
    #[must_use]
    pub fn realize(&self, data: Representation) -> Coordinate {
        Coordinate::new(self.clone(), data)
    }

    pub(crate) fn require_obstime(&self) -> Result<ObsTime> {
        self.obstime()
            .ok_or_else(|| TransformError::missing(self.kind(), "obstime"))
    }

    pub(crate) fn require_observer(&self) -> Result<&Observer> {
        self.observer()
            .ok_or_else(|| TransformError::missing(self.kind(), "observer"))
    }

    /// The same frame, anchored to a different observer.
    ///
    /// Frames without an observer are returned unchanged.
    #[must_use]
    pub(crate) fn with_observer(&self, observer: Option<Observer>) -> Self {
        match self.clone() {
            Frame::Heliocentric { obstime, .. } => Frame::Heliocentric { obstime, observer },
            Frame::Helioprojective { obstime, rsun, .. } => Frame::Helioprojective {
                obstime,
                observer,
                rsun,
            },
            other => other,
        }
    }

    /// Builds a frame of kind `kind` to pass through on the way from `from` to `to`.
    ///
    /// Each parameter is taken from `to` if it has one, and from `from` otherwise. An HCRS frame
    /// with neither falls back to J2000.0. A helioprojective one with neither leaves its radius unset.
    pub(crate) fn intermediate(kind: FrameKind, from: &Frame, to: &Frame) -> Self {
        let obstime = to.obstime().or_else(|| from.obstime());
        let observer = to.observer().or_else(|| from.observer()).cloned();
        match kind {
            FrameKind::Icrs => Frame::Icrs,
            FrameKind::Hcrs => Frame::Hcrs {
                obstime: obstime.unwrap_or_else(ObsTime::j2000),
            },
            FrameKind::HeliographicStonyhurst => Frame::HeliographicStonyhurst { obstime },
            FrameKind::HeliographicCarrington => Frame::HeliographicCarrington { obstime },
            FrameKind::Heliocentric => Frame::Heliocentric { obstime, observer },
            FrameKind::Helioprojective => Frame::Helioprojective {
                obstime,
                observer,
                rsun: to.rsun().or_else(|| from.rsun()),
            },
        }
    }

    /// Replaces an `"earth"` observer label with the Earth's location at this frame's obstime.
    ///
    /// Frames without an obstime, and labels other than `"earth"`, are left symbolic.
    pub(crate) fn resolve_observer(&self, transformer: &Transformer) -> Result<Self> {
        match (self.observer(), self.obstime()) {
            (Some(observer), Some(obstime)) if observer.is_earth_label() => {
                let earth = Observer::earth_at(transformer, obstime)?;
                tracing::trace!(frame = %self.kind(), %obstime, observer = %earth, "resolved earth observer");
                Ok(self.with_observer(Some(earth)))
            }
            _ => Ok(self.clone()),
        }
    }
}

fn fmt_option<T: Display>(f: &mut Formatter<'_>, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{value}"),
        None => f.write_str("None"),
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match self {
            Frame::Icrs => Ok(()),
            Frame::Hcrs { obstime } => write!(f, "(obstime={obstime})"),
            Frame::HeliographicStonyhurst { obstime } | Frame::HeliographicCarrington { obstime } => {
                f.write_str("(obstime=")?;
                fmt_option(f, *obstime)?;
                f.write_str(")")
            }
            Frame::Heliocentric { obstime, observer } => {
                f.write_str("(obstime=")?;
                fmt_option(f, *obstime)?;
                f.write_str(", observer=")?;
                fmt_option(f, observer.as_ref())?;
                f.write_str(")")
            }
            Frame::Helioprojective {
                obstime,
                observer,
                rsun,
            } => {
                f.write_str("(obstime=")?;
                fmt_option(f, *obstime)?;
                f.write_str(", observer=")?;
                fmt_option(f, observer.as_ref())?;
                f.write_str(", rsun=")?;
                match rsun {
                    Some(rsun) => write!(f, "{:.1} m)", rsun.get::<meter>()),
                    None => f.write_str("None)"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ObserverLocation;
    use uom::si::angle::degree;
    use uom::si::f64::Angle;

    fn t(day: u32) -> ObsTime {
        ObsTime::from_ymd_hms(2020, 1, day, 0, 0, 0).unwrap()
    }

    fn somewhere() -> Observer {
        Observer::Location(
            ObserverLocation::new(
                Angle::new::<degree>(10.),
                Angle::new::<degree>(5.),
                Length::new::<meter>(1.5e11),
            )
            .unwrap(),
        )
    }

    #[test]
    fn names_round_trip() {
        for kind in FrameKind::ALL {
            assert_eq!(FrameKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(FrameKind::from_name("galactic"), None);
    }

    #[test]
    fn missing_parameters_name_the_frame() {
        let frame = Frame::heliocentric(None, None);
        assert_eq!(
            frame.require_obstime(),
            Err(TransformError::missing(FrameKind::Heliocentric, "obstime"))
        );
        assert_eq!(
            frame.require_observer(),
            Err(TransformError::missing(FrameKind::Heliocentric, "observer"))
        );
    }

    #[test]
    fn intermediate_prefers_destination_parameters() {
        let from = Frame::heliocentric(t(1), somewhere());
        let to = Frame::helioprojective(t(2), None);

        assert_eq!(
            Frame::intermediate(FrameKind::Heliocentric, &from, &to),
            Frame::heliocentric(t(2), somewhere())
        );
        assert_eq!(
            Frame::intermediate(FrameKind::HeliographicStonyhurst, &from, &to),
            Frame::stonyhurst(t(2))
        );
    }

    #[test]
    fn intermediate_hcrs_defaults_to_j2000() {
        let frame = Frame::intermediate(
            FrameKind::Hcrs,
            &Frame::stonyhurst(None),
            &Frame::carrington(None),
        );
        assert_eq!(frame, Frame::hcrs(ObsTime::j2000()));
    }

    #[test]
    fn intermediate_helioprojective_radius() {
        let frame = Frame::intermediate(
            FrameKind::Helioprojective,
            &Frame::stonyhurst(None),
            &Frame::heliocentric(None, somewhere()),
        );
        assert_eq!(frame.rsun(), None);
        assert_eq!(frame.observer(), Some(&somewhere()));

        let pinned = Frame::helioprojective(None, None).with_rsun(Length::new::<meter>(7e8));
        let frame = Frame::intermediate(
            FrameKind::Helioprojective,
            &pinned,
            &Frame::heliocentric(None, somewhere()),
        );
        assert_eq!(frame.rsun(), Some(Length::new::<meter>(7e8)));
    }

    #[test]
    fn rebinding_the_observer_keeps_everything_else() {
        let frame = Frame::helioprojective(t(3), Observer::earth()).with_rsun(Length::new::<meter>(7e8));
        let rebound = frame.with_observer(Some(somewhere()));
        assert_eq!(rebound.obstime(), Some(t(3)));
        assert_eq!(rebound.rsun(), Some(Length::new::<meter>(7e8)));
        assert_eq!(rebound.observer(), Some(&somewhere()));
        assert_eq!(Frame::stonyhurst(t(3)).with_observer(Some(somewhere())), Frame::stonyhurst(t(3)));
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Frame::icrs(), @"icrs");
        insta::assert_snapshot!(Frame::carrington(None), @"heliographic_carrington(obstime=None)");
        insta::assert_snapshot!(
            Frame::helioprojective(t(1), Observer::earth()),
            @"helioprojective(obstime=2020-01-01T00:00:00.000, observer=earth, rsun=None)"
        );
        insta::assert_snapshot!(
            Frame::helioprojective(None, None).with_rsun(Length::new::<meter>(7e8)),
            @"helioprojective(obstime=None, observer=None, rsun=700000000.0 m)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn kinds_serialize_by_name() {
        assert_eq!(
            serde_yaml::to_string(&FrameKind::HeliographicStonyhurst).unwrap().trim(),
            "heliographic_stonyhurst"
        );
    }
}
