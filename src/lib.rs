//! This library expresses positions in the coordinate frames used to describe the Sun, and moves
//! them between those frames.
//!
//! The frames are the heliographic frames fixed to the Sun's rotation axis
//! ([Stonyhurst](FrameKind::HeliographicStonyhurst), facing the Earth, and
//! [Carrington](FrameKind::HeliographicCarrington), rotating with the Sun), the observer-centric
//! [heliocentric](FrameKind::Heliocentric) and [helioprojective](FrameKind::Helioprojective)
//! frames, and [HCRS](FrameKind::Hcrs) and [ICRS](FrameKind::Icrs) which tie them to the
//! celestial sphere.
//!
//! A [`Coordinate`] is some [`Representation`] of a point (cartesian, spherical, or a direction
//! only) attached to a [`Frame`]. Frames carry the parameters that pin them down, such as the
//! observation time or the [`Observer`]. To move a coordinate into a different frame, hand both
//! to a [`Transformer`], which finds a path through its [`TransformGraph`] and builds any frames
//! it has to pass through on the way.
//!
//! # Examples
//!
//! Where is a sunspot at 20° west, 15° north, on the surface, as seen by a spacecraft that sits
//! 60° east of the Earth?
//!
//! ```
//! use helioframes::{Frame, ObsTime, Observer, ObserverLocation, Representation, Transformer};
//! use uom::si::angle::{degree, second as arcsecond};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::length::meter;
//!
//! let transformer = Transformer::default();
//! let obstime = ObsTime::from_ymd_hms(2022, 3, 1, 12, 0, 0).expect("valid date");
//!
//! let sunspot = Frame::stonyhurst(obstime).realize(Representation::spherical(
//!     Angle::new::<degree>(20.),
//!     Angle::new::<degree>(15.),
//!     Length::new::<meter>(6.955_08e8),
//! ));
//!
//! let spacecraft = ObserverLocation::new(
//!     Angle::new::<degree>(-60.),
//!     Angle::new::<degree>(2.),
//!     Length::new::<meter>(1.4e11),
//! )
//! .expect("a valid location");
//!
//! // as seen from the Earth
//! let from_earth = transformer
//!     .transform(&sunspot, &Frame::helioprojective(obstime, Observer::earth()))
//!     .unwrap();
//!
//! // and from the spacecraft, straight from the Earth's view
//! let from_spacecraft = transformer
//!     .transform(&from_earth, &Frame::helioprojective(obstime, Observer::from(spacecraft)))
//!     .unwrap();
//!
//! let (tx, ty, _) = from_spacecraft.spherical();
//! println!(
//!     "Tx = {:.1}\", Ty = {:.1}\"",
//!     tx.get::<arcsecond>(),
//!     ty.get::<arcsecond>()
//! );
//! // further from disk center, towards the western limb
//! assert!(tx.get::<arcsecond>() > 0.);
//! ```
//!
//! Every transform fails rather than guess when a frame lacks a parameter it needs:
//!
//! ```
//! use helioframes::{Frame, FrameKind, ObsTime, Representation, TransformError, Transformer};
//! use uom::si::angle::degree;
//! use uom::si::f64::Angle;
//!
//! let transformer = Transformer::default();
//! let obstime = ObsTime::from_ymd_hms(2022, 3, 1, 12, 0, 0).expect("valid date");
//! let point = Frame::stonyhurst(obstime)
//!     .realize(Representation::unit_spherical(Angle::new::<degree>(0.), Angle::new::<degree>(0.)));
//!
//! assert_eq!(
//!     transformer.transform(&point, &Frame::carrington(None)),
//!     Err(TransformError::MissingParameter {
//!         frame: FrameKind::HeliographicCarrington,
//!         parameter: "obstime",
//!     }),
//! );
//! ```

mod config;
mod coordinate;
mod ephemeris;
mod error;
mod frames;
mod graph;
mod observer;
mod representation;
mod time;
mod transformer;
mod util;

pub mod diagram;
pub mod sun;
pub mod transforms;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;

pub use config::{
    SolarConstants, Tolerance, TransformConfig, ASTRONOMICAL_UNIT_METERS, SOLAR_RADIUS_METERS,
};
pub use coordinate::Coordinate;
pub use ephemeris::{Body, Ephemeris, LowPrecisionEphemeris};
pub use error::{Result, TransformError};
pub use frames::{Frame, FrameKind};
pub use graph::{AffineTransform, Edge, FunctionTransform, TransformGraph, TransformKind};
pub use observer::{observers_are_equal, Observer, ObserverLocation, EARTH};
pub use representation::{Distance, Representation};
pub use time::ObsTime;
pub use transformer::Transformer;
pub use transforms::AffineParts;
pub use util::BoundedAngle;
