use crate::frames::FrameKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Everything that can go wrong while moving a coordinate between solar frames.
///
/// Errors are raised at the point of detection; a transform either fully succeeds or returns one
/// of these without producing output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// A frame that must carry an obstime or observer does not.
    #[error("{frame} frame needs `{parameter}` to be set to perform this transformation")]
    MissingParameter {
        frame: FrameKind,
        parameter: &'static str,
    },

    /// Two frames (or batches) disagree on a parameter that must match.
    #[error("cannot transform to {frame} unless both sides have matching `{parameter}`")]
    MismatchedParameter {
        frame: FrameKind,
        parameter: &'static str,
    },

    /// The observer is symbolic where a geometric location is needed, or is not a valid location.
    #[error("invalid observer: {reason}")]
    InvalidObserver { reason: String },

    /// The observer equality check was handed something that is not an observer location.
    #[error("{message}")]
    StructuralTypeError { message: String },

    /// A dimensionless radial distance other than the unit sphere cannot be given physical units.
    #[error("cannot interpret dimensionless distance {value} as a physical length")]
    DimensionlessDistance { value: f64 },

    /// A translation cannot be applied to a point that only has a direction.
    #[error("position information is insufficient for a transformation that includes an origin shift")]
    InsufficientPosition,

    #[error("no transformation path from {from} to {to}")]
    NoTransformPath { from: FrameKind, to: FrameKind },

    #[error("ephemeris lookup failed: {message}")]
    Ephemeris { message: String },
}

impl TransformError {
    pub(crate) fn missing(frame: FrameKind, parameter: &'static str) -> Self {
        Self::MissingParameter { frame, parameter }
    }

    pub(crate) fn mismatched(frame: FrameKind, parameter: &'static str) -> Self {
        Self::MismatchedParameter { frame, parameter }
    }

    pub(crate) fn invalid_observer(reason: impl Into<String>) -> Self {
        Self::InvalidObserver {
            reason: reason.into(),
        }
    }

    pub fn ephemeris(message: impl Into<String>) -> Self {
        Self::Ephemeris {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_names_frame_and_parameter() {
        let err = TransformError::missing(FrameKind::HeliographicCarrington, "obstime");
        assert_eq!(
            err.to_string(),
            "heliographic_carrington frame needs `obstime` to be set to perform this transformation"
        );
    }

    #[test]
    fn ephemeris_error_carries_message() {
        let err = TransformError::ephemeris("no data for 1066-10-14");
        assert!(err.to_string().contains("1066-10-14"));
    }
}
