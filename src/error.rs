use thiserror::Error;

use crate::data::CubeFace;

/// Failure modes of the resolution pipeline.
///
/// Partial results are not errors: a detection without a bearing or distance
/// is simply omitted from the output records. Only conditions that stop an
/// image from being processed, or that indicate a broken invariant, surface
/// through this type.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A required upstream input is absent or unreadable. Fatal for the
    /// affected image, never for the rest of a batch.
    #[error("missing input ({subject}): {reason}")]
    MissingInput { subject: String, reason: String },

    /// The bounding-box center sits exactly on the zenith/nadir singularity,
    /// where no horizontal bearing exists.
    #[error("bearing undefined for detection {index}: center of {face} face is a pole singularity")]
    UndefinedGeometry { face: CubeFace, index: usize },

    /// A trigonometric argument left its domain after clamping. The clamp
    /// makes this unreachable for valid input, so hitting it means a bug.
    #[error("numeric domain violation in {operation} (got {value})")]
    NumericDomain { operation: &'static str, value: f64 },
}

impl LocateError {
    pub fn missing_input(subject: impl Into<String>, reason: impl ToString) -> Self {
        LocateError::MissingInput {
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }
}
