//! Typed exploration errors.
//!
//! `ExploreError` represents pre-flight failures only. Runtime terminations
//! (budgets, observer stops, observer panics, exhaustion) are expressed via
//! [`crate::report::TerminationReasonV1`] and always produce an
//! `ExploreReportV1`.

/// Typed failure for pre-flight validation.
///
/// Returned before the first pop. No report is produced because no search
/// step was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreError {
    /// The bound N must be at least 1.
    BoundTooSmall { bound: u32 },
    /// The exploration policy cannot drive a run.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for ExploreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundTooSmall { bound } => {
                write!(f, "bound must be at least 1, got {bound}")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid explore policy: {detail}"),
        }
    }
}

impl std::error::Error for ExploreError {}
