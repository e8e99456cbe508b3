//! Errors raised by the evaluators and the fitter.

use crate::color::Channel;

/// Why an input falls outside the domain of a reflectance model.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DomainViolation {
    /// Base reflectance must be below 1 before it is clamped to `[0, 0.99]`.
    #[error("base reflectance {0} is not below 1")]
    BaseOutOfRange(f32),
    /// The squared extinction coefficient derived from the base and grazing
    /// colours is negative.
    #[error("derived k² = {0} is negative")]
    NegativeK2(f32),
    /// A component of the complex refractive index is negative.
    #[error("refractive index component {0} is negative")]
    NegativeIndex(f32),
    /// An input or an intermediate value is NaN or infinite.
    #[error("non-finite input or intermediate value")]
    NonFinite,
}

/// Error type of the core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// The parameters of a reflectance model yield an undefined intermediate
    /// value for one channel.
    #[error("invalid input for the {channel} channel: {reason}")]
    DomainInputInvalid {
        /// Channel that failed.
        channel: Channel,
        /// What went wrong.
        reason: DomainViolation,
    },
    /// The IOR search range has no candidates or the angular sampling is too
    /// coarse to produce any sample.
    #[error("no IOR candidate in {start} .. {stop} / {step} with {angle_samples} angle samples")]
    NoCandidateFound {
        /// First candidate.
        start: f32,
        /// Exclusive end of the range.
        stop: f32,
        /// Step between candidates.
        step: f32,
        /// Number of angular subdivisions.
        angle_samples: u32,
    },
}

impl FitError {
    /// Whether the error is caused by the input data rather than by the search
    /// configuration.
    pub fn is_domain_error(&self) -> bool { matches!(self, FitError::DomainInputInvalid { .. }) }
}
