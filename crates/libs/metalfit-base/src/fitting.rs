//! Brute-force fitting of the scalar IOR of the metallic Fresnel model.
//!
//! Given the complex refractive index of a metal, the base and grazing
//! colours of the metallic model are fixed by the physical reflectance at
//! normal and grazing incidence. The only free parameter left is the IOR,
//! which is found by scanning every candidate of a stepped range and keeping
//! the one whose curve has the smallest summed squared distance to the
//! physical curve.
//!
//! The scan is exhaustive, without pruning, so the optimum over the grid is
//! found whatever the shape of the objective. Candidates are evaluated in
//! parallel, each one summing its own samples in a fixed order, and the
//! minimum is reduced sequentially in ascending IOR order with a strict
//! comparison: ties keep the lowest IOR, and the result is bit-identical from
//! run to run.

use crate::{
    color::{Channel, Rgb},
    error::{DomainViolation, FitError},
    optics::fresnel::{complex_fresnel_rgb, metallic_fresnel},
    range::StepRangeExcl,
    sampler,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters of the IOR search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Candidate IORs, `[start, stop)` stepped by `step_size`.
    pub ior_range: StepRangeExcl<f32>,
    /// Number of subdivisions of the cosine interval (0, 1); the residual of
    /// each candidate sums `angle_samples - 1` samples.
    pub angle_samples: u32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            ior_range: Self::DEFAULT_IOR_RANGE,
            angle_samples: Self::DEFAULT_ANGLE_SAMPLES,
        }
    }
}

impl FitParams {
    /// Default candidate range.
    pub const DEFAULT_IOR_RANGE: StepRangeExcl<f32> = StepRangeExcl::new(1.001, 10.0, 0.001);
    /// Default number of angular subdivisions.
    pub const DEFAULT_ANGLE_SAMPLES: u32 = 200;

    /// Checks that the search has at least one candidate and one sample.
    ///
    /// Steps too small to be resolved at the magnitude of the range, or
    /// ranges with more than [`StepRangeExcl::MAX_STEP_COUNT`] candidates,
    /// count as empty.
    pub fn validate(&self) -> Result<(), FitError> {
        let range = &self.ior_range;
        if range.step_count() == 0 || range.start <= 0.0 || self.angle_samples < 2 {
            return Err(FitError::NoCandidateFound {
                start: range.start,
                stop: range.stop,
                step: range.step_size,
                angle_samples: self.angle_samples,
            });
        }
        Ok(())
    }
}

/// Outcome of an IOR fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IorFit {
    /// Best IOR found on the grid.
    pub ior: f32,
    /// Summed squared distance between the metallic and the physical curve
    /// at [`IorFit::ior`].
    pub residual: f64,
    /// Physical reflectance at normal incidence.
    pub base: Rgb,
    /// Physical reflectance at grazing incidence.
    pub grazing: Rgb,
}

/// Checks that every component of a complex refractive index is finite and
/// non-negative.
pub fn validate_ior(eta: Rgb, k: Rgb) -> Result<(), FitError> {
    for channel in Channel::ALL {
        for v in [eta[channel], k[channel]] {
            let reason = if !v.is_finite() {
                DomainViolation::NonFinite
            } else if v < 0.0 {
                DomainViolation::NegativeIndex(v)
            } else {
                continue;
            };
            return Err(FitError::DomainInputInvalid { channel, reason });
        }
    }
    Ok(())
}

/// Base and grazing colours of a metal: its physical reflectance at normal
/// and at grazing incidence.
pub fn endpoint_colors(eta: Rgb, k: Rgb) -> (Rgb, Rgb) {
    (complex_fresnel_rgb(eta, k, 1.0), complex_fresnel_rgb(eta, k, 0.0))
}

/// Summed squared distance between the metallic curve with the given IOR and
/// the physical curve, over `angle_samples - 1` cosines.
pub fn residual(eta: Rgb, k: Rgb, base: Rgb, grazing: Rgb, ior: f32, angle_samples: u32) -> f64 {
    sampler::sample(
        |c| metallic_fresnel(base, grazing, ior, c),
        |c| complex_fresnel_rgb(eta, k, c),
        angle_samples,
    )
    .iter()
    .map(|s| s.a.distance_sqr(&s.b))
    .sum()
}

/// Residual of every candidate of the search, in ascending IOR order.
pub fn residuals(eta: Rgb, k: Rgb, params: &FitParams) -> Result<Box<[f64]>, FitError> {
    params.validate()?;
    validate_ior(eta, k)?;
    let (base, grazing) = endpoint_colors(eta, k);
    Ok(residuals_unchecked(eta, k, base, grazing, params))
}

fn residuals_unchecked(eta: Rgb, k: Rgb, base: Rgb, grazing: Rgb, params: &FitParams) -> Box<[f64]> {
    const CHUNK_SIZE: usize = 64;
    let range = params.ior_range;
    let mut errs = vec![0.0f64; range.step_count()].into_boxed_slice();
    errs.par_chunks_mut(CHUNK_SIZE)
        .enumerate()
        .for_each(|(i, err_chunk)| {
            for (j, err) in err_chunk.iter_mut().enumerate() {
                let ior = range.value_at(i * CHUNK_SIZE + j);
                *err = residual(eta, k, base, grazing, ior, params.angle_samples);
            }
        });
    errs
}

/// Finds the IOR of the metallic Fresnel model that best matches the complex
/// Fresnel curve of `n + ik`.
///
/// # Arguments
///
/// * `eta` - Real part of the refractive index for red/green/blue.
/// * `k` - Imaginary part of the refractive index for red/green/blue.
/// * `params` - Search range and angular sampling.
///
/// # Errors
///
/// * [`FitError::NoCandidateFound`] if the range is empty or malformed,
///   reported before any evaluation.
/// * [`FitError::DomainInputInvalid`] if a component of `n` or `k` is
///   negative or not finite.
pub fn find_best_ior(eta: Rgb, k: Rgb, params: &FitParams) -> Result<IorFit, FitError> {
    params.validate()?;
    validate_ior(eta, k)?;
    let (base, grazing) = endpoint_colors(eta, k);
    log::debug!(
        "Fitting IOR in {} ({} candidates, {} angle subdivisions), base = {}, grazing = {}",
        params.ior_range,
        params.ior_range.step_count(),
        params.angle_samples,
        base,
        grazing
    );
    let errs = residuals_unchecked(eta, k, base, grazing, params);
    let (best, residual) = argmin(&errs);
    let ior = params.ior_range.value_at(best);
    log::trace!("Best IOR {} with residual {}", ior, residual);
    Ok(IorFit {
        ior,
        residual,
        base,
        grazing,
    })
}

/// Index and value of the smallest residual; the first one wins on ties.
fn argmin(errs: &[f64]) -> (usize, f64) {
    errs.iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, best_err), (i, &err)| {
            if err < best_err {
                (i, err)
            } else {
                (best, best_err)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COARSE: FitParams = FitParams {
        ior_range: StepRangeExcl::new(1.001, 10.0, 0.01),
        angle_samples: 50,
    };

    #[test]
    fn default_params() {
        let params = FitParams::default();
        assert_eq!(params.ior_range, StepRangeExcl::new(1.001, 10.0, 0.001));
        assert_eq!(params.angle_samples, 200);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn malformed_range_is_rejected_upfront() {
        let eta = Rgb::splat(0.5);
        let k = Rgb::splat(3.0);
        for range in [
            StepRangeExcl::new(10.0, 1.0, 0.001),
            StepRangeExcl::new(1.0, 1.0, 0.001),
            StepRangeExcl::new(1.0, 10.0, 0.0),
            StepRangeExcl::new(1.0, 10.0, -0.5),
            StepRangeExcl::new(-1.0, 10.0, 0.5),
            StepRangeExcl::new(1.0, 10.0, 1e-30),
            StepRangeExcl::new(1.0, 10.0, 1e-7),
        ] {
            let params = FitParams {
                ior_range: range,
                ..FitParams::default()
            };
            assert!(matches!(
                find_best_ior(eta, k, &params),
                Err(FitError::NoCandidateFound { .. })
            ));
        }
        let params = FitParams {
            angle_samples: 1,
            ..COARSE
        };
        assert!(matches!(
            find_best_ior(eta, k, &params),
            Err(FitError::NoCandidateFound { angle_samples: 1, .. })
        ));
    }

    #[test]
    fn invalid_index_is_rejected() {
        let err = find_best_ior(Rgb::new(0.5, -0.1, 0.5), Rgb::splat(3.0), &COARSE).unwrap_err();
        assert_eq!(
            err,
            FitError::DomainInputInvalid {
                channel: Channel::Green,
                reason: DomainViolation::NegativeIndex(-0.1),
            }
        );
        let err = find_best_ior(Rgb::splat(0.5), Rgb::new(3.0, 3.0, f32::INFINITY), &COARSE)
            .unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn degenerate_index_does_not_crash() {
        let fit = find_best_ior(Rgb::ZERO, Rgb::ZERO, &COARSE).unwrap();
        assert_eq!(fit.base, Rgb::ONE);
        assert_eq!(fit.grazing, Rgb::ONE);
        assert!(fit.residual < 1e-9);
        assert!(COARSE.ior_range.range_bound().contains(&fit.ior));
    }

    #[test]
    fn ties_keep_the_lowest_candidate() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), (1, 1.0));
        assert_eq!(argmin(&[0.0, 0.0, 0.0]), (0, 0.0));
        assert_eq!(argmin(&[f64::NAN, 2.0, 2.0]), (1, 2.0));
    }

    #[test]
    fn single_candidate() {
        let params = FitParams {
            ior_range: StepRangeExcl::new(2.5, 2.6, 0.5),
            angle_samples: 10,
        };
        let fit = find_best_ior(Rgb::splat(0.2), Rgb::splat(3.0), &params).unwrap();
        assert_eq!(fit.ior, 2.5);
    }

    #[test]
    fn residuals_cover_the_grid() {
        let eta = Rgb::new(0.23780, 1.0066, 1.2404);
        let k = Rgb::new(3.6264, 2.5823, 2.3929);
        let errs = residuals(eta, k, &COARSE).unwrap();
        assert_eq!(errs.len(), COARSE.ior_range.step_count());
        let fit = find_best_ior(eta, k, &COARSE).unwrap();
        let (base, grazing) = endpoint_colors(eta, k);
        assert_eq!(
            fit.residual,
            residual(eta, k, base, grazing, fit.ior, COARSE.angle_samples)
        );
        assert!(errs.iter().all(|&e| fit.residual <= e));
    }
}
