//! Evaluation of the fitted models against the physical reflectance of a
//! list of metals.
//!
//! For every preset the IOR of the metallic model is fitted, then the
//! physical curve, the fitted metallic curve and the artist-friendly curve are
//! sampled densely to produce the RMS errors of both simplified models and the
//! curves to plot.

use crate::{
    color::Rgb,
    error::FitError,
    fitting::{FitParams, IorFit},
    optics::fresnel::{ArtistFresnel, ReflectanceModel},
    preset::MetalPreset,
    sampler,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters of the evaluation of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalParams {
    /// Parameters of the IOR search.
    #[serde(flatten)]
    pub fit: FitParams,
    /// Number of subdivisions of the cosine interval used for the RMS errors
    /// and for the curves.
    pub display_samples: u32,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            fit: FitParams::default(),
            display_samples: Self::DEFAULT_DISPLAY_SAMPLES,
        }
    }
}

impl EvalParams {
    /// Twice the width of the default plot.
    pub const DEFAULT_DISPLAY_SAMPLES: u32 = 1600;

    /// Checks both the search and the display sampling.
    pub fn validate(&self) -> Result<(), FitError> {
        self.fit.validate()?;
        if self.display_samples < 2 {
            let range = self.fit.ior_range;
            return Err(FitError::NoCandidateFound {
                start: range.start,
                stop: range.stop,
                step: range.step_size,
                angle_samples: self.display_samples,
            });
        }
        Ok(())
    }
}

/// The three curves at one viewing angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSample {
    /// Cosine of the viewing angle.
    pub cos_theta: f32,
    /// Physical reflectance.
    pub complex: Rgb,
    /// Metallic model with the fitted IOR.
    pub metallic: Rgb,
    /// Artist-friendly model, absent when its parameters are out of domain.
    pub artist: Option<Rgb>,
}

/// Everything known about one fitted preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetReport {
    /// Name of the preset.
    pub name: String,
    /// Physical reflectance at normal incidence.
    pub base: Rgb,
    /// Physical reflectance at grazing incidence.
    pub grazing: Rgb,
    /// Fitted IOR.
    pub ior: f32,
    /// Summed squared residual of the fit.
    pub residual: f64,
    /// RMS distance between the metallic and the physical curve.
    pub metallic_rmse: f64,
    /// RMS distance between the artist-friendly and the physical curve.
    pub artist_rmse: Option<f64>,
    /// Densely sampled curves, in ascending cosine order.
    #[serde(skip)]
    pub curves: Vec<CurveSample>,
}

impl PresetReport {
    /// Outcome of the IOR fit alone.
    pub fn fit(&self) -> IorFit {
        IorFit {
            ior: self.ior,
            residual: self.residual,
            base: self.base,
            grazing: self.grazing,
        }
    }
}

/// Fits the IOR of a preset and measures both simplified models against the
/// physical curve.
///
/// A failure of the artist-friendly model is not fatal: it is logged and its
/// RMS error and curve are left empty.
pub fn evaluate_preset(preset: &MetalPreset, params: &EvalParams) -> Result<PresetReport, FitError> {
    params.validate()?;
    let fit = preset.fit(&params.fit)?;
    log::info!("{}: IOR = {}, base = {}", preset.name, fit.ior, fit.base);

    let complex = ReflectanceModel::Complex {
        eta: preset.eta,
        k: preset.k,
    };
    let metallic = ReflectanceModel::Metallic {
        base: fit.base,
        grazing: fit.grazing,
        ior: fit.ior,
    };
    let artist = match ArtistFresnel::new(fit.base, fit.grazing) {
        Ok(model) => Some(ReflectanceModel::Artist(model)),
        Err(err) => {
            log::warn!("{}: artist-friendly model skipped, {}", preset.name, err);
            None
        },
    };

    let pairs = sampler::sample(
        |c| complex.eval(c),
        |c| metallic.eval(c),
        params.display_samples,
    );
    let curves = pairs
        .iter()
        .map(|s| CurveSample {
            cos_theta: s.cos_theta,
            complex: s.a,
            metallic: s.b,
            artist: artist.map(|model| model.eval(s.cos_theta)),
        })
        .collect::<Vec<_>>();

    let metallic_rmse = rmse(curves.iter().map(|s| s.metallic.distance_sqr(&s.complex)));
    let artist_rmse = artist.map(|_| {
        rmse(curves.iter().filter_map(|s| s.artist.map(|a| a.distance_sqr(&s.complex))))
    });

    Ok(PresetReport {
        name: preset.name.to_string(),
        base: fit.base,
        grazing: fit.grazing,
        ior: fit.ior,
        residual: fit.residual,
        metallic_rmse,
        artist_rmse,
        curves,
    })
}

/// Evaluates a list of presets in parallel.
///
/// The outcomes are returned in the order of `presets`; a failing preset
/// doesn't prevent the others from being evaluated.
pub fn evaluate_presets(
    presets: &[MetalPreset],
    params: &EvalParams,
) -> Vec<Result<PresetReport, FitError>> {
    presets
        .par_iter()
        .map(|preset| {
            evaluate_preset(preset, params).map_err(|err| {
                log::error!("{}: fit failed, {}", preset.name, err);
                err
            })
        })
        .collect()
}

/// Root of the mean of squared distances.
fn rmse(dists: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = dists.fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));
    if n == 0 {
        0.0
    } else {
        (sum / n as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{preset::BUILTIN_PRESETS as BUILTIN, range::StepRangeExcl};
    use approx::assert_relative_eq;

    const PARAMS: EvalParams = EvalParams {
        fit: FitParams {
            ior_range: StepRangeExcl::new(1.001, 10.0, 0.01),
            angle_samples: 50,
        },
        display_samples: 100,
    };

    #[test]
    fn rmse_is_the_root_of_the_mean() {
        assert_eq!(rmse([4.0, 4.0, 4.0].into_iter()), 2.0);
        assert_relative_eq!(rmse([1.0, 0.0].into_iter()), 0.5f64.sqrt());
        assert_eq!(rmse(std::iter::empty()), 0.0);
    }

    #[test]
    fn report_matches_the_fit() {
        let copper = MetalPreset::find("copper").unwrap();
        let report = evaluate_preset(copper, &PARAMS).unwrap();
        assert_eq!(report.name, "Copper");
        assert_eq!(report.fit(), copper.fit(&PARAMS.fit).unwrap());
        assert_eq!(report.curves.len(), 99);
        assert_eq!(report.curves[0].cos_theta, 0.01);
        assert!(report.curves.iter().all(|s| s.artist.is_some()));
        assert!(report.metallic_rmse > 0.0);
        assert!(report.artist_rmse.is_some());
    }

    #[test]
    fn coarse_display_sampling_is_rejected() {
        let params = EvalParams {
            display_samples: 1,
            ..PARAMS
        };
        let err = evaluate_preset(&BUILTIN[0], &params).unwrap_err();
        assert!(matches!(err, FitError::NoCandidateFound { angle_samples: 1, .. }));
    }

    #[test]
    fn failures_stay_isolated() {
        let presets = [
            BUILTIN[1].clone(),
            MetalPreset::new("Broken", Rgb::splat(-1.0), Rgb::ONE),
            BUILTIN[2].clone(),
        ];
        let outcomes = evaluate_presets(&presets, &PARAMS);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_ref().unwrap().name, "Gold");
        assert!(outcomes[1].as_ref().unwrap_err().is_domain_error());
        assert_eq!(outcomes[2].as_ref().unwrap().name, "Copper");
    }

    #[test]
    fn default_params_deserialize_from_flat_table() {
        let params: EvalParams = toml::from_str("angle_samples = 100\ndisplay_samples = 400").unwrap();
        assert_eq!(params.fit.angle_samples, 100);
        assert_eq!(params.fit.ior_range, FitParams::DEFAULT_IOR_RANGE);
        assert_eq!(params.display_samples, 400);
        let params: EvalParams = toml::from_str("").unwrap();
        assert_eq!(params, EvalParams::default());
    }
}
