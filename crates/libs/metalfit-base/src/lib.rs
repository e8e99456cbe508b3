//! # metalfit-base
//! Core library for metalfit.
//!
//! Derives the single index of refraction that makes the two-colour metallic
//! Fresnel model (base colour, grazing colour, IOR) follow the reflectance
//! curve of a metal given by its complex refractive index `n + ik` sampled at
//! three wavelengths.
//!
//! The crate is purely computational: every evaluator is a pure function and
//! every fit returns its results by value. Writing reports or drawing graphs
//! is left to the caller.
#![warn(missing_docs)]

pub mod color;
pub mod error;
pub mod eval;
pub mod fitting;
pub mod optics;
pub mod preset;
pub mod range;
pub mod sampler;

#[cfg(feature = "cli")]
pub mod cli;

pub use color::{Channel, Rgb};
pub use error::{DomainViolation, FitError};
pub use eval::{evaluate_preset, evaluate_presets, CurveSample, EvalParams, PresetReport};
pub use fitting::{find_best_ior, FitParams, IorFit};
pub use optics::{fresnel::ReflectanceModel, ior::Ior};
pub use preset::{MetalPreset, BUILTIN_PRESETS};
pub use range::StepRangeExcl;
