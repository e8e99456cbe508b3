use metalfit_base::{
    evaluate_preset, evaluate_presets, find_best_ior,
    optics::fresnel::{complex_fresnel_rgb, metallic_fresnel},
    EvalParams, FitParams, MetalPreset, Rgb, StepRangeExcl, BUILTIN_PRESETS,
};

const COARSE: FitParams = FitParams {
    ior_range: StepRangeExcl::new(1.001, 10.0, 0.005),
    angle_samples: 100,
};

fn preset(name: &str) -> &'static MetalPreset {
    MetalPreset::find(name).unwrap()
}

#[test]
fn gold() {
    let gold = preset("Gold");
    let report = evaluate_preset(gold, &EvalParams::default()).unwrap();
    assert!((1.0..10.0).contains(&report.ior));
    assert!(report.ior >= 1.001);
    assert!(report.base.r >= 0.92);
    assert!(report.base.r > report.base.g && report.base.r > report.base.b);
    assert_eq!(report.grazing, Rgb::ONE);
    let artist_rmse = report.artist_rmse.unwrap();
    assert!(
        report.metallic_rmse < artist_rmse,
        "metallic {} vs artist {}",
        report.metallic_rmse,
        artist_rmse
    );
    assert_eq!(report.curves.len(), 1599);
}

#[test]
fn silver_and_copper_fit_differently() {
    let silver = preset("Silver").fit(&FitParams::default()).unwrap();
    let copper = preset("Copper").fit(&FitParams::default()).unwrap();
    assert_ne!(silver.ior, copper.ior);
}

#[test]
fn fits_are_deterministic() {
    let gold = preset("Gold");
    let a = find_best_ior(gold.eta, gold.k, &COARSE).unwrap();
    let b = find_best_ior(gold.eta, gold.k, &COARSE).unwrap();
    assert_eq!(a.ior.to_bits(), b.ior.to_bits());
    assert_eq!(a.residual.to_bits(), b.residual.to_bits());
    assert_eq!(a, b);
}

#[test]
fn best_ior_beats_every_candidate() {
    for name in ["Silver", "Copper", "Titanium"] {
        let metal = preset(name);
        let fit = find_best_ior(metal.eta, metal.k, &COARSE).unwrap();
        let base = complex_fresnel_rgb(metal.eta, metal.k, 1.0);
        let grazing = complex_fresnel_rgb(metal.eta, metal.k, 0.0);
        assert!(COARSE.ior_range.range_bound().contains(&fit.ior));
        let n = COARSE.angle_samples;
        for ior in COARSE.ior_range.values() {
            let mut residual = 0.0f64;
            for i in 1..n {
                let c = i as f32 / n as f32;
                let m = metallic_fresnel(base, grazing, ior, c);
                let p = complex_fresnel_rgb(metal.eta, metal.k, c);
                residual += (m - p).iter().map(|d| (d as f64) * (d as f64)).sum::<f64>();
            }
            assert!(
                fit.residual <= residual + 1e-9,
                "{}: IOR {} has residual {} below the fitted {} at {}",
                name,
                ior,
                residual,
                fit.ior,
                fit.residual
            );
        }
    }
}

#[test]
fn degenerate_metal_is_defined() {
    let fit = find_best_ior(Rgb::ZERO, Rgb::ZERO, &COARSE).unwrap();
    assert_eq!(fit.base, Rgb::ONE);
    assert!(fit.residual.is_finite());
}

#[test]
fn every_builtin_preset_fits() {
    let params = EvalParams {
        fit: COARSE,
        display_samples: 200,
    };
    let outcomes = evaluate_presets(&BUILTIN_PRESETS, &params);
    assert_eq!(outcomes.len(), BUILTIN_PRESETS.len());
    for (preset, outcome) in BUILTIN_PRESETS.iter().zip(outcomes) {
        let report = outcome.unwrap();
        assert_eq!(report.name, preset.name);
        assert!(report.base.iter().all(|c| (0.0..=1.0).contains(&c)));
        assert!(report.metallic_rmse.is_finite());
        assert!(report.artist_rmse.is_some());
    }
}
