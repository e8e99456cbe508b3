use crate::error::RuntimeError;
use args::{CliArgs, EvalOptions, FitOptions, OutputOptions, SubCommand};
use base::{cli, evaluate_preset, evaluate_presets, MetalPreset, PresetReport, Rgb};
use config::Config;
use std::{borrow::Cow, io::Write};

pub(crate) mod args;
mod config;
pub(crate) mod plot;
pub(crate) mod report;

/// Main entry point for the metalfit app.
pub fn run() -> Result<(), RuntimeError> {
    let (args, launch_time) = cli::parse_args::<CliArgs>("metalfit");
    let timestamp = args.common.log_timestamp.then_some(launch_time);
    cli::setup_logging(timestamp, args.common.effective_log_level(), &[])?;

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        SubCommand::Fit(opts) => fit(opts, &config),
        SubCommand::Eval(opts) => eval(opts, &config),
        SubCommand::List => list(&config),
    }
}

fn fit(opts: FitOptions, config: &Config) -> Result<(), RuntimeError> {
    let presets = config.select_presets(&opts.presets)?;
    let params = config.eval_params(&opts.search);
    params.validate()?;
    log::info!(
        "Fitting {} presets, IOR in {}, {} angle samples",
        presets.len(),
        params.fit.ior_range,
        params.fit.angle_samples
    );

    let total = presets.len();
    let (reports, failed) = evaluate_presets(&presets, &params).into_iter().fold(
        (Vec::with_capacity(total), 0),
        |(mut reports, failed), outcome| match outcome {
            Ok(report) => {
                reports.push(report);
                (reports, failed)
            },
            Err(_) => (reports, failed + 1),
        },
    );

    write_outputs(&reports, &opts.output)?;

    if failed > 0 {
        return Err(RuntimeError::PartialFailure { failed, total });
    }
    Ok(())
}

fn eval(opts: EvalOptions, config: &Config) -> Result<(), RuntimeError> {
    let preset = MetalPreset {
        name: Cow::Owned(opts.name),
        eta: triple("eta", &opts.eta)?,
        k: triple("k", &opts.k)?,
    };
    let params = config.eval_params(&opts.search);
    let report = evaluate_preset(&preset, &params)?;
    write_outputs(&[report], &opts.output)
}

fn list(config: &Config) -> Result<(), RuntimeError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{:<10}  {:<28}  {:<28}", "Name", "n", "k")?;
    for preset in config.presets() {
        writeln!(
            out,
            "{:<10}  {:<28}  {:<28}",
            preset.name,
            preset.eta.to_string(),
            preset.k.to_string()
        )?;
    }
    Ok(())
}

/// Builds a spectral triple from exactly three command line values.
fn triple(what: &str, values: &[f32]) -> Result<Rgb, RuntimeError> {
    match values {
        [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
        _ => Err(RuntimeError::InvalidArgument(format!(
            "--{} expects 3 values, got {}",
            what,
            values.len()
        ))),
    }
}

fn write_outputs(reports: &[PresetReport], opts: &OutputOptions) -> Result<(), RuntimeError> {
    match &opts.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            report::write_csv(reports, std::io::BufWriter::new(file))?;
            log::info!("Report written to {}", path.display());
        },
        None => report::write_table(reports, std::io::stdout().lock())?,
    }
    if let Some(dir) = &opts.plot_dir {
        plot::write_plots(reports, dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples() {
        assert_eq!(triple("eta", &[0.1, 0.2, 0.3]).unwrap(), Rgb::new(0.1, 0.2, 0.3));
        assert!(matches!(
            triple("k", &[0.1]),
            Err(RuntimeError::InvalidArgument(msg)) if msg == "--k expects 3 values, got 1"
        ));
    }
}
