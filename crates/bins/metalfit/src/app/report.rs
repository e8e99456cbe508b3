//! Tabular reports of the fitted presets.

use crate::error::RuntimeError;
use base::{PresetReport, Rgb};
use serde::Serialize;
use std::io::Write;

/// Encodes a linear value with the sRGB transfer function (IEC 61966-2-1).
/// The input is clamped to [0, 1].
pub fn linear_to_srgb(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Scales a linear reflectance to [0, 255], rounding down.
pub fn to_byte(v: f32) -> u8 { (v.clamp(0.0, 1.0) * 255.0).floor() as u8 }

/// Display encoded colour as a web hex string `#rrggbb`.
pub fn to_web_hex(color: Rgb) -> String {
    let [r, g, b] = [color.r, color.g, color.b].map(|v| (linear_to_srgb(v) * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// One line of the CSV report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<'a> {
    pub name: &'a str,
    pub base_r: u8,
    pub base_g: u8,
    pub base_b: u8,
    pub grazing_r: u8,
    pub grazing_g: u8,
    pub grazing_b: u8,
    pub ior: f32,
    pub base_srgb: String,
    pub metallic_rmse: f64,
    pub artist_rmse: Option<f64>,
}

impl<'a> From<&'a PresetReport> for ReportRow<'a> {
    fn from(report: &'a PresetReport) -> Self {
        Self {
            name: &report.name,
            base_r: to_byte(report.base.r),
            base_g: to_byte(report.base.g),
            base_b: to_byte(report.base.b),
            grazing_r: to_byte(report.grazing.r),
            grazing_g: to_byte(report.grazing.g),
            grazing_b: to_byte(report.grazing.b),
            ior: report.ior,
            base_srgb: to_web_hex(report.base),
            metallic_rmse: report.metallic_rmse,
            artist_rmse: report.artist_rmse,
        }
    }
}

/// Writes the reports as CSV with a header line.
pub fn write_csv<W: Write>(reports: &[PresetReport], writer: W) -> Result<(), RuntimeError> {
    let mut writer = csv::Writer::from_writer(writer);
    for report in reports {
        writer.serialize(ReportRow::from(report))?;
    }
    writer.flush()?;
    Ok(())
}

/// Prints the reports as an aligned table.
pub fn write_table<W: Write>(reports: &[PresetReport], mut writer: W) -> Result<(), RuntimeError> {
    let width = reports
        .iter()
        .map(|report| report.name.len())
        .max()
        .unwrap_or(0)
        .max(4);
    writeln!(
        writer,
        "{:<width$}  {:>13}  {:>13}  {:>6}  {:>7}  {:>9}  {:>9}",
        "Name",
        "Base",
        "Grazing",
        "IOR",
        "sRGB",
        "Metallic",
        "Artist",
        width = width
    )?;
    for report in reports {
        let row = ReportRow::from(report);
        let artist = row
            .artist_rmse
            .map(|err| format!("{:.6}", err))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            writer,
            "{:<width$}  {:>3}, {:>3}, {:>3}  {:>3}, {:>3}, {:>3}  {:>6.3}  {:>7}  {:>9.6}  {:>9}",
            row.name,
            row.base_r,
            row.base_g,
            row.base_b,
            row.grazing_r,
            row.grazing_g,
            row.grazing_b,
            row.ior,
            row.base_srgb,
            row.metallic_rmse,
            artist,
            width = width
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn report() -> PresetReport {
        PresetReport {
            name: "Gold".to_string(),
            base: Rgb::new(1.0, 0.5, 0.0),
            grazing: Rgb::ONE,
            ior: 1.5,
            residual: 0.25,
            metallic_rmse: 0.125,
            artist_rmse: None,
            curves: Vec::new(),
        }
    }

    #[test]
    fn srgb_transfer() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert_abs_diff_eq!(linear_to_srgb(1.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(linear_to_srgb(0.002), 0.02584, epsilon = 1e-6);
        assert_abs_diff_eq!(linear_to_srgb(0.5), 0.735357, epsilon = 1e-5);
        assert_eq!(linear_to_srgb(-1.0), 0.0);
        assert_eq!(to_web_hex(Rgb::new(1.0, 0.5, 0.0)), "#ffbc00");
        assert_eq!(to_web_hex(Rgb::splat(2.0)), "#ffffff");
    }

    #[test]
    fn bytes_round_down() {
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(0.999), 254);
        assert_eq!(to_byte(0.5), 127);
        assert_eq!(to_byte(-0.1), 0);
    }

    #[test]
    fn csv_report() {
        let mut out = Vec::new();
        write_csv(&[report()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,base_r,base_g,base_b,grazing_r,grazing_g,grazing_b,ior,base_srgb,metallic_rmse,\
             artist_rmse"
        );
        assert_eq!(lines.next().unwrap(), "Gold,255,127,0,255,255,255,1.5,#ffbc00,0.125,");
        assert!(lines.next().is_none());
    }

    #[test]
    fn table_report() {
        let mut out = Vec::new();
        write_table(&[report()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("Gold  255, 127,   0  255, 255, 255   1.500  #ffbc00"));
        assert!(row.ends_with("-"));
    }
}
