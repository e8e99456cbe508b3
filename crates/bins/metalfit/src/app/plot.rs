//! Graphs of the reflectance curves of a fitted preset.
//!
//! The horizontal axis is the cosine of the viewing angle, the vertical axis
//! the reflectance, both in [0, 1]. Each model is drawn once per channel, in
//! the hue of the channel: the metallic model as a solid line, the
//! artist-friendly model short-dashed and the physical curve long-dashed.
//! Dashes follow the sample index, so their length in pixels depends on the
//! display sampling.

use crate::error::RuntimeError;
use base::{Channel, PresetReport, Rgb};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Width and height of a graph in pixels.
pub const PLOT_SIZE: u32 = 800;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const LEGEND: Rgb = Rgb::new(0.1, 0.09, 0.08);

/// Line style of one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stroke {
    /// Half period of the dashes in samples (in pixels for the legend), zero
    /// for a solid line.
    dash: u32,
    /// Amount of the other channels mixed into the hue of a channel; the
    /// lighter, the further from the pure hue.
    tint: f32,
}

impl Stroke {
    const METALLIC: Self = Self { dash: 0, tint: 0.6 };
    const ARTIST: Self = Self { dash: 6, tint: 0.4 };
    const COMPLEX: Self = Self { dash: 20, tint: 0.0 };

    fn is_drawn(&self, i: u32) -> bool { self.dash == 0 || (i / self.dash) & 1 == 0 }

    /// Colour of the curve of a channel.
    fn color(&self, channel: Channel) -> Rgb {
        let mut color = Rgb::splat(self.tint);
        color[channel] = 1.0;
        color
    }
}

fn to_pixel(color: Rgb) -> image::Rgb<u8> {
    image::Rgb([color.r, color.g, color.b].map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
}

/// Row of a reflectance value, the top row being reflectance 1.
fn row_of(value: f32, height: u32) -> u32 {
    let v = value.clamp(0.0, 1.0);
    height - 1 - (v * (height - 1) as f32).floor() as u32
}

/// Column of a cosine.
fn column_of(cos_theta: f32, width: u32) -> u32 {
    ((cos_theta.clamp(0.0, 1.0) * width as f32) as u32).min(width - 1)
}

/// Draws the samples of a curve, each given with its index in the report.
fn draw_curve<'a>(
    image: &mut RgbImage,
    points: impl Iterator<Item = (usize, f32, &'a Rgb)>,
    stroke: Stroke,
) {
    let (width, height) = image.dimensions();
    for (i, cos_theta, value) in points {
        if !stroke.is_drawn(i as u32) {
            continue;
        }
        let xs = column_of(cos_theta, width);
        for channel in Channel::ALL {
            image.put_pixel(xs, row_of(value[channel], height), to_pixel(stroke.color(channel)));
        }
    }
}

/// Short stroke in the legend colour at the top left, one row per model.
fn draw_legend(image: &mut RgbImage) {
    let pixel = to_pixel(LEGEND);
    for (i, stroke) in [Stroke::METALLIC, Stroke::ARTIST, Stroke::COMPLEX]
        .into_iter()
        .enumerate()
    {
        let ys = 10 + 10 * i as u32;
        for xs in 10..110 {
            if stroke.is_drawn(xs) {
                image.put_pixel(xs, ys, pixel);
            }
        }
    }
}

/// Renders the three curves of a report.
pub fn render(report: &PresetReport, size: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(size, size, image::Rgb(BACKGROUND));
    let curves = &report.curves;
    draw_curve(
        &mut image,
        curves.iter().enumerate().map(|(i, s)| (i, s.cos_theta, &s.metallic)),
        Stroke::METALLIC,
    );
    draw_curve(
        &mut image,
        curves
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.artist.as_ref().map(|a| (i, s.cos_theta, a))),
        Stroke::ARTIST,
    );
    draw_curve(
        &mut image,
        curves.iter().enumerate().map(|(i, s)| (i, s.cos_theta, &s.complex)),
        Stroke::COMPLEX,
    );
    if size > 110 {
        draw_legend(&mut image);
    }
    image
}

/// File name of the graph of a preset.
pub fn file_name(name: &str) -> String {
    let stem = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>();
    format!("{}.png", stem)
}

/// Writes the graph of every report into `dir` and returns the written paths.
pub fn write_plots(reports: &[PresetReport], dir: &Path) -> Result<Vec<PathBuf>, RuntimeError> {
    std::fs::create_dir_all(dir)?;
    reports
        .iter()
        .map(|report| {
            let path = dir.join(file_name(&report.name));
            render(report, PLOT_SIZE).save(&path)?;
            log::info!("Plot of {} written to {}", report.name, path.display());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::CurveSample;

    #[test]
    fn axes() {
        assert_eq!(row_of(1.0, 800), 0);
        assert_eq!(row_of(0.0, 800), 799);
        assert_eq!(row_of(2.0, 800), 0);
        assert_eq!(column_of(0.0, 800), 0);
        assert_eq!(column_of(1.0, 800), 799);
        assert_eq!(column_of(0.5, 800), 400);
    }

    #[test]
    fn strokes() {
        assert!((0..100).all(|xs| Stroke::METALLIC.is_drawn(xs)));
        assert!(Stroke::ARTIST.is_drawn(5) && !Stroke::ARTIST.is_drawn(6));
        assert!(Stroke::COMPLEX.is_drawn(19) && !Stroke::COMPLEX.is_drawn(20));
        assert_eq!(Stroke::METALLIC.color(Channel::Green), Rgb::new(0.6, 1.0, 0.6));
        assert_eq!(Stroke::COMPLEX.color(Channel::Blue), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn renders_curves() {
        let report = PresetReport {
            name: "Flat".to_string(),
            base: Rgb::splat(0.5),
            grazing: Rgb::ONE,
            ior: 1.5,
            residual: 0.0,
            metallic_rmse: 0.0,
            artist_rmse: None,
            curves: vec![CurveSample {
                cos_theta: 0.2,
                complex: Rgb::new(0.0, 0.5, 1.0),
                metallic: Rgb::splat(0.25),
                artist: None,
            }],
        };
        let img = render(&report, 200);
        assert_eq!(img.dimensions(), (200, 200));
        assert_eq!(img.get_pixel(40, 0), &image::Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(40, 100), &image::Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(40, 199), &image::Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(40, 150), &image::Rgb([153, 153, 255]));
        assert_eq!(img.get_pixel(150, 150), &image::Rgb(BACKGROUND));
        assert_eq!(img.get_pixel(10, 10), &to_pixel(LEGEND));
    }

    #[test]
    fn dashes_follow_sample_index() {
        let cosines = [0.9, 0.9, 0.9, 0.9, 0.9, 0.2, 0.6];
        let report = PresetReport {
            name: "Dashed".to_string(),
            base: Rgb::splat(0.5),
            grazing: Rgb::ONE,
            ior: 1.5,
            residual: 0.0,
            metallic_rmse: 0.0,
            artist_rmse: Some(0.0),
            curves: cosines
                .iter()
                .map(|&cos_theta| CurveSample {
                    cos_theta,
                    complex: Rgb::new(0.0, 0.5, 1.0),
                    metallic: Rgb::splat(0.25),
                    artist: Some(Rgb::splat(0.75)),
                })
                .collect(),
        };
        let img = render(&report, 200);
        // Sample 5 lands on column 40, sample 6 on column 120; both columns
        // fall inside a dash of the artist stroke.
        assert_eq!(img.get_pixel(40, 50), &image::Rgb([102, 102, 255]));
        assert_eq!(img.get_pixel(120, 50), &image::Rgb(BACKGROUND));
        assert_eq!(img.get_pixel(120, 150), &image::Rgb([153, 153, 255]));
        assert_eq!(img.get_pixel(120, 0), &image::Rgb([0, 0, 255]));
    }

    #[test]
    fn file_names() {
        assert_eq!(file_name("Gold"), "gold.png");
        assert_eq!(file_name("Rose Gold/2"), "rose_gold_2.png");
    }
}
