use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters_backend::DrawingBackend;

use super::text::{glyph_scale, text_extent, GlyphTextBackend};
use crate::data::model::Group;
use crate::error::ReportError;

/// Canvas and axis text shared by every chart of a run.
#[derive(Debug, Clone)]
pub struct ChartStyle<'a> {
    pub width: u32,
    pub height: u32,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Render `group` and write it to `<output_dir>/graph_<label>.png`,
/// replacing any existing file. Nothing is written for an empty group.
pub fn render_group(group: &Group, style: &ChartStyle<'_>, output_dir: &Path) -> Result<PathBuf> {
    let mean = group.mean().ok_or_else(|| ReportError::EmptyGroup {
        label: group.label.clone(),
    })?;
    log::debug!("Group {}: {} samples, mean {}", group.label, group.len(), mean);

    let pixels = draw_chart(group, mean, style)?;
    let image = RgbImage::from_raw(style.width, style.height, pixels).ok_or_else(|| {
        ReportError::Draw {
            label: group.label.clone(),
            message: "pixel buffer does not match canvas size".to_string(),
        }
    })?;

    let path = output_dir.join(group.file_name());
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ReportError::OutputWrite {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Text of the mean annotation.
pub fn mean_label(mean: f64) -> String {
    format!("Mean: {}", format_mean(mean))
}

/// Shortest round-trip text for `value`, always with a fractional part or
/// an exponent (`2.0`, `0.125`, `1.2e-05`).
pub fn format_mean(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{value:e}");
        if let Some((mantissa, exponent)) = sci.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
        return sci;
    }

    let plain = format!("{value}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_chart(group: &Group, mean: f64, style: &ChartStyle<'_>) -> Result<Vec<u8>, ReportError> {
    let mut pixels = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let backend = BitMapBackend::with_buffer(&mut pixels, (style.width, style.height));
        let root = GlyphTextBackend::new(backend).into_drawing_area();
        plot(&root, group, mean, style).map_err(|e| ReportError::Draw {
            label: group.label.clone(),
            message: e.to_string(),
        })?;
    }
    Ok(pixels)
}

fn plot<DB>(
    root: &DrawingArea<DB, Shift>,
    group: &Group,
    mean: f64,
    style: &ChartStyle<'_>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("Graph {}", group.label), ("sans-serif", 24.0).into_font())
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_axis_range(group.len()), y_axis_range(&group.values))?;

    chart
        .configure_mesh()
        .x_desc(style.x_label)
        .y_desc(style.y_label)
        .axis_desc_style(("sans-serif", 16.0).into_font())
        .label_style(("sans-serif", 12.0).into_font())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format_tick(*v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        group
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v)),
        group.color.stroke_width(2),
    ))?;

    let label = mean_label(mean);
    let (w, h) = root.dim_in_pixel();
    let (anchor, font_size) = annotation_layout(&label, w, h);
    root.draw(&Text::new(
        label,
        anchor,
        ("sans-serif", font_size).into_font().color(&BLACK),
    ))?;

    root.present()?;
    Ok(())
}

const ANNOTATION_FONT_SIZE: f64 = 16.0;
const ANNOTATION_MARGIN: i32 = 10;

/// Position and font size of the mean annotation.
///
/// Nominally at 60 % of the width and 20 % from the top. Long text shrinks
/// to the largest glyph scale that fits and shifts left so it stays on the
/// canvas.
fn annotation_layout(label: &str, w: u32, h: u32) -> ((i32, i32), f64) {
    let (w, h) = (w as i32, h as i32);
    let room = (w - 2 * ANNOTATION_MARGIN).max(0);

    let mut scale = glyph_scale(ANNOTATION_FONT_SIZE);
    while scale > 1 && text_extent(label, scale).0 > room {
        scale -= 1;
    }
    let width = text_extent(label, scale).0;

    let preferred = (w as f64 * 0.6) as i32;
    let x = preferred.min(w - ANNOTATION_MARGIN - width).max(0);
    let y = (h as f64 * 0.2) as i32;
    ((x, y), scale as f64 * 9.0)
}

/// Sample positions `0..=len-1`; a lone sample still gets a unit-wide axis.
fn x_axis_range(len: usize) -> Range<f64> {
    0.0..len.saturating_sub(1).max(1) as f64
}

/// Largest magnitude an axis bound may take; keeps `end - start` finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

/// Value range with a 5 % margin; flat or non-finite data gets a fixed pad.
/// Bounds are clamped to `±AXIS_LIMIT`, so samples near `f64::MAX` are
/// clipped rather than producing an infinite axis.
fn y_axis_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }

    let pad = if max > min {
        max * 0.05 - min * 0.05
    } else if max != 0.0 {
        max.abs() * 0.05
    } else {
        1.0
    };
    let lo = (min - pad).clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = (max + pad).clamp(-AXIS_LIMIT, AXIS_LIMIT);
    if lo < hi {
        lo..hi
    } else if hi > 0.0 {
        hi * 0.5..hi
    } else {
        lo..lo * 0.5
    }
}

fn format_tick(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-2..1e4).contains(&magnitude) {
        format!("{v:.1e}")
    } else {
        format!("{v:.2}")
    }
}
