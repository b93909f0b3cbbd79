//! Rendering: draw a [`Figure`] to **SVG** or **PNG**, or onto any plotters drawing area.
//!
//! - Histogram axes: filled bars in their class colors, clipped to the x limits
//! - Locale-aware tick labels (`30,000` vs `30.000`), label count fitted to the axes width
//! - Optional frame and y axis, as configured on each axes
//!
//! Draw your map onto the root area first, then call [`draw_figure`] to overlay the axes.

pub mod text;
pub mod util;

use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use crate::figure::{Axes, Figure};
use crate::models::Histogram;
use crate::palette::parse_color;
use text::estimate_text_width_px;
use util::{fit_label_count, format_tick, map_locale};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Gap between tick labels and the axes box, in pixels.
const LABEL_PAD_PX: u32 = 8;

/// Render `fig` to `out_path`: `.svg` uses the SVG backend, anything else a bitmap.
pub fn render_figure<P: AsRef<Path>>(fig: &Figure, out_path: P) -> Result<()> {
    let (width, height) = fig.size();
    if width == 0 || height == 0 {
        return Err(anyhow!("figure has no area ({width}x{height})"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        draw_figure(&root, fig)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        draw_figure(&root, fig)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    log::debug!("rendered {} axes to {}", fig.len(), out_path.display());
    Ok(())
}

/// Draw every axes of `fig` onto `root`, in insertion order.
///
/// Axes positions are fractions of `root`, so the area need not match `fig.size()`.
pub fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, fig: &Figure) -> Result<()> {
    ensure_fonts_registered();
    for (id, ax) in fig.iter() {
        match ax.histogram() {
            Some(hist) => draw_histogram_axes(root, ax, hist),
            None => draw_plain_axes(root, ax),
        }
        .map_err(|e| anyhow!("axes {}: {e}", id.index()))?;
    }
    Ok(())
}

fn draw_plain_axes<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, ax: &Axes) -> Result<()> {
    if !ax.frame_on() {
        return Ok(());
    }
    let (left, top, w, h) = ax.position().to_pixels(root.dim_in_pixel());
    root.draw(&Rectangle::new(
        [(left, top), (left + w as i32, top + h as i32)],
        BLACK.stroke_width(1),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_histogram_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    ax: &Axes,
    hist: &Histogram,
) -> Result<()> {
    let (x0, x1) = ax.xlim();
    let (y0, y1) = ax.ylim();
    if !(x1 > x0) || !(y1 > y0) {
        return Err(anyhow!("empty axis range x=({x0}, {x1}) y=({y0}, {y1})"));
    }

    let params = ax.tick_params();
    let font_px = params.label_size();
    let label_color = match params.labelcolor.as_deref() {
        Some(c) => parse_color(c)?,
        None => BLACK,
    };
    let locale = map_locale(params.locale.as_deref().unwrap_or("en"));
    let show_x = ax.x_axis_visible() && params.show_labels();

    // Labels sit outside the axes box, so grow the area to the left and below.
    let (root_w, root_h) = root.dim_in_pixel();
    let (left, top, w, h) = ax.position().to_pixels((root_w, root_h));
    let bottom_px = if show_x { font_px + LABEL_PAD_PX } else { 0 };
    let left_px = if ax.y_axis_visible() {
        estimate_text_width_px(&format_tick(y1, locale), font_px) + LABEL_PAD_PX
    } else {
        0
    };
    let area_left = (left - left_px as i32).max(0);
    let area_top = top.max(0);
    let area_w = (w + left_px).min(root_w.saturating_sub(area_left as u32));
    let area_h = (h + bottom_px).min(root_h.saturating_sub(area_top as u32));
    let area = root
        .clone()
        .shrink((area_left, area_top), (area_w, area_h));

    let mut chart = ChartBuilder::on(&area)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_px)
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_labels = params
        .nbins
        .unwrap_or_else(|| fit_label_count(x0, x1, w, font_px, locale));
    let x_fmt = |v: &f64| format_tick(*v, locale);
    let label_style = TextStyle::from((FontFamily::SansSerif, font_px)).color(&label_color);

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(x_labels)
            .x_label_formatter(&x_fmt)
            .label_style(label_style)
            .axis_style(BLACK.mix(if ax.frame_on() { 1.0 } else { 0.0 }));
        if !show_x {
            mesh.disable_x_axis();
        }
        if !ax.y_axis_visible() {
            mesh.disable_y_axis();
        }
        mesh.draw().map_err(|e| anyhow!("{:?}", e))?;
    }

    chart
        .draw_series(hist.bars.iter().filter_map(|b| {
            let l = b.left.max(x0);
            let r = b.right.min(x1);
            let top = b.height.min(y1);
            (r > l && top > y0).then(|| Rectangle::new([(l, y0), (r, top)], b.facecolor.filled()))
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    if ax.frame_on() {
        chart
            .plotting_area()
            .draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
