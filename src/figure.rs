//! Retained figure model: a canvas holding axes placed in figure-fraction coordinates.
//!
//! Nothing is drawn until the figure is handed to [`crate::viz`].

use plotters::style::RGBColor;

use crate::error::{LegendgramError, Result};
use crate::models::{Bar, Histogram, Rect, TickParams};
use crate::stats;

/// Relative padding added around the data range when x limits are autoscaled.
pub const X_MARGIN: f64 = 0.05;
/// Relative headroom above the tallest bar when y limits are autoscaled.
pub const Y_HEADROOM: f64 = 0.05;

/// Handle to an axes of a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A plotting region inside a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    position: Rect,
    histogram: Option<Histogram>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    frame_on: bool,
    x_axis_visible: bool,
    y_axis_visible: bool,
    tick_params: TickParams,
}

impl Axes {
    pub fn new(position: Rect) -> Self {
        Self {
            position,
            histogram: None,
            xlim: None,
            ylim: None,
            frame_on: true,
            x_axis_visible: true,
            y_axis_visible: true,
            tick_params: TickParams::default(),
        }
    }

    pub fn position(&self) -> Rect {
        self.position
    }

    /// Draw a histogram of `values` with `bins` equal-width bins, all bars in `color`.
    ///
    /// Replaces any histogram previously drawn into this axes.
    pub fn hist(&mut self, values: &[f64], bins: usize, color: RGBColor) -> Result<&mut Histogram> {
        let binned = stats::histogram(values, bins)?;
        let bars = binned
            .counts
            .iter()
            .zip(binned.edges.windows(2))
            .map(|(&count, edge)| Bar {
                left: edge[0],
                right: edge[1],
                height: count as f64,
                facecolor: color,
            })
            .collect();
        Ok(self.histogram.insert(Histogram {
            counts: binned.counts,
            edges: binned.edges,
            bars,
        }))
    }

    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    pub fn histogram_mut(&mut self) -> Option<&mut Histogram> {
        self.histogram.as_mut()
    }

    /// Current x limits: explicit ones, else the histogram range padded by [`X_MARGIN`].
    pub fn xlim(&self) -> (f64, f64) {
        if let Some(lim) = self.xlim {
            return lim;
        }
        match self.histogram.as_ref().and_then(Histogram::span) {
            Some((lo, hi)) => {
                let pad = (hi - lo) * X_MARGIN;
                (lo - pad, hi + pad)
            }
            None => (0.0, 1.0),
        }
    }

    pub fn set_xlim(&mut self, low: f64, high: f64) {
        self.xlim = Some((low, high));
    }

    /// Current y limits: explicit ones, else zero up to the tallest bar plus headroom.
    pub fn ylim(&self) -> (f64, f64) {
        if let Some(lim) = self.ylim {
            return lim;
        }
        let top = self.histogram.as_ref().map_or(0.0, Histogram::max_height);
        if top > 0.0 {
            (0.0, top * (1.0 + Y_HEADROOM))
        } else {
            (0.0, 1.0)
        }
    }

    pub fn set_ylim(&mut self, low: f64, high: f64) {
        self.ylim = Some((low, high));
    }

    pub fn frame_on(&self) -> bool {
        self.frame_on
    }

    pub fn set_frame_on(&mut self, on: bool) {
        self.frame_on = on;
    }

    pub fn x_axis_visible(&self) -> bool {
        self.x_axis_visible
    }

    pub fn set_x_axis_visible(&mut self, visible: bool) {
        self.x_axis_visible = visible;
    }

    pub fn y_axis_visible(&self) -> bool {
        self.y_axis_visible
    }

    pub fn set_y_axis_visible(&mut self, visible: bool) {
        self.y_axis_visible = visible;
    }

    pub fn tick_params(&self) -> &TickParams {
        &self.tick_params
    }

    pub fn set_tick_params(&mut self, params: TickParams) {
        self.tick_params = params;
    }
}

/// A canvas of `size` pixels with axes drawn in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: (u32, u32),
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            axes: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Add an axes at `position` (figure fractions) and return its handle.
    pub fn add_axes(&mut self, position: Rect) -> AxesId {
        self.push_axes(Axes::new(position))
    }

    /// Add an already configured axes.
    pub fn push_axes(&mut self, axes: Axes) -> AxesId {
        self.axes.push(axes);
        AxesId(self.axes.len() - 1)
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        self.axes
            .get(id.0)
            .ok_or(LegendgramError::UnknownAxes(id))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.axes
            .get_mut(id.0)
            .ok_or(LegendgramError::UnknownAxes(id))
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxesId, &Axes)> {
        self.axes.iter().enumerate().map(|(i, a)| (AxesId(i), a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::DEFAULT_BAR_COLOR;

    #[test]
    fn hist_builds_one_bar_per_bin() {
        let mut ax = Axes::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        let h = ax
            .hist(&[0.0, 1.0, 1.0, 2.0], 2, DEFAULT_BAR_COLOR)
            .unwrap();
        assert_eq!(h.bars.len(), 2);
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0]);
        assert_eq!(h.bars[0].height, 1.0);
        assert_eq!(h.bars[1].height, 3.0);
        assert_eq!(h.bars[1].left, 1.0);
    }

    #[test]
    fn autoscaled_limits_pad_histogram() {
        let mut ax = Axes::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(ax.xlim(), (0.0, 1.0));
        ax.hist(&[0.0, 10.0], 5, DEFAULT_BAR_COLOR).unwrap();
        assert_eq!(ax.xlim(), (-0.5, 10.5));
        assert_eq!(ax.ylim(), (0.0, 1.05));
        ax.set_xlim(2.0, 3.0);
        assert_eq!(ax.xlim(), (2.0, 3.0));
    }

    #[test]
    fn unknown_axes_is_an_error() {
        let mut fig = Figure::new(100, 100);
        let id = fig.add_axes(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(fig.axes(id).is_ok());
        assert!(matches!(
            fig.axes(AxesId(5)),
            Err(LegendgramError::UnknownAxes(_))
        ));
    }
}
