use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Default tick label size, in points, when the caller leaves it unspecified.
pub const DEFAULT_LABEL_SIZE: u32 = 12;

/// Rectangle in figure-fraction coordinates (origin at the bottom-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.x0 + self.width
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.y0 + self.height
    }

    /// Pixel box `(left, top, width, height)` on a canvas of `size`, flipping the y axis.
    pub fn to_pixels(&self, size: (u32, u32)) -> (i32, i32, u32, u32) {
        let (w, h) = (size.0 as f64, size.1 as f64);
        let left = (self.x0 * w).round() as i32;
        let top = ((1.0 - self.y1()) * h).round() as i32;
        let width = (self.width * w).round().max(0.0) as u32;
        let height = (self.height * h).round().max(0.0) as u32;
        (left, top, width, height)
    }
}

/// One drawn histogram bar; `facecolor` is rewritten after drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left: f64,
    pub right: f64,
    pub height: f64,
    pub facecolor: RGBColor,
}

/// Histogram drawn into an axes: per-bin counts, bin edges and bar handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
    pub bars: Vec<Bar>,
}

impl Histogram {
    /// Data range covered by the bins.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    /// Height of the tallest bar.
    pub fn max_height(&self) -> f64 {
        self.bars.iter().map(|b| b.height).fold(0.0, f64::max)
    }
}

/// Tick-label configuration for an axes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickParams {
    /// Label font size in points; `None` means [`DEFAULT_LABEL_SIZE`].
    pub labelsize: Option<u32>,
    /// Label color as `#rrggbb` or a gray level like `"0.3"`.
    pub labelcolor: Option<String>,
    /// Preferred number of x tick labels; fitted to the axes width when unset.
    pub nbins: Option<usize>,
    /// Number locale for labels (`en`, `de`, `fr`, ...).
    pub locale: Option<String>,
    /// Hide the x tick labels entirely.
    pub labelbottom: Option<bool>,
}

impl TickParams {
    /// Label size with the default applied.
    pub fn label_size(&self) -> u32 {
        self.labelsize.unwrap_or(DEFAULT_LABEL_SIZE)
    }

    /// Fill in `labelsize` when it was left unspecified.
    pub fn with_default_label_size(mut self) -> Self {
        self.labelsize = Some(self.label_size());
        self
    }

    pub fn show_labels(&self) -> bool {
        self.labelbottom.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_pixels_flip_y() {
        let r = Rect::new(0.1, 0.1, 0.5, 0.25);
        assert_eq!(r.to_pixels((1000, 800)), (100, 520, 500, 200));
    }

    #[test]
    fn tick_params_default_label_size() {
        let t = TickParams::default();
        assert_eq!(t.label_size(), 12);
        let t = TickParams {
            labelsize: Some(8),
            ..TickParams::default()
        };
        assert_eq!(t.with_default_label_size().labelsize, Some(8));
    }

    #[test]
    fn tick_params_from_json() {
        let t: TickParams = serde_json::from_str(r#"{"labelcolor": "0.3"}"#).unwrap();
        assert_eq!(t.labelsize, None);
        assert_eq!(t.labelcolor.as_deref(), Some("0.3"));
        assert!(t.show_labels());
    }
}
