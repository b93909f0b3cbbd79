//! The legendgram: a histogram inset whose bars carry the map's class colors.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LegendgramError, Result};
use crate::figure::{Axes, AxesId, Figure};
use crate::location::{DEFAULT_LEGEND_SIZE, Location, make_location};
use crate::models::{Histogram, TickParams};
use crate::palette::{self, Colormap, DiscretePalette, Palette};
use crate::stats::{default_breaks, searchsorted_left};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 50;

/// Everything about a legendgram that is not data: binning, placement and cosmetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendgramOptions {
    /// Number of histogram bins.
    pub bins: usize,
    /// Fixed x range of the histogram, `(low, high)`.
    pub clip: Option<(f64, f64)>,
    /// Where the inset sits inside the parent axes.
    pub loc: Location,
    /// Inset (width, height) as fractions of the parent axes.
    pub legend_size: (f64, f64),
    /// Draw a frame around the inset.
    pub frameon: bool,
    pub tick_params: TickParams,
    /// Color of bars outside every class, as `#rrggbb` or a gray level.
    pub bar_color: String,
}

impl Default for LegendgramOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            clip: None,
            loc: Location::default(),
            legend_size: DEFAULT_LEGEND_SIZE,
            frameon: false,
            tick_params: TickParams::default(),
            bar_color: "0.1".to_string(),
        }
    }
}

impl LegendgramOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Resolve the class breaks and the colormap used to paint them.
///
/// With neither breaks nor palette the ten-class viridis palette is used. A discrete
/// palette must have exactly one color per break.
fn resolve_classes(
    y: &[f64],
    breaks: Option<&[f64]>,
    pal: Option<&Palette>,
) -> Result<(Vec<f64>, Colormap)> {
    let fallback;
    let pal = match (pal, breaks) {
        (Some(p), _) => Some(p),
        (None, None) => {
            fallback = Palette::Discrete(DiscretePalette::viridis_10());
            Some(&fallback)
        }
        (None, Some(_)) => None,
    };
    let breaks = match breaks {
        Some(b) => b.to_vec(),
        None => default_breaks(y)?,
    };
    let k = breaks.len();

    let cmap = match pal {
        Some(Palette::Discrete(p)) => {
            if p.number() != k {
                return Err(LegendgramError::ClassCountMismatch {
                    breaks: k,
                    colors: p.number(),
                });
            }
            p.colormap()
        }
        Some(Palette::Continuous(c)) => c.clone(),
        None => return Err(LegendgramError::UnrecognizedPalette("none".into())),
    };
    Ok((breaks, cmap))
}

/// Bar index at which each class starts: `0`, then the first bin edge at or past each break.
///
/// Class `c` owns bars `bounds[c]..bounds[c + 1]`.
pub fn bucket_breaks(edges: &[f64], breaks: &[f64]) -> Vec<usize> {
    std::iter::once(0)
        .chain(breaks.iter().map(|&b| searchsorted_left(edges, b)))
        .collect()
}

/// Paint the bars of `hist` class by class; bars past the last break keep their color.
fn color_bars(hist: &mut Histogram, breaks: &[f64], cmap: &Colormap) {
    let bounds = bucket_breaks(&hist.edges, breaks);
    debug!("bucket break indices: {:?}", bounds);
    let n_bars = hist.bars.len();
    let k = breaks.len();
    for c in 0..k {
        let (start, end) = (bounds[c], bounds[c + 1]);
        if end > n_bars {
            warn!(
                "break {} lies beyond the histogram range; class {} stops at the last bar",
                breaks[c], c
            );
        }
        let color = palette::class_color(cmap, c, k);
        for bar in hist.bars.iter_mut().take(end).skip(start) {
            bar.facecolor = color;
        }
    }
}

/// Add a legendgram for sample `y` to `fig`, inside parent axes `ax`.
///
/// - `breaks`: class upper bounds; ten percentiles (1st to 99th) of `y` when `None`
/// - `pal`: class colors; must have one color per break when discrete. With neither
///   breaks nor palette, ten-class viridis is used.
///
/// The palette is validated before anything is added, so a failed call leaves `fig`
/// unchanged. Returns the new inset axes.
///
/// ```
/// use legendgram::{Figure, LegendgramOptions, Palette, Rect, legendgram};
///
/// let mut fig = Figure::new(800, 600);
/// let map = fig.add_axes(Rect::new(0.05, 0.05, 0.9, 0.9));
/// let y: Vec<f64> = (1..=100).map(f64::from).collect();
/// let pal = Palette::by_name("Blues_4")?;
/// let inset = legendgram(
///     &mut fig,
///     map,
///     &y,
///     Some(&[25.0, 50.0, 75.0, 100.0]),
///     Some(&pal),
///     &LegendgramOptions::default(),
/// )?;
/// assert!(!fig.axes(inset)?.y_axis_visible());
/// # Ok::<(), legendgram::LegendgramError>(())
/// ```
pub fn legendgram(
    fig: &mut Figure,
    ax: AxesId,
    y: &[f64],
    breaks: Option<&[f64]>,
    pal: Option<&Palette>,
    opts: &LegendgramOptions,
) -> Result<AxesId> {
    let (breaks, cmap) = resolve_classes(y, breaks, pal)?;
    debug!("{} classes, breaks {:?}, colormap {}", breaks.len(), breaks, cmap.name());

    let bar_color = palette::parse_color(&opts.bar_color)?;
    if let Some((low, high)) = opts.clip
        && !(low.is_finite() && high.is_finite() && low < high)
    {
        return Err(LegendgramError::InvalidClip(low, high));
    }
    let parent = fig.axes(ax)?.position();
    let histpos = make_location(parent, opts.loc, opts.legend_size)?;
    debug!("legendgram at {:?} ({})", histpos, opts.loc);

    // Bin before touching the figure so bad samples leave it as it was.
    let mut histax = Axes::new(histpos);
    let hist = histax.hist(y, opts.bins, bar_color)?;
    color_bars(hist, &breaks, &cmap);

    if let Some((low, high)) = opts.clip {
        histax.set_xlim(low, high);
    }
    histax.set_frame_on(opts.frameon);
    histax.set_y_axis_visible(false);
    histax.set_tick_params(opts.tick_params.clone().with_default_label_size());
    Ok(fig.push_axes(histax))
}
