//! legendgram
//!
//! Histogram legends for choropleth maps. A legendgram is a small histogram of the
//! mapped values, placed inside the map's axes, whose bars are colored with the same
//! class colors as the map.
//!
//! ### Features
//! - Default classification: ten percentiles of the data, 1st to 99th
//! - Discrete palettes (`"Viridis_10"`, `"Blues_5"`, custom colors) and continuous colormaps
//! - Placement by legend location (`lower left`, `upper right`, ... or numeric codes)
//! - Render the figure to SVG/PNG, or overlay it on your own plotters drawing area
//!
//! ### Example
//! ```no_run
//! use legendgram::{Figure, LegendgramOptions, Rect, legendgram, viz};
//!
//! let values: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).sin().abs() * 80.0).collect();
//! let mut fig = Figure::new(900, 700);
//! let map_ax = fig.add_axes(Rect::new(0.05, 0.05, 0.9, 0.9));
//! let inset = legendgram(&mut fig, map_ax, &values, None, None, &LegendgramOptions::default())?;
//! fig.axes_mut(inset)?.set_frame_on(true);
//! viz::render_figure(&fig, "legendgram.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod figure;
mod inset;
pub mod location;
pub mod models;
pub mod palette;
pub mod stats;
pub mod viz;

pub use error::LegendgramError;
pub use figure::{Axes, AxesId, Figure};
pub use inset::{DEFAULT_BINS, LegendgramOptions, bucket_breaks, legendgram};
pub use location::{Location, make_location};
pub use models::{Bar, Histogram, Rect, TickParams};
pub use palette::{ColorRange, Colormap, DiscretePalette, Palette};
