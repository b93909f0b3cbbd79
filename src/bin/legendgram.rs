use anyhow::{Context, Result, anyhow};
use clap::Parser;
use legendgram::stats::{classify, default_breaks, linspace, percentiles};
use legendgram::{
    Colormap, DiscretePalette, Figure, LegendgramOptions, Palette, Rect, legendgram, viz,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::PathBuf;

/// Map area inside the figure, in figure fractions.
const MAP_RECT: Rect = Rect::new(0.05, 0.05, 0.9, 0.9);

/// Cells whose value lies beyond the last break.
const OUT_OF_SCHEME: RGBColor = RGBColor(200, 200, 200);

#[derive(Parser, Debug)]
#[command(
    name = "legendgram",
    version,
    about = "Render a synthetic choropleth grid with a legendgram inset"
)]
struct Cli {
    /// Output file (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Width of the figure (default 900).
    #[arg(long, default_value_t = 900)]
    width: u32,
    /// Height of the figure (default 700).
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// Number of synthetic observations, one map cell each.
    #[arg(long, default_value_t = 400)]
    samples: usize,
    /// Number of quantile classes. If omitted, the ten default percentile breaks are used.
    #[arg(long)]
    classes: Option<usize>,
    /// Palette: discrete like Viridis_10 / Blues_5, or continuous like viridis.
    #[arg(long)]
    palette: Option<String>,
    /// Legend location, by name ("upper right") or code (1).
    #[arg(long)]
    loc: Option<String>,
    /// Clip the histogram x axis to LOW:HIGH.
    #[arg(long)]
    clip: Option<String>,
    /// Number of histogram bins.
    #[arg(long)]
    bins: Option<usize>,
    /// Draw a frame around the legendgram.
    #[arg(long, default_value_t = false)]
    frame: bool,
    /// JSON file with legendgram options; flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_clip(s: &str) -> Option<(f64, f64)> {
    let (a, b) = s.split_once(':')?;
    let low = a.trim().parse::<f64>().ok()?;
    let high = b.trim().parse::<f64>().ok()?;
    (low < high).then_some((low, high))
}

/// Deterministic right-skewed sample, the usual shape of mapped rates.
fn synthetic_sample(n: usize) -> Vec<f64> {
    const GOLDEN: f64 = 0.618_033_988_749_895;
    (0..n)
        .map(|i| {
            let u = ((i as f64 + 0.5) * GOLDEN).fract();
            100.0 * u * u
        })
        .collect()
}

fn quantile_breaks(values: &[f64], k: usize) -> Result<Vec<f64>> {
    if k == 0 {
        return Err(anyhow!("--classes must be positive"));
    }
    let qs = linspace(100.0 / k as f64, 100.0, k);
    Ok(percentiles(values, &qs)?)
}

/// `Viridis_k` when that name exists, otherwise the continuous viridis map.
fn default_palette(k: usize) -> Palette {
    DiscretePalette::by_name(&format!("Viridis_{k}"))
        .map(Palette::Discrete)
        .unwrap_or_else(|| Palette::Continuous(Colormap::viridis()))
}

fn load_options(cli: &Cli) -> Result<LegendgramOptions> {
    let mut opts = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            LegendgramOptions::from_json_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => LegendgramOptions::default(),
    };
    if let Some(loc) = &cli.loc {
        opts.loc = loc.parse()?;
    }
    if let Some(clip) = &cli.clip {
        opts.clip =
            Some(parse_clip(clip).ok_or_else(|| anyhow!("invalid --clip, expected LOW:HIGH"))?);
    }
    if let Some(bins) = cli.bins {
        opts.bins = bins;
    }
    if cli.frame {
        opts.frameon = true;
    }
    Ok(opts)
}

/// Paint one square cell per observation inside the map rectangle.
fn draw_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    values: &[f64],
    breaks: &[f64],
    pal: &Palette,
) -> Result<()> {
    let (left, top, w, h) = MAP_RECT.to_pixels(root.dim_in_pixel());
    let cols = (values.len() as f64).sqrt().ceil().max(1.0) as usize;
    let rows = values.len().div_ceil(cols).max(1);
    let cell_w = w as f64 / cols as f64;
    let cell_h = h as f64 / rows as f64;
    let k = breaks.len();

    for (i, v) in values.iter().enumerate() {
        let (c, r) = (i % cols, i / cols);
        let x0 = left + (c as f64 * cell_w).round() as i32;
        let y0 = top + (r as f64 * cell_h).round() as i32;
        let x1 = left + ((c + 1) as f64 * cell_w).round() as i32;
        let y1 = top + ((r + 1) as f64 * cell_h).round() as i32;
        let color = match classify(*v, breaks) {
            Some(class) => pal.class_color(class, k),
            None => OUT_OF_SCHEME,
        };
        root.draw(&Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn render<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    fig: &Figure,
    values: &[f64],
    breaks: &[f64],
    pal: &Palette,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    draw_map(&root, values, breaks, pal)?;
    viz::draw_figure(&root, fig)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.width == 0 || cli.height == 0 {
        anyhow::bail!("--width and --height must be positive");
    }
    let opts = load_options(&cli)?;

    let values = synthetic_sample(cli.samples);
    let breaks = match cli.classes {
        Some(k) => quantile_breaks(&values, k)?,
        None => default_breaks(&values)?,
    };
    let pal = match &cli.palette {
        Some(name) => Palette::by_name(name)?,
        None => default_palette(breaks.len()),
    };

    let mut fig = Figure::new(cli.width, cli.height);
    let map_ax = fig.add_axes(MAP_RECT);
    legendgram(&mut fig, map_ax, &values, Some(&breaks), Some(&pal), &opts)?;

    let path_string = cli.out.to_string_lossy().into_owned();
    if cli.out.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (cli.width, cli.height)).into_drawing_area();
        render(root, &fig, &values, &breaks, &pal)?;
    } else {
        let root =
            BitMapBackend::new(path_string.as_str(), (cli.width, cli.height)).into_drawing_area();
        render(root, &fig, &values, &breaks, &pal)?;
    }
    eprintln!("Wrote legendgram to {}", cli.out.display());
    Ok(())
}
