//! Color palettes: discrete (fixed class count) and continuous colormaps.
//!
//! - [`Colormap`]: colors parametrized by `t` in \[0, 1\], sampled through a 256-entry
//!   lookup table like matplotlib colormaps.
//! - [`DiscretePalette`]: a named list of class colors; its [`DiscretePalette::colormap`]
//!   interpolates linearly through them.
//! - [`Palette`]: either of the two, as accepted by [`crate::legendgram()`].
//!
//! Color data comes from `color-brewery`: matplotlib `viridis`, `magma`, `inferno`,
//! `plasma` and every Brewer scheme (`Blues_3` ..= `Blues_9`, `RdBu_11`, `Set3_12`, ...).

use color_brewery::{Palette as Scheme, PaletteIter, RGBColor as _};
use plotters::style::RGBColor;
use rgb::RGBA;
use serde_json::Value;

use crate::error::{LegendgramError, Result};

pub use color_brewery::ColorRange;

/// Lookup table size used when sampling a colormap.
pub const LUT_SIZE: usize = 256;

/// Largest class count accepted for matplotlib names (`"Viridis_20"`).
pub const MAX_NAMED_CLASSES: usize = 20;

/// Bar color used before classification: matplotlib's gray level `'0.1'`.
pub const DEFAULT_BAR_COLOR: RGBColor = RGBColor(26, 26, 26);

type Rgba = RGBA<f64>;

/// Matplotlib maps: (lowercase key, display name, 256-color table).
const MATPLOTLIB: [(&str, &str, fn() -> Scheme<Rgba>); 4] = [
    ("viridis", "Viridis", Rgba::viridis),
    ("magma", "Magma", Rgba::magma),
    ("inferno", "Inferno", Rgba::inferno),
    ("plasma", "Plasma", Rgba::plasma),
];

/// Brewer schemes: (lowercase key, display name, one table per class count).
const BREWER: [(&str, &str, fn() -> PaletteIter<Rgba>); 35] = [
    ("ylgn", "YlGn", Rgba::ylgn),
    ("ylgnbu", "YlGnBu", Rgba::ylgnbu),
    ("gnbu", "GnBu", Rgba::gnbu),
    ("bugn", "BuGn", Rgba::bugn),
    ("pubugn", "PuBuGn", Rgba::pubugn),
    ("pubu", "PuBu", Rgba::pubu),
    ("bupu", "BuPu", Rgba::bupu),
    ("rdpu", "RdPu", Rgba::rdpu),
    ("purd", "PuRd", Rgba::purd),
    ("orrd", "OrRd", Rgba::orrd),
    ("ylorrd", "YlOrRd", Rgba::ylorrd),
    ("ylorbr", "YlOrBr", Rgba::ylorbr),
    ("purples", "Purples", Rgba::purples),
    ("blues", "Blues", Rgba::blues),
    ("greens", "Greens", Rgba::greens),
    ("oranges", "Oranges", Rgba::oranges),
    ("reds", "Reds", Rgba::reds),
    ("greys", "Greys", Rgba::greys),
    ("puor", "PuOr", Rgba::puor),
    ("brbg", "BrBG", Rgba::brbg),
    ("prgn", "PRGn", Rgba::prgn),
    ("piyg", "PiYG", Rgba::piyg),
    ("rdbu", "RdBu", Rgba::rdbu),
    ("rdgy", "RdGy", Rgba::rdgy),
    ("rdylbu", "RdYlBu", Rgba::rdylbu),
    ("spectral", "Spectral", Rgba::spectral),
    ("rdylgn", "RdYlGn", Rgba::rdylgn),
    ("set1", "Set1", Rgba::set1),
    ("pastel1", "Pastel1", Rgba::pastel1),
    ("set2", "Set2", Rgba::set2),
    ("pastel2", "Pastel2", Rgba::pastel2),
    ("dark2", "Dark2", Rgba::dark2),
    ("set3", "Set3", Rgba::set3),
    ("paired", "Paired", Rgba::paired),
    ("accent", "Accent", Rgba::accent),
];

fn to_rgb(c: Rgba) -> RGBColor {
    let ch = |x: f64| x.round().clamp(0.0, 255.0) as u8;
    RGBColor(ch(c.r), ch(c.g), ch(c.b))
}

fn scheme_colors(scheme: &Scheme<Rgba>) -> Vec<RGBColor> {
    scheme.colors().into_iter().map(to_rgb).collect()
}

fn matplotlib_family(key: &str) -> Option<(&'static str, Vec<RGBColor>)> {
    MATPLOTLIB
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, display, table)| (*display, scheme_colors(&table())))
}

fn brewer_family(key: &str) -> Option<(&'static str, PaletteIter<Rgba>)> {
    BREWER
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, display, tables)| (*display, tables()))
}

/// Lookup table slot for `t`, as matplotlib indexes a 256-color map.
fn lut_index(t: f64) -> usize {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    ((t * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1)
}

/// Parse `#rrggbb` or a matplotlib gray level such as `"0.1"` (0 = black, 1 = white).
pub fn parse_color(s: &str) -> Result<RGBColor> {
    let t = s.trim();
    if let Some(h) = t.strip_prefix('#') {
        if h.len() == 6
            && h.bytes().all(|b| b.is_ascii_hexdigit())
            && let Ok(v) = u32::from_str_radix(h, 16)
        {
            return Ok(RGBColor((v >> 16) as u8, (v >> 8) as u8, v as u8));
        }
        return Err(LegendgramError::InvalidColor(s.to_string()));
    }
    match t.parse::<f64>() {
        Ok(g) if (0.0..=1.0).contains(&g) => {
            let v = (g * 255.0).round() as u8;
            Ok(RGBColor(v, v, v))
        }
        _ => Err(LegendgramError::InvalidColor(s.to_string())),
    }
}

/// `#rrggbb` form of a color.
pub fn to_hex(c: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}

fn lerp(a: RGBColor, b: RGBColor, f: f64) -> RGBColor {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    RGBColor(ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

/// Colors interpolated linearly between evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<RGBColor>, // Invariant: length ≥ 2
}

impl Colormap {
    /// Build a colormap through `stops`; a single stop is repeated.
    pub fn new(name: impl Into<String>, stops: Vec<RGBColor>) -> Result<Self> {
        let stops = match stops.len() {
            0 => return Err(LegendgramError::InvalidPalette("colormap without colors".into())),
            1 => vec![stops[0], stops[0]],
            _ => stops,
        };
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Built-in colormap by family name (`"viridis"`, `"blues"`, ...).
    ///
    /// Brewer families run through their largest table, as matplotlib builds `Blues`
    /// from the nine-class scheme.
    pub fn by_name(name: &str) -> Option<Self> {
        let key = name.to_ascii_lowercase();
        let stops = match matplotlib_family(&key) {
            Some((_, stops)) => stops,
            None => {
                let (_, mut tables) = brewer_family(&key)?;
                scheme_colors(&tables.next_back()?)
            }
        };
        Some(Self { name: key, stops })
    }

    pub fn viridis() -> Self {
        Self {
            name: "viridis".into(),
            stops: scheme_colors(&Rgba::viridis()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact interpolation at `x` ∈ \[0, 1\], without lookup-table quantization.
    fn interpolate(&self, x: f64) -> RGBColor {
        let pos = x * (self.stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        lerp(self.stops[i], self.stops[i + 1], pos - i as f64)
    }

    /// `n` colors at `linspace(0, 1, n)`, through the lookup table.
    pub fn resample(&self, n: usize) -> Vec<RGBColor> {
        crate::stats::linspace(0.0, 1.0, n)
            .into_iter()
            .map(|x| self.rgb(x))
            .collect()
    }
}

impl ColorRange<RGBColor> for Colormap {
    fn rgb(&self, t: f64) -> RGBColor {
        self.interpolate(lut_index(t) as f64 / (LUT_SIZE - 1) as f64)
    }
}

/// A palette with a fixed number of classes.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretePalette {
    name: String,
    colors: Vec<RGBColor>,
}

impl DiscretePalette {
    pub fn new(name: impl Into<String>, colors: Vec<RGBColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(LegendgramError::InvalidPalette("palette without colors".into()));
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    /// `"Viridis_10"`-style lookup: family name, underscore, class count.
    ///
    /// Brewer names resolve to the ColorBrewer table with exactly that many classes
    /// (`Blues_3` ..= `Blues_9`). Matplotlib names accept 2 ..= [`MAX_NAMED_CLASSES`]
    /// classes sampled evenly from the 256-color map.
    pub fn by_name(name: &str) -> Option<Self> {
        let (family, n) = name.rsplit_once('_')?;
        let n: usize = n.parse().ok()?;
        let key = family.to_ascii_lowercase();
        if let Some((display, stops)) = matplotlib_family(&key) {
            if !(2..=MAX_NAMED_CLASSES).contains(&n) {
                return None;
            }
            let cmap = Colormap { name: key, stops };
            return Some(Self {
                name: format!("{display}_{n}"),
                colors: cmap.resample(n),
            });
        }
        let (display, mut tables) = brewer_family(&key)?;
        let scheme = tables.find(|t| t.len() == n)?;
        Some(Self {
            name: format!("{display}_{n}"),
            colors: scheme_colors(&scheme),
        })
    }

    /// Ten-class viridis, the palette used when neither breaks nor a palette are given.
    pub fn viridis_10() -> Self {
        Self {
            name: "Viridis_10".into(),
            colors: Colormap::viridis().resample(10),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of classes.
    pub fn number(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[RGBColor] {
        &self.colors
    }

    /// Continuous map interpolating through the class colors.
    pub fn colormap(&self) -> Colormap {
        let stops = if self.colors.len() == 1 {
            vec![self.colors[0], self.colors[0]]
        } else {
            self.colors.clone()
        };
        Colormap {
            name: self.name.clone(),
            stops,
        }
    }
}

impl ColorRange<RGBColor> for DiscretePalette {
    fn rgb(&self, t: f64) -> RGBColor {
        self.colormap().rgb(t)
    }
}

/// Palette accepted by the legendgram.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    Discrete(DiscretePalette),
    Continuous(Colormap),
}

impl Palette {
    /// Resolve `"Viridis_10"` to a discrete palette and `"viridis"` to a continuous one.
    pub fn by_name(name: &str) -> Result<Self> {
        if let Some(p) = DiscretePalette::by_name(name) {
            return Ok(Palette::Discrete(p));
        }
        Colormap::by_name(name)
            .map(Palette::Continuous)
            .ok_or_else(|| LegendgramError::UnrecognizedPalette(format!("unknown name {name:?}")))
    }

    /// Interpret a JSON palette description.
    ///
    /// - `"Blues_5"` / `"blues"`: named palette (see [`Palette::by_name`])
    /// - `{"name": "mine", "colors": ["#..", ..]}`: custom discrete palette
    /// - `{"colormap": ["#..", ..]}`: custom continuous colormap
    ///
    /// Anything else, such as a bare list of colors, is not a palette.
    pub fn from_json(value: &Value) -> Result<Self> {
        let colors_of = |v: &Value| -> Result<Vec<RGBColor>> {
            v.as_array()
                .ok_or_else(|| LegendgramError::InvalidPalette("colors must be a list".into()))?
                .iter()
                .map(|c| {
                    c.as_str()
                        .ok_or_else(|| LegendgramError::InvalidColor(c.to_string()))
                        .and_then(parse_color)
                })
                .collect()
        };
        match value {
            Value::String(name) => Palette::by_name(name),
            Value::Object(map) if map.contains_key("colors") => {
                let name = map.get("name").and_then(Value::as_str).unwrap_or("custom");
                let colors = colors_of(&map["colors"])?;
                Ok(Palette::Discrete(DiscretePalette::new(name, colors)?))
            }
            Value::Object(map) if map.contains_key("colormap") => {
                let name = map.get("name").and_then(Value::as_str).unwrap_or("custom");
                let stops = colors_of(&map["colormap"])?;
                Ok(Palette::Continuous(Colormap::new(name, stops)?))
            }
            other => Err(LegendgramError::UnrecognizedPalette(
                json_type_name(other).to_string(),
            )),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Palette::Discrete(p) => p.name(),
            Palette::Continuous(c) => c.name(),
        }
    }

    /// Class count of a discrete palette; `None` for a colormap.
    pub fn class_count(&self) -> Option<usize> {
        match self {
            Palette::Discrete(p) => Some(p.number()),
            Palette::Continuous(_) => None,
        }
    }

    /// The continuous map used to color classes.
    pub fn colormap(&self) -> Colormap {
        match self {
            Palette::Discrete(p) => p.colormap(),
            Palette::Continuous(c) => c.clone(),
        }
    }

    /// Color of class `class` out of `k`: the colormap sampled at `class / k`.
    pub fn class_color(&self, class: usize, k: usize) -> RGBColor {
        class_color(&self.colormap(), class, k)
    }
}

impl ColorRange<RGBColor> for Palette {
    fn rgb(&self, t: f64) -> RGBColor {
        match self {
            Palette::Discrete(p) => p.rgb(t),
            Palette::Continuous(c) => c.rgb(t),
        }
    }
}

impl From<DiscretePalette> for Palette {
    fn from(p: DiscretePalette) -> Self {
        Palette::Discrete(p)
    }
}

impl From<Colormap> for Palette {
    fn from(c: Colormap) -> Self {
        Palette::Continuous(c)
    }
}

pub(crate) fn class_color(
    cmap: &impl ColorRange<RGBColor>,
    class: usize,
    k: usize,
) -> RGBColor {
    if k == 0 {
        return cmap.rgb(0.0);
    }
    cmap.rgb(class as f64 / k as f64)
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object without \"colors\" or \"colormap\"",
    }
}
