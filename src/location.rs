//! Legend locations and inset placement inside a parent axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LegendgramError, Result};
use crate::models::Rect;

/// Legend location, with the numeric codes used by matplotlib legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocationSpec", into = "String")]
pub enum Location {
    Best = 0,
    UpperRight = 1,
    UpperLeft = 2,
    LowerLeft = 3,
    LowerRight = 4,
    Right = 5,
    CenterLeft = 6,
    CenterRight = 7,
    LowerCenter = 8,
    UpperCenter = 9,
    Center = 10,
}

/// Default inset location.
pub const DEFAULT_LOCATION: Location = Location::LowerLeft;

/// Default inset size as a (width, height) fraction of the parent axes.
pub const DEFAULT_LEGEND_SIZE: (f64, f64) = (0.27, 0.2);

const ALL: [Location; 11] = [
    Location::Best,
    Location::UpperRight,
    Location::UpperLeft,
    Location::LowerLeft,
    Location::LowerRight,
    Location::Right,
    Location::CenterLeft,
    Location::CenterRight,
    Location::LowerCenter,
    Location::UpperCenter,
    Location::Center,
];

impl Location {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Location::Best => "best",
            Location::UpperRight => "upper right",
            Location::UpperLeft => "upper left",
            Location::LowerLeft => "lower left",
            Location::LowerRight => "lower right",
            Location::Right => "right",
            Location::CenterLeft => "center left",
            Location::CenterRight => "center right",
            Location::LowerCenter => "lower center",
            Location::UpperCenter => "upper center",
            Location::Center => "center",
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        DEFAULT_LOCATION
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Location {
    type Error = LegendgramError;

    fn try_from(code: u8) -> Result<Self> {
        ALL.get(code as usize)
            .copied()
            .ok_or_else(|| LegendgramError::InvalidLocation(code.to_string()))
    }
}

impl FromStr for Location {
    type Err = LegendgramError;

    /// Accepts names (`"lower left"`, `"lower_left"`, `"Lower-Left"`) and numeric codes (`"3"`).
    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        if let Ok(code) = norm.parse::<u8>() {
            return Location::try_from(code);
        }
        ALL.iter()
            .copied()
            .find(|l| l.name() == norm)
            .ok_or_else(|| LegendgramError::InvalidLocation(s.to_string()))
    }
}

impl From<Location> for String {
    fn from(loc: Location) -> Self {
        loc.name().to_string()
    }
}

/// Wire form of a location: a name or a numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationSpec {
    Code(u8),
    Name(String),
}

impl TryFrom<LocationSpec> for Location {
    type Error = LegendgramError;

    fn try_from(spec: LocationSpec) -> Result<Self> {
        match spec {
            LocationSpec::Code(c) => Location::try_from(c),
            LocationSpec::Name(n) => n.parse(),
        }
    }
}

/// Inset rectangle for a legend of `legend_size` (fractions of the parent) placed at `loc`.
///
/// `Best` is rejected: choosing it requires knowing where the parent's data is drawn.
pub fn make_location(parent: Rect, loc: Location, legend_size: (f64, f64)) -> Result<Rect> {
    let (fw, fh) = legend_size;
    let valid = |f: f64| f > 0.0 && f <= 1.0;
    if !valid(fw) || !valid(fh) {
        return Err(LegendgramError::InvalidLegendSize(fw, fh));
    }
    let width = parent.width * fw;
    let height = parent.height * fh;

    let left = parent.x0;
    let right = parent.x1() - width;
    let hcenter = parent.x0 + (parent.width - width) / 2.0;
    let bottom = parent.y0;
    let top = parent.y1() - height;
    let vcenter = parent.y0 + (parent.height - height) / 2.0;

    let (x0, y0) = match loc {
        Location::Best => {
            return Err(LegendgramError::InvalidLocation(
                "'best' cannot be resolved without the parent's data extent".into(),
            ));
        }
        Location::UpperRight => (right, top),
        Location::UpperLeft => (left, top),
        Location::LowerLeft => (left, bottom),
        Location::LowerRight => (right, bottom),
        Location::Right | Location::CenterRight => (right, vcenter),
        Location::CenterLeft => (left, vcenter),
        Location::LowerCenter => (hcenter, bottom),
        Location::UpperCenter => (hcenter, top),
        Location::Center => (hcenter, vcenter),
    };
    Ok(Rect::new(x0, y0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_names() {
        for loc in ALL {
            assert_eq!(Location::try_from(loc.code()).unwrap(), loc);
            assert_eq!(loc.name().parse::<Location>().unwrap(), loc);
        }
        assert!(Location::try_from(11).is_err());
        assert!("top".parse::<Location>().is_err());
    }

    #[test]
    fn lower_left_is_parent_origin() {
        let parent = Rect::new(0.1, 0.2, 0.8, 0.6);
        let r = make_location(parent, Location::LowerLeft, DEFAULT_LEGEND_SIZE).unwrap();
        assert_eq!((r.x0, r.y0), (0.1, 0.2));
        assert!((r.width - 0.8 * 0.27).abs() < 1e-12);
        assert!((r.height - 0.6 * 0.2).abs() < 1e-12);
    }
}
