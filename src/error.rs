use thiserror::Error;

use crate::figure::AxesId;

/// Errors raised while building a legendgram.
///
/// `UnrecognizedPalette` and `ClassCountMismatch` are the validation failures of the
/// legendgram itself; the rest come from the numeric, palette and placement layers.
#[derive(Debug, Error)]
pub enum LegendgramError {
    #[error("pal needs to be either a discrete palette or a continuous colormap, got {0}")]
    UnrecognizedPalette(String),

    #[error(
        "provided number of classes ({breaks}) does not match number of colors in palette ({colors})"
    )]
    ClassCountMismatch { breaks: usize, colors: usize },

    #[error("cannot build a histogram from an empty sample")]
    EmptySample,

    #[error("sample contains a non-finite value ({0})")]
    NonFiniteSample(f64),

    #[error("sample range is too wide to bin: ({0}, {1})")]
    UnboundedRange(f64, f64),

    #[error("number of bins must be positive")]
    InvalidBins,

    #[error("invalid legend location: {0}")]
    InvalidLocation(String),

    #[error("legend size must be a (width, height) fraction in (0, 1], got ({0}, {1})")]
    InvalidLegendSize(f64, f64),

    #[error("clip must be a finite (low, high) range with low < high, got ({0}, {1})")]
    InvalidClip(f64, f64),

    #[error("no axes with id {0:?} in this figure")]
    UnknownAxes(AxesId),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("invalid options: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LegendgramError>;
