//! Numeric building blocks: percentiles, evenly spaced points, equal-width
//! histograms and sorted insertion search.

use crate::error::{LegendgramError, Result};

/// Lowest percentile of the default classification.
pub const DEFAULT_PERCENTILE_LOW: f64 = 1.0;
/// Highest percentile of the default classification.
pub const DEFAULT_PERCENTILE_HIGH: f64 = 99.0;
/// Number of classes of the default classification.
pub const DEFAULT_CLASS_COUNT: usize = 10;

/// Equal-width binning of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Binned {
    pub counts: Vec<u64>,
    /// `counts.len() + 1` increasing edges; the last bin is closed on the right.
    pub edges: Vec<f64>,
}

/// Reject samples the histogram and percentile routines cannot handle.
fn check_sample(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(LegendgramError::EmptySample);
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(LegendgramError::NonFiniteSample(*bad));
    }
    Ok(())
}

/// `num` evenly spaced points from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// The percentile points used when no breaks are given: 10 points from 1 to 99.
pub fn default_percentiles() -> Vec<f64> {
    linspace(
        DEFAULT_PERCENTILE_LOW,
        DEFAULT_PERCENTILE_HIGH,
        DEFAULT_CLASS_COUNT,
    )
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut vals = values.to_vec();
    vals.sort_by(|a, b| a.total_cmp(b));
    vals
}

fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 100.0);
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// `q`-th percentile (0..=100) with linear interpolation between order statistics.
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    check_sample(values)?;
    Ok(percentile_of_sorted(&sorted_copy(values), q))
}

/// Several percentiles at once; sorts the sample a single time.
pub fn percentiles(values: &[f64], qs: &[f64]) -> Result<Vec<f64>> {
    check_sample(values)?;
    let sorted = sorted_copy(values);
    Ok(qs.iter().map(|&q| percentile_of_sorted(&sorted, q)).collect())
}

/// Class breaks used when the caller supplies none.
pub fn default_breaks(values: &[f64]) -> Result<Vec<f64>> {
    percentiles(values, &default_percentiles())
}

/// Bin `values` into `bins` equal-width bins spanning the sample range.
///
/// A constant sample gets the range `(v - 0.5, v + 0.5)`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Binned> {
    if bins == 0 {
        return Err(LegendgramError::InvalidBins);
    }
    check_sample(values)?;

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    if !(hi - lo).is_finite() {
        return Err(LegendgramError::UnboundedRange(lo, hi));
    }
    let edges = linspace(lo, hi, bins + 1);
    let norm = bins as f64 / (hi - lo);

    let mut counts = vec![0u64; bins];
    for &v in values {
        let mut idx = (((v - lo) * norm) as usize).min(bins - 1);
        // Float rounding can land one bin off; settle against the real edges.
        if v < edges[idx] {
            idx = idx.saturating_sub(1);
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }
    Ok(Binned { counts, edges })
}

/// Index of the first element of `sorted` that is `>= value`.
#[inline]
pub fn searchsorted_left(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&e| e < value)
}

/// Class of `value` under upper-bound `breaks`: the first break `>= value`.
///
/// Values above the last break belong to no class.
pub fn classify(value: f64, breaks: &[f64]) -> Option<usize> {
    let idx = searchsorted_left(breaks, value);
    (idx < breaks.len()).then_some(idx)
}
