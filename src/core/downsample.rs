//! Downsampling for large series: near-equal chunking with a min/mean/max band.

use std::ops::Range;

use chrono::NaiveDateTime;

/// Chart-space point: wall-clock instant and numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub at: NaiveDateTime,
    pub value: f64,
}

impl PlotPoint {
    #[must_use]
    pub fn new(at: NaiveDateTime, value: f64) -> Self {
        Self { at, value }
    }
}

/// One downsampled chunk: the mean anchored at the chunk's index midpoint plus
/// the extrema that bound the shaded band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub at: NaiveDateTime,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Splits `len` items into `parts` contiguous ranges whose sizes differ by at
/// most one, larger ranges first.
///
/// `parts` is clamped to `len`, so no returned range is ever empty; the ranges
/// cover `0..len` exactly.
#[must_use]
pub fn split_nearly_equal(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 || parts == 0 {
        return Vec::new();
    }

    let parts = parts.min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0_usize;
    for index in 0..parts {
        let size = base + usize::from(index < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Collapses time-ordered points into at most `chunks` band points.
///
/// Per chunk, the x anchor is the timestamp at index `len / 2` within the
/// chunk (the index midpoint, not a time midpoint) and y carries the
/// arithmetic mean plus the chunk extrema.
#[must_use]
pub fn downsample_band(points: &[PlotPoint], chunks: usize) -> Vec<BandPoint> {
    split_nearly_equal(points.len(), chunks)
        .into_iter()
        .map(|range| band_point(&points[range]))
        .collect()
}

fn band_point(chunk: &[PlotPoint]) -> BandPoint {
    // split_nearly_equal never yields an empty range
    let at = chunk[chunk.len() / 2].at;

    let mut sum = 0.0_f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in chunk {
        sum += point.value;
        min = min.min(point.value);
        max = max.max(point.value);
    }

    BandPoint {
        at,
        mean: sum / chunk.len() as f64,
        min,
        max,
    }
}
