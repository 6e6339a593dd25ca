use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Figure background, a deep blue-black.
pub const BACKGROUND: Rgb = Rgb::new(0x21, 0x29, 0x46);
/// Grid lines, a touch lighter than the background.
pub const GRID_COLOR: Rgb = Rgb::new(0x2A, 0x34, 0x59);
/// Axis labels, legend text, and tick labels.
pub const TEXT_COLOR: Rgb = Rgb::new(0xE6, 0xE6, 0xE6);

/// Neon series cycle: cyan, pink, yellow, green, red, violet.
pub const NEON_PALETTE: [Rgb; 6] = [
    Rgb::new(0x08, 0xF7, 0xFE),
    Rgb::new(0xFE, 0x53, 0xBB),
    Rgb::new(0xF5, 0xD3, 0x00),
    Rgb::new(0x00, 0xFF, 0x41),
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x94, 0x67, 0xBD),
];

/// Series color for the given insertion index; the palette wraps around.
#[must_use]
pub fn palette_color(index: usize) -> Rgb {
    NEON_PALETTE[index % NEON_PALETTE.len()]
}

/// Chart styling and the two downsampling constants.
///
/// Serializable so hosts can persist overrides next to their own
/// configuration; the defaults reproduce the reference output (an 8x4 inch
/// figure at 100 dpi with the 600-sample / 200-chunk downsampling policy) and
/// should not be changed when output parity matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Series with at least this many plottable samples are downsampled.
    #[serde(default = "default_direct_plot_limit")]
    pub direct_plot_limit: usize,
    /// Number of chunks a downsampled series is collapsed into.
    #[serde(default = "default_band_chunk_count")]
    pub band_chunk_count: usize,
    /// Opacity of the underglow fill below direct lines.
    #[serde(default = "default_fill_alpha")]
    pub underglow_alpha: f64,
    /// Opacity of the min/max band behind a downsampled mean line.
    #[serde(default = "default_fill_alpha")]
    pub band_alpha: f64,
    /// Upper bound for auto-spaced minor time ticks.
    #[serde(default = "default_max_minor_ticks")]
    pub max_minor_ticks: usize,
}

impl ChartStyle {
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_direct_plot_limit(mut self, limit: usize) -> Self {
        self.direct_plot_limit = limit;
        self
    }

    #[must_use]
    pub fn with_band_chunk_count(mut self, chunks: usize) -> Self {
        self.band_chunk_count = chunks;
        self
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            direct_plot_limit: default_direct_plot_limit(),
            band_chunk_count: default_band_chunk_count(),
            underglow_alpha: default_fill_alpha(),
            band_alpha: default_fill_alpha(),
            max_minor_ticks: default_max_minor_ticks(),
        }
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

fn default_direct_plot_limit() -> usize {
    600
}

fn default_band_chunk_count() -> usize {
    200
}

fn default_fill_alpha() -> f64 {
    0.10
}

fn default_max_minor_ticks() -> usize {
    15
}

pub(crate) fn validate_style(style: &ChartStyle) -> RenderResult<()> {
    if style.width == 0 || style.height == 0 {
        return Err(RenderError::InvalidStyle(format!(
            "figure dimensions must be positive, got {}x{}",
            style.width, style.height
        )));
    }
    if style.direct_plot_limit == 0 {
        return Err(RenderError::InvalidStyle(
            "direct_plot_limit must be at least 1".to_owned(),
        ));
    }
    if style.band_chunk_count == 0 {
        return Err(RenderError::InvalidStyle(
            "band_chunk_count must be at least 1".to_owned(),
        ));
    }
    for (name, alpha) in [
        ("underglow_alpha", style.underglow_alpha),
        ("band_alpha", style.band_alpha),
    ] {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(RenderError::InvalidStyle(format!(
                "{name} must be finite and in [0, 1]"
            )));
        }
    }
    Ok(())
}
