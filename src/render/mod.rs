mod backend;
mod scene;
mod style;

pub use backend::{ImageFormat, render_chart_bytes};
pub use scene::{ChartScene, SeriesScene, SeriesShape, build_scene};
pub use style::{BACKGROUND, ChartStyle, GRID_COLOR, NEON_PALETTE, Rgb, TEXT_COLOR, palette_color};

pub(crate) use style::validate_style;
