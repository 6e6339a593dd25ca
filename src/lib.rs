//! history-chart: neon-dark chart rendering for recorded entity history.
//!
//! This crate turns timestamped state series, as home-automation recorders
//! store them, into a styled time/value chart image. Hosts hand over the
//! recorded samples and a render spec; the crate validates units, filters
//! non-numeric states, downsamples dense series into min/max bands and writes
//! a single image file.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartTimeZone, RenderRequest, RenderSpec, SeriesRenderer, TimeRange};
pub use core::{Sample, SampleAttributes, Series, SeriesSet};
pub use error::{RenderError, RenderResult};
pub use render::{ChartStyle, ImageFormat};
