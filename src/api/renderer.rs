use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::api::spec::{RenderSpec, validate_spec};
use crate::core::SeriesSet;
use crate::error::{RenderError, RenderResult};
use crate::render::{ImageFormat, build_scene, render_chart_bytes};

/// Entry point for turning recorded series into a chart image.
///
/// The renderer itself carries no state. Every call builds its own scene from
/// the spec and the data, so concurrent renders to different paths never
/// interfere with each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesRenderer;

impl SeriesRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders `set` according to `spec` and writes the image to `spec.path`.
    ///
    /// Validation runs before any drawing or filesystem work. An existing
    /// file at the path is overwritten; if the write itself fails, whatever
    /// ended up at the path is removed so stale output never survives a
    /// failed render.
    pub fn render(&self, set: &SeriesSet, spec: &RenderSpec) -> RenderResult<()> {
        validate_spec(spec)?;
        let format = ImageFormat::from_path(&spec.path)?;
        info!(
            series = set.len(),
            %format,
            path = %spec.path.display(),
            "rendering history chart"
        );
        let scene = build_scene(set, spec, Utc::now())?;
        let bytes = render_chart_bytes(&scene, &spec.style, format)?;
        write_image(&spec.path, &bytes)?;
        info!(bytes = bytes.len(), path = %spec.path.display(), "chart written");
        Ok(())
    }

    /// Renders `set` according to `spec` and returns the encoded image, for
    /// hosts that forward the chart instead of persisting it. `spec.path` is
    /// not touched.
    pub fn render_to_bytes(
        &self,
        set: &SeriesSet,
        spec: &RenderSpec,
        format: ImageFormat,
    ) -> RenderResult<Vec<u8>> {
        validate_spec(spec)?;
        let scene = build_scene(set, spec, Utc::now())?;
        render_chart_bytes(&scene, &spec.style, format)
    }
}

fn write_image(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    if let Err(source) = fs::write(path, bytes) {
        // A failed write must not leave a stale or truncated file behind.
        let _ = fs::remove_file(path);
        return Err(RenderError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
