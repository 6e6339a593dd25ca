use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no series contains any sample in the requested range")]
    EmptyData,

    #[error(
        "series `{entity}` does not carry a `unit_of_measurement` attribute on its first sample"
    )]
    MissingUnit { entity: String },

    #[error("all series must share one `unit_of_measurement`, found: {}", .units.join(", "))]
    UnitMismatch { units: Vec<String> },

    #[error("`{field}` is not an ISO-8601 timestamp: `{value}`")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid render request: {0}")]
    InvalidRequest(String),

    #[error("cannot infer an image format from `{}`", .path.display())]
    UnsupportedImageFormat { path: PathBuf },

    #[error("invalid chart style: {0}")]
    InvalidStyle(String),

    #[error("drawing backend failure: {0}")]
    Backend(String),

    #[error("failed to write chart image to `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
