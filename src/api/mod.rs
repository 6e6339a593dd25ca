mod renderer;
mod request;
mod spec;

pub use renderer::SeriesRenderer;
pub use request::RenderRequest;
pub use spec::{ChartTimeZone, RenderSpec, TimeRange};
