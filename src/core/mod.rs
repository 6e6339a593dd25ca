pub mod downsample;
pub mod sample;
pub mod series;
pub mod time_axis;

pub use downsample::{BandPoint, PlotPoint, downsample_band, split_nearly_equal};
pub use sample::{Sample, SampleAttributes, plottable_value};
pub use series::{Series, SeriesSet};
pub use time_axis::TickPlan;
