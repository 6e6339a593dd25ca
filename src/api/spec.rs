use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::render::{ChartStyle, validate_style};

/// Requested history window.
///
/// An absent end means "through the latest available data" and is resolved
/// against the clock at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// End of the range, defaulting to `now` for an open range.
    #[must_use]
    pub fn resolved_to(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.to.unwrap_or(now)
    }
}

/// Wall-clock zone used for axis values and tick labels.
///
/// Hosts hand the chart a fixed UTC offset rather than a named zone, which
/// keeps chrono's fixed-offset math sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl ChartTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero UTC offset is valid"))
    }
}

/// Everything one render call needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpec {
    pub range: TimeRange,
    pub path: PathBuf,
    #[serde(default)]
    pub timezone: ChartTimeZone,
    #[serde(default)]
    pub style: ChartStyle,
}

impl RenderSpec {
    #[must_use]
    pub fn new(range: TimeRange, path: impl Into<PathBuf>) -> Self {
        Self {
            range,
            path: path.into(),
            timezone: ChartTimeZone::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: ChartTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }
}

pub(crate) fn validate_spec(spec: &RenderSpec) -> RenderResult<()> {
    validate_style(&spec.style)?;

    let offset_minutes = i32::from(spec.timezone.offset_minutes());
    if !(-14 * 60..=14 * 60).contains(&offset_minutes) {
        return Err(RenderError::InvalidStyle(
            "timezone offset must be between -840 and 840 minutes".to_owned(),
        ));
    }
    Ok(())
}
