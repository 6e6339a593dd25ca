use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute payload carried alongside a recorded state.
///
/// Only the attributes the chart pipeline consumes are modeled; hosts attach
/// arbitrarily more and adapters are free to drop the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleAttributes {
    #[serde(default)]
    pub unit_of_measurement: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

impl SampleAttributes {
    #[must_use]
    pub fn new(unit_of_measurement: Option<String>, friendly_name: Option<String>) -> Self {
        Self {
            unit_of_measurement,
            friendly_name,
        }
    }

    /// Convenience constructor for the common fully-populated case.
    #[must_use]
    pub fn with_unit_and_name(unit: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Some(unit.into()), Some(name.into()))
    }
}

/// One recorded state of one entity at one instant.
///
/// `state` is kept verbatim as the host reported it: numeric states arrive as
/// their decimal rendering, and sensors that drop out report markers such as
/// `"unavailable"` or `"unknown"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub recorded_at: DateTime<Utc>,
    pub state: String,
    #[serde(default)]
    pub attributes: SampleAttributes,
}

impl Sample {
    #[must_use]
    pub fn new(
        recorded_at: DateTime<Utc>,
        state: impl Into<String>,
        attributes: SampleAttributes,
    ) -> Self {
        Self {
            recorded_at,
            state: state.into(),
            attributes,
        }
    }

    /// Numeric value of this sample, when it has one.
    #[must_use]
    pub fn plottable_value(&self) -> Option<f64> {
        plottable_value(&self.state)
    }
}

/// Parses a raw state into a plottable number.
///
/// A sample is plottable iff its state parses as a finite real number.
/// NaN, infinities, and non-numeric markers are sensor noise and are dropped
/// silently by the pipeline rather than failing the render.
#[must_use]
pub fn plottable_value(state: &str) -> Option<f64> {
    state
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
