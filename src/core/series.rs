use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::Sample;
use crate::error::{RenderError, RenderResult};

/// Time-ordered samples recorded for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    entity_id: String,
    samples: Vec<Sample>,
}

impl Series {
    /// Builds a series, canonicalizing sample order.
    ///
    /// The upstream store guarantees non-decreasing timestamps; a stable sort
    /// keeps that invariant intact when an adapter misbehaves.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, mut samples: Vec<Sample>) -> Self {
        let entity_id = entity_id.into();
        if !samples.is_sorted_by_key(|sample| sample.recorded_at) {
            warn!(entity = %entity_id, "samples arrived out of order; sorting by recorded_at");
            samples.sort_by_key(|sample| sample.recorded_at);
        }
        Self { entity_id, samples }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Legend label: the first sample's `friendly_name`, entity id otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        self.samples
            .first()
            .and_then(|sample| sample.attributes.friendly_name.as_deref())
            .unwrap_or(&self.entity_id)
    }

    /// Unit attribute carried by the first sample, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.samples
            .first()
            .and_then(|sample| sample.attributes.unit_of_measurement.as_deref())
    }

    /// Samples whose state parses as a finite number, in time order.
    pub fn plottable_points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.samples.iter().filter_map(|sample| {
            sample
                .plottable_value()
                .map(|value| (sample.recorded_at, value))
        })
    }
}

/// Insertion-ordered collection of series keyed by entity id.
///
/// Entity order is meaningful: it drives palette assignment and legend order.
/// Series without any raw sample are dropped on insert, so every retained
/// series holds at least one sample by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSet {
    series: IndexMap<String, Series>,
}

impl SeriesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a series, replacing any previous series for the same entity.
    ///
    /// Sampleless series are silently skipped; the upstream store reports them
    /// when an entity has no history in the requested range.
    pub fn insert(&mut self, series: Series) {
        if series.is_empty() {
            debug!(entity = %series.entity_id(), "skipping series without samples");
            return;
        }
        self.series.insert(series.entity_id().to_owned(), series);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&Series> {
        self.series.get(entity_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    /// Resolves the single unit shared by every retained series.
    ///
    /// Validation order follows the render contract: an empty set fails before
    /// any unit inspection, and a missing unit fails before mismatch
    /// detection. Distinct units are reported in first-seen order.
    pub fn resolve_unit(&self) -> RenderResult<&str> {
        if self.series.is_empty() {
            return Err(RenderError::EmptyData);
        }

        let mut units: SmallVec<[&str; 2]> = SmallVec::new();
        for series in self.series.values() {
            let Some(unit) = series.unit() else {
                return Err(RenderError::MissingUnit {
                    entity: series.entity_id().to_owned(),
                });
            };
            if !units.contains(&unit) {
                units.push(unit);
            }
        }

        if units.len() == 1 {
            Ok(units[0])
        } else {
            Err(RenderError::UnitMismatch {
                units: units.iter().map(|unit| (*unit).to_owned()).collect(),
            })
        }
    }
}

impl FromIterator<Series> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        let mut set = Self::new();
        for series in iter {
            set.insert(series);
        }
        set
    }
}
