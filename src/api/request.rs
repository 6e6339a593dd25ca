use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::api::spec::{ChartTimeZone, RenderSpec, TimeRange};
use crate::error::{RenderError, RenderResult};

/// Timestamp layouts accepted beyond RFC 3339, tried in order. All are
/// interpreted as wall time in the requesting zone.
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Inbound render request as hosts deliver it, timestamps still as strings.
///
/// `entity_id` names the series the host is expected to load and hand over
/// alongside the spec. A single string and a list are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderRequest {
    #[serde(deserialize_with = "one_or_many")]
    pub entity_id: Vec<String>,
    pub date_from: String,
    #[serde(default)]
    pub date_to: Option<String>,
    pub path_to_image: PathBuf,
}

impl RenderRequest {
    pub fn from_json(input: &str) -> RenderResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            RenderError::InvalidRequest(format!("failed to parse render request json: {e}"))
        })
    }

    /// Resolves the raw timestamps against `timezone` and builds a spec.
    pub fn to_spec(&self, timezone: ChartTimeZone) -> RenderResult<RenderSpec> {
        let from = parse_timestamp("date_from", &self.date_from, timezone)?;
        let to = match &self.date_to {
            Some(raw) => Some(parse_timestamp("date_to", raw, timezone)?),
            None => None,
        };
        Ok(RenderSpec::new(TimeRange::new(from, to), self.path_to_image.clone())
            .with_timezone(timezone))
    }
}

/// Parses one request timestamp.
///
/// An explicit offset wins; otherwise the value is taken as wall time in the
/// requesting zone. A bare date means midnight of that day.
fn parse_timestamp(
    field: &'static str,
    value: &str,
    timezone: ChartTimeZone,
) -> RenderResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return resolve_local(field, value, naive, timezone);
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return resolve_local(field, value, date.and_time(NaiveTime::MIN), timezone);
    }

    Err(RenderError::InvalidTimestamp {
        field,
        value: value.to_owned(),
    })
}

fn resolve_local(
    field: &'static str,
    value: &str,
    naive: NaiveDateTime,
    timezone: ChartTimeZone,
) -> RenderResult<DateTime<Utc>> {
    timezone
        .fixed_offset()
        .from_local_datetime(&naive)
        .single()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or_else(|| RenderError::InvalidTimestamp {
            field,
            value: value.to_owned(),
        })
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
