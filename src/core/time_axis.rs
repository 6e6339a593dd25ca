//! Time-axis tick planning: day-granularity major grid plus an auto-spaced
//! minor grid showing time of day.
//!
//! Planning is pure so the renderer and tests consume the same tick
//! positions. Formatting stays with the backend; only the strftime patterns
//! live here.

use chrono::{Duration, NaiveDateTime};
use smallvec::SmallVec;

/// Major tick label pattern (day/month).
pub const MAJOR_LABEL_FORMAT: &str = "%d/%m";
/// Minor tick label pattern (time of day).
pub const MINOR_LABEL_FORMAT: &str = "%H:%M";

/// Candidate minor-tick spacings, smallest first: seconds, minutes, hours,
/// then whole days for long ranges.
const MINOR_STEP_LADDER_SECONDS: &[i64] = &[
    1,
    5,
    10,
    15,
    30,
    60,
    5 * 60,
    10 * 60,
    15 * 60,
    30 * 60,
    3_600,
    2 * 3_600,
    3 * 3_600,
    4 * 3_600,
    6 * 3_600,
    12 * 3_600,
    86_400,
    2 * 86_400,
    3 * 86_400,
    7 * 86_400,
    14 * 86_400,
];

/// Tick positions for one chart draw, both kinds in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickPlan {
    pub majors: SmallVec<[NaiveDateTime; 8]>,
    pub minors: SmallVec<[NaiveDateTime; 16]>,
}

impl TickPlan {
    /// Plans ticks for the wall-clock domain `start..=end`.
    ///
    /// Majors sit on every midnight inside the domain. Minors use the
    /// smallest ladder step that yields at most `max_minor_ticks` positions;
    /// minors coinciding with a major are omitted so the day boundary is
    /// drawn and labeled once. A degenerate domain plans no ticks.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, max_minor_ticks: usize) -> Self {
        if end <= start {
            return Self {
                majors: SmallVec::new(),
                minors: SmallVec::new(),
            };
        }

        let majors = day_boundaries(start, end);
        let mut minors = auto_minor_ticks(start, end, max_minor_ticks);
        minors.retain(|tick| !majors.contains(tick));

        Self { majors, minors }
    }
}

/// Midnights inside `start..=end`, ascending.
#[must_use]
pub fn day_boundaries(start: NaiveDateTime, end: NaiveDateTime) -> SmallVec<[NaiveDateTime; 8]> {
    let mut boundaries = SmallVec::new();
    let mut tick = midnight_of(start);
    if tick < start {
        tick += Duration::days(1);
    }
    while tick <= end {
        boundaries.push(tick);
        tick += Duration::days(1);
    }
    boundaries
}

/// Minor ticks for `start..=end`: the smallest ladder step producing at most
/// `max_ticks` positions, aligned to round wall-clock multiples counted from
/// the midnight preceding `start`.
///
/// Returns no ticks when even the coarsest step overflows `max_ticks`.
#[must_use]
pub fn auto_minor_ticks(
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_ticks: usize,
) -> SmallVec<[NaiveDateTime; 16]> {
    if max_ticks == 0 || end <= start {
        return SmallVec::new();
    }

    let span_seconds = (end - start).num_seconds().max(1);
    for &step in MINOR_STEP_LADDER_SECONDS {
        // Alignment drops at most one position below span/step, so a step
        // spanning more than max + 1 intervals can never fit.
        if span_seconds > (max_ticks as i64 + 1) * step {
            continue;
        }
        let ticks = aligned_ticks(start, end, step);
        if ticks.len() <= max_ticks {
            return ticks;
        }
    }
    SmallVec::new()
}

fn aligned_ticks(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step_seconds: i64,
) -> SmallVec<[NaiveDateTime; 16]> {
    let anchor = midnight_of(start);
    // start is at or after its midnight anchor, so the offset is never
    // negative and plain integer division rounds it up to the next multiple.
    let offset = (start - anchor).num_seconds();
    let first = (offset + step_seconds - 1) / step_seconds * step_seconds;

    let mut ticks = SmallVec::new();
    let mut tick = anchor + Duration::seconds(first);
    while tick <= end {
        ticks.push(tick);
        tick += Duration::seconds(step_seconds);
    }
    ticks
}

fn midnight_of(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .date()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time of day")
}
