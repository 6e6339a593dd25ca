use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use ordered_float::OrderedFloat;
use tracing::{debug, info};

use crate::api::RenderSpec;
use crate::core::{BandPoint, PlotPoint, SeriesSet, TickPlan, downsample_band};
use crate::error::RenderResult;
use crate::render::style::{self, Rgb};

/// Plotted geometry for one series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesShape {
    /// Full-resolution polyline with an underglow accent.
    Line(Vec<PlotPoint>),
    /// Downsampled mean polyline plus a min/max envelope.
    Band(Vec<BandPoint>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesScene {
    pub label: String,
    pub color: Rgb,
    pub shape: SeriesShape,
}

/// Backend-agnostic draw plan for one chart.
///
/// Built fresh for every render call and discarded afterwards, so concurrent
/// calls never share drawing state. The same scene drives both rendering and
/// tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub x_domain: (NaiveDateTime, NaiveDateTime),
    pub y_domain: (f64, f64),
    pub unit: String,
    pub ticks: TickPlan,
    pub series: Vec<SeriesScene>,
}

/// Turns a validated series set into a draw plan.
///
/// Applies the plottable filter, picks direct-line versus band form per
/// series, assigns palette colors in insertion order (series that filter down
/// to nothing still consume a color and keep their legend entry), and derives
/// the axis domains from the plotted geometry. `now` resolves an open request
/// range when nothing is plottable and the domain must fall back to it.
pub fn build_scene(
    set: &SeriesSet,
    spec: &RenderSpec,
    now: DateTime<Utc>,
) -> RenderResult<ChartScene> {
    let unit = set.resolve_unit()?.to_owned();
    let offset = spec.timezone.fixed_offset();

    let mut series_scenes = Vec::with_capacity(set.len());
    let mut time_bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;
    let mut value_bounds: Option<(f64, f64)> = None;

    for (index, series) in set.iter().enumerate() {
        let points: Vec<PlotPoint> = series
            .plottable_points()
            .map(|(at, value)| PlotPoint::new(at.with_timezone(&offset).naive_local(), value))
            .collect();
        info!(
            entity = %series.entity_id(),
            label = %series.label(),
            plottable = points.len(),
            "prepared series"
        );

        let shape = if points.len() < spec.style.direct_plot_limit {
            SeriesShape::Line(points)
        } else {
            SeriesShape::Band(downsample_band(&points, spec.style.band_chunk_count))
        };

        if let Some(bounds) = shape_time_bounds(&shape) {
            time_bounds = Some(merge_time_bounds(time_bounds, bounds));
        }
        if let Some(bounds) = shape_value_bounds(&shape) {
            value_bounds = Some(merge_value_bounds(value_bounds, bounds));
        }

        series_scenes.push(SeriesScene {
            label: series.label().to_owned(),
            color: style::palette_color(index),
            shape,
        });
    }

    let x_domain = match time_bounds {
        Some((min, max)) => pad_time_domain(min, max),
        None => {
            let from = spec.range.from.with_timezone(&offset).naive_local();
            let to = spec
                .range
                .resolved_to(now)
                .with_timezone(&offset)
                .naive_local();
            let (lo, hi) = if to < from { (to, from) } else { (from, to) };
            pad_time_domain(lo, hi)
        }
    };
    let y_domain = match value_bounds {
        Some((min, max)) => pad_value_domain(min, max),
        None => (0.0, 1.0),
    };

    debug!(
        x_from = %x_domain.0,
        x_to = %x_domain.1,
        y_min = y_domain.0,
        y_max = y_domain.1,
        "resolved chart domains"
    );

    let ticks = TickPlan::new(x_domain.0, x_domain.1, spec.style.max_minor_ticks);

    Ok(ChartScene {
        x_domain,
        y_domain,
        unit,
        ticks,
        series: series_scenes,
    })
}

fn shape_time_bounds(shape: &SeriesShape) -> Option<(NaiveDateTime, NaiveDateTime)> {
    // Points and bands are time-ordered, so the edges are the extremes.
    match shape {
        SeriesShape::Line(points) => Some((points.first()?.at, points.last()?.at)),
        SeriesShape::Band(bands) => Some((bands.first()?.at, bands.last()?.at)),
    }
}

fn shape_value_bounds(shape: &SeriesShape) -> Option<(f64, f64)> {
    match shape {
        SeriesShape::Line(points) => {
            let min = points.iter().map(|point| OrderedFloat(point.value)).min()?;
            let max = points.iter().map(|point| OrderedFloat(point.value)).max()?;
            Some((min.0, max.0))
        }
        SeriesShape::Band(bands) => {
            let min = bands.iter().map(|band| OrderedFloat(band.min)).min()?;
            let max = bands.iter().map(|band| OrderedFloat(band.max)).max()?;
            Some((min.0, max.0))
        }
    }
}

fn merge_time_bounds(
    current: Option<(NaiveDateTime, NaiveDateTime)>,
    next: (NaiveDateTime, NaiveDateTime),
) -> (NaiveDateTime, NaiveDateTime) {
    match current {
        Some((min, max)) => (min.min(next.0), max.max(next.1)),
        None => next,
    }
}

fn merge_value_bounds(current: Option<(f64, f64)>, next: (f64, f64)) -> (f64, f64) {
    match current {
        Some((min, max)) => (min.min(next.0), max.max(next.1)),
        None => next,
    }
}

/// Pads the data extent by 5% per side; a singular extent widens to a minute.
fn pad_time_domain(min: NaiveDateTime, max: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let span = max - min;
    let pad = if span.is_zero() {
        Duration::seconds(30)
    } else {
        span / 20
    };
    (min - pad, max + pad)
}

/// Pads the value extent by 5% per side; a singular extent widens by at least
/// one unit.
fn pad_value_domain(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (min.abs() * 0.05).max(1.0)
    };
    (min - pad, max + pad)
}
