use chrono::{DateTime, TimeZone, Utc};
use history_chart::{RenderError, Sample, SampleAttributes, Series, SeriesSet};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn sample_with_unit(hour: u32, state: &str, unit: &str) -> Sample {
    Sample::new(
        at(hour, 0),
        state,
        SampleAttributes::new(Some(unit.to_owned()), None),
    )
}

#[test]
fn empty_set_is_rejected_before_any_unit_inspection() {
    let set = SeriesSet::new();
    let result = set.resolve_unit();
    assert!(matches!(result, Err(RenderError::EmptyData)));
}

#[test]
fn sampleless_series_are_dropped_on_insert() {
    let mut set = SeriesSet::new();
    set.insert(Series::new("sensor.silent", Vec::new()));
    assert!(set.is_empty());
    assert!(matches!(set.resolve_unit(), Err(RenderError::EmptyData)));
}

#[test]
fn missing_unit_names_the_offending_entity() {
    let set: SeriesSet = [Series::new(
        "sensor.bare",
        vec![Sample::new(at(8, 0), "21.5", SampleAttributes::default())],
    )]
    .into_iter()
    .collect();

    match set.resolve_unit() {
        Err(RenderError::MissingUnit { entity }) => assert_eq!(entity, "sensor.bare"),
        other => panic!("expected MissingUnit, got {other:?}"),
    }
}

#[test]
fn missing_unit_is_reported_before_mismatch_detection() {
    let set: SeriesSet = [
        Series::new(
            "sensor.bare",
            vec![Sample::new(at(8, 0), "21.5", SampleAttributes::default())],
        ),
        Series::new("sensor.humidity", vec![sample_with_unit(8, "40", "%")]),
    ]
    .into_iter()
    .collect();

    match set.resolve_unit() {
        Err(RenderError::MissingUnit { entity }) => assert_eq!(entity, "sensor.bare"),
        other => panic!("expected MissingUnit, got {other:?}"),
    }
}

#[test]
fn mismatched_units_are_enumerated_in_first_seen_order() {
    let set: SeriesSet = [
        Series::new("sensor.kitchen", vec![sample_with_unit(8, "21.5", "°C")]),
        Series::new("sensor.humidity", vec![sample_with_unit(8, "40", "%")]),
        Series::new("sensor.bedroom", vec![sample_with_unit(8, "19.0", "°C")]),
        Series::new("sensor.pressure", vec![sample_with_unit(8, "1013", "hPa")]),
    ]
    .into_iter()
    .collect();

    match set.resolve_unit() {
        Err(RenderError::UnitMismatch { units }) => {
            assert_eq!(units, vec!["°C", "%", "hPa"]);
        }
        other => panic!("expected UnitMismatch, got {other:?}"),
    }
}

#[test]
fn mismatch_message_lists_every_unit() {
    let set: SeriesSet = [
        Series::new("sensor.kitchen", vec![sample_with_unit(8, "21.5", "°C")]),
        Series::new("sensor.humidity", vec![sample_with_unit(8, "40", "%")]),
    ]
    .into_iter()
    .collect();

    let message = set.resolve_unit().expect_err("units differ").to_string();
    assert!(message.contains("°C, %"), "message was: {message}");
}

#[test]
fn shared_unit_resolves() {
    let set: SeriesSet = [
        Series::new("sensor.kitchen", vec![sample_with_unit(8, "21.5", "°C")]),
        Series::new("sensor.bedroom", vec![sample_with_unit(8, "19.0", "°C")]),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.resolve_unit().expect("single unit"), "°C");
}

#[test]
fn reinserting_an_entity_replaces_its_series() {
    let mut set = SeriesSet::new();
    set.insert(Series::new(
        "sensor.kitchen",
        vec![sample_with_unit(8, "21.5", "°C")],
    ));
    set.insert(Series::new(
        "sensor.kitchen",
        vec![sample_with_unit(9, "40", "%")],
    ));

    assert_eq!(set.len(), 1);
    assert_eq!(set.resolve_unit().expect("single unit"), "%");
}

#[test]
fn only_the_first_sample_carries_the_unit_contract() {
    // Later samples may carry attributes, but the contract reads the first.
    let set: SeriesSet = [Series::new(
        "sensor.late_unit",
        vec![
            Sample::new(at(8, 0), "21.5", SampleAttributes::default()),
            Sample::new(
                at(9, 0),
                "22.0",
                SampleAttributes::new(Some("°C".to_owned()), None),
            ),
        ],
    )]
    .into_iter()
    .collect();

    assert!(matches!(
        set.resolve_unit(),
        Err(RenderError::MissingUnit { .. })
    ));
}

#[test]
fn out_of_order_samples_are_canonicalized() {
    let series = Series::new(
        "sensor.kitchen",
        vec![
            sample_with_unit(10, "23.0", "°C"),
            sample_with_unit(8, "21.5", "°C"),
            sample_with_unit(9, "22.0", "°C"),
        ],
    );

    let times: Vec<_> = series
        .samples()
        .iter()
        .map(|sample| sample.recorded_at)
        .collect();
    assert_eq!(times, vec![at(8, 0), at(9, 0), at(10, 0)]);
}

#[test]
fn label_prefers_friendly_name() {
    let series = Series::new(
        "sensor.kitchen_temperature",
        vec![Sample::new(
            at(8, 0),
            "21.5",
            SampleAttributes::with_unit_and_name("°C", "Kitchen"),
        )],
    );
    assert_eq!(series.label(), "Kitchen");
}

#[test]
fn label_falls_back_to_entity_id() {
    let series = Series::new(
        "sensor.kitchen_temperature",
        vec![sample_with_unit(8, "21.5", "°C")],
    );
    assert_eq!(series.label(), "sensor.kitchen_temperature");
}

#[test]
fn insertion_order_is_preserved_for_iteration() {
    let set: SeriesSet = [
        Series::new("sensor.c", vec![sample_with_unit(8, "1", "°C")]),
        Series::new("sensor.a", vec![sample_with_unit(8, "2", "°C")]),
        Series::new("sensor.b", vec![sample_with_unit(8, "3", "°C")]),
    ]
    .into_iter()
    .collect();

    let order: Vec<_> = set.iter().map(Series::entity_id).collect();
    assert_eq!(order, vec!["sensor.c", "sensor.a", "sensor.b"]);
}
