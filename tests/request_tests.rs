use chrono::{DateTime, TimeZone, Utc};
use history_chart::{ChartTimeZone, RenderError, RenderRequest};
use std::path::Path;

fn utc(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, minute, second)
        .single()
        .expect("valid timestamp")
}

fn request(date_from: &str, date_to: Option<&str>) -> RenderRequest {
    RenderRequest {
        entity_id: vec!["sensor.kitchen".to_owned()],
        date_from: date_from.to_owned(),
        date_to: date_to.map(str::to_owned),
        path_to_image: "/tmp/chart.png".into(),
    }
}

#[test]
fn full_payload_parses() {
    let request = RenderRequest::from_json(
        r#"{
            "entity_id": ["sensor.kitchen", "sensor.bedroom"],
            "date_from": "2024-05-01T00:00:00",
            "date_to": "2024-05-02T00:00:00",
            "path_to_image": "/tmp/chart.png"
        }"#,
    )
    .expect("valid payload");

    assert_eq!(request.entity_id, vec!["sensor.kitchen", "sensor.bedroom"]);
    assert_eq!(request.path_to_image, Path::new("/tmp/chart.png"));
}

#[test]
fn single_entity_string_is_promoted_to_a_list() {
    let request = RenderRequest::from_json(
        r#"{
            "entity_id": "sensor.kitchen",
            "date_from": "2024-05-01",
            "path_to_image": "/tmp/chart.png"
        }"#,
    )
    .expect("valid payload");

    assert_eq!(request.entity_id, vec!["sensor.kitchen"]);
    assert_eq!(request.date_to, None);
}

#[test]
fn malformed_json_is_reported_as_an_invalid_request() {
    let result = RenderRequest::from_json("{\"entity_id\": ");
    assert!(matches!(result, Err(RenderError::InvalidRequest(_))));
}

#[test]
fn missing_date_to_leaves_the_range_open() {
    let spec = request("2024-05-01T00:00:00", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(spec.range.from, utc(1, 0, 0, 0));
    assert_eq!(spec.range.to, None);
}

#[test]
fn explicit_offset_wins_over_the_request_zone() {
    let spec = request("2024-05-01T12:00:00+02:00", None)
        .to_spec(ChartTimeZone::FixedOffsetMinutes { minutes: -300 })
        .expect("spec");
    assert_eq!(spec.range.from, utc(1, 10, 0, 0));
}

#[test]
fn naive_timestamps_resolve_in_the_request_zone() {
    let spec = request("2024-05-01T12:00:00", Some("2024-05-01T18:00:00"))
        .to_spec(ChartTimeZone::FixedOffsetMinutes { minutes: 120 })
        .expect("spec");

    assert_eq!(spec.range.from, utc(1, 10, 0, 0));
    assert_eq!(spec.range.to, Some(utc(1, 16, 0, 0)));
    assert_eq!(
        spec.timezone,
        ChartTimeZone::FixedOffsetMinutes { minutes: 120 }
    );
}

#[test]
fn space_separated_timestamps_are_accepted() {
    let spec = request("2024-05-01 12:30:00", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(spec.range.from, utc(1, 12, 30, 0));
}

#[test]
fn minute_precision_is_accepted() {
    let spec = request("2024-05-01T12:30", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(spec.range.from, utc(1, 12, 30, 0));
}

#[test]
fn fractional_seconds_are_accepted() {
    let spec = request("2024-05-01T12:00:00.250", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(
        spec.range.from,
        utc(1, 12, 0, 0) + chrono::Duration::milliseconds(250)
    );
}

#[test]
fn bare_dates_mean_local_midnight() {
    let spec = request("2024-05-01", None)
        .to_spec(ChartTimeZone::FixedOffsetMinutes { minutes: 60 })
        .expect("spec");
    // Midnight at UTC+1 is 23:00 the previous day in UTC.
    assert_eq!(spec.range.from, utc(1, 0, 0, 0) - chrono::Duration::hours(1));
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let spec = request(" 2024-05-01T00:00:00 ", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(spec.range.from, utc(1, 0, 0, 0));
}

#[test]
fn invalid_date_from_names_the_field() {
    let result = request("yesterday", None).to_spec(ChartTimeZone::Utc);
    match result {
        Err(RenderError::InvalidTimestamp { field, value }) => {
            assert_eq!(field, "date_from");
            assert_eq!(value, "yesterday");
        }
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn invalid_date_to_names_the_field() {
    let result =
        request("2024-05-01T00:00:00", Some("not-a-date")).to_spec(ChartTimeZone::Utc);
    match result {
        Err(RenderError::InvalidTimestamp { field, .. }) => assert_eq!(field, "date_to"),
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn path_flows_into_the_spec() {
    let spec = request("2024-05-01", None)
        .to_spec(ChartTimeZone::Utc)
        .expect("spec");
    assert_eq!(spec.path, Path::new("/tmp/chart.png"));
}
