use range_selector::api::{RangeSelector, RangeSelectorConfig, Transport};
use range_selector::core::PercentRange;
use range_selector::error::SelectorResult;

#[derive(Debug, Default)]
struct RecordingTransport {
    sent: Vec<String>,
}

impl Transport for RecordingTransport {
    fn is_available(&self) -> bool {
        true
    }

    fn send(&mut self, payload: &str) -> SelectorResult<()> {
        self.sent.push(payload.to_owned());
        Ok(())
    }
}

fn build_selector(min: f64, max: f64) -> RangeSelector<RecordingTransport> {
    let config = RangeSelectorConfig::default()
        .with_initial_range(PercentRange::new(min, max).expect("valid range"))
        .with_initial_now_ms(1_000_000);
    RangeSelector::new(RecordingTransport::default(), config).expect("selector init")
}

#[test]
fn set_min_past_max_stops_at_max() {
    let mut selector = build_selector(20.0, 80.0);
    let range = selector.set_min_percent(90.0);
    assert_eq!(range.min_percent(), 80.0);
    assert_eq!(range.max_percent(), 80.0);
}

#[test]
fn set_max_below_min_stops_at_min() {
    let mut selector = build_selector(20.0, 80.0);
    let range = selector.set_max_percent(10.0);
    assert_eq!(range.min_percent(), 20.0);
    assert_eq!(range.max_percent(), 20.0);
}

#[test]
fn writes_clamp_to_track_edges() {
    let mut selector = build_selector(20.0, 80.0);
    selector.set_min_percent(-15.0);
    selector.set_max_percent(140.0);
    assert_eq!(selector.range(), PercentRange::full());
}

#[test]
fn moving_handle_never_pushes_the_other() {
    let mut selector = build_selector(40.0, 60.0);
    selector.set_max_percent(0.0);
    assert_eq!(selector.range(), PercentRange::new(40.0, 40.0).expect("range"));

    selector.set_min_percent(100.0);
    assert_eq!(selector.range(), PercentRange::new(40.0, 40.0).expect("range"));

    selector.set_max_percent(90.0);
    selector.set_min_percent(100.0);
    assert_eq!(selector.range(), PercentRange::new(90.0, 90.0).expect("range"));
}

#[test]
fn every_write_recomputes_the_window_from_last_now() {
    let mut selector = build_selector(20.0, 80.0);
    assert_eq!(selector.time_window().min_time_ms, -1_160_000);

    selector.set_min_percent(50.0);
    let window = selector.time_window();
    assert_eq!(window.min_time_ms, 1_000_000);
    assert_eq!(window.max_time_ms, 3_160_000);
    assert_eq!(selector.offsets().min_offset_ms, 0);
}

#[test]
fn programmatic_writes_do_not_commit() {
    let mut selector = build_selector(20.0, 80.0);
    selector.set_min_percent(30.0);
    selector.set_max_percent(70.0);
    assert!(selector.transport().sent.is_empty());
}

#[test]
fn percent_range_constructor_rejects_inverted_or_out_of_track_values() {
    assert!(PercentRange::new(80.0, 20.0).is_err());
    assert!(PercentRange::new(-1.0, 20.0).is_err());
    assert!(PercentRange::new(0.0, 100.5).is_err());
    assert!(PercentRange::new(f64::NAN, 20.0).is_err());
    assert!(PercentRange::new(35.0, 35.0).is_ok());
}

#[test]
fn percent_range_json_goes_through_the_constructor() {
    let inverted = serde_json::from_str::<PercentRange>(r#"{"min_percent":90.0,"max_percent":10.0}"#);
    assert!(inverted.is_err());
    let below_track =
        serde_json::from_str::<PercentRange>(r#"{"min_percent":-10.0,"max_percent":-5.0}"#);
    assert!(below_track.is_err());

    let parsed = serde_json::from_str::<PercentRange>(r#"{"min_percent":30.0,"max_percent":60.0}"#)
        .expect("valid range");
    assert_eq!(parsed, PercentRange::new(30.0, 60.0).expect("range"));
    assert_eq!(parsed.with_min_clamped(75.0).min_percent(), 60.0);
}
