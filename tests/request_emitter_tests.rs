use range_selector::api::{
    EmitOutcome, RangeSelector, RangeSelectorConfig, RequestEmitter, RequestKind,
    TrajectoryRequest, Transport,
};
use range_selector::core::{TimeWindow, TrackBounds, millis_to_nanos_string};
use range_selector::error::{SelectorError, SelectorResult};
use range_selector::interaction::{DragPhase, Handle};

#[derive(Debug, Default)]
struct ScriptedTransport {
    connected: bool,
    fail_sends: bool,
    send_calls: usize,
    sent: Vec<String>,
}

impl ScriptedTransport {
    fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }
}

impl Transport for ScriptedTransport {
    fn is_available(&self) -> bool {
        self.connected
    }

    fn send(&mut self, payload: &str) -> SelectorResult<()> {
        self.send_calls += 1;
        if self.fail_sends {
            return Err(SelectorError::Transport("socket closed mid-send".to_owned()));
        }
        self.sent.push(payload.to_owned());
        Ok(())
    }
}

fn build_selector(transport: ScriptedTransport) -> RangeSelector<ScriptedTransport> {
    let config = RangeSelectorConfig::new("L2")
        .with_initial_now_ms(1_000_000)
        .with_track(TrackBounds::new(0.0, 1000.0));
    RangeSelector::new(transport, config).expect("selector init")
}

#[test]
fn unavailable_transport_drops_request_without_calling_send() {
    let mut selector = build_selector(ScriptedTransport::default());

    selector.pointer_down(Handle::Min, 300.0);
    selector.pointer_up(300.0);

    assert_eq!(selector.transport().send_calls, 0);
    let stats = selector.emitter_stats();
    assert_eq!(stats.sent, 0);
    assert_eq!(stats.dropped_unavailable, 1);
    assert_eq!(selector.active_listener_count(), 0);
}

#[test]
fn dropped_requests_are_not_replayed_after_reconnect() {
    let mut selector = build_selector(ScriptedTransport::default());
    selector.pointer_down(Handle::Min, 300.0);
    selector.pointer_up(300.0);

    selector.transport_mut().connected = true;
    selector.pointer_down(Handle::Max, 700.0);
    selector.pointer_up(700.0);

    assert_eq!(selector.transport().send_calls, 1);
    assert_eq!(selector.emitter_stats().sent, 1);
}

#[test]
fn failing_send_is_absorbed() {
    let transport = ScriptedTransport {
        connected: true,
        fail_sends: true,
        ..ScriptedTransport::default()
    };
    let mut selector = build_selector(transport);

    selector.pointer_down(Handle::Max, 700.0);
    selector.pointer_up(700.0);

    assert_eq!(selector.transport().send_calls, 1);
    assert_eq!(selector.emitter_stats().failed, 1);
    assert_eq!(selector.drag_phase(Handle::Max), DragPhase::Idle);
}

#[test]
fn request_carries_both_bounds_read_fresh() {
    let mut selector = build_selector(ScriptedTransport::connected());
    selector.set_min_percent(50.0);

    // Only the max handle moves; the min bound still reflects the earlier write.
    selector.pointer_down(Handle::Max, 805.0);
    selector.pointer_up(805.0);

    let request =
        TrajectoryRequest::from_json_str(&selector.transport().sent[0]).expect("valid request");
    assert_eq!(request.request, RequestKind::Trajectory);
    assert_eq!(request.param.map_name, "L2");
    assert_eq!(request.param.start_time, "1000000000000");
    assert_eq!(request.param.finish_time, "3160000000000");
}

#[test]
fn wire_payload_matches_trajectory_request_shape() {
    let mut emitter = RequestEmitter::new(ScriptedTransport::connected(), "B1");
    assert_eq!(emitter.map_name(), "B1");
    let outcome = emitter.emit(TimeWindow {
        min_time_ms: 1_700_000_000_123,
        max_time_ms: 1_700_000_060_456,
    });
    assert_eq!(outcome, EmitOutcome::Sent);

    let payload: serde_json::Value =
        serde_json::from_str(&emitter.transport().sent[0]).expect("json payload");
    assert_eq!(
        payload,
        serde_json::json!({
            "request": "trajectory",
            "param": {
                "map_name": "B1",
                "start_time": "1700000000123000000",
                "finish_time": "1700000060456000000",
            }
        })
    );
}

#[test]
fn nanosecond_conversion_is_exact_beyond_f64_precision() {
    // 2^53 + 1 ms cannot be represented exactly in f64.
    let time_ms = 9_007_199_254_740_993_i64;
    assert_eq!(
        millis_to_nanos_string(time_ms).expect("fits in decimal"),
        "9007199254740993000000"
    );
    assert_eq!(
        millis_to_nanos_string(-1_160_000).expect("negative ok"),
        "-1160000000000"
    );
}
