use proptest::prelude::*;
use range_selector::api::{RangeSelector, RangeSelectorConfig, Transport};
use range_selector::core::{Anchor, PercentRange, TrackBounds, offsets, project_range};
use range_selector::error::SelectorResult;
use range_selector::interaction::Handle;

struct NullTransport;

impl Transport for NullTransport {
    fn is_available(&self) -> bool {
        false
    }

    fn send(&mut self, _payload: &str) -> SelectorResult<()> {
        Ok(())
    }
}

fn assert_invariant(range: PercentRange) -> Result<(), TestCaseError> {
    prop_assert!(0.0 <= range.min_percent());
    prop_assert!(range.min_percent() <= range.max_percent());
    prop_assert!(range.max_percent() <= 100.0);
    prop_assert!(range.span_percent() >= 0.0);
    Ok(())
}

proptest! {
    #[test]
    fn set_min_and_set_max_preserve_order_invariant(
        writes in proptest::collection::vec((any::<bool>(), -50.0f64..150.0), 1..64)
    ) {
        let config = RangeSelectorConfig::default().with_initial_now_ms(0);
        let mut selector = RangeSelector::new(NullTransport, config).expect("selector init");

        for (is_min, percent) in writes {
            let range = if is_min {
                selector.set_min_percent(percent)
            } else {
                selector.set_max_percent(percent)
            };
            assert_invariant(range)?;
            let window = selector.time_window();
            prop_assert!(window.min_time_ms <= window.max_time_ms);
        }
    }

    #[test]
    fn random_gestures_preserve_order_invariant(
        steps in proptest::collection::vec((0u8..5, -500.0f64..1500.0), 1..64)
    ) {
        let config = RangeSelectorConfig::default()
            .with_initial_now_ms(0)
            .with_track(TrackBounds::new(0.0, 1000.0));
        let mut selector = RangeSelector::new(NullTransport, config).expect("selector init");

        for (action, client_x) in steps {
            match action {
                0 => selector.pointer_down(Handle::Min, client_x),
                1 => selector.pointer_down(Handle::Max, client_x),
                2 => {
                    selector.pointer_move(client_x);
                }
                3 => {
                    selector.pointer_up(client_x);
                }
                _ => {
                    selector.window_blur();
                }
            }
            assert_invariant(selector.range())?;
        }
    }

    #[test]
    fn offsets_do_not_depend_on_now(
        min in 0.0f64..100.0,
        span_factor in 0.0f64..1.0,
        now_a in -1_000_000_000_000i64..1_000_000_000_000,
        now_b in -1_000_000_000_000i64..1_000_000_000_000,
    ) {
        let max = min + (100.0 - min) * span_factor;
        let range = PercentRange::new(min, max).expect("valid range");
        let anchor = Anchor::default();
        let expected = offsets(range, anchor);

        for now in [now_a, now_b] {
            let window = project_range(range, anchor, now);
            prop_assert_eq!(window.min_time_ms - now, expected.min_offset_ms);
            prop_assert_eq!(window.max_time_ms - now, expected.max_offset_ms);
        }
    }
}
