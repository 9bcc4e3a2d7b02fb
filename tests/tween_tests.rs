// Host-side tests for easing curves, tweens and the idle oscillation.

use ice_westie::core::tween::{back_out, expo_in_out, sine_in_out, Ease, Oscillation, Tween};

const EPS: f32 = 1e-5;

#[test]
fn curves_hit_their_endpoints() {
    for ease in [
        Ease::Linear,
        Ease::QuadOut,
        Ease::SineInOut,
        Ease::ExpoInOut,
        Ease::BackOut(2.0),
    ] {
        assert!(ease.apply(0.0).abs() < EPS, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{ease:?} at 1");
    }
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    assert!((sine_in_out(0.5) - 0.5).abs() < EPS);
    assert!((expo_in_out(0.5) - 0.5).abs() < EPS);
}

#[test]
fn back_out_overshoots() {
    let peak = (1..100)
        .map(|i| back_out(i as f32 / 100.0, 2.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.05, "peak {peak}");
}

#[test]
fn tween_holds_start_value_through_delay() {
    let t = Tween::new(0.0, 4.0, 10.0, 2.0, Ease::Linear).with_delay(1.0);
    assert_eq!(t.value(9.0), 0.0);
    assert_eq!(t.value(10.5), 0.0);
    assert!((t.value(12.0) - 2.0).abs() < EPS);
    assert_eq!(t.value(13.0), 4.0);
    assert!(t.is_finished(13.0));
    assert!(!t.is_finished(12.9));
}

#[test]
fn zero_duration_tween_jumps_to_end() {
    let t = Tween::new(1.0, 3.0, 0.0, 0.0, Ease::ExpoInOut);
    assert_eq!(t.value(0.001), 3.0);
}

#[test]
fn oscillation_swings_between_rest_and_amplitude() {
    let o = Oscillation::new(0.3, 1.5, 2.0);
    assert_eq!(o.offset(2.0), 0.0);
    assert!((o.offset(3.5) - 0.3).abs() < EPS);
    assert!(o.offset(5.0).abs() < EPS);
    assert!((o.offset(6.5) - 0.3).abs() < EPS);
    // Before the start it rests.
    assert_eq!(o.offset(0.0), 0.0);
}

#[test]
fn oscillation_is_continuous() {
    let o = Oscillation::new(0.25, 1.2, 0.0);
    let mut prev = o.offset(0.0);
    for i in 1..1000 {
        let v = o.offset(i as f64 * 0.01);
        assert!((v - prev).abs() < 0.01, "jump at step {i}");
        prev = v;
    }
}
