// Host-side tests for constants and their relationships.

use ice_westie::constants::*;
use ice_westie::core::config::{CaptureConfig, DetectorConfig, SceneConfig};
use ice_westie::core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive() {
    assert!(FORMATION_DURATION_SEC > 0.0);
    assert!(HALO_FADE_DURATION_SEC > 0.0);
    assert!(STAR_SCALE_IN_SEC > 0.0);
    assert!(GIFT_SCALE_IN_SEC > 0.0);
    assert!(DECORATION_SCALE_IN_SEC > 0.0);
    assert!(SWAY_PERIOD_MIN_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gift_ring_matches_stacking_falloff() {
    let outer = GIFT_MIN_DISTANCE + GIFT_DISTANCE_SPAN;
    assert!((outer - 5.5).abs() < 1e-6);
    assert!(GIFT_MIN_DISTANCE < GIFT_STACK_FALLOFF);
    assert!(outer > GIFT_STACK_FALLOFF);
    assert!(GIFT_FLOOR_Y <= -TREE_HEIGHT / 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn decoration_ranges() {
    assert!((DECORATION_SCALE_MIN + DECORATION_SCALE_SPAN - 1.2).abs() < 1e-6);
    assert!((SWAY_AMPLITUDE_MIN + SWAY_AMPLITUDE_SPAN - 0.4).abs() < 1e-6);
    assert!((SWAY_PERIOD_MIN_SEC + SWAY_PERIOD_SPAN_SEC - 2.2).abs() < 1e-6);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_limits_bracket_start() {
    let start = CAMERA_START.length();
    assert!(CAMERA_MIN_DISTANCE < start && start < CAMERA_MAX_DISTANCE);
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn halo_never_goes_negative() {
    assert!(HALO_BASE_OPACITY - HALO_BREATH_AMPLITUDE > 0.0);
    assert!(HALO_Y > -TREE_HEIGHT / 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_constants_are_sane() {
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!((0.0..=1.0).contains(&BLOOM_THRESHOLD));
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(BLOOM_SMOOTH_WIDTH > 0.0);
    assert!(HANDS_ASSET_BASE.ends_with('/'));
    for id in [CANVAS_ID, VIDEO_ID, INSTRUCTION_ID, DECO_BAR_ID] {
        assert!(!id.is_empty() && !id.starts_with('#'));
    }
}

#[test]
fn defaults_come_from_constants() {
    let s = SceneConfig::default();
    assert_eq!(s.particle_count, PARTICLE_COUNT);
    assert_eq!(s.fist_threshold, FIST_THRESHOLD);
    assert_eq!(s.formation_duration_sec, FORMATION_DURATION_SEC);
    assert_eq!(s.gift_count, GIFT_COUNT);
    let d = DetectorConfig::default();
    assert_eq!(d.max_num_hands, 1);
    assert_eq!(d.model_complexity, 1);
    assert_eq!(d.min_detection_confidence, 0.5);
    assert_eq!(d.min_tracking_confidence, 0.5);
    let c = CaptureConfig::default();
    assert_eq!((c.width, c.height), (640, 480));
}
