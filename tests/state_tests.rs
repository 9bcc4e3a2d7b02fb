// Host-side tests for the instruction line and decoration bar state.

use ice_westie::core::state::{AppState, MSG_CAMERA, MSG_DECORATE, MSG_FIST, MSG_WAKING};
use ice_westie::core::SceneEvent;

#[test]
fn camera_message_until_capture_starts() {
    let s = AppState::default();
    assert_eq!(s.instruction(), MSG_CAMERA);
    assert!(!s.decorations_enabled());
}

#[test]
fn instructions_follow_lifecycle() {
    let mut s = AppState {
        camera_active: true,
        ..Default::default()
    };
    assert_eq!(s.instruction(), MSG_FIST);

    s.apply(SceneEvent::FormationStarted);
    assert_eq!(s.instruction(), MSG_WAKING);
    assert!(!s.decorations_enabled());

    s.apply(SceneEvent::FormationCompleted);
    assert_eq!(s.instruction(), MSG_DECORATE);
    assert!(s.decorations_enabled());
    assert!(!s.is_waking_up);
}

#[test]
fn camera_message_wins_over_scene_progress() {
    let mut s = AppState::default();
    s.apply(SceneEvent::FormationStarted);
    assert_eq!(s.instruction(), MSG_CAMERA);
}

#[test]
fn fist_signal_does_not_change_text() {
    let s = AppState {
        camera_active: true,
        is_fist: true,
        ..Default::default()
    };
    assert_eq!(s.instruction(), MSG_FIST);
}
