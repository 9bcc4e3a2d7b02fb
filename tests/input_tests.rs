// Host-side tests for pointer input helpers.

use glam::Vec2;
use ice_westie::input::*;

#[test]
fn client_position_normalizes_to_rect() {
    let origin = Vec2::new(10.0, 20.0);
    let size = Vec2::new(200.0, 100.0);
    assert_eq!(client_to_uv(Vec2::new(110.0, 70.0), origin, size), [0.5, 0.5]);
    assert_eq!(client_to_uv(Vec2::new(10.0, 20.0), origin, size), [0.0, 0.0]);
    assert_eq!(client_to_uv(Vec2::new(210.0, 120.0), origin, size), [1.0, 1.0]);
}

#[test]
fn client_position_outside_rect_is_clamped() {
    let uv = client_to_uv(Vec2::new(-50.0, 500.0), Vec2::ZERO, Vec2::new(100.0, 100.0));
    assert_eq!(uv, [0.0, 1.0]);
}

#[test]
fn degenerate_rect_maps_to_center() {
    assert_eq!(client_to_uv(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO), [0.5, 0.5]);
}

#[test]
fn drag_reports_deltas_only_while_pressed() {
    let mut d = DragState::default();
    assert_eq!(d.motion(1, Vec2::new(5.0, 5.0)), None);
    d.press(1, Vec2::new(10.0, 10.0));
    assert_eq!(d.motion(1, Vec2::new(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
    assert_eq!(d.motion(1, Vec2::new(15.0, 9.0)), Some(Vec2::new(0.0, 1.0)));
    d.release(1);
    assert_eq!(d.motion(1, Vec2::new(30.0, 30.0)), None);
}

#[test]
fn other_pointers_are_ignored() {
    let mut d = DragState::default();
    d.press(7, Vec2::ZERO);
    assert_eq!(d.motion(8, Vec2::new(1.0, 1.0)), None);
    d.release(8);
    assert!(d.active);
    assert_eq!(d.motion(7, Vec2::new(1.0, 1.0)), Some(Vec2::new(1.0, 1.0)));
}
