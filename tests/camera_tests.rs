// Host-side tests for the orbit camera.

use glam::{Vec2, Vec3};
use ice_westie::core::constants::*;
use ice_westie::core::OrbitCamera;

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-3
}

#[test]
fn default_camera_sits_at_start_position() {
    let cam = OrbitCamera::default();
    assert!(close(cam.eye(), CAMERA_START), "eye {}", cam.eye());
    assert_eq!(cam.fov_y_deg, CAMERA_FOV_DEG);
    assert_eq!(cam.near, CAMERA_NEAR);
    assert_eq!(cam.far, CAMERA_FAR);
}

#[test]
fn center_ray_points_at_target() {
    let cam = OrbitCamera::default();
    let ray = cam.ray(Vec2::ZERO, 16.0 / 9.0);
    assert!(close(ray.origin, cam.eye()));
    let expected = (cam.target - cam.eye()).normalize();
    assert!(ray.direction.distance(expected) < 1e-4);
}

#[test]
fn ray_projects_back_to_its_ndc() {
    let cam = OrbitCamera::default();
    let aspect = 1.5;
    let ndc = Vec2::new(0.4, -0.3);
    let ray = cam.ray(ndc, aspect);
    let clip = cam.view_proj(aspect) * ray.at(7.0).extend(1.0);
    let back = clip.truncate().truncate() / clip.w;
    assert!(back.distance(ndc) < 1e-3, "{back}");
}

#[test]
fn zoom_is_clamped() {
    let mut cam = OrbitCamera::default();
    for _ in 0..100 {
        cam.zoom(120.0);
        cam.update(1.0 / 60.0);
    }
    assert_eq!(cam.radius, CAMERA_MAX_DISTANCE);
    for _ in 0..100 {
        cam.zoom(-120.0);
        cam.update(1.0 / 60.0);
    }
    assert_eq!(cam.radius, CAMERA_MIN_DISTANCE);
}

#[test]
fn auto_rotation_turns_the_camera() {
    let mut cam = OrbitCamera::default();
    let before = cam.theta;
    for _ in 0..120 {
        cam.update(1.0 / 60.0);
    }
    assert!(cam.theta < before);
    assert!((cam.radius - CAMERA_START.length()).abs() < 1e-3);
}

#[test]
fn drag_cannot_flip_over_the_pole() {
    let mut cam = OrbitCamera::default();
    cam.auto_rotate_speed = 0.0;
    cam.drag(Vec2::new(0.0, 10_000.0), 800.0);
    for _ in 0..600 {
        cam.update(1.0 / 60.0);
    }
    assert!(cam.phi > 0.0 && cam.phi < std::f32::consts::PI);
    assert!(cam.eye().y.is_finite());
}

#[test]
fn drag_coasts_to_a_stop() {
    let mut cam = OrbitCamera::default();
    cam.auto_rotate_speed = 0.0;
    cam.drag(Vec2::new(100.0, 0.0), 800.0);
    cam.update(1.0 / 60.0);
    let first = cam.theta;
    for _ in 0..1200 {
        cam.update(1.0 / 60.0);
    }
    let settled = cam.theta;
    cam.update(1.0 / 60.0);
    assert!(first != 0.0);
    assert!((cam.theta - settled).abs() < 1e-6);
}

#[test]
fn damping_is_frame_rate_independent() {
    let mut a = OrbitCamera::default();
    let mut b = OrbitCamera::default();
    a.auto_rotate_speed = 0.0;
    b.auto_rotate_speed = 0.0;
    a.drag(Vec2::new(50.0, 0.0), 600.0);
    b.drag(Vec2::new(50.0, 0.0), 600.0);
    for _ in 0..60 {
        a.update(1.0 / 60.0);
    }
    for _ in 0..30 {
        b.update(1.0 / 30.0);
    }
    assert!((a.theta - b.theta).abs() < 1e-3);
}
