use crate::core::constants::*;
use crate::core::placement::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

const POLE_EPSILON: f32 = 1e-6;
const ZOOM_STEP: f32 = 0.95;

/// Orbit camera around a fixed target, in spherical coordinates.
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle
/// from +Y. Input is accumulated into pending deltas that are bled off a
/// fraction at a time, so drags coast to a stop.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// One unit is one full turn per minute.
    pub auto_rotate_speed: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(CAMERA_START, Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(POLE_EPSILON);
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            auto_rotate_speed: CAMERA_AUTO_ROTATE_SPEED,
            damping: CAMERA_DAMPING,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + self.radius * Vec3::new(s * self.theta.sin(), self.phi.cos(), s * self.theta.cos())
    }

    /// Pointer drag in CSS pixels; a drag the height of the viewport is a full turn.
    pub fn drag(&mut self, delta_px: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * delta_px.x / h;
        self.pending_phi -= TAU * delta_px.y / h;
    }

    /// Wheel input: positive deltas move away from the target.
    pub fn zoom(&mut self, wheel_delta_y: f32) {
        if wheel_delta_y > 0.0 {
            self.pending_scale /= ZOOM_STEP;
        } else if wheel_delta_y < 0.0 {
            self.pending_scale *= ZOOM_STEP;
        }
    }

    pub fn update(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        self.pending_theta -= TAU / 60.0 * self.auto_rotate_speed * dt;

        // Damping is specified per 60 Hz frame; rescale for the real step.
        let keep = (1.0 - self.damping.clamp(0.0, 1.0)).powf(dt * 60.0);
        let apply = 1.0 - keep;
        self.theta += self.pending_theta * apply;
        self.phi = (self.phi + self.pending_phi * apply).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.pending_theta *= keep;
        self.pending_phi *= keep;

        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.pending_scale = 1.0;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// World-space ray from the eye through `ndc` (x right, y up, both in \[-1, 1\]).
    pub fn ray(&self, ndc: Vec2, aspect: f32) -> Ray {
        let inv = self.view_proj(aspect).inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let p = p.truncate() / p.w;
        let eye = self.eye();
        Ray::new(eye, p - eye)
    }
}
