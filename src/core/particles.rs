use crate::core::color::{hex_to_linear, lerp_rgb};
use crate::core::constants::{CLOUD_SPREAD, HELIX_APEX_RADIUS, HELIX_TURNS, ICE_BLUE, WHITE};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Target of particle `index` on the double-helix cone.
///
/// The first half of the indices climbs one helix, the second half the
/// other, offset by half a turn. Both taper from `radius` at the base to a
/// small apex radius at the top.
pub fn helix_target(index: usize, count: usize, height: f32, radius: f32) -> Vec3 {
    let half = (count / 2).max(1);
    let first_helix = index < half;
    let t = (index as f32 / half as f32) % 1.0;
    let angle = t * PI * 2.0 * HELIX_TURNS + if first_helix { 0.0 } else { PI };
    let r = radius * (1.0 - t) + HELIX_APEX_RADIUS;
    Vec3::new(angle.cos() * r, t * height - height / 2.0, angle.sin() * r)
}

/// The point cloud that coalesces into the tree.
///
/// `targets` and `colors` are fixed at construction. `positions` only moves
/// while a formation is running, always as a blend of the snapshot taken by
/// [`ParticleCloud::begin_formation`] and the targets.
pub struct ParticleCloud {
    pub positions: Vec<Vec3>,
    pub targets: Vec<Vec3>,
    /// Linear RGB.
    pub colors: Vec<[f32; 3]>,
    origins: Vec<Vec3>,
}

impl ParticleCloud {
    pub fn new(count: usize, height: f32, radius: f32, rng: &mut impl Rng) -> Self {
        let ice = hex_to_linear(ICE_BLUE);
        let white = hex_to_linear(WHITE);
        let mut positions = Vec::with_capacity(count);
        let mut targets = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for i in 0..count {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * CLOUD_SPREAD,
                (rng.gen::<f32>() - 0.5) * CLOUD_SPREAD,
                (rng.gen::<f32>() - 0.5) * CLOUD_SPREAD,
            ));
            targets.push(helix_target(i, count, height, radius));
            colors.push(lerp_rgb(ice, white, rng.gen::<f32>()));
        }
        Self {
            positions,
            targets,
            colors,
            origins: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remember where every particle is right now; the formation blends from here.
    pub fn begin_formation(&mut self) {
        self.origins.clone_from(&self.positions);
    }

    /// Place every particle at `k` of the way from its origin to its target.
    pub fn blend(&mut self, k: f32) {
        if self.origins.len() != self.positions.len() {
            return;
        }
        for ((p, o), t) in self
            .positions
            .iter_mut()
            .zip(&self.origins)
            .zip(&self.targets)
        {
            *p = o.lerp(*t, k);
        }
    }

    /// Copy the targets verbatim so no easing round-off survives the formation.
    pub fn settle(&mut self) {
        self.positions.copy_from_slice(&self.targets);
        self.origins = Vec::new();
    }
}
