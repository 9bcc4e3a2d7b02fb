//! The scene controller: particle cloud, star, halo, gifts and decorations.
//!
//! Everything is driven by an explicit clock (`now`, seconds since mount)
//! passed in by the host, so the whole lifecycle can be stepped in tests
//! without a browser.

use crate::core::assembly::{self, Assembly, DecorationKind, GiftSpec, Primitive};
use crate::core::color::hex_to_linear;
use crate::core::config::SceneConfig;
use crate::core::constants::*;
use crate::core::particles::ParticleCloud;
use crate::core::placement::{facing_outward, ConeProxy, Ray};
use crate::core::tween::{Ease, Oscillation, Tween};
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationState {
    Dormant,
    Forming,
    Formed,
}

/// Lifecycle transitions reported back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    FormationStarted,
    FormationCompleted,
}

pub struct GiftInstance {
    pub assembly: Assembly,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Tween,
}

pub struct DecorationInstance {
    pub kind: DecorationKind,
    pub assembly: Assembly,
    pub position: Vec3,
    pub orientation: Quat,
    /// Final uniform scale; replaces the builder's base scale.
    pub target_scale: f32,
    pub scale: Tween,
    pub sway: Oscillation,
}

impl DecorationInstance {
    /// Outward orientation with the idle sway applied about local Z.
    pub fn rotation(&self, now_sec: f64) -> Quat {
        self.orientation * Quat::from_rotation_z(self.sway.offset(now_sec))
    }
}

/// One part of one object, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshInstance {
    pub primitive: Primitive,
    pub model: Mat4,
    /// Linear RGB.
    pub color: [f32; 3],
    pub opacity: f32,
}

impl MeshInstance {
    /// Drawn last and without depth writes.
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

pub struct SceneController {
    config: SceneConfig,
    rng: StdRng,
    state: FormationState,
    particles: ParticleCloud,
    formation: Option<Tween>,
    cone: ConeProxy,
    star: Assembly,
    star_scale: Option<Tween>,
    star_spin: f32,
    halo: Primitive,
    halo_fade: Option<Tween>,
    gifts: Vec<GiftInstance>,
    decorations: Vec<DecorationInstance>,
    last_update_sec: Option<f64>,
}

impl SceneController {
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = ParticleCloud::new(
            config.particle_count,
            config.tree_height,
            config.tree_radius,
            &mut rng,
        );
        let cone = ConeProxy::new(config.tree_radius, config.tree_height, CONE_PROXY_SEGMENTS);
        let halo = Primitive::Torus {
            radius: config.tree_radius,
            tube: HALO_TUBE,
            radial_segments: 16,
            tubular_segments: 100,
            arc: TAU,
        };
        Self {
            config,
            rng,
            state: FormationState::Dormant,
            particles,
            formation: None,
            cone,
            star: assembly::star(),
            star_scale: None,
            star_spin: 0.0,
            halo,
            halo_fade: None,
            gifts: Vec::new(),
            decorations: Vec::new(),
            last_update_sec: None,
        }
    }

    pub fn state(&self) -> FormationState {
        self.state
    }

    pub fn is_formed(&self) -> bool {
        self.state == FormationState::Formed
    }

    pub fn particles(&self) -> &ParticleCloud {
        &self.particles
    }

    pub fn gifts(&self) -> &[GiftInstance] {
        &self.gifts
    }

    pub fn decorations(&self) -> &[DecorationInstance] {
        &self.decorations
    }

    pub fn star_position(&self) -> Vec3 {
        Vec3::new(0.0, self.config.tree_height / 2.0 + STAR_LIFT, 0.0)
    }

    /// Feed one fist signal. Only the first `true` seen while dormant does anything.
    pub fn on_fist_signal(&mut self, is_fist: bool, now_sec: f64) -> Option<SceneEvent> {
        if !is_fist || self.state != FormationState::Dormant {
            return None;
        }
        self.state = FormationState::Forming;
        self.particles.begin_formation();
        self.formation = Some(Tween::new(
            0.0,
            1.0,
            now_sec,
            self.config.formation_duration_sec,
            Ease::ExpoInOut,
        ));
        self.halo_fade = Some(
            Tween::new(0.0, 1.0, now_sec, HALO_FADE_DURATION_SEC, Ease::QuadOut)
                .with_delay(HALO_FADE_DELAY_SEC),
        );
        log::info!("formation started at {:.2}s", now_sec);
        Some(SceneEvent::FormationStarted)
    }

    /// Advance animations to `now_sec`.
    pub fn update(&mut self, now_sec: f64) -> Option<SceneEvent> {
        let dt = self
            .last_update_sec
            .map(|last| (now_sec - last).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_update_sec = Some(now_sec);

        if self.star_scale(now_sec) > 0.0 {
            self.star_spin = (self.star_spin + STAR_SPIN_RAD_PER_SEC * dt) % TAU;
        }

        let formation = match (self.state, self.formation) {
            (FormationState::Forming, Some(tween)) => tween,
            _ => return None,
        };
        if !formation.is_finished(now_sec) {
            self.particles.blend(formation.value(now_sec));
            return None;
        }
        self.complete_formation(now_sec);
        Some(SceneEvent::FormationCompleted)
    }

    fn complete_formation(&mut self, now_sec: f64) {
        self.particles.settle();
        self.formation = None;
        self.state = FormationState::Formed;
        self.spawn_gifts(now_sec);
        self.star_scale = Some(Tween::new(
            0.0,
            1.0,
            now_sec,
            STAR_SCALE_IN_SEC,
            Ease::BackOut(STAR_OVERSHOOT),
        ));
        log::info!(
            "tree formed at {:.2}s with {} gifts",
            now_sec,
            self.gifts.len()
        );
    }

    fn spawn_gifts(&mut self, now_sec: f64) {
        let rng = &mut self.rng;
        self.gifts = (0..self.config.gift_count)
            .map(|i| {
                let spec = GiftSpec {
                    color: GIFT_COLORS[i % GIFT_COLORS.len()],
                    ribbon_color: RIBBON_COLORS[rng.gen_range(0..RIBBON_COLORS.len())],
                    size: GIFT_SIZE_MIN + rng.gen::<f32>() * GIFT_SIZE_SPAN,
                    ribbon_thickness: GIFT_RIBBON_MIN + rng.gen::<f32>() * GIFT_RIBBON_SPAN,
                };
                let angle = rng.gen::<f32>() * TAU;
                let dist = GIFT_MIN_DISTANCE + rng.gen::<f32>() * GIFT_DISTANCE_SPAN;
                let stack = (1.0 - dist / GIFT_STACK_FALLOFF).max(0.0) * GIFT_STACK_HEIGHT;
                let y = GIFT_FLOOR_Y + rng.gen::<f32>() * stack;
                let rot_y = rng.gen::<f32>() * PI;
                let rot_x = (rng.gen::<f32>() - 0.5) * GIFT_TILT;
                let rot_z = (rng.gen::<f32>() - 0.5) * GIFT_TILT;
                GiftInstance {
                    assembly: assembly::gift(spec),
                    position: Vec3::new(angle.cos() * dist, y, angle.sin() * dist),
                    rotation: assembly::euler_xyz(rot_x, rot_y, rot_z),
                    scale: Tween::new(
                        0.0,
                        1.0,
                        now_sec,
                        GIFT_SCALE_IN_SEC,
                        Ease::BackOut(GIFT_OVERSHOOT),
                    )
                    .with_delay(GIFT_BASE_DELAY_SEC + GIFT_STAGGER_SEC * i as f32),
                }
            })
            .collect();
    }

    /// Try to hang a decoration where `ray` meets the tree.
    ///
    /// Returns the new decoration's index, or `None` if the tree is not
    /// formed yet or the ray misses it.
    pub fn click(&mut self, ray: &Ray, kind: DecorationKind, now_sec: f64) -> Option<usize> {
        if self.state != FormationState::Formed {
            return None;
        }
        let hit = self.cone.intersect(ray)?;
        let target_scale = DECORATION_SCALE_MIN + self.rng.gen::<f32>() * DECORATION_SCALE_SPAN;
        let amplitude = SWAY_AMPLITUDE_MIN + self.rng.gen::<f32>() * SWAY_AMPLITUDE_SPAN;
        let half_period = SWAY_PERIOD_MIN_SEC + self.rng.gen::<f32>() * SWAY_PERIOD_SPAN_SEC;
        let assembly = kind.build(&mut self.rng);
        self.decorations.push(DecorationInstance {
            kind,
            assembly,
            position: hit,
            orientation: facing_outward(hit),
            target_scale,
            scale: Tween::new(
                0.0,
                target_scale,
                now_sec,
                DECORATION_SCALE_IN_SEC,
                Ease::BackOut(DECORATION_OVERSHOOT),
            ),
            sway: Oscillation::new(amplitude, half_period, now_sec),
        });
        log::info!(
            "placed {} at ({:.2}, {:.2}, {:.2})",
            kind.id(),
            hit.x,
            hit.y,
            hit.z
        );
        Some(self.decorations.len() - 1)
    }

    pub fn star_scale(&self, now_sec: f64) -> f32 {
        self.star_scale.map(|t| t.value(now_sec)).unwrap_or(0.0)
    }

    pub fn star_spin(&self) -> f32 {
        self.star_spin
    }

    /// Halo opacity: hidden until the fade starts, then a slow breath
    /// scaled by the fade.
    pub fn halo_opacity(&self, now_sec: f64) -> f32 {
        let fade = self.halo_fade.map(|t| t.value(now_sec)).unwrap_or(0.0);
        if fade <= 0.0 {
            return 0.0;
        }
        let breath = HALO_BASE_OPACITY
            + HALO_BREATH_AMPLITUDE * (now_sec as f32 * HALO_BREATH_RATE).sin();
        fade * breath
    }

    /// Flatten every visible object into drawable parts. Opaque parts come
    /// first; translucent ones (the halo) are appended last.
    pub fn mesh_instances(&self, now_sec: f64, out: &mut Vec<MeshInstance>) {
        out.clear();

        let star_scale = self.star_scale(now_sec);
        if star_scale > 0.0 {
            let group = Mat4::from_scale_rotation_translation(
                Vec3::splat(star_scale * self.star.base_scale),
                Quat::from_rotation_y(self.star_spin),
                self.star_position(),
            );
            push_assembly(out, &self.star, group);
        }

        for gift in &self.gifts {
            let s = gift.scale.value(now_sec) * gift.assembly.base_scale;
            if s <= 0.0 {
                continue;
            }
            let group =
                Mat4::from_scale_rotation_translation(Vec3::splat(s), gift.rotation, gift.position);
            push_assembly(out, &gift.assembly, group);
        }

        for deco in &self.decorations {
            let s = deco.scale.value(now_sec);
            if s <= 0.0 {
                continue;
            }
            let group = Mat4::from_scale_rotation_translation(
                Vec3::splat(s),
                deco.rotation(now_sec),
                deco.position,
            );
            push_assembly(out, &deco.assembly, group);
        }

        let opacity = self.halo_opacity(now_sec);
        if opacity > 0.0 {
            out.push(MeshInstance {
                primitive: self.halo,
                model: Mat4::from_rotation_translation(
                    Quat::from_rotation_x(FRAC_PI_2),
                    Vec3::new(0.0, HALO_Y, 0.0),
                ),
                color: hex_to_linear(ICE_BLUE),
                opacity,
            });
        }
    }
}

fn push_assembly(out: &mut Vec<MeshInstance>, assembly: &Assembly, group: Mat4) {
    out.extend(assembly.parts.iter().map(|part| MeshInstance {
        primitive: part.primitive,
        model: group * part.local_matrix(),
        color: hex_to_linear(part.color),
        opacity: 1.0,
    }));
}
