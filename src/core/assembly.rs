//! Decorations, the tree-top star and gift boxes as small hierarchies of
//! geometric primitives.
//!
//! Builders are plain functions: each call returns a fresh [`Assembly`] and
//! shares nothing with earlier calls. Only the ornament's body color and the
//! gift parameters involve randomness, and both take the RNG from the caller.

use crate::core::constants::ORNAMENT_COLORS;
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Geometry of one part. Conventions: cones and cylinders stand along +Y,
/// tori lie in the XY plane around +Z, the star shape is flat in XY.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// `theta_length` sweeps from the +Y pole; `PI` is a full sphere.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        theta_length: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// `arc` is the swept angle; `TAU` closes the ring.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
    Star {
        points: u32,
        outer_radius: f32,
        inner_radius: f32,
    },
}

impl Primitive {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_length: PI,
        }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc: std::f32::consts::TAU,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Primitive::Cuboid {
            width,
            height,
            depth,
        }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Self {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        }
    }
}

/// Rotation built like an `XYZ` Euler triple: x applied outermost.
#[inline]
pub fn euler_xyz(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_rotation_x(x) * Quat::from_rotation_y(y) * Quat::from_rotation_z(z)
}

/// A colored primitive placed relative to its assembly's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    /// sRGB `0xRRGGBB`.
    pub color: u32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Part {
    pub fn new(primitive: Primitive, color: u32) -> Self {
        Self {
            primitive,
            color,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = euler_xyz(x, y, z);
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Re-express this part as a child of a rotated (unscaled, untranslated) group.
    pub fn under(mut self, group_rotation: Quat) -> Self {
        self.translation = group_rotation * self.translation;
        self.rotation = group_rotation * self.rotation;
        self
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

pub type Parts = SmallVec<[Part; 16]>;

#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    pub parts: Parts,
    /// Uniform scale the builder intends for the whole group. Placed
    /// decorations replace it with their entrance scale.
    pub base_scale: f32,
}

impl Assembly {
    fn new(parts: Parts, base_scale: f32) -> Self {
        Self { parts, base_scale }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// The five user-selectable decorations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    #[default]
    Westie,
    Bell,
    Ornament,
    Snowflake,
    CandyCane,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 5] = [
        DecorationKind::Westie,
        DecorationKind::Bell,
        DecorationKind::Ornament,
        DecorationKind::Snowflake,
        DecorationKind::CandyCane,
    ];

    /// Parse a selection id. Unknown ids select the westie.
    pub fn from_id(id: &str) -> Self {
        match id {
            "westie" => DecorationKind::Westie,
            "bell" => DecorationKind::Bell,
            "ornament" => DecorationKind::Ornament,
            "snowflake" => DecorationKind::Snowflake,
            "candycane" => DecorationKind::CandyCane,
            _ => DecorationKind::Westie,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            DecorationKind::Westie => "westie",
            DecorationKind::Bell => "bell",
            DecorationKind::Ornament => "ornament",
            DecorationKind::Snowflake => "snowflake",
            DecorationKind::CandyCane => "candycane",
        }
    }

    pub fn build(self, rng: &mut impl Rng) -> Assembly {
        match self {
            DecorationKind::Westie => westie(),
            DecorationKind::Bell => bell(),
            DecorationKind::Ornament => ornament(rng),
            DecorationKind::Snowflake => snowflake(),
            DecorationKind::CandyCane => candy_cane(),
        }
    }
}

// ---------------- Builders ----------------

pub fn star() -> Assembly {
    let mut parts = Parts::new();
    parts.push(Part::new(
        Primitive::Star {
            points: 5,
            outer_radius: 0.8,
            inner_radius: 0.35,
        },
        0xFFFF00,
    ));
    parts.push(Part::new(Primitive::sphere(0.2, 16, 16), 0xFFFFFF));
    Assembly::new(parts, 1.0)
}

pub fn westie() -> Assembly {
    const WHITE: u32 = 0xFFFFFF;
    const BLACK: u32 = 0x111111;
    let ear = Primitive::Cone {
        radius: 0.08,
        height: 0.22,
        segments: 8,
    };
    let mut parts = Parts::new();
    parts.push(Part::new(Primitive::sphere(0.3, 20, 20), WHITE).scaled(Vec3::new(1.0, 0.9, 1.2)));
    parts.push(Part::new(Primitive::sphere(0.24, 20, 20), WHITE).at(0.0, 0.22, 0.22));
    parts.push(Part::new(ear, WHITE).at(-0.16, 0.45, 0.22).rotated(0.0, 0.0, 0.15));
    parts.push(Part::new(ear, WHITE).at(0.16, 0.45, 0.22).rotated(0.0, 0.0, -0.15));
    parts.push(Part::new(Primitive::sphere(0.025, 8, 8), BLACK).at(-0.09, 0.28, 0.43));
    parts.push(Part::new(Primitive::sphere(0.025, 8, 8), BLACK).at(0.09, 0.28, 0.43));
    parts.push(Part::new(Primitive::sphere(0.045, 8, 8), BLACK).at(0.0, 0.19, 0.45));
    Assembly::new(parts, 0.7)
}

pub fn bell() -> Assembly {
    const GOLD: u32 = 0xFFD700;
    let mut parts = Parts::new();
    parts.push(Part::new(Primitive::cylinder(0.12, 0.28, 0.45, 24), GOLD));
    parts.push(
        Part::new(
            Primitive::Sphere {
                radius: 0.28,
                width_segments: 24,
                height_segments: 12,
                theta_length: FRAC_PI_2,
            },
            GOLD,
        )
        .at(0.0, -0.22, 0.0),
    );
    parts.push(Part::new(Primitive::sphere(0.07, 12, 12), 0x222222).at(0.0, -0.25, 0.0));
    parts.push(Part::new(Primitive::torus(0.06, 0.02, 12, 24), GOLD).at(0.0, 0.28, 0.0));
    Assembly::new(parts, 0.65)
}

pub fn ornament(rng: &mut impl Rng) -> Assembly {
    const DETAIL: u32 = 0xFFFFFF;
    const CAP: u32 = 0xCCAA00;
    let main = ORNAMENT_COLORS[rng.gen_range(0..ORNAMENT_COLORS.len())];
    let mut parts = Parts::new();
    parts.push(Part::new(Primitive::sphere(0.28, 32, 32), main));
    parts.push(Part::new(Primitive::cylinder(0.285, 0.285, 0.06, 32), DETAIL));
    for i in 0..6 {
        parts.push(
            Part::new(Primitive::cuboid(0.03, 0.56, 0.57), DETAIL)
                .rotated(0.0, PI / 3.0 * i as f32, 0.0),
        );
    }
    parts.push(Part::new(Primitive::cylinder(0.1, 0.1, 0.08, 16), CAP).at(0.0, 0.3, 0.0));
    parts.push(Part::new(Primitive::torus(0.06, 0.015, 8, 16), CAP).at(0.0, 0.4, 0.0));
    Assembly::new(parts, 0.7)
}

pub fn snowflake() -> Assembly {
    const ICE: u32 = 0xF0FDFF;
    let twig = Primitive::cuboid(0.15, 0.02, 0.02);
    let mut parts = Parts::new();
    for i in 0..6 {
        let arm = Quat::from_rotation_z(PI / 3.0 * i as f32);
        parts.push(
            Part::new(Primitive::cuboid(0.7, 0.03, 0.03), ICE)
                .at(0.35, 0.0, 0.0)
                .under(arm),
        );
        for j in 1..=2 {
            let along = 0.2 * j as f32 + 0.1;
            parts.push(
                Part::new(twig, ICE)
                    .at(along, 0.06, 0.0)
                    .rotated(0.0, 0.0, FRAC_PI_4)
                    .under(arm),
            );
            parts.push(
                Part::new(twig, ICE)
                    .at(along, -0.06, 0.0)
                    .rotated(0.0, 0.0, -FRAC_PI_4)
                    .under(arm),
            );
        }
    }
    Assembly::new(parts, 0.6)
}

pub fn candy_cane() -> Assembly {
    const WHITE: u32 = 0xFFFFFF;
    const RED: u32 = 0xFF0000;
    let mut parts = Parts::new();
    parts.push(Part::new(Primitive::cylinder(0.06, 0.06, 0.7, 16), WHITE));
    parts.push(
        Part::new(
            Primitive::Torus {
                radius: 0.15,
                tube: 0.06,
                radial_segments: 12,
                tubular_segments: 24,
                arc: PI,
            },
            WHITE,
        )
        .at(0.15, 0.35, 0.0),
    );
    for i in 0..7 {
        parts.push(
            Part::new(Primitive::cylinder(0.062, 0.062, 0.06, 16), RED)
                .at(0.0, -0.3 + i as f32 * 0.12, 0.0)
                .rotated(0.0, 0.0, 0.3),
        );
    }
    Assembly::new(parts, 0.65)
}

/// Inputs for [`gift`]: box and ribbon colors, edge length, and ribbon
/// width as a fraction of the edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftSpec {
    pub color: u32,
    pub ribbon_color: u32,
    pub size: f32,
    pub ribbon_thickness: f32,
}

pub fn gift(spec: GiftSpec) -> Assembly {
    let GiftSpec {
        color,
        ribbon_color,
        size,
        ribbon_thickness,
    } = spec;
    let wrap = size + 0.01;
    let bow = Primitive::torus(size * 0.18, size * ribbon_thickness * 0.4, 8, 16);
    let mut parts = Parts::new();
    parts.push(Part::new(Primitive::cuboid(size, size, size), color));
    parts.push(Part::new(
        Primitive::cuboid(wrap, size * ribbon_thickness, wrap),
        ribbon_color,
    ));
    parts.push(Part::new(
        Primitive::cuboid(size * ribbon_thickness, wrap, wrap),
        ribbon_color,
    ));
    parts.push(
        Part::new(bow, ribbon_color)
            .at(0.0, size * 0.5, 0.0)
            .rotated(FRAC_PI_2, 0.0, 0.0),
    );
    parts.push(
        Part::new(bow, ribbon_color)
            .at(0.0, size * 0.5, 0.0)
            .rotated(FRAC_PI_2, FRAC_PI_2, 0.0),
    );
    Assembly::new(parts, 1.0)
}
