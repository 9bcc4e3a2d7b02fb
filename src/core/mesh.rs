//! Triangle meshes for [`Primitive`]s.
//!
//! Vertex layouts and winding follow the usual three.js-style generators so
//! that front faces are counter-clockwise seen from outside. The placement
//! cone relies on that to ignore back faces.

use crate::core::assembly::Primitive;
use std::f32::consts::{PI, TAU};

/// Indexed triangle list in object space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }
}

/// Hashable identity of a primitive's geometry, used to share GPU meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshKey([u32; 6]);

impl From<&Primitive> for MeshKey {
    fn from(p: &Primitive) -> Self {
        let b = f32::to_bits;
        MeshKey(match *p {
            Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
                theta_length,
            } => [0, b(radius), width_segments, height_segments, b(theta_length), 0],
            Primitive::Cone {
                radius,
                height,
                segments,
            } => [1, b(radius), b(height), segments, 0, 0],
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => [2, b(radius_top), b(radius_bottom), b(height), segments, 0],
            Primitive::Cuboid {
                width,
                height,
                depth,
            } => [3, b(width), b(height), b(depth), 0, 0],
            Primitive::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            } => [4, b(radius), b(tube), radial_segments, tubular_segments, b(arc)],
            Primitive::Star {
                points,
                outer_radius,
                inner_radius,
            } => [5, points, b(outer_radius), b(inner_radius), 0, 0],
        })
    }
}

pub fn build_mesh(primitive: &Primitive) -> MeshData {
    match *primitive {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_length,
        } => sphere(radius, width_segments, height_segments, theta_length),
        Primitive::Cone {
            radius,
            height,
            segments,
        } => cylinder(0.0, radius, height, segments),
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => cylinder(radius_top, radius_bottom, height, segments),
        Primitive::Cuboid {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc,
        } => torus(radius, tube, radial_segments, tubular_segments, arc),
        Primitive::Star {
            points,
            outer_radius,
            inner_radius,
        } => star(points, outer_radius, inner_radius),
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32, theta_length: f32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = v * theta_length;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * TAU;
            mesh.positions.push([
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ]);
        }
    }
    let row = ws + 1;
    let closes_bottom = theta_length >= PI;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 || !closes_bottom {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segs = segments.max(3);
    let half = height / 2.0;
    let mut mesh = MeshData::default();

    // Torso: two rings, top then bottom.
    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        for x in 0..=segs {
            let theta = x as f32 / segs as f32 * TAU;
            mesh.positions
                .push([radius * theta.sin(), y, radius * theta.cos()]);
        }
    }
    let row = segs + 1;
    for x in 0..segs {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        if radius_top > 0.0 {
            mesh.indices.extend_from_slice(&[a, b, d]);
        }
        if radius_bottom > 0.0 {
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    if radius_top > 0.0 {
        cap(&mut mesh, radius_top, half, segs, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut mesh, radius_bottom, -half, segs, false);
    }
    mesh
}

fn cap(mesh: &mut MeshData, radius: f32, y: f32, segs: u32, top: bool) {
    let center = mesh.positions.len() as u32;
    mesh.positions.push([0.0, y, 0.0]);
    let ring = mesh.positions.len() as u32;
    for x in 0..=segs {
        let theta = x as f32 / segs as f32 * TAU;
        mesh.positions
            .push([radius * theta.sin(), y, radius * theta.cos()]);
    }
    for x in 0..segs {
        let i = ring + x;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let positions = vec![
        [-x, -y, -z],
        [x, -y, -z],
        [x, y, -z],
        [-x, y, -z],
        [-x, -y, z],
        [x, -y, z],
        [x, y, z],
        [-x, y, z],
    ];
    #[rustfmt::skip]
    let indices = vec![
        4, 5, 6, 4, 6, 7, // +z
        1, 0, 3, 1, 3, 2, // -z
        5, 1, 2, 5, 2, 6, // +x
        0, 4, 7, 0, 7, 3, // -x
        7, 6, 2, 7, 2, 3, // +y
        0, 1, 5, 0, 5, 4, // -y
    ];
    MeshData { positions, indices }
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32, arc: f32) -> MeshData {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * arc;
            let ring = radius + tube * v.cos();
            mesh.positions
                .push([ring * u.cos(), ring * u.sin(), tube * v.sin()]);
        }
    }
    let row = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

fn star(points: u32, outer_radius: f32, inner_radius: f32) -> MeshData {
    let n = points.max(2) * 2;
    let mut mesh = MeshData::default();
    mesh.positions.push([0.0, 0.0, 0.0]);
    for i in 0..n {
        let r = if i % 2 == 0 { outer_radius } else { inner_radius };
        let angle = i as f32 * PI / points.max(2) as f32 - PI / 2.0;
        mesh.positions.push([angle.cos() * r, angle.sin() * r, 0.0]);
    }
    for i in 0..n {
        let a = 1 + i;
        let b = 1 + (i + 1) % n;
        mesh.indices.extend_from_slice(&[0, a, b]);
    }
    mesh
}
