// Host-side tests for mesh generation and click-to-tree picking.

use glam::{Quat, Vec2, Vec3};
use ice_westie::core::mesh::{build_mesh, MeshKey};
use ice_westie::core::placement::{facing_outward, uv_to_ndc, ConeProxy};
use ice_westie::core::{Primitive, Ray};
use std::f32::consts::PI;

fn tree_cone() -> ConeProxy {
    ConeProxy::new(4.0, 10.0, 16)
}

/// Outward normal of each triangle, via its winding.
fn normals(p: &Primitive) -> Vec<(Vec3, Vec3)> {
    build_mesh(p)
        .triangles()
        .map(|t| {
            let [a, b, c] = t.map(Vec3::from_array);
            ((a + b + c) / 3.0, (b - a).cross(c - a))
        })
        .collect()
}

#[test]
fn cone_proxy_has_side_and_base_only() {
    // No degenerate apex triangles: one side and one cap triangle per segment.
    assert_eq!(tree_cone().triangle_count(), 32);
}

#[test]
fn closed_meshes_wind_outward() {
    let shapes = [
        Primitive::cuboid(1.0, 2.0, 3.0),
        Primitive::cylinder(0.5, 1.0, 2.0, 12),
        Primitive::Cone {
            radius: 4.0,
            height: 10.0,
            segments: 16,
        },
    ];
    for shape in &shapes {
        for (centroid, n) in normals(shape) {
            if n.length_squared() < 1e-12 {
                continue;
            }
            assert!(centroid.dot(n) > 0.0, "{shape:?} face at {centroid} winds inward");
        }
    }
}

#[test]
fn sphere_triangle_counts() {
    let full = build_mesh(&Primitive::sphere(1.0, 8, 6));
    assert_eq!(full.triangle_count(), 8 * (2 * 6 - 2));
    let dome = build_mesh(&Primitive::Sphere {
        radius: 1.0,
        width_segments: 8,
        height_segments: 6,
        theta_length: PI / 2.0,
    });
    assert_eq!(dome.triangle_count(), 8 * (2 * 6 - 1));
    assert!(dome.positions.iter().all(|p| p[1] >= -1e-6));
}

#[test]
fn mesh_keys_identify_geometry() {
    let a = MeshKey::from(&Primitive::sphere(0.3, 20, 20));
    let b = MeshKey::from(&Primitive::sphere(0.3, 20, 20));
    let c = MeshKey::from(&Primitive::sphere(0.31, 20, 20));
    let d = MeshKey::from(&Primitive::cuboid(0.3, 20.0, 20.0));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
fn ray_from_front_hits_near_side() {
    let ray = Ray::new(Vec3::new(0.1, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
    let hit = tree_cone().intersect(&ray).unwrap();
    // Radius at mid-height is 2; the faceted surface sits just inside.
    assert!(hit.z > 1.8 && hit.z <= 2.0 + 1e-4, "hit {hit}");
    assert!(hit.y.abs() < 1e-4);
    assert!((hit.x - 0.1).abs() < 1e-5);
}

#[test]
fn ray_from_behind_hits_far_side_facing_it() {
    let ray = Ray::new(Vec3::new(0.1, -2.0, -20.0), Vec3::new(0.0, 0.0, 1.0));
    let hit = tree_cone().intersect(&ray).unwrap();
    assert!(hit.z < 0.0);
}

#[test]
fn ray_from_inside_sees_only_back_faces() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(tree_cone().intersect(&ray), None);
}

#[test]
fn ray_beside_tree_misses() {
    let ray = Ray::new(Vec3::new(6.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(tree_cone().intersect(&ray), None);
    let above = Ray::new(Vec3::new(0.0, 8.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(tree_cone().intersect(&above), None);
}

#[test]
fn ray_from_below_hits_base_cap() {
    let ray = Ray::new(Vec3::new(0.5, -20.0, 0.3), Vec3::new(0.0, 1.0, 0.0));
    let hit = tree_cone().intersect(&ray).unwrap();
    assert!((hit.y + 5.0).abs() < 1e-4);
}

#[test]
fn triangle_hit_rejects_back_faces() {
    let tri = [Vec3::ZERO, Vec3::X, Vec3::Y];
    let toward = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::NEG_Z);
    let away = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
    assert!((toward.hit_triangle(tri).unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(away.hit_triangle(tri), None);
    let behind = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::NEG_Z);
    assert_eq!(behind.hit_triangle(tri), None);
}

#[test]
fn outward_facing_points_z_away_from_axis() {
    for p in [
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(-1.0, -3.0, 1.0),
        Vec3::new(0.0, 0.0, -2.0),
    ] {
        let z = facing_outward(p) * Vec3::Z;
        let expected = Vec3::new(p.x, 0.0, p.z).normalize();
        assert!(z.distance(expected) < 1e-5, "{p}");
        let up = facing_outward(p) * Vec3::Y;
        assert!(up.distance(Vec3::Y) < 1e-5);
    }
}

#[test]
fn on_axis_point_keeps_identity() {
    assert_eq!(facing_outward(Vec3::new(0.0, 3.0, 0.0)), Quat::IDENTITY);
}

#[test]
fn uv_maps_to_ndc_with_y_up() {
    assert_eq!(uv_to_ndc([0.5, 0.5]), Vec2::ZERO);
    assert_eq!(uv_to_ndc([0.0, 0.0]), Vec2::new(-1.0, 1.0));
    assert_eq!(uv_to_ndc([1.0, 1.0]), Vec2::new(1.0, -1.0));
}
