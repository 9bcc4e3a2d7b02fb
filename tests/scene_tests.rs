// Host-side tests for the scene lifecycle: formation, gifts, placement.

use glam::Vec3;
use ice_westie::core::constants::*;
use ice_westie::core::placement::ConeProxy;
use ice_westie::core::{
    DecorationKind, FormationState, MeshInstance, Ray, SceneConfig, SceneController, SceneEvent,
};

fn small_scene() -> SceneController {
    SceneController::new(SceneConfig {
        particle_count: 400,
        ..Default::default()
    })
}

/// Trigger at t=0 and step past the end of the formation.
fn formed_scene() -> (SceneController, f64) {
    let mut scene = small_scene();
    assert_eq!(
        scene.on_fist_signal(true, 0.0),
        Some(SceneEvent::FormationStarted)
    );
    scene.update(1.0);
    let done = FORMATION_DURATION_SEC as f64 + 0.5;
    assert_eq!(scene.update(done), Some(SceneEvent::FormationCompleted));
    (scene, done)
}

fn ray_at_tree_front() -> Ray {
    Ray::new(Vec3::new(0.3, 0.5, 20.0), Vec3::new(0.0, 0.0, -1.0))
}

#[test]
fn dormant_until_fist() {
    let mut scene = small_scene();
    assert_eq!(scene.on_fist_signal(false, 0.0), None);
    assert_eq!(scene.update(5.0), None);
    assert_eq!(scene.state(), FormationState::Dormant);
}

#[test]
fn formation_runs_once() {
    let (mut scene, t) = formed_scene();
    let before: Vec<Vec3> = scene.particles().positions.clone();
    assert_eq!(scene.on_fist_signal(true, t + 1.0), None);
    assert_eq!(scene.update(t + 10.0), None);
    assert_eq!(scene.state(), FormationState::Formed);
    assert_eq!(scene.particles().positions, before);
    assert_eq!(scene.gifts().len(), GIFT_COUNT);
}

#[test]
fn repeated_fist_while_forming_is_ignored() {
    let mut scene = small_scene();
    scene.on_fist_signal(true, 0.0);
    assert_eq!(scene.on_fist_signal(true, 0.5), None);
    assert_eq!(scene.state(), FormationState::Forming);
}

#[test]
fn formation_duration_is_configurable() {
    let mut scene = SceneController::new(SceneConfig {
        particle_count: 400,
        formation_duration_sec: 0.5,
        ..Default::default()
    });
    scene.on_fist_signal(true, 0.0);
    assert_eq!(scene.update(0.4), None);
    assert_eq!(scene.state(), FormationState::Forming);
    assert_eq!(scene.update(0.5), Some(SceneEvent::FormationCompleted));
    assert!(scene.is_formed());
    let cloud = scene.particles();
    assert_eq!(cloud.positions, cloud.targets);
}

#[test]
fn particles_land_exactly_on_targets() {
    let (scene, _) = formed_scene();
    let cloud = scene.particles();
    assert_eq!(cloud.len(), 400);
    assert_eq!(cloud.positions, cloud.targets);
}

#[test]
fn particles_move_toward_targets_midway() {
    let mut scene = small_scene();
    let start: Vec<Vec3> = scene.particles().positions.clone();
    scene.on_fist_signal(true, 0.0);
    scene.update(FORMATION_DURATION_SEC as f64 * 0.75);
    let cloud = scene.particles();
    let moved_closer = start
        .iter()
        .zip(&cloud.positions)
        .zip(&cloud.targets)
        .filter(|((s, p), t)| p.distance(**t) < s.distance(**t))
        .count();
    assert_eq!(moved_closer, cloud.len());
}

#[test]
fn gifts_spread_around_the_base() {
    let (scene, _) = formed_scene();
    let gifts = scene.gifts();
    assert_eq!(gifts.len(), 90);
    for g in gifts {
        let d = (g.position.x * g.position.x + g.position.z * g.position.z).sqrt();
        assert!(
            (GIFT_MIN_DISTANCE - 1e-4..=GIFT_MIN_DISTANCE + GIFT_DISTANCE_SPAN + 1e-4).contains(&d),
            "distance {d}"
        );
        let stack = (1.0 - d / GIFT_STACK_FALLOFF).max(0.0) * GIFT_STACK_HEIGHT;
        assert!(g.position.y >= GIFT_FLOOR_Y - 1e-4);
        assert!(g.position.y <= GIFT_FLOOR_Y + stack + 1e-4, "y {} over stack {stack}", g.position.y);
        assert_eq!(g.assembly.len(), 5);
    }
    for (i, a) in gifts.iter().enumerate() {
        for b in &gifts[i + 1..] {
            assert_ne!(a.position, b.position);
        }
    }
}

#[test]
fn gifts_enter_staggered() {
    let (scene, t) = formed_scene();
    let gifts = scene.gifts();
    assert_eq!(gifts[0].scale.value(t), 0.0);
    let begins = |i: usize| gifts[i].scale.start_sec + gifts[i].scale.delay_sec as f64;
    assert!(begins(1) > begins(0));
    assert!(begins(89) > begins(1));
    let all_in = t + 10.0;
    assert!(gifts.iter().all(|g| (g.scale.value(all_in) - 1.0).abs() < 1e-6));
}

#[test]
fn click_before_formed_does_nothing() {
    let mut scene = small_scene();
    assert_eq!(scene.click(&ray_at_tree_front(), DecorationKind::Bell, 0.1), None);
    scene.on_fist_signal(true, 0.2);
    assert_eq!(scene.click(&ray_at_tree_front(), DecorationKind::Bell, 0.3), None);
    assert!(scene.decorations().is_empty());
}

#[test]
fn click_on_tree_places_bell_at_hit() {
    let (mut scene, t) = formed_scene();
    let ray = ray_at_tree_front();
    let expected = ConeProxy::new(TREE_RADIUS, TREE_HEIGHT, CONE_PROXY_SEGMENTS)
        .intersect(&ray)
        .unwrap();

    let idx = scene.click(&ray, DecorationKind::Bell, t).unwrap();
    assert_eq!(idx, 0);
    let deco = &scene.decorations()[0];
    assert_eq!(deco.kind, DecorationKind::Bell);
    assert!(deco.position.distance(expected) < 1e-5);
    assert!(deco.position.z > 0.0, "landed on the near side");

    assert_eq!(deco.scale.value(t), 0.0);
    let settled = deco.scale.value(t + DECORATION_SCALE_IN_SEC as f64 + 0.01);
    assert!((0.4..1.2).contains(&settled), "scale {settled}");
    assert_eq!(settled, deco.target_scale);
}

#[test]
fn decoration_faces_away_from_axis() {
    let (mut scene, t) = formed_scene();
    scene.click(&ray_at_tree_front(), DecorationKind::Westie, t).unwrap();
    let deco = &scene.decorations()[0];
    let z = deco.orientation * Vec3::Z;
    let outward = Vec3::new(deco.position.x, 0.0, deco.position.z).normalize();
    assert!(z.distance(outward) < 1e-4);
}

#[test]
fn decoration_sway_is_bounded() {
    let (mut scene, t) = formed_scene();
    scene.click(&ray_at_tree_front(), DecorationKind::Snowflake, t).unwrap();
    let sway = scene.decorations()[0].sway;
    assert!((0.15..0.40).contains(&sway.amplitude));
    assert!((1.2..2.2).contains(&sway.half_period_sec));
    for step in 0..200 {
        let off = sway.offset(t + step as f64 * 0.05);
        assert!((0.0..=sway.amplitude + 1e-6).contains(&off));
    }
}

#[test]
fn click_that_misses_tree_is_noop() {
    let (mut scene, t) = formed_scene();
    let miss = Ray::new(Vec3::new(10.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(scene.click(&miss, DecorationKind::Ornament, t), None);
    assert!(scene.decorations().is_empty());
}

#[test]
fn star_scales_in_after_formation() {
    assert_eq!(small_scene().star_scale(0.0), 0.0);
    let (scene, t) = formed_scene();
    assert_eq!(scene.star_scale(t), 0.0);
    assert!((scene.star_scale(t + STAR_SCALE_IN_SEC as f64) - 1.0).abs() < 1e-6);
    assert!(scene.star_position().y > TREE_HEIGHT / 2.0);
}

#[test]
fn star_spins_only_once_visible() {
    let (mut scene, t) = formed_scene();
    assert_eq!(scene.star_spin(), 0.0);
    scene.update(t + 0.5);
    scene.update(t + 1.0);
    assert!(scene.star_spin() > 0.0);
}

#[test]
fn halo_fades_in_after_delay() {
    let mut scene = small_scene();
    assert_eq!(scene.halo_opacity(10.0), 0.0);
    scene.on_fist_signal(true, 0.0);
    assert_eq!(scene.halo_opacity(HALO_FADE_DELAY_SEC as f64 * 0.5), 0.0);
    let full = scene.halo_opacity((HALO_FADE_DELAY_SEC + HALO_FADE_DURATION_SEC) as f64 + 1.0);
    assert!(full >= HALO_BASE_OPACITY - HALO_BREATH_AMPLITUDE - 1e-6);
    assert!(full <= HALO_BASE_OPACITY + HALO_BREATH_AMPLITUDE + 1e-6);
}

#[test]
fn mesh_instances_follow_lifecycle() {
    let mut out: Vec<MeshInstance> = Vec::new();
    let scene = small_scene();
    scene.mesh_instances(0.0, &mut out);
    assert!(out.is_empty());

    let (mut scene, t) = formed_scene();
    scene.click(&ray_at_tree_front(), DecorationKind::CandyCane, t).unwrap();
    let later = t + 30.0;
    scene.mesh_instances(later, &mut out);
    // star (2) + gifts (5 each) + candy cane (9) + halo
    assert_eq!(out.len(), 2 + 90 * 5 + 9 + 1);
    let (last, rest) = out.split_last().unwrap();
    assert!(last.is_translucent());
    assert!(rest.iter().all(|m| !m.is_translucent()));
}

#[test]
fn same_seed_same_scene() {
    let (a, _) = formed_scene();
    let (b, _) = formed_scene();
    let pa: Vec<Vec3> = a.gifts().iter().map(|g| g.position).collect();
    let pb: Vec<Vec3> = b.gifts().iter().map(|g| g.position).collect();
    assert_eq!(pa, pb);
}
