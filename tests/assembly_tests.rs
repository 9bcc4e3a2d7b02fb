// Host-side tests for the decoration, star and gift builders.

use ice_westie::core::assembly::{self, GiftSpec};
use ice_westie::core::constants::ORNAMENT_COLORS;
use ice_westie::core::{DecorationKind, Primitive};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn part_counts_and_base_scales() {
    let cases = [
        (assembly::star(), 2, 1.0),
        (assembly::westie(), 7, 0.7),
        (assembly::bell(), 4, 0.65),
        (assembly::snowflake(), 30, 0.6),
        (assembly::candy_cane(), 9, 0.65),
    ];
    for (a, parts, scale) in cases {
        assert_eq!(a.len(), parts);
        assert_eq!(a.base_scale, scale);
    }
    let mut rng = StdRng::seed_from_u64(7);
    let ornament = assembly::ornament(&mut rng);
    assert_eq!(ornament.len(), 10);
    assert_eq!(ornament.base_scale, 0.7);
}

#[test]
fn ornament_body_color_comes_from_palette() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let o = assembly::ornament(&mut rng);
        assert!(ORNAMENT_COLORS.contains(&o.parts[0].color));
    }
}

#[test]
fn star_is_a_five_point_shape_with_core() {
    let s = assembly::star();
    assert!(matches!(
        s.parts[0].primitive,
        Primitive::Star {
            points: 5,
            outer_radius,
            inner_radius,
        } if outer_radius == 0.8 && inner_radius == 0.35
    ));
    assert!(matches!(s.parts[1].primitive, Primitive::Sphere { radius, .. } if radius == 0.2));
}

#[test]
fn gift_uses_requested_colors_and_size() {
    let g = assembly::gift(GiftSpec {
        color: 0xCC0000,
        ribbon_color: 0xFFD700,
        size: 0.5,
        ribbon_thickness: 0.2,
    });
    assert_eq!(g.len(), 5);
    assert_eq!(g.parts[0].color, 0xCC0000);
    assert!(g.parts[1..].iter().all(|p| p.color == 0xFFD700));
    assert_eq!(
        g.parts[0].primitive,
        Primitive::cuboid(0.5, 0.5, 0.5)
    );
}

#[test]
fn builders_return_independent_values() {
    let mut a = assembly::westie();
    let b = assembly::westie();
    a.parts[0].color = 0x000000;
    assert_ne!(a, b);
    assert_eq!(b, assembly::westie());
}

#[test]
fn kind_ids_round_trip_and_unknown_falls_back() {
    for kind in DecorationKind::ALL {
        assert_eq!(DecorationKind::from_id(kind.id()), kind);
    }
    assert_eq!(DecorationKind::from_id("reindeer"), DecorationKind::Westie);
    assert_eq!(DecorationKind::from_id(""), DecorationKind::Westie);
}

#[test]
fn kind_build_matches_builder() {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(DecorationKind::Bell.build(&mut rng), assembly::bell());
    assert_eq!(DecorationKind::CandyCane.build(&mut rng), assembly::candy_cane());
    assert_eq!(DecorationKind::Snowflake.build(&mut rng).len(), 30);
}
