// Tests for the deterministic add-shape sequence.

use glam::DVec2;
use supershape_core::*;

#[test]
fn second_shape_is_slightly_more_lobed() {
    let mut reg = ShapeRegistry::new();
    assert_eq!(reg.add(DVec2::ZERO).unwrap(), 0);
    assert_eq!(reg.add(DVec2::ZERO).unwrap(), 1);
    assert_eq!(reg.get(0).unwrap().params().m, 2.0);
    let p = reg.get(1).unwrap().params();
    assert!((p.m - 2.5).abs() < 1e-12);
    assert!((p.n1 - 1.3).abs() < 1e-12);
    assert!((p.n2 - 1.24).abs() < 1e-12);
    assert!((p.n3 - 1.18).abs() < 1e-12);
    assert!((p.radius - 120.0).abs() < 1e-12);
}

#[test]
fn sequence_is_capped() {
    let p = initial_params(100);
    assert_eq!(p.m, constants::PARAM_CEILING);
    assert_eq!(p.n1, constants::PARAM_CEILING);
    assert_eq!(p.n2, constants::PARAM_CEILING);
    assert_eq!(p.n3, constants::PARAM_CEILING);
    assert_eq!(p.radius, constants::RADIUS_CEILING);

    // radius hits its cap at the sixth shape
    assert_eq!(initial_params(5).radius, 200.0);
    assert!(initial_params(4).radius < 200.0);
}

#[test]
fn many_shapes_all_validate() {
    let mut reg = ShapeRegistry::new();
    for i in 0..40 {
        assert_eq!(reg.add(DVec2::new(1.0, 2.0)).unwrap(), i);
    }
    assert_eq!(reg.len(), 40);
    assert!(reg.iter().all(|s| s.params().validate().is_ok()));
}

#[test]
fn reset_baseline_grows_radius_by_index() {
    let base = ShapeParams::BASELINE;
    assert_eq!(baseline(0, &base), base);
    let b3 = baseline(3, &base);
    assert!((b3.radius - 160.0).abs() < 1e-12);
    assert_eq!(b3.m, base.m);
    assert_eq!(b3.n3, base.n3);
}
