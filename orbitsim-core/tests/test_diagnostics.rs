//! Tests for energy and momentum diagnostics

use glam::{DVec2, DVec3};
use orbitsim_core::constants::{AU, G, SUN_MASS};
use orbitsim_core::diagnostics::{
    barycenter, body_angular_momentum, kinetic_energy, orbital_energy, potential_energy,
    total_momentum,
};
use orbitsim_core::tests::test_helpers::{approx_eq, approx_eq_rel, approx_eq_vec, circular_binary};
use orbitsim_core::{Body, Diagnostics, ForceModel, SimError};

#[test]
fn test_kinetic_energy() {
    let bodies = vec![
        Body::planar("a", 2.0, DVec2::ZERO, DVec2::new(3.0, 4.0)).unwrap(),
        Body::planar("b", 1.0, DVec2::new(1.0e7, 0.0), DVec2::new(0.0, 2.0)).unwrap(),
    ];
    // ½·2·25 + ½·1·4
    assert_eq!(kinetic_energy(&bodies), 27.0);
}

#[test]
fn test_potential_energy_is_negative_and_counted_once() {
    let bodies = vec![
        Body::planar("a", 1.0e10, DVec2::ZERO, DVec2::ZERO).unwrap(),
        Body::planar("b", 2.0e10, DVec2::new(1.0e7, 0.0), DVec2::ZERO).unwrap(),
    ];
    let expected = -G * 1.0e10 * 2.0e10 / 1.0e7;

    let pe = potential_energy(&bodies);
    assert!(pe < 0.0);
    assert!(approx_eq_rel(pe, expected, 1e-12), "got {}, expected {}", pe, expected);
    // Double counting would give exactly twice the value
    assert!(!approx_eq_rel(pe, 2.0 * expected, 1e-3));
}

#[test]
fn test_potential_energy_sums_every_pair() {
    let bodies = vec![
        Body::planar("a", 1.0e10, DVec2::ZERO, DVec2::ZERO).unwrap(),
        Body::planar("b", 2.0e10, DVec2::new(3.0e7, 0.0), DVec2::ZERO).unwrap(),
        Body::planar("c", 3.0e10, DVec2::new(0.0, 4.0e7), DVec2::ZERO).unwrap(),
    ];
    let expected = -G
        * (1.0e10 * 2.0e10 / 3.0e7 + 1.0e10 * 3.0e10 / 4.0e7 + 2.0e10 * 3.0e10 / 5.0e7);

    assert!(approx_eq_rel(potential_energy(&bodies), expected, 1e-12));
}

#[test]
fn test_total_is_kinetic_plus_potential() {
    let (bodies, _) = circular_binary(SUN_MASS, SUN_MASS, AU);
    let d = Diagnostics::evaluate(&bodies);

    assert_eq!(d.total, d.kinetic + d.potential);
    // Bound circular orbit: E = -K by the virial theorem
    assert!(d.total < 0.0);
    assert!(approx_eq_rel(d.total, -d.kinetic, 1e-9));
}

#[test]
fn test_planar_angular_momentum_is_z_only() {
    let bodies = vec![Body::planar("a", 2.0, DVec2::new(1.0, 0.0), DVec2::new(0.0, 3.0)).unwrap()];
    let d = Diagnostics::evaluate(&bodies);

    assert_eq!(d.angular_momentum, DVec3::new(0.0, 0.0, 6.0));
    assert_eq!(d.angular_momentum_z(), 6.0);
    assert_eq!(d.angular_momentum_magnitude(), 6.0);
}

#[test]
fn test_spatial_angular_momentum() {
    let body =
        Body::spatial("a", 1.0, DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.0, 0.0, 2.0)).unwrap();
    assert_eq!(body_angular_momentum(&body), DVec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_angular_momentum_is_about_origin() {
    // Same velocity, moved further from the origin along x: the lever arm grows
    let near = vec![Body::planar("a", 1.0, DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)).unwrap()];
    let far = vec![Body::planar("a", 1.0, DVec2::new(3.0, 0.0), DVec2::new(0.0, 1.0)).unwrap()];

    assert_eq!(Diagnostics::evaluate(&near).angular_momentum_z(), 1.0);
    assert_eq!(Diagnostics::evaluate(&far).angular_momentum_z(), 3.0);

    let moving_sideways =
        vec![Body::planar("a", 1.0, DVec2::new(0.0, 5.0), DVec2::new(1.0, 0.0)).unwrap()];
    assert_eq!(Diagnostics::evaluate(&moving_sideways).angular_momentum_z(), -5.0);
}

#[test]
fn test_orbital_energy_per_body() {
    let bodies = vec![
        Body::planar("a", 1.0e10, DVec2::ZERO, DVec2::new(1.0, 0.0)).unwrap(),
        Body::planar("b", 2.0e10, DVec2::new(1.0e7, 0.0), DVec2::ZERO).unwrap(),
    ];
    let pair = -G * 1.0e10 * 2.0e10 / 1.0e7;

    let ea = orbital_energy(&bodies, 0).unwrap();
    let eb = orbital_energy(&bodies, 1).unwrap();
    assert!(approx_eq_rel(ea, 0.5e10 + pair, 1e-12));
    assert!(approx_eq_rel(eb, pair, 1e-12));
    assert_eq!(orbital_energy(&bodies, 2), None);
}

#[test]
fn test_barycenter_and_momentum() {
    let bodies = vec![
        Body::planar("a", 3.0, DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).unwrap(),
        Body::planar("b", 1.0, DVec2::new(4.0e6, 0.0), DVec2::new(-3.0, 0.0)).unwrap(),
    ];

    assert_eq!(barycenter(&bodies), Some(DVec3::new(1.0e6, 0.0, 0.0)));
    assert_eq!(total_momentum(&bodies), DVec3::ZERO);
    assert_eq!(barycenter(&[]), None);
}

#[test]
fn test_circular_binary_is_centred() {
    let (bodies, _) = circular_binary(SUN_MASS, 0.25 * SUN_MASS, AU);

    let center = barycenter(&bodies).unwrap();
    assert!(approx_eq_vec(center, DVec3::ZERO, 1.0));
    let p = total_momentum(&bodies);
    let scale = SUN_MASS * bodies[0].speed();
    assert!(approx_eq(p.length(), 0.0, scale * 1e-12));
}

#[test]
fn test_separation_check_guards_potential_energy() {
    let bodies = vec![
        Body::planar("a", 1.0, DVec2::new(AU, 0.0), DVec2::ZERO).unwrap(),
        Body::planar("b", 1.0, DVec2::new(AU, 0.0), DVec2::ZERO).unwrap(),
    ];

    let checked = ForceModel::default().check_separations(&bodies);
    assert!(matches!(checked, Err(SimError::Singularity { .. })));
    assert_eq!(potential_energy(&bodies), f64::NEG_INFINITY);
    assert_eq!(orbital_energy(&bodies, 0), Some(f64::NEG_INFINITY));
}
