//! Tests for broken/invalid body definitions

use glam::{DVec2, DVec3};
use orbitsim_core::{Body, Dimension, SimError};

fn assert_invalid_body(result: Result<Body, SimError>, expected_name: &str) {
    match result {
        Err(e @ SimError::InvalidBody { .. }) => {
            let message = e.to_string();
            assert!(!message.is_empty(), "Error message should not be empty");
            assert!(message.contains(expected_name), "message {:?} should name the body", message);
        }
        other => panic!("expected InvalidBody, got {:?}", other),
    }
}

#[test]
fn test_non_positive_mass_is_rejected() {
    assert_invalid_body(Body::new("zero", 0.0, &[0.0, 0.0], &[0.0, 0.0]), "zero");
    assert_invalid_body(Body::new("negative", -5.0, &[0.0, 0.0], &[0.0, 0.0]), "negative");
    assert_invalid_body(Body::new("nan", f64::NAN, &[0.0, 0.0], &[0.0, 0.0]), "nan");
    assert_invalid_body(
        Body::planar("inf", f64::INFINITY, DVec2::ZERO, DVec2::ZERO),
        "inf",
    );
}

#[test]
fn test_mismatched_dimensions_are_rejected() {
    assert_invalid_body(Body::new("mixed", 1.0, &[0.0, 0.0, 0.0], &[0.0, 0.0]), "mixed");
    assert_invalid_body(Body::new("line", 1.0, &[0.0], &[0.0]), "line");
    assert_invalid_body(Body::new("hyper", 1.0, &[0.0; 4], &[0.0; 4]), "hyper");
    assert_invalid_body(Body::new("empty", 1.0, &[], &[]), "empty");
}

#[test]
fn test_non_finite_state_is_rejected() {
    assert_invalid_body(Body::new("lost", 1.0, &[f64::NAN, 0.0], &[0.0, 0.0]), "lost");
    assert_invalid_body(
        Body::spatial("fast", 1.0, DVec3::ZERO, DVec3::new(0.0, f64::INFINITY, 0.0)),
        "fast",
    );
}

#[test]
fn test_valid_bodies_keep_their_dimension() {
    let planar = Body::new("p", 2.0, &[1.0, 2.0], &[3.0, 4.0]).unwrap();
    assert_eq!(planar.dimension(), Dimension::Two);
    assert_eq!(planar.position(), DVec3::new(1.0, 2.0, 0.0));
    assert_eq!(planar.velocity(), DVec3::new(3.0, 4.0, 0.0));
    assert_eq!(planar.kinetic_energy(), 25.0);
    assert_eq!(planar.speed(), 5.0);

    let spatial = Body::new("s", 1.0, &[1.0, 2.0, 3.0], &[0.0, 0.0, 1.0]).unwrap();
    assert_eq!(spatial.dimension(), Dimension::Three);
    assert_eq!(spatial.name(), "s");
    assert_eq!(spatial.mass(), 1.0);
    assert_eq!(spatial.state().position, DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_error_messages_describe_the_problem() {
    let err = Body::new("rock", -1.0, &[0.0, 0.0], &[0.0, 0.0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid body 'rock': mass must be positive and finite, got -1"
    );

    let err = SimError::invalid_timestep("dt must be positive, got 0");
    assert_eq!(err.to_string(), "invalid timestep: dt must be positive, got 0");
}
