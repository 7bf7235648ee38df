use crate::utils::{GalsimError, SimulationConstants, DEFAULT_EPSILON, DEFAULT_MAX_DEPTH};

#[test]
fn test_new_derives_gravity_from_particle_count() {
    let constants = SimulationConstants::new(2000, 100, 1e-5, 0.1, 3);
    assert_eq!(constants.gravity, 0.05);
    assert_eq!(constants.epsilon, DEFAULT_EPSILON);
    assert_eq!(constants.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_builders_override_defaults() {
    let constants = SimulationConstants::new(10, 1, 0.1, 0.5, 1)
        .with_epsilon(0.01)
        .with_max_depth(8);
    assert_eq!(constants.epsilon, 0.01);
    assert_eq!(constants.max_depth, 8);
}

#[test]
fn test_validate_rejects_bad_parameters() {
    let ok = SimulationConstants::new(10, 1, 0.1, 0.5, 2);
    assert!(ok.validate().is_ok());

    let cases = [
        SimulationConstants::new(0, 1, 0.1, 0.5, 2),
        SimulationConstants::new(10, 1, 0.1, 0.5, 0),
        SimulationConstants::new(10, 1, 0.0, 0.5, 2),
        SimulationConstants::new(10, 1, 0.1, -1.0, 2),
        SimulationConstants::new(10, 1, 0.1, f64::NAN, 2),
        ok.with_epsilon(-1.0),
    ];
    for constants in cases {
        match constants.validate() {
            Err(GalsimError::InvalidParameter(_)) => {}
            other => panic!("Expected InvalidParameter for {:?}, got {:?}", constants, other),
        }
    }
}
