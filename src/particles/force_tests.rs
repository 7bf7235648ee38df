use approx::assert_relative_eq;

use crate::particles::{
    direct_acceleration, direct_accelerations, disk, softened_term, tree_accelerations, ParticleSet, QuadTree,
};
use crate::utils::DEFAULT_EPSILON;

#[test]
fn test_softened_term_literal_form() {
    let mut acc = (0.0, 0.0);
    softened_term(0.0, 0.0, 0.3, 0.4, 2.0, 0.5, &mut acc);
    // r = (-0.3, -0.4), |r| = 0.5, (|r| + eps)^3 = 1
    assert_relative_eq!(acc.0, -0.6, epsilon = 1e-12);
    assert_relative_eq!(acc.1, -0.8, epsilon = 1e-12);
}

#[test]
fn test_self_term_vanishes() {
    let mut acc = (0.0, 0.0);
    softened_term(0.4, 0.4, 0.4, 0.4, 5.0, DEFAULT_EPSILON, &mut acc);
    assert_eq!(acc, (0.0, 0.0));
}

#[test]
fn test_acceleration_points_away_from_mass() {
    let mut set = ParticleSet::default();
    set.push(0.8, 0.5, 1.0, 0.0, 0.0);
    let tree = QuadTree::build(&set);
    let (ax, ay) = tree.acceleration(0.2, 0.5, 0.5, DEFAULT_EPSILON);
    // r = p - com is negative in x; the integrator's -G turns this into a pull.
    assert!(ax < 0.0);
    assert_eq!(ay, 0.0);
}

#[test]
fn test_zero_theta_matches_direct_sum() {
    let (set, _) = disk(400, 21).expect("allocation failed");
    let tree = QuadTree::build(&set);
    let tree_acc = tree_accelerations(&tree, &set, 0.0, DEFAULT_EPSILON);
    let direct_acc = direct_accelerations(&set, DEFAULT_EPSILON);

    for (i, (t, d)) in tree_acc.iter().zip(&direct_acc).enumerate() {
        let scale = d.0.abs().max(d.1.abs()).max(1.0);
        assert!((t.0 - d.0).abs() < 1e-9 * scale, "particle {}: {:?} vs {:?}", i, t, d);
        assert!((t.1 - d.1).abs() < 1e-9 * scale, "particle {}: {:?} vs {:?}", i, t, d);
    }
}

#[test]
fn test_moderate_theta_approximates_direct_sum() {
    let (set, _) = disk(1_000, 8).expect("allocation failed");
    let tree = QuadTree::build(&set);
    let tree_acc = tree_accelerations(&tree, &set, 0.3, DEFAULT_EPSILON);
    let direct_acc = direct_accelerations(&set, DEFAULT_EPSILON);

    let (mut err, mut norm) = (0.0, 0.0);
    for (t, d) in tree_acc.iter().zip(&direct_acc) {
        err += (t.0 - d.0).powi(2) + (t.1 - d.1).powi(2);
        norm += d.0 * d.0 + d.1 * d.1;
    }
    assert!((err / norm).sqrt() < 0.05, "relative error too large: {}", (err / norm).sqrt());
}

#[test]
fn test_infinite_theta_is_monopole() {
    let (set, _) = disk(200, 2).expect("allocation failed");
    let tree = QuadTree::build(&set);
    let root = *tree.root();
    let (x, y) = (0.1, 0.9);

    let mut expected = (0.0, 0.0);
    softened_term(x, y, root.com_x, root.com_y, root.mass, DEFAULT_EPSILON, &mut expected);
    assert_eq!(tree.acceleration(x, y, f64::INFINITY, DEFAULT_EPSILON), expected);
    assert_eq!(tree.interaction_count(x, y, f64::INFINITY), 1);
}

#[test]
fn test_interaction_count_shrinks_with_theta() {
    let (set, _) = disk(2_000, 4).expect("allocation failed");
    let tree = QuadTree::build(&set);
    let exact = tree.interaction_count(0.5, 0.5, 0.0);
    let loose = tree.interaction_count(0.5, 0.5, 1.0);
    assert_eq!(exact, set.len());
    assert!(loose < exact);
}

#[test]
fn test_direct_acceleration_symmetric_pair_cancels_at_midpoint() {
    let mut set = ParticleSet::default();
    set.push(0.3, 0.5, 1.0, 0.0, 0.0);
    set.push(0.7, 0.5, 1.0, 0.0, 0.0);
    let (ax, ay) = direct_acceleration(&set, 0.5, 0.5, DEFAULT_EPSILON);
    assert_relative_eq!(ax, 0.0, epsilon = 1e-12);
    assert_eq!(ay, 0.0);
}
