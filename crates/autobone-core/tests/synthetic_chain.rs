//! Integration tests for chain evaluation over synthetic poses.
//!
//! Validates that anchors derived from a known end effector reproduce that end
//! effector for randomly sampled chains of different sizes, with and without
//! orientation noise.

use autobone_core::synthetic::{
    random_orientations, OrientationNoise, OrientationSampling, UniformRange,
};
use autobone_core::{distance, end_position, origin_position, Pose, Real, Vec3};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn origin_end_round_trip_over_random_chains() {
    let mut rng = StdRng::seed_from_u64(2024);
    let sampling = OrientationSampling::default();
    let lengths_range = UniformRange::new(0.5, 2.0);
    let anchor_range = UniformRange::new(-1.0, 1.0);

    for n in [1usize, 4, 9, 16] {
        for _ in 0..25 {
            let lengths = lengths_range.sample_n(&mut rng, n).unwrap();
            let dirs = random_orientations(&mut rng, &sampling, n).unwrap();
            let end = anchor_range.sample_point(&mut rng).unwrap();

            let origin = origin_position(&end, &dirs, &lengths);
            let back = end_position(&origin, &dirs, &lengths);
            assert!(
                distance(&back, &end) < 1e-12,
                "round trip drifted by {} for n={n}",
                distance(&back, &end)
            );
        }
    }
}

#[test]
fn poses_sharing_an_end_agree_only_with_true_lengths() {
    let mut rng = StdRng::seed_from_u64(17);
    let sampling = OrientationSampling::default();
    let true_lengths: Vec<Real> = vec![1.0, 1.5, 0.75, 1.25];
    let wrong_lengths: Vec<Real> = vec![1.2, 1.1, 0.9, 1.0];
    let end = Vec3::new(0.3, -0.2, 0.1);

    let pose_a = Pose::ending_at(
        &end,
        random_orientations(&mut rng, &sampling, 4).unwrap(),
        &true_lengths,
    )
    .unwrap();
    let pose_b = Pose::ending_at(
        &end,
        random_orientations(&mut rng, &sampling, 4).unwrap(),
        &true_lengths,
    )
    .unwrap();

    let agree = distance(
        &pose_a.end_position(&true_lengths),
        &pose_b.end_position(&true_lengths),
    );
    let disagree = distance(
        &pose_a.end_position(&wrong_lengths),
        &pose_b.end_position(&wrong_lengths),
    );
    assert!(agree < 1e-12);
    assert!(disagree > 1e-6);
}

#[test]
fn noisy_orientations_remain_unit() {
    let mut rng = StdRng::seed_from_u64(99);
    let dirs = random_orientations(&mut rng, &OrientationSampling::default(), 8).unwrap();
    let noisy = OrientationNoise::new(0.1).apply_all(&mut rng, &dirs).unwrap();
    assert_eq!(noisy.len(), dirs.len());
    for (clean, noisy) in dirs.iter().zip(&noisy) {
        assert!((noisy.norm() - 1.0).abs() < 1e-12);
        assert_ne!(clean, noisy);
    }
}
