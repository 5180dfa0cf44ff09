//! Core math and kinematic chain primitives for `autobone`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`) and vector helpers,
//! - the kinematic chain evaluator ([`end_position`], [`origin_position`], [`Pose`]),
//! - typed errors for degenerate or inconsistent chains ([`ChainError`]),
//! - deterministic synthetic data generation ([`synthetic`]).
//!
//! Chain model:
//! `end = anchor + Σ orientation[i] * length[i]`
//!
//! Orientations are unit direction vectors, one per rigid segment, evaluated
//! in index order from the anchor towards the end effector.

/// Kinematic chain evaluation and pose types.
pub mod chain;
/// Error types shared by the chain primitives.
pub mod error;
/// Linear algebra type aliases and helpers.
pub mod math;
/// Deterministic synthetic pose and length generation.
pub mod synthetic;

pub use chain::*;
pub use error::*;
pub use math::*;
