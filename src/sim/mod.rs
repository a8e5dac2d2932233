//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per animation frame, fixed per-frame steps
//! - Wall-clock time only through the tick input timestamp
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod aabb;
pub mod paddle;
pub mod runner;

pub use aabb::Aabb;
