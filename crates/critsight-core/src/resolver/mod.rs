//! Targeting and readiness decisions.
//!
//! Both stages are pure functions of a [`WorldView`](crate::world_view::WorldView)
//! snapshot:
//!
//! 1. [`TargetResolver`] picks the entity the viewer is aiming at, if any
//! 2. [`ReadinessClassifier`] combines that target with the viewer's cooldown
//!    and posture into a [`ReadinessState`]
//!
//! # Invariants
//!
//! - A resolved target is always living, alive, not hurt and within reach
//! - The raycast result wins over the engine's cached target when both exist
//! - `CriticalReady` implies everything `AttackReady` requires
//! - No state survives between calls; the same snapshot gives the same answer

mod readiness;
mod target;

pub use readiness::{Assessment, ReadinessClassifier, ReadinessState};
pub use target::{ResolvedTarget, TargetResolver, TargetSource};
