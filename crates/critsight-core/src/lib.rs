//! # Critsight Core
//!
//! Combat-readiness reticle for a first-person melee HUD.
//!
//! Every frame the host hands in a [`Scene`] snapshot (the local player, the
//! entities around it, the engine's cached crosshair target and HUD options)
//! and gets back a tinted reticle drawn through a [`ReticlePainter`]:
//!
//! - **Blue**: a critical hit would land right now
//! - **Red**: a fully charged attack would land right now
//! - **Translucent white**: nothing to signal
//!
//! ## Architecture
//!
//! - **Scene / `WorldView`**: Host-owned snapshot and its read-only view
//! - **Resolver**: [`TargetResolver`] then [`ReadinessClassifier`], both pure
//! - **HUD**: [`ReticleHook`] draws the reticle and the attack charge bar
//!
//! Geometry (boxes, segments, the nearest-hit raycast) lives in the
//! [`sightline`] crate, re-exported here.
//!
//! ## Usage
//!
//! ```
//! use critsight_core::{DrawList, ReticleHook, Scene, TargetEntity, Viewer, WorldView};
//! use glam::DVec3;
//!
//! let mut scene = Scene::new();
//! scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
//! scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95));
//!
//! let hook = ReticleHook::default();
//! let mut painter = DrawList::new();
//! let frame = hook.on_render_reticle(WorldView::new(&scene), &mut painter, 854, 480);
//! assert!(frame.suppresses_default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export sightline for geometry
pub use sightline;

pub mod config;
pub mod entity;
pub mod hud;
pub mod resolver;
pub mod scene;
pub mod world_view;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, ReticleConfig};
pub use entity::{
    AttackCooldown, EntityFlags, EntityId, MovementFlags, StatusEffects, TargetEntity, Viewer,
};
pub use hud::{
    Argb, DrawList, HudOptions, Palette, Perspective, ReticleFrame, ReticleHook, ReticlePainter,
    ReticleShape,
};
pub use resolver::{
    Assessment, ReadinessClassifier, ReadinessState, ResolvedTarget, TargetResolver, TargetSource,
};
pub use scene::Scene;
pub use world_view::WorldView;
