//! Frame-scoped entity snapshots.
//!
//! This module provides the types the host copies out of its world every frame:
//! - [`EntityId`]: Host-assigned identifier for a candidate target
//! - [`TargetEntity`]: Everything targeting needs to know about one entity
//! - [`Viewer`]: The local player as seen from the camera
//!
//! Nothing here is owned by the core beyond a single frame. The host fills a
//! [`Scene`](crate::scene::Scene), classification reads it, and the next
//! frame starts over.
//!
//! # Example
//!
//! ```
//! use critsight_core::entity::{EntityFlags, TargetEntity, Viewer};
//! use glam::DVec3;
//!
//! let zombie = TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95);
//! assert!(zombie.is_valid_target());
//!
//! let player = Viewer::standing_at(DVec3::ZERO, DVec3::Z);
//! assert!((player.eye_position.y - 1.62).abs() < 1e-9);
//! ```

pub mod components;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use sightline::Aabb;
use std::fmt;

pub use components::{AttackCooldown, EntityFlags, MovementFlags, StatusEffects};

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. Ids are chosen by the host
/// (or by [`Scene::spawn`](crate::scene::Scene::spawn)) and only need to be
/// unique within one scene.
///
/// # Ordering
///
/// Entity IDs are ordered by their numeric value, which fixes the iteration
/// order of scene queries and therefore raycast tie-breaks.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

// =============================================================================
// Target Entity
// =============================================================================

/// Snapshot of an entity that may be targeted this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntity {
    /// Alive / living / spectator / attackable
    pub flags: EntityFlags,
    /// Ticks left on the post-damage flicker; nonzero excludes the entity
    pub hurt_time: u32,
    /// Feet position
    pub position: DVec3,
    /// Visual height above `position`
    pub height: f64,
    /// Collision box in world space
    pub bounds: Aabb,
    /// Extra box inflation the engine applies when raycasting against it
    pub targeting_margin: f64,
}

impl TargetEntity {
    /// A healthy, attackable living mob standing at `feet`.
    #[must_use]
    pub fn mob(feet: DVec3, width: f64, height: f64) -> Self {
        Self {
            flags: EntityFlags::MOB,
            hurt_time: 0,
            position: feet,
            height,
            bounds: Aabb::from_feet(feet, width, height),
            targeting_margin: 0.0,
        }
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the hurt countdown.
    #[must_use]
    pub fn with_hurt_time(mut self, ticks: u32) -> Self {
        self.hurt_time = ticks;
        self
    }

    /// Whether the entity is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.flags.contains(EntityFlags::ALIVE)
    }

    /// Whether the entity was damaged recently and is still flickering.
    #[must_use]
    pub fn is_hurt(&self) -> bool {
        self.hurt_time > 0
    }

    /// Whether the raycast may consider this entity at all.
    #[must_use]
    pub fn is_raycast_candidate(&self) -> bool {
        self.flags.contains(EntityFlags::ATTACKABLE) && !self.flags.contains(EntityFlags::SPECTATOR)
    }

    /// Living, alive and not recently hurt.
    #[must_use]
    pub fn is_valid_target(&self) -> bool {
        self.flags.contains(EntityFlags::LIVING) && self.is_alive() && !self.is_hurt()
    }

    /// Point halfway up the entity's visual height.
    #[must_use]
    pub fn visual_center(&self) -> DVec3 {
        self.position + DVec3::new(0.0, self.height / 2.0, 0.0)
    }
}

// =============================================================================
// Viewer
// =============================================================================

/// The local player, sampled once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    /// Camera position
    pub eye_position: DVec3,
    /// Unit look vector
    pub look_direction: DVec3,
    /// Current velocity (Y is up)
    pub velocity: DVec3,
    /// The player's own collision box
    pub bounds: Aabb,
    /// Ground / climbing / submerged / mounted / sprinting
    pub movement: MovementFlags,
    /// Active status effects
    pub effects: StatusEffects,
    /// Melee charge
    pub cooldown: AttackCooldown,
}

impl Viewer {
    /// Standing eye height of a player.
    pub const EYE_HEIGHT: f64 = 1.62;
    /// Player box width.
    pub const WIDTH: f64 = 0.6;
    /// Player box height.
    pub const HEIGHT: f64 = 1.8;

    /// A grounded, idle player with full charge standing at `feet` and
    /// looking along `look_direction`.
    #[must_use]
    pub fn standing_at(feet: DVec3, look_direction: DVec3) -> Self {
        Self {
            eye_position: feet + DVec3::new(0.0, Self::EYE_HEIGHT, 0.0),
            look_direction,
            velocity: DVec3::ZERO,
            bounds: Aabb::from_feet(feet, Self::WIDTH, Self::HEIGHT),
            movement: MovementFlags::ON_GROUND,
            effects: StatusEffects::empty(),
            cooldown: AttackCooldown::default(),
        }
    }

    /// Descending through open air: negative vertical velocity and none of
    /// ground contact, climbing or (when `submerged_counts` is set) swimming.
    #[must_use]
    pub fn is_free_falling(&self, submerged_counts: bool) -> bool {
        let mut supported = MovementFlags::ON_GROUND | MovementFlags::CLIMBING;
        if submerged_counts {
            supported |= MovementFlags::SUBMERGED;
        }
        self.velocity.y < 0.0 && !self.movement.intersects(supported)
    }

    /// Whether the viewer is riding something.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.movement.contains(MovementFlags::MOUNTED)
    }

    /// Whether the viewer is sprinting.
    #[must_use]
    pub fn is_sprinting(&self) -> bool {
        self.movement.contains(MovementFlags::SPRINTING)
    }

    /// Whether the viewer is blinded.
    #[must_use]
    pub fn is_blind(&self) -> bool {
        self.effects.contains(StatusEffects::BLINDNESS)
    }
}
