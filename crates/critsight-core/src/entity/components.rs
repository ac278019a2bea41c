//! State components shared by the viewer and candidate targets.
//!
//! These are plain-data snapshots copied out of the host engine each frame.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Movement state of the viewer for the current frame.
    ///
    /// Several flags may be set at once (e.g. `SUBMERGED | CLIMBING`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MovementFlags: u8 {
        /// Standing on solid ground
        const ON_GROUND = 1 << 0;
        /// Holding on to a ladder, vine or similar
        const CLIMBING = 1 << 1;
        /// Swimming or otherwise submerged
        const SUBMERGED = 1 << 2;
        /// Riding a mount or vehicle
        const MOUNTED = 1 << 3;
        /// Sprinting
        const SPRINTING = 1 << 4;
    }
}

bitflags! {
    /// Active status effects on the viewer.
    ///
    /// Only the effects that influence reticle state are modelled; hosts map
    /// their own effect registry onto these bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusEffects: u16 {
        /// Vision impaired; critical hits are not possible
        const BLINDNESS = 1 << 0;
        /// Screen wobble; tints are unaffected
        const NAUSEA = 1 << 1;
    }
}

bitflags! {
    /// Classification flags of a candidate target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EntityFlags: u8 {
        /// Not dead or removed
        const ALIVE = 1 << 0;
        /// A living creature (as opposed to an item, arrow, boat, ...)
        const LIVING = 1 << 1;
        /// Spectating player; never targetable
        const SPECTATOR = 1 << 2;
        /// Can receive melee attacks
        const ATTACKABLE = 1 << 3;
    }
}

impl EntityFlags {
    /// Flags of an ordinary living mob.
    pub const MOB: Self = Self::ALIVE.union(Self::LIVING).union(Self::ATTACKABLE);
}

/// Melee attack charge of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackCooldown {
    /// Charge progress, 1.0 when fully charged
    pub progress: f32,
    /// Progress-per-tick metric reported by the engine (higher is slower)
    pub per_tick: f32,
}

impl AttackCooldown {
    /// Engine default for bare-handed attacks (four attacks per second).
    pub const DEFAULT_PER_TICK: f32 = 5.0;

    /// Create a cooldown at the given progress with the default rate.
    #[must_use]
    pub const fn at(progress: f32) -> Self {
        Self {
            progress,
            per_tick: Self::DEFAULT_PER_TICK,
        }
    }

    /// Progress clamped to `[0, 1]`; NaN reads as empty.
    #[must_use]
    pub fn charge(&self) -> f32 {
        if self.progress.is_nan() {
            0.0
        } else {
            self.progress.clamp(0.0, 1.0)
        }
    }

    /// Whether progress has reached `threshold`.
    #[must_use]
    pub fn reached(&self, threshold: f32) -> bool {
        self.progress >= threshold
    }
}

impl Default for AttackCooldown {
    fn default() -> Self {
        Self::at(1.0)
    }
}
