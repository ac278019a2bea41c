//! Readiness classification: which reticle state applies this frame?
//!
//! Decision order, first match wins:
//!
//! 1. `CriticalReady`: cooldown at the critical threshold, free-falling (not
//!    grounded, climbing or swimming), not blind, not mounted, not sprinting,
//!    and a target resolved.
//! 2. `AttackReady`: cooldown at the attack threshold and a target resolved.
//! 3. `Default`: everything else, including a missing viewer or world.
//!
//! The target is resolved at most once per classification and shared by both
//! checks. Nothing is remembered between calls.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ReticleConfig;
use crate::entity::Viewer;
use crate::world_view::WorldView;

use super::target::{ResolvedTarget, TargetResolver};

/// Reticle state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadinessState {
    /// A critical hit would land right now
    CriticalReady,
    /// A fully charged attack would land right now
    AttackReady,
    /// Nothing to signal
    #[default]
    Default,
}

/// Full result of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// The chosen state
    pub state: ReadinessState,
    /// The target used for the decision, if one was resolved
    pub target: Option<ResolvedTarget>,
    /// Attack charge clamped to `[0, 1]` (drives the charge bar)
    pub charge: f32,
}

impl Assessment {
    /// Result when no viewer is available.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            state: ReadinessState::Default,
            target: None,
            charge: 0.0,
        }
    }
}

/// Classifies the viewer's combat readiness.
///
/// # Example
///
/// ```
/// use critsight_core::entity::{MovementFlags, TargetEntity, Viewer};
/// use critsight_core::resolver::{ReadinessClassifier, ReadinessState};
/// use critsight_core::scene::Scene;
/// use critsight_core::world_view::WorldView;
/// use glam::DVec3;
///
/// let mut player = Viewer::standing_at(DVec3::ZERO, DVec3::Z);
/// player.movement = MovementFlags::empty();
/// player.velocity.y = -0.4;
///
/// let mut scene = Scene::new();
/// scene.set_viewer(player);
/// scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95));
///
/// let classifier = ReadinessClassifier::new();
/// assert_eq!(classifier.classify(WorldView::new(&scene)), ReadinessState::CriticalReady);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessClassifier {
    resolver: TargetResolver,
    reach: f64,
    critical_threshold: f32,
    attack_threshold: f32,
    submerged_blocks_critical: bool,
}

impl ReadinessClassifier {
    /// Creates a classifier with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ReticleConfig::default())
    }

    /// Creates a classifier from `config`.
    #[must_use]
    pub fn from_config(config: &ReticleConfig) -> Self {
        Self {
            resolver: TargetResolver::from_config(config),
            reach: config.reach_distance,
            critical_threshold: config.critical_cooldown_threshold,
            attack_threshold: config.attack_cooldown_threshold,
            submerged_blocks_critical: config.submerged_blocks_critical,
        }
    }

    /// The resolver used for targeting.
    #[must_use]
    pub const fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    /// Classifies the frame and returns only the state.
    #[must_use]
    pub fn classify(&self, view: WorldView<'_>) -> ReadinessState {
        self.assess(view).state
    }

    /// Classifies the frame and returns the state together with the target
    /// and charge that produced it.
    #[must_use]
    pub fn assess(&self, view: WorldView<'_>) -> Assessment {
        let Some(viewer) = view.viewer() else {
            trace!(frame = view.frame(), "no viewer, default reticle");
            return Assessment::unavailable();
        };

        let cooldown = viewer.cooldown;
        let gate = self.critical_threshold.min(self.attack_threshold);
        let target = if cooldown.reached(gate) {
            self.resolver.resolve(view, self.reach)
        } else {
            None
        };

        let state = match target {
            Some(_) if cooldown.reached(self.critical_threshold) && self.critical_posture(viewer) => {
                ReadinessState::CriticalReady
            }
            Some(_) if cooldown.reached(self.attack_threshold) => ReadinessState::AttackReady,
            _ => ReadinessState::Default,
        };

        trace!(
            frame = view.frame(),
            ?state,
            progress = cooldown.progress,
            entity = ?target.map(|t| t.entity),
            "classified reticle"
        );

        Assessment {
            state,
            target,
            charge: cooldown.charge(),
        }
    }

    /// Falling freely with nothing that cancels a critical hit.
    fn critical_posture(&self, viewer: &Viewer) -> bool {
        viewer.is_free_falling(self.submerged_blocks_critical)
            && !viewer.is_blind()
            && !viewer.is_mounted()
            && !viewer.is_sprinting()
    }
}

impl Default for ReadinessClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
