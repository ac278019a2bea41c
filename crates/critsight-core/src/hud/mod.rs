//! Reticle drawing hook.
//!
//! The host calls [`ReticleHook::on_render_reticle`] once per frame where it
//! would normally draw its own crosshair. The hook classifies the frame,
//! draws the tinted reticle and the attack charge bar through a
//! [`ReticlePainter`], and reports back whether the host's own reticle should
//! be suppressed.
//!
//! # Frame outcomes
//!
//! | Situation                 | Result                       | Host reticle |
//! |---------------------------|------------------------------|--------------|
//! | No player / world         | [`ReticleFrame::Unavailable`] | drawn        |
//! | Third-person camera       | [`ReticleFrame::PassThrough`] | drawn        |
//! | HUD hidden by the user    | [`ReticleFrame::Hidden`]      | suppressed   |
//! | Otherwise                 | [`ReticleFrame::Drawn`]       | suppressed   |

pub mod paint;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub use paint::{
    Argb, DrawCommand, DrawList, Palette, ReticlePainter, ScreenRect, SourceRegion, Sprite,
};

use crate::config::{ConfigError, ReticleConfig};
use crate::entity::Viewer;
use crate::resolver::{ReadinessClassifier, ReadinessState};
use crate::world_view::WorldView;

/// Crosshair sprite offset from the screen center.
const CROSSHAIR_OFFSET: i32 = 7;
/// Charge bar offset left of the screen center.
const INDICATOR_OFFSET_X: i32 = 8;
/// Charge bar offset below the screen center.
const INDICATOR_OFFSET_Y: i32 = 16 - CROSSHAIR_OFFSET;
/// Arm span of the rectangle-drawn cross.
const CROSS_SIZE: i32 = 11;
/// Bar thickness of the rectangle-drawn cross.
const CROSS_THICKNESS: i32 = 1;

// =============================================================================
// HUD options
// =============================================================================

/// Camera perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Looking out of the player's eyes
    #[default]
    FirstPerson,
    /// Camera behind the player
    ThirdPersonBack,
    /// Camera in front of the player
    ThirdPersonFront,
}

impl Perspective {
    /// Whether this is the first-person camera.
    #[must_use]
    pub const fn is_first_person(self) -> bool {
        matches!(self, Self::FirstPerson)
    }
}

/// Where the engine shows the attack charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackIndicatorMode {
    /// No indicator
    Off,
    /// Under the crosshair
    #[default]
    Crosshair,
    /// Next to the hotbar (drawn by the host, not here)
    Hotbar,
}

/// User HUD settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudOptions {
    /// HUD hidden (screenshot mode)
    pub hidden: bool,
    /// Camera perspective
    pub perspective: Perspective,
    /// Attack indicator placement
    pub attack_indicator: AttackIndicatorMode,
}

/// How the reticle itself is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReticleShape {
    /// The engine's crosshair sprite, tinted
    #[default]
    Sprite,
    /// Two filled bars
    Cross,
}

// =============================================================================
// Hook
// =============================================================================

/// What happened in one call to [`ReticleHook::on_render_reticle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReticleFrame {
    /// No player or world; nothing drawn
    Unavailable,
    /// Not first person; nothing drawn
    PassThrough,
    /// HUD hidden; nothing drawn
    Hidden,
    /// Reticle drawn
    Drawn {
        /// Readiness shown
        state: ReadinessState,
        /// Charge bar fill in `[0, 1]`
        charge: f32,
    },
}

impl ReticleFrame {
    /// Whether the host must skip its own reticle this frame.
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        matches!(self, Self::Hidden | Self::Drawn { .. })
    }

    /// The readiness state, if a reticle was drawn.
    #[must_use]
    pub const fn state(&self) -> Option<ReadinessState> {
        match self {
            Self::Drawn { state, .. } => Some(*state),
            _ => None,
        }
    }
}

/// Per-frame reticle renderer.
///
/// # Example
///
/// ```
/// use critsight_core::entity::{TargetEntity, Viewer};
/// use critsight_core::hud::{DrawList, ReticleFrame, ReticleHook};
/// use critsight_core::resolver::ReadinessState;
/// use critsight_core::scene::Scene;
/// use critsight_core::world_view::WorldView;
/// use glam::DVec3;
///
/// let mut scene = Scene::new();
/// scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
/// scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95));
///
/// let hook = ReticleHook::default();
/// let mut painter = DrawList::new();
/// let frame = hook.on_render_reticle(WorldView::new(&scene), &mut painter, 854, 480);
///
/// assert_eq!(frame, ReticleFrame::Drawn { state: ReadinessState::AttackReady, charge: 1.0 });
/// assert!(frame.suppresses_default());
/// assert!(!painter.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReticleHook {
    config: ReticleConfig,
    classifier: ReadinessClassifier,
}

impl ReticleHook {
    /// Creates a hook from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn new(config: ReticleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ReticleConfig) -> Self {
        let classifier = ReadinessClassifier::from_config(&config);
        Self { config, classifier }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReticleConfig {
        &self.config
    }

    /// The classifier driving the tint.
    #[must_use]
    pub const fn classifier(&self) -> &ReadinessClassifier {
        &self.classifier
    }

    /// Draws this frame's reticle.
    ///
    /// `screen_width` and `screen_height` are the scaled HUD dimensions.
    pub fn on_render_reticle<P>(
        &self,
        view: WorldView<'_>,
        painter: &mut P,
        screen_width: i32,
        screen_height: i32,
    ) -> ReticleFrame
    where
        P: ReticlePainter + ?Sized,
    {
        let (Some(viewer), Some(hud)) = (view.viewer(), view.hud()) else {
            trace!(frame = view.frame(), "reticle context unavailable");
            return ReticleFrame::Unavailable;
        };
        if !hud.perspective.is_first_person() {
            return ReticleFrame::PassThrough;
        }
        if hud.hidden {
            return ReticleFrame::Hidden;
        }

        let assessment = self.classifier.assess(view);
        let tint = self.tint(assessment.state);
        let center = (screen_width / 2, screen_height / 2);

        painter.set_blend(true);
        self.draw_reticle(painter, center, tint);
        if hud.attack_indicator == AttackIndicatorMode::Crosshair {
            self.draw_attack_indicator(painter, view, viewer, center, tint);
        }
        painter.set_blend(false);

        ReticleFrame::Drawn {
            state: assessment.state,
            charge: assessment.charge,
        }
    }

    /// Tint for a readiness state.
    #[must_use]
    pub const fn tint(&self, state: ReadinessState) -> Argb {
        match state {
            ReadinessState::CriticalReady => self.config.palette.critical,
            ReadinessState::AttackReady => self.config.palette.attack,
            ReadinessState::Default => self.config.palette.idle,
        }
    }

    fn draw_reticle<P>(&self, painter: &mut P, (cx, cy): (i32, i32), tint: Argb)
    where
        P: ReticlePainter + ?Sized,
    {
        match self.config.shape {
            ReticleShape::Sprite => {
                let (w, h) = Sprite::Crosshair.size();
                painter.draw_sprite(
                    Sprite::Crosshair,
                    ScreenRect::new(cx - CROSSHAIR_OFFSET, cy - CROSSHAIR_OFFSET, w, h),
                    SourceRegion::full(Sprite::Crosshair),
                    tint,
                );
            }
            ReticleShape::Cross => {
                let half = CROSS_SIZE / 2;
                let half_thickness = CROSS_THICKNESS / 2;
                painter.draw_rect(
                    ScreenRect::new(cx - half, cy - half_thickness, CROSS_SIZE, CROSS_THICKNESS),
                    tint,
                );
                painter.draw_rect(
                    ScreenRect::new(cx - half_thickness, cy - half, CROSS_THICKNESS, CROSS_SIZE),
                    tint,
                );
            }
        }
    }

    /// Charge bar under the reticle: partial while charging, full when a
    /// strike on the cached target is ready, nothing otherwise.
    fn draw_attack_indicator<P>(
        &self,
        painter: &mut P,
        view: WorldView<'_>,
        viewer: &Viewer,
        (cx, cy): (i32, i32),
        tint: Argb,
    ) where
        P: ReticlePainter + ?Sized,
    {
        let x = cx - INDICATOR_OFFSET_X;
        let y = cy + INDICATOR_OFFSET_Y;
        let (bar_width, bar_height) = Sprite::AttackIndicatorProgress.size();

        if viewer.cooldown.progress < 1.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            let filled = (viewer.cooldown.charge() * bar_width as f32) as i32;
            if filled > 0 {
                painter.draw_sprite(
                    Sprite::AttackIndicatorProgress,
                    ScreenRect::new(x, y, filled, bar_height),
                    SourceRegion::left_part(Sprite::AttackIndicatorProgress, filled),
                    tint,
                );
            }
        } else if self.strike_ready(view, viewer) {
            painter.draw_sprite(
                Sprite::AttackIndicatorFull,
                ScreenRect::new(x, y, bar_width, bar_height),
                SourceRegion::full(Sprite::AttackIndicatorFull),
                tint,
            );
        }
    }

    /// The engine's cached target can be hit at full strength right now.
    fn strike_ready(&self, view: WorldView<'_>, viewer: &Viewer) -> bool {
        viewer.cooldown.reached(1.0)
            && viewer.cooldown.per_tick > self.config.full_indicator_min_rate
            && view
                .targeted_entity()
                .is_some_and(|(_, entity)| entity.is_valid_target())
    }
}

impl Default for ReticleHook {
    fn default() -> Self {
        Self::from_valid(ReticleConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
