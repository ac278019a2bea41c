//! `WorldView` provides read-only access to the frame's [`Scene`].
//!
//! The [`WorldView`] is the only way targeting and classification read game
//! state. It is handed in explicitly at call time instead of being reached
//! through global engine handles, so tests can build any snapshot they like.
//!
//! # Unavailable context
//!
//! A host may ask for a reticle before a world exists. [`WorldView::detached`]
//! models that case: every accessor returns `None` and every query comes back
//! empty. Callers treat `None` as "nothing to show", never as an error.
//!
//! # Example
//!
//! ```
//! use critsight_core::entity::{TargetEntity, Viewer};
//! use critsight_core::scene::Scene;
//! use critsight_core::world_view::WorldView;
//! use glam::DVec3;
//!
//! let mut scene = Scene::new();
//! scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
//! let id = scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.8));
//!
//! let view = WorldView::new(&scene);
//! assert!(view.viewer().is_some());
//! assert!(view.entity(id).is_some());
//!
//! let offline = WorldView::detached();
//! assert!(offline.viewer().is_none());
//! ```

use sightline::{nearest_hit, Aabb, Candidate, Hit, Segment};

use crate::entity::{EntityId, TargetEntity, Viewer};
use crate::hud::HudOptions;
use crate::scene::Scene;

// =============================================================================
// WorldView
// =============================================================================

/// Read-only view of one frame's scene.
///
/// `WorldView` is `Copy`; pass it by value.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    /// The scene being viewed, `None` when no world is loaded.
    scene: Option<&'a Scene>,
}

impl<'a> WorldView<'a> {
    /// Creates a view over a loaded scene.
    #[must_use]
    pub const fn new(scene: &'a Scene) -> Self {
        Self { scene: Some(scene) }
    }

    /// Creates a view with no world behind it.
    #[must_use]
    pub const fn detached() -> Self {
        Self { scene: None }
    }

    /// Whether a scene is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.scene.is_some()
    }

    /// Host frame counter, 0 when detached.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.scene.map_or(0, Scene::frame)
    }

    /// The local player.
    #[must_use]
    pub fn viewer(&self) -> Option<&'a Viewer> {
        self.scene?.viewer()
    }

    /// Looks up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&'a TargetEntity> {
        self.scene?.get(id)
    }

    /// The id of the viewer's own entity, if the host listed it.
    #[must_use]
    pub fn viewer_entity(&self) -> Option<EntityId> {
        self.scene?.viewer_entity()
    }

    /// The engine's cached crosshair target, resolved to its snapshot.
    ///
    /// A dangling id, or one pointing at the viewer itself, reads as `None`.
    #[must_use]
    pub fn targeted_entity(&self) -> Option<(EntityId, &'a TargetEntity)> {
        let scene = self.scene?;
        let id = scene.targeted()?;
        if scene.viewer_entity() == Some(id) {
            return None;
        }
        scene.get(id).map(|entity| (id, entity))
    }

    /// HUD options.
    #[must_use]
    pub fn hud(&self) -> Option<&'a HudOptions> {
        self.scene.map(Scene::hud)
    }

    /// Iterates entities in ascending id order. Empty when detached.
    pub fn entities_sorted(&self) -> impl Iterator<Item = (EntityId, &'a TargetEntity)> + 'a {
        self.scene.into_iter().flat_map(Scene::entities_sorted)
    }

    /// Casts `segment` against every raycast-eligible entity whose box
    /// touches `search_volume` and returns the nearest hit.
    ///
    /// The viewer's own entity, spectators and non-attackable entities are
    /// skipped. Entities are visited in id order, so equal-distance ties go
    /// to the lower id.
    #[must_use]
    pub fn raycast_entities(
        &self,
        segment: &Segment,
        search_volume: &Aabb,
        max_distance_sq: f64,
    ) -> Option<Hit<EntityId>> {
        let own = self.viewer_entity();
        let candidates = self
            .entities_sorted()
            .filter(|(id, e)| Some(*id) != own && e.is_raycast_candidate())
            .map(|(id, e)| Candidate::new(id, e.bounds).with_margin(e.targeting_margin));

        nearest_hit(segment, search_volume, candidates, max_distance_sq)
    }
}

impl<'a> From<&'a Scene> for WorldView<'a> {
    fn from(scene: &'a Scene) -> Self {
        Self::new(scene)
    }
}

// =============================================================================
// Tests
// =============================================================================
