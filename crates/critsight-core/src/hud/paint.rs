//! Immediate-mode drawing port.
//!
//! The reticle never touches pixels or shader state itself. It issues
//! primitives through [`ReticlePainter`], which the host backs with its own
//! renderer. [`DrawList`] is a painter that records the primitives instead,
//! so a frame can be inspected or replayed later.

use serde::{Deserialize, Serialize};

// =============================================================================
// Colour
// =============================================================================

/// Packed `0xAARRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFF00_00FF);

    /// Build a colour from 8-bit channels.
    #[must_use]
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Build a colour from normalised shader-style channels.
    #[must_use]
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_channels(quantize(a), quantize(r), quantize(g), quantize(b))
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same colour with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }
}

/// Reticle tints, one per readiness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// `CriticalReady`
    pub critical: Argb,
    /// `AttackReady`
    pub attack: Argb,
    /// `Default`
    pub idle: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            critical: Argb::BLUE,
            attack: Argb::RED,
            // 0.75 alpha
            idle: Argb::WHITE.with_alpha(0xBF),
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Destination rectangle in scaled screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl ScreenRect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Region of a sprite texture to sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRegion {
    /// Left texel
    pub u: i32,
    /// Top texel
    pub v: i32,
    /// Sampled width
    pub width: i32,
    /// Sampled height
    pub height: i32,
    /// Full texture width
    pub texture_width: i32,
    /// Full texture height
    pub texture_height: i32,
}

impl SourceRegion {
    /// The whole texture of `sprite`.
    #[must_use]
    pub const fn full(sprite: Sprite) -> Self {
        let (w, h) = sprite.size();
        Self {
            u: 0,
            v: 0,
            width: w,
            height: h,
            texture_width: w,
            texture_height: h,
        }
    }

    /// The leftmost `width` texels of `sprite`.
    #[must_use]
    pub const fn left_part(sprite: Sprite, width: i32) -> Self {
        let full = Self::full(sprite);
        Self { width, ..full }
    }
}

/// HUD sprites the reticle uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    /// The crosshair itself
    Crosshair,
    /// Partially filled charge bar
    AttackIndicatorProgress,
    /// Full charge bar shown when a strike is ready
    AttackIndicatorFull,
}

impl Sprite {
    /// Texture size in texels.
    #[must_use]
    pub const fn size(self) -> (i32, i32) {
        match self {
            Self::Crosshair => (15, 15),
            Self::AttackIndicatorProgress | Self::AttackIndicatorFull => (18, 4),
        }
    }

    /// Sprite atlas identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Crosshair => "hud/crosshair",
            Self::AttackIndicatorProgress => "hud/crosshair_attack_indicator_progress",
            Self::AttackIndicatorFull => "hud/crosshair_attack_indicator_full",
        }
    }
}

// =============================================================================
// Painter
// =============================================================================

/// Drawing primitives the host renderer provides.
pub trait ReticlePainter {
    /// Enable or disable standard alpha blending.
    fn set_blend(&mut self, enabled: bool);

    /// Fill a rectangle with a solid colour.
    fn draw_rect(&mut self, rect: ScreenRect, color: Argb);

    /// Draw part of a sprite texture into `dest`, multiplied by `tint`.
    fn draw_sprite(&mut self, sprite: Sprite, dest: ScreenRect, source: SourceRegion, tint: Argb);
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// `set_blend`
    Blend(bool),
    /// `draw_rect`
    Rect {
        /// Destination
        rect: ScreenRect,
        /// Fill colour
        color: Argb,
    },
    /// `draw_sprite`
    Sprite {
        /// Which sprite
        sprite: Sprite,
        /// Destination
        dest: ScreenRect,
        /// Sampled texels
        source: SourceRegion,
        /// Tint
        tint: Argb,
    },
}

/// A painter that records commands in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprites drawn, in order.
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, ScreenRect, Argb)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Sprite {
                sprite, dest, tint, ..
            } => Some((sprite, dest, tint)),
            _ => None,
        })
    }

    /// Issue every recorded command to another painter.
    pub fn replay(&self, target: &mut impl ReticlePainter) {
        for command in &self.commands {
            match *command {
                DrawCommand::Blend(enabled) => target.set_blend(enabled),
                DrawCommand::Rect { rect, color } => target.draw_rect(rect, color),
                DrawCommand::Sprite {
                    sprite,
                    dest,
                    source,
                    tint,
                } => target.draw_sprite(sprite, dest, source, tint),
            }
        }
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl ReticlePainter for DrawList {
    fn set_blend(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::Blend(enabled));
    }

    fn draw_rect(&mut self, rect: ScreenRect, color: Argb) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_sprite(&mut self, sprite: Sprite, dest: ScreenRect, source: SourceRegion, tint: Argb) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            dest,
            source,
            tint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod argb_tests {
        use super::*;

        #[test]
        fn channels() {
            let c = Argb::from_channels(0x12, 0x34, 0x56, 0x78);
            assert_eq!(c, Argb(0x1234_5678));
            assert_eq!(c.alpha(), 0x12);
            assert_eq!(c.red(), 0x34);
            assert_eq!(c.green(), 0x56);
            assert_eq!(c.blue(), 0x78);
        }

        #[test]
        fn from_shader_channels() {
            assert_eq!(Argb::from_rgba_f32(0.0, 0.0, 1.0, 1.0), Argb::BLUE);
            assert_eq!(Argb::from_rgba_f32(1.0, 0.0, 0.0, 1.0), Argb::RED);
            assert_eq!(Argb::from_rgba_f32(1.0, 1.0, 1.0, 0.75), Argb(0xBFFF_FFFF));
            assert_eq!(Argb::from_rgba_f32(2.0, -1.0, 0.0, 1.0), Argb::RED);
        }

        #[test]
        fn default_palette() {
            let p = Palette::default();
            assert_eq!(p.critical, Argb::BLUE);
            assert_eq!(p.attack, Argb::RED);
            assert_eq!(p.idle, Argb(0xBFFF_FFFF));
        }

        #[test]
        fn serializes_as_number() {
            assert_eq!(serde_json::to_string(&Argb::RED).unwrap(), "4294901760");
        }
    }

    mod sprite_tests {
        use super::*;

        #[test]
        fn full_region_matches_size() {
            let r = SourceRegion::full(Sprite::Crosshair);
            assert_eq!((r.width, r.height), (15, 15));
            assert_eq!((r.texture_width, r.texture_height), (15, 15));
        }

        #[test]
        fn left_part_keeps_texture_size() {
            let r = SourceRegion::left_part(Sprite::AttackIndicatorProgress, 9);
            assert_eq!(r.width, 9);
            assert_eq!(r.height, 4);
            assert_eq!(r.texture_width, 18);
        }
    }

    mod draw_list_tests {
        use super::*;

        #[test]
        fn records_in_order_and_replays() {
            let mut list = DrawList::new();
            list.set_blend(true);
            list.draw_rect(ScreenRect::new(0, 0, 2, 2), Argb::WHITE);
            list.draw_sprite(
                Sprite::Crosshair,
                ScreenRect::new(1, 1, 15, 15),
                SourceRegion::full(Sprite::Crosshair),
                Argb::RED,
            );
            list.set_blend(false);
            assert_eq!(list.commands().len(), 4);
            assert_eq!(list.sprites().count(), 1);

            let mut copy = DrawList::new();
            list.replay(&mut copy);
            assert_eq!(copy, list);

            list.clear();
            assert!(list.is_empty());
        }
    }
}
