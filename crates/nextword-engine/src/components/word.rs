use glam::Vec2;

use crate::api::types::{PlacedWord, WordId};
use crate::components::color::Rgb;

/// One rendered word in the cloud.
/// Plain data; the timeline mutates `opacity` and `fill`, surfaces read it.
#[derive(Debug, Clone, PartialEq)]
pub struct WordElement {
    pub id: WordId,
    pub text: String,
    /// Box centre relative to the canvas centre.
    pub pos: Vec2,
    pub rotation_degrees: f32,
    pub font_size: f32,
    pub opacity: f32,
    pub fill: Rgb,
    /// The true next word. Never fades.
    pub highlighted: bool,
    /// Changed since the last surface sync.
    pub dirty: bool,
}

impl WordElement {
    pub fn new(id: WordId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            pos: Vec2::ZERO,
            rotation_degrees: 0.0,
            font_size: 16.0,
            opacity: 1.0,
            fill: Rgb::CYAN,
            highlighted: false,
            dirty: true,
        }
    }

    /// Build an element from a placement result.
    pub fn from_placed(id: WordId, placed: &PlacedWord) -> Self {
        Self::new(id, placed.text.clone())
            .with_pos(Vec2::new(placed.x, placed.y))
            .with_rotation(placed.rotation_degrees)
            .with_font_size(placed.font_size)
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = fill;
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        if self.opacity != opacity {
            self.opacity = opacity;
            self.dirty = true;
        }
    }

    pub fn set_fill(&mut self, fill: Rgb) {
        if self.fill != fill {
            self.fill = fill;
            self.dirty = true;
        }
    }

    /// SVG transform string: translate to the box centre, then rotate.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {})rotate({})",
            self.pos.x, self.pos.y, self.rotation_degrees
        )
    }
}
