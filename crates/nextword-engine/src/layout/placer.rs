//! Non-overlapping word placement.
//!
//! The renderer only depends on the [`Placer`] trait; [`SpiralPlacer`] is the
//! stock implementation. It walks each word outward along an archimedean spiral
//! from a jittered start near the centre and takes the first spot where the
//! padded box fits inside the canvas without touching an earlier word.

use glam::Vec2;

use crate::api::types::{PlacedWord, SizedWord};
use crate::layout::canvas::CanvasSize;
use crate::layout::measure::TextMeasure;
use crate::systems::rng::Rng;

/// Spiral parameter increment per step.
const SPIRAL_STEP: f32 = 0.1;

/// Lays words out inside a canvas.
///
/// Contract: words are placed in the order given; no two returned boxes
/// overlap; every returned box lies inside the canvas; words that cannot fit
/// are left out. Coordinates are box centres relative to the canvas centre.
pub trait Placer {
    fn place(
        &mut self,
        words: &[SizedWord],
        canvas: CanvasSize,
        measure: &dyn TextMeasure,
    ) -> Vec<PlacedWord>;
}

/// Axis-aligned box stored as centre + half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    center: Vec2,
    half: Vec2,
}

impl Bounds {
    fn overlaps(&self, other: &Bounds) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    fn inside(&self, canvas_half: Vec2) -> bool {
        let far = self.center.abs() + self.half;
        far.x <= canvas_half.x && far.y <= canvas_half.y
    }
}

/// Archimedean spiral placement with a seeded RNG, so a given seed always
/// produces the same sequence of layouts.
#[derive(Debug, Clone)]
pub struct SpiralPlacer {
    rng: Rng,
    padding: f32,
}

impl SpiralPlacer {
    pub fn new(seed: u64, padding: f32) -> Self {
        Self {
            rng: Rng::new(seed),
            padding: padding.max(0.0),
        }
    }

    fn rotation(&mut self) -> f32 {
        if self.rng.next_bool() { 0.0 } else { 90.0 }
    }

    /// Walk the spiral until the box fits or the spiral leaves the canvas.
    fn find_spot(&mut self, half: Vec2, canvas: CanvasSize, placed: &[Bounds]) -> Option<Vec2> {
        let canvas_half = canvas.half();
        if half.x > canvas_half.x || half.y > canvas_half.y {
            return None;
        }

        // start somewhere in the middle half of the canvas
        let start = Vec2::new(
            (self.rng.next_f32() - 0.5) * canvas_half.x,
            (self.rng.next_f32() - 0.5) * canvas_half.y,
        );
        let direction = if self.rng.next_bool() { 1.0 } else { -1.0 };
        let aspect = if canvas.height > 0.0 { canvas.width / canvas.height } else { 1.0 };

        // Past this parameter every spiral point is further from `start` than
        // the canvas diagonal, so nothing more can fit.
        let max_delta = (canvas.width * canvas.width + canvas.height * canvas.height).sqrt();
        let max_t = max_delta / aspect.min(1.0).max(f32::EPSILON);

        let mut step = 0u32;
        loop {
            let t = step as f32 * SPIRAL_STEP;
            if t > max_t {
                return None;
            }
            let signed = t * direction;
            let offset = Vec2::new(aspect * signed * signed.cos(), signed * signed.sin());
            let candidate = Bounds { center: start + offset, half };
            if candidate.inside(canvas_half) && !placed.iter().any(|b| b.overlaps(&candidate)) {
                return Some(candidate.center);
            }
            step += 1;
        }
    }
}

impl Placer for SpiralPlacer {
    fn place(
        &mut self,
        words: &[SizedWord],
        canvas: CanvasSize,
        measure: &dyn TextMeasure,
    ) -> Vec<PlacedWord> {
        let mut placed_bounds: Vec<Bounds> = Vec::with_capacity(words.len());
        let mut placed = Vec::with_capacity(words.len());

        for word in words {
            let rotation = self.rotation();
            let mut size = measure.measure(&word.text, word.font_size);
            if rotation != 0.0 {
                size = Vec2::new(size.y, size.x);
            }
            let half = size * 0.5 + Vec2::splat(self.padding);

            match self.find_spot(half, canvas, &placed_bounds) {
                Some(center) => {
                    placed_bounds.push(Bounds { center, half });
                    placed.push(PlacedWord {
                        text: word.text.clone(),
                        importance: word.importance,
                        font_size: word.font_size,
                        x: center.x,
                        y: center.y,
                        rotation_degrees: rotation,
                    });
                }
                None => {
                    log::debug!("placer: no room for \"{}\" at {}px", word.text, word.font_size);
                }
            }
        }

        placed
    }
}
