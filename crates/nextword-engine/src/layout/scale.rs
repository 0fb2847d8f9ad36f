//! Importance → font size mapping.

use crate::api::config::FontConfig;
use crate::api::types::CandidateWord;

/// Continuous power scale: `range` interpolated over `domain` after raising
/// both input and domain to `exponent` (sign preserved for negatives).
///
/// A degenerate domain (both ends equal) maps every input to the middle of the
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowScale {
    domain: [f32; 2],
    range: [f32; 2],
    exponent: f32,
}

impl PowScale {
    pub fn new(domain: [f32; 2], range: [f32; 2], exponent: f32) -> Self {
        Self { domain, range, exponent }
    }

    fn transform(&self, x: f32) -> f32 {
        if x < 0.0 {
            -(-x).powf(self.exponent)
        } else {
            x.powf(self.exponent)
        }
    }

    pub fn apply(&self, x: f32) -> f32 {
        let t0 = self.transform(self.domain[0]);
        let t1 = self.transform(self.domain[1]);
        let span = t1 - t0;
        let n = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (self.transform(x) - t0) / span
        };
        self.range[0] + n * (self.range[1] - self.range[0])
    }

    pub fn domain(&self) -> [f32; 2] {
        self.domain
    }
}

/// Build the font scale for a candidate set.
///
/// Domain is the observed `[min, max]` importance; a zero maximum falls back to
/// 100 so an all-zero set still gets a usable range.
pub fn font_scale(words: &[CandidateWord], font: &FontConfig) -> PowScale {
    let min = words
        .iter()
        .map(|w| w.importance)
        .filter(|v| v.is_finite())
        .fold(f32::INFINITY, f32::min);
    let max = words
        .iter()
        .map(|w| w.importance)
        .filter(|v| v.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    let min = if min.is_finite() { min } else { 0.0 };
    let max = if max.is_finite() && max != 0.0 { max } else { 100.0 };

    PowScale::new([min, max], [font.min_px, font.max_px], font.exponent)
}
