use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use glam::Vec2;
use nextword_engine::{EstimatedMeasure, TextMeasure};

/// Measures text with an offscreen 2D canvas so placement sees the real font.
pub struct CanvasMeasure {
    context: CanvasRenderingContext2d,
    family: String,
    /// Used for the height, which `measureText` does not report portably.
    fallback: EstimatedMeasure,
}

impl CanvasMeasure {
    pub fn new(document: &Document, family: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            context,
            family: family.to_string(),
            fallback: EstimatedMeasure::default(),
        })
    }
}

impl TextMeasure for CanvasMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        let estimate = self.fallback.measure(text, font_size);
        self.context.set_font(&format!("{}px {}", font_size, self.family));
        match self.context.measure_text(text) {
            Ok(metrics) => Vec2::new(metrics.width() as f32, estimate.y),
            Err(err) => {
                log::debug!("measure_text failed for {:?}: {:?}", text, err);
                estimate
            }
        }
    }
}
