use glam::Vec2;

use crate::api::config::CanvasConfig;

/// Drawing area for the cloud, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size the canvas from the viewport. Narrow viewports (phones) get a taller
    /// share of the screen.
    pub fn from_viewport(viewport_width: f32, viewport_height: f32, config: &CanvasConfig) -> Self {
        let width = (viewport_width * config.width_fraction).min(config.max_width);
        let height_fraction = if viewport_width < config.narrow_breakpoint {
            config.narrow_height_fraction
        } else {
            config.wide_height_fraction
        };
        let height = (viewport_height * height_fraction).min(config.max_height);
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Half extents; the cloud is laid out around the centre.
    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// `0 0 w h`, for the SVG viewBox.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_uses_half_height() {
        let c = CanvasSize::from_viewport(1000.0, 900.0, &CanvasConfig::default());
        assert_eq!(c, CanvasSize::new(800.0, 450.0));
    }

    #[test]
    fn narrow_viewport_uses_most_of_height() {
        let c = CanvasSize::from_viewport(400.0, 700.0, &CanvasConfig::default());
        assert_eq!(c, CanvasSize::new(320.0, 560.0));
    }

    #[test]
    fn caps_apply_on_large_screens() {
        let c = CanvasSize::from_viewport(3000.0, 2000.0, &CanvasConfig::default());
        assert_eq!(c, CanvasSize::new(1200.0, 800.0));
    }

    #[test]
    fn breakpoint_is_exclusive() {
        let c = CanvasSize::from_viewport(768.0, 1000.0, &CanvasConfig::default());
        assert_eq!(c.height, 500.0);
    }
}
