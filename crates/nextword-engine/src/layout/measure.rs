use glam::Vec2;

/// Unrotated text box size for a word at a given font size.
///
/// Browsers measure through a 2D canvas; headless code uses [`EstimatedMeasure`].
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

/// Fixed-ratio estimate: every glyph is `advance × font_size` wide and the line
/// is `line_height × font_size` tall. Close enough for condensed display faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMeasure {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.0,
        }
    }
}

impl TextMeasure for EstimatedMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        Vec2::new(glyphs * self.advance * font_size, self.line_height * font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_with_length_and_size() {
        let m = EstimatedMeasure::default();
        assert_eq!(m.measure("abcd", 10.0), Vec2::new(20.0, 10.0));
        assert_eq!(m.measure("ab", 100.0), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn counts_chars_not_bytes() {
        let m = EstimatedMeasure::default();
        assert_eq!(m.measure("мир", 10.0).x, 15.0);
    }
}
