//! Hero background parallax.

use crate::config::ParallaxConfig;

/// Vertical offset for the background image, or `None` once the hero has
/// scrolled out (the last applied transform is left in place).
pub fn offset(cfg: &ParallaxConfig, scroll_y: f64, viewport_height: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * cfg.factor)
}

pub fn transform_css(offset_px: f64) -> String {
    format!("translateY({offset_px}px)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_at_a_fraction_of_scroll_inside_first_screen() {
        let cfg = ParallaxConfig::default();
        assert_eq!(offset(&cfg, 0.0, 800.0), Some(0.0));
        assert_eq!(offset(&cfg, 500.0, 800.0), Some(150.0));
        assert_eq!(offset(&cfg, 800.0, 800.0), None);
    }

    #[test]
    fn css_uses_pixels() {
        assert_eq!(transform_css(150.0), "translateY(150px)");
        assert_eq!(transform_css(31.5), "translateY(31.5px)");
    }
}
