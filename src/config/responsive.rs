use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, GlassConfig};

/// Viewport breakpoints (exclusive upper bound in CSS px) and their scale factors.
pub const BREAKPOINTS: &[(f64, f64)] = &[(480.0, 0.6), (768.0, 0.8), (1024.0, 0.9)];

pub fn viewport_scale(viewport_width: f64) -> f64 {
    BREAKPOINTS
        .iter()
        .find(|(max, _)| viewport_width < *max)
        .map_or(1.0, |(_, scale)| *scale)
}

/// Reference size responsive scaling starts from: `base-*`, else the declared size, else 200.
pub fn base_size(config: &GlassConfig) -> (u32, u32) {
    (
        config.base_width.or(config.width).unwrap_or(DEFAULT_WIDTH),
        config.base_height.or(config.height).unwrap_or(DEFAULT_HEIGHT),
    )
}

/// Size for `base` at the given viewport width, rounded to whole pixels (at least 1).
pub fn scaled_size(base: (u32, u32), viewport_width: f64) -> (u32, u32) {
    let scale = viewport_scale(viewport_width);
    let apply = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (apply(base.0), apply(base.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints() {
        assert_eq!(viewport_scale(320.0), 0.6);
        assert_eq!(viewport_scale(480.0), 0.8);
        assert_eq!(viewport_scale(800.0), 0.9);
        assert_eq!(viewport_scale(1024.0), 1.0);
        assert_eq!(viewport_scale(1920.0), 1.0);
    }

    #[test]
    fn scaled_size_rounds() {
        assert_eq!(scaled_size((200, 150), 400.0), (120, 90));
        assert_eq!(scaled_size((205, 105), 700.0), (164, 84));
        assert_eq!(scaled_size((200, 150), 1280.0), (200, 150));
    }

    #[test]
    fn base_prefers_base_attributes() {
        let cfg = GlassConfig {
            width: Some(300),
            base_width: Some(400),
            ..GlassConfig::default()
        };
        assert_eq!(base_size(&cfg), (400, 200));
    }
}
