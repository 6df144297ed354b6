pub type GlassResult<T> = Result<T, GlassError>;

/// Errors raised at the crate's I/O edges (config files, previews, PNG output).
///
/// Filter synthesis and the controller never fail; they clamp or defer instead.
#[derive(thiserror::Error, Debug)]
pub enum GlassError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GlassConfig,
        preview::{PreviewImage, rasterize_svg, write_png},
    };

    #[test]
    fn malformed_config_is_a_serde_error() {
        let err = GlassConfig::from_json_str("{ \"radius\": ").unwrap_err();
        assert!(matches!(err, GlassError::Serde(_)));
        assert!(err.to_string().starts_with("serialization error:"));
    }

    #[test]
    fn bad_preview_scale_is_a_validation_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"></svg>"#;
        let err = rasterize_svg(svg, -2.0).unwrap_err();
        assert!(matches!(err, GlassError::Validation(_)));
    }

    #[test]
    fn unparsable_svg_keeps_its_context() {
        let err = rasterize_svg("not svg", 1.0).unwrap_err();
        assert!(matches!(err, GlassError::Other(_)));
        assert!(err.to_string().contains("parse svg tree"));
    }

    #[test]
    fn png_write_failure_names_the_path() {
        let image = PreviewImage {
            width: 1,
            height: 1,
            rgba8: vec![128, 128, 128, 255],
        };
        let path = std::env::temp_dir()
            .join("liquid-glass-no-such-dir")
            .join("nested")
            .join("map.png");
        let err = write_png(&image, &path).unwrap_err();
        assert!(matches!(err, GlassError::Other(_)));
        assert!(err.to_string().contains("map.png"));
    }
}
