//! Glass element configuration, read from host attributes or from JSON.

pub(crate) mod attributes;
pub(crate) mod responsive;

use crate::{
    config::attributes::{AttributeSource, positive_attribute},
    foundation::{
        core::EffectParams,
        error::{GlassError, GlassResult},
    },
    sizing::SizingMode,
};

pub const DEFAULT_WIDTH: u32 = 200;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_RADIUS: u32 = 50;
pub const DEFAULT_DEPTH: u32 = 10;
pub const DEFAULT_BLUR: u32 = 2;
pub const DEFAULT_BACKGROUND: &str = "rgba(255, 255, 255, 0.4)";

/// Effective configuration of one glass element.
///
/// Numeric options fall back to their defaults when missing, unparsable or zero, so a config is
/// always usable.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlassConfig {
    pub width: Option<u32>,
    pub height: Option<u32>, // in fluid mode: fixed px height instead of 100%
    pub radius: u32,
    pub depth: u32,
    pub blur: u32,
    pub strength: u32,
    pub chromatic_aberration: u32,
    pub debug: bool,
    pub background_color: String,
    pub responsive: bool,
    pub base_width: Option<u32>,
    pub base_height: Option<u32>,
    pub auto_size: bool,
    pub min_width: u32,
    pub min_height: u32,
    pub fluid: bool,
}

impl Default for GlassConfig {
    fn default() -> Self {
        let effect = EffectParams::default();
        Self {
            width: None,
            height: None,
            radius: DEFAULT_RADIUS,
            depth: DEFAULT_DEPTH,
            blur: DEFAULT_BLUR,
            strength: effect.strength,
            chromatic_aberration: effect.chromatic_aberration,
            debug: false,
            background_color: DEFAULT_BACKGROUND.to_string(),
            responsive: false,
            base_width: None,
            base_height: None,
            auto_size: false,
            min_width: 0,
            min_height: 0,
            fluid: false,
        }
    }
}

impl GlassConfig {
    pub fn from_attributes(src: &dyn AttributeSource) -> Self {
        let defaults = Self::default();
        let num = |name: &str, default: u32| positive_attribute(src, name).unwrap_or(default);

        Self {
            width: positive_attribute(src, "width"),
            height: positive_attribute(src, "height"),
            radius: num("radius", defaults.radius),
            depth: num("depth", defaults.depth),
            blur: num("blur", defaults.blur),
            strength: num("strength", defaults.strength),
            chromatic_aberration: num("chromatic-aberration", defaults.chromatic_aberration),
            debug: src.attribute("debug").as_deref() == Some("true"),
            background_color: src
                .attribute("background-color")
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.background_color),
            responsive: src.has_attribute("responsive"),
            base_width: positive_attribute(src, "base-width"),
            base_height: positive_attribute(src, "base-height"),
            auto_size: src.has_attribute("auto-size"),
            min_width: num("min-width", 0),
            min_height: num("min-height", 0),
            fluid: src.has_attribute("fluid"),
        }
    }

    pub fn from_json_str(json: &str) -> GlassResult<Self> {
        serde_json::from_str(json).map_err(|e| GlassError::serde(e.to_string()))
    }

    pub fn width_px(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn height_px(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            strength: self.strength,
            chromatic_aberration: self.chromatic_aberration,
        }
    }

    /// AutoSize takes precedence over Fluid; otherwise the declared size is used.
    pub fn sizing_mode(&self) -> SizingMode {
        if self.auto_size {
            SizingMode::AutoSize
        } else if self.fluid {
            SizingMode::Fluid
        } else {
            SizingMode::Fixed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_attributes_give_defaults() {
        let cfg = GlassConfig::from_attributes(&attrs(&[]));
        assert_eq!(cfg, GlassConfig::default());
        assert_eq!((cfg.width_px(), cfg.height_px()), (200, 200));
        assert_eq!(cfg.sizing_mode(), SizingMode::Fixed);
    }

    #[test]
    fn attributes_override_defaults() {
        let cfg = GlassConfig::from_attributes(&attrs(&[
            ("width", "320"),
            ("radius", "24"),
            ("chromatic-aberration", "12"),
            ("debug", "true"),
            ("background-color", "rgba(0, 0, 0, 0.2)"),
            ("fluid", ""),
        ]));
        assert_eq!(cfg.width, Some(320));
        assert_eq!(cfg.height, None);
        assert_eq!(cfg.radius, 24);
        assert_eq!(cfg.effect_params().chromatic_aberration, 12);
        assert!(cfg.debug);
        assert_eq!(cfg.background_color, "rgba(0, 0, 0, 0.2)");
        assert_eq!(cfg.sizing_mode(), SizingMode::Fluid);
    }

    #[test]
    fn zero_and_garbage_fall_back() {
        let cfg = GlassConfig::from_attributes(&attrs(&[
            ("blur", "0"),
            ("strength", "abc"),
            ("debug", "yes"),
        ]));
        assert_eq!(cfg.blur, DEFAULT_BLUR);
        assert_eq!(cfg.strength, 100);
        assert!(!cfg.debug);
    }

    #[test]
    fn auto_size_wins_over_fluid() {
        let cfg = GlassConfig::from_attributes(&attrs(&[("fluid", ""), ("auto-size", "")]));
        assert_eq!(cfg.sizing_mode(), SizingMode::AutoSize);
    }

    #[test]
    fn json_uses_kebab_case_and_defaults() {
        let cfg = GlassConfig::from_json_str(r#"{ "chromatic-aberration": 20, "auto-size": true }"#)
            .unwrap();
        assert_eq!(cfg.chromatic_aberration, 20);
        assert!(cfg.auto_size);
        assert_eq!(cfg.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn json_rejects_unknown_keys() {
        let err = GlassConfig::from_json_str(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(err.to_string().contains("serialization error:"));
    }
}
