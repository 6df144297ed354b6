use tracing::trace;

use crate::{
    config::GlassConfig,
    filter::{
        composite::build_composite_filter,
        data_uri::{CompositeFilter, DisplacementMap},
        displacement::build_displacement_map,
    },
    foundation::core::{EffectParams, GeometrySpec},
    sizing::SizingMode,
    style::strategy::{RenderStrategy, resolve_strategy},
};

pub const INSET_HIGHLIGHT_SHADOW: &str = "1px 1px 1px 0px rgba(255,255,255, 0.60) inset, -1px -1px 1px 0px rgba(255,255,255, 0.60) inset, 0px 0px 16px 0px rgba(0,0,0, 0.04)";
pub const FALLBACK_BORDER: &str = "1px solid rgba(255, 255, 255, 0.3)";
pub const TONE_BOOST: &str = "brightness(1.1) saturate(1.5)";

/// CSS declarations for the glass surface produced by one render pass.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VisualState {
    pub strategy: RenderStrategy,
    pub geometry: GeometrySpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub border_radius: String,
    pub backdrop_filter: String,
    pub background: String,
    pub box_shadow: String,
    pub border: String,
}

impl VisualState {
    /// `(css property, value)` pairs in application order.
    ///
    /// Sizing properties are skipped when the mode leaves them to layout; everything else is always
    /// emitted so a render fully replaces the previous strategy's styles.
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::with_capacity(7);
        out.push(("border-radius", self.border_radius.as_str()));
        if let Some(w) = &self.width {
            out.push(("width", w.as_str()));
        }
        if let Some(h) = &self.height {
            out.push(("height", h.as_str()));
        }
        out.push(("backdrop-filter", self.backdrop_filter.as_str()));
        out.push(("background", self.background.as_str()));
        out.push(("box-shadow", self.box_shadow.as_str()));
        out.push(("border", self.border.as_str()));
        out
    }
}

/// Memoizes the last built resources, keyed by the exact geometry and params they came from.
///
/// A lookup with any other key rebuilds, so a descriptor is never reused across a change.
#[derive(Debug, Default)]
pub struct FilterCache {
    map: Option<(GeometrySpec, DisplacementMap)>,
    filter: Option<(GeometrySpec, EffectParams, CompositeFilter)>,
    builds: usize,
}

impl FilterCache {
    pub fn displacement_map(&mut self, geometry: &GeometrySpec) -> DisplacementMap {
        if let Some((key, map)) = &self.map
            && key == geometry
        {
            return map.clone();
        }
        self.builds += 1;
        let map = build_displacement_map(geometry);
        self.map = Some((*geometry, map.clone()));
        map
    }

    pub fn composite_filter(
        &mut self,
        geometry: &GeometrySpec,
        params: &EffectParams,
    ) -> CompositeFilter {
        if let Some((g, p, filter)) = &self.filter
            && g == geometry
            && p == params
        {
            return filter.clone();
        }
        self.builds += 1;
        let filter = build_composite_filter(geometry, params);
        self.filter = Some((*geometry, *params, filter.clone()));
        filter
    }

    /// Number of builder invocations so far.
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn clear(&mut self) {
        self.map = None;
        self.filter = None;
    }
}

/// State transition from configuration, geometry and capability to surface styles.
pub fn render(
    config: &GlassConfig,
    geometry: &GeometrySpec,
    svg_backdrop_filter: bool,
) -> VisualState {
    render_with(
        config,
        geometry,
        svg_backdrop_filter,
        &mut FilterCache::default(),
    )
}

/// [`render`] reusing resources from `cache` when geometry and params are unchanged.
pub fn render_with(
    config: &GlassConfig,
    geometry: &GeometrySpec,
    svg_backdrop_filter: bool,
    cache: &mut FilterCache,
) -> VisualState {
    let strategy = resolve_strategy(config.debug, svg_backdrop_filter);
    let (width, height) = surface_size(config);
    trace!(?strategy, ?geometry, "render pass");

    let mut state = VisualState {
        strategy,
        geometry: *geometry,
        width,
        height,
        border_radius: format!("{}px", config.radius),
        backdrop_filter: "none".to_string(),
        background: config.background_color.clone(),
        box_shadow: INSET_HIGHLIGHT_SHADOW.to_string(),
        border: "none".to_string(),
    };

    match strategy {
        RenderStrategy::Debug => {
            let map = cache.displacement_map(geometry);
            state.background = format!("url(\"{map}\")");
            state.box_shadow = "none".to_string();
        }
        RenderStrategy::Fallback => {
            state.backdrop_filter = format!("blur({}px)", config.blur.saturating_mul(2));
            state.border = FALLBACK_BORDER.to_string();
        }
        RenderStrategy::Full => {
            let filter = cache.composite_filter(geometry, &config.effect_params());
            let blur = f64::from(config.blur);
            state.backdrop_filter = format!(
                "blur({pre}px) url('{filter}') blur({blur}px) {TONE_BOOST}",
                pre = blur / 2.0,
            );
        }
    }

    state
}

pub(crate) fn surface_size(config: &GlassConfig) -> (Option<String>, Option<String>) {
    match config.sizing_mode() {
        SizingMode::Fixed => (
            Some(format!("{}px", config.width_px())),
            Some(format!("{}px", config.height_px())),
        ),
        SizingMode::Fluid => (
            Some("100%".to_string()),
            Some(
                config
                    .height
                    .map_or_else(|| "100%".to_string(), |h| format!("{h}px")),
            ),
        ),
        SizingMode::AutoSize => (None, None),
    }
}
