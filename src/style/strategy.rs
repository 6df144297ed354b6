#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RenderStrategy {
    /// Generated SVG displacement filter inside the backdrop effect.
    Full,
    /// Plain backdrop blur for environments without SVG backdrop filters.
    Fallback,
    /// Displacement map shown as the background, for inspection.
    Debug,
}

/// Debug always wins; otherwise the capability picks between Full and Fallback.
pub fn resolve_strategy(debug: bool, svg_backdrop_filter: bool) -> RenderStrategy {
    if debug {
        RenderStrategy::Debug
    } else if svg_backdrop_filter {
        RenderStrategy::Full
    } else {
        RenderStrategy::Fallback
    }
}
