//! Liquid glass is an SVG displacement ("refraction") effect for web surfaces.
//!
//! The crate has two layers:
//!
//! 1. **Filter synthesis** ([`build_displacement_map`], [`build_composite_filter`]): pure functions
//!    turning a [`GeometrySpec`] and [`EffectParams`] into self-contained `data:` URIs.
//! 2. **Control** ([`GlassController`]): a per-element state machine that resolves the
//!    platform capability once per process ([`CapabilityCache`]), picks a [`RenderStrategy`],
//!    resolves geometry for its [`SizingMode`] and applies a [`VisualState`] through a
//!    [`GlassHost`].
//!
//! The state transition itself is exposed as [`render`], so the styles for any configuration
//! can be computed without a host. With the `web` feature, `web::GlassElement` binds a controller
//! to a live DOM element.
#![forbid(unsafe_code)]

mod capability;
mod config;
mod controller;
mod filter;
mod foundation;
mod sizing;
mod style;

/// Rasterisation of generated SVG for inspection.
pub mod preview;
#[cfg(feature = "web")]
pub mod web;

pub use capability::cache::CapabilityCache;
pub use capability::provider::{
    BrowserFamily, CapabilityProvider, EnvironmentProbe, HeuristicByEnvironmentTag, ProbedFalse,
    ProbedTrue, StaticEnvironment,
};
pub use config::attributes::{
    AttributeSource, OBSERVED_ATTRIBUTES, is_observed, parse_int_prefix, positive_attribute,
};
pub use config::responsive::{BREAKPOINTS, base_size, scaled_size, viewport_scale};
pub use config::{
    DEFAULT_BACKGROUND, DEFAULT_BLUR, DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_RADIUS, DEFAULT_WIDTH,
    GlassConfig,
};
pub use controller::host::{ControllerEvent, GlassHost, Listener};
pub use controller::{ControllerState, GlassController};
pub use filter::composite::{
    ColorChannel, DisplacementPass, FILTER_ID, build_composite_filter, composite_filter_svg,
    displacement_passes,
};
pub use filter::data_uri::{
    CompositeFilter, DisplacementMap, SVG_DATA_URI_PREFIX, decode_svg_data_uri,
};
pub use filter::displacement::{
    GRADIENT_BAND_PERCENT, GradientStops, build_displacement_map, displacement_map_svg,
    gradient_stops,
};
pub use foundation::core::{EffectParams, GeometrySpec, MIN_FILTER_HEIGHT, MIN_FILTER_WIDTH, Size};
pub use foundation::error::{GlassError, GlassResult};
pub use sizing::retry::{RetryBudget, RetryPolicy};
pub use sizing::{Measurement, SizingMode, fixed_geometry, measured_geometry, measurement_floor};
pub use style::strategy::{RenderStrategy, resolve_strategy};
pub use style::template::{SURFACE_CLASS, shadow_markup};
pub use style::visual::{
    FALLBACK_BORDER, FilterCache, INSET_HIGHLIGHT_SHADOW, TONE_BOOST, VisualState, render,
    render_with,
};
