//! Geometry resolution for the three sizing modes.

pub(crate) mod retry;

use crate::{
    config::GlassConfig,
    foundation::core::{GeometrySpec, Size},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SizingMode {
    /// Declared `width`/`height`.
    Fixed,
    /// 100% of the parent; measured from the host box, re-measured on window resize.
    Fluid,
    /// Shrink-wraps the content; re-measured on content mutation and element resize.
    AutoSize,
}

/// Outcome of a layout measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measurement {
    Ready(GeometrySpec),
    /// The box has not been laid out yet (zero width or height); measure again next frame.
    Deferred,
}

/// Geometry for [`SizingMode::Fixed`].
pub fn fixed_geometry(config: &GlassConfig) -> GeometrySpec {
    GeometrySpec::floored(
        config.width_px(),
        config.height_px(),
        config.radius,
        config.depth,
    )
}

/// Converts a measured layout box into geometry.
///
/// The box is rounded up to whole pixels; a zero side defers. Otherwise the size is raised to
/// `floor` (per-element minimums) and then to the global 50x30 filter floor.
pub fn measured_geometry(config: &GlassConfig, measured: Size, floor: (u32, u32)) -> Measurement {
    let width = ceil_px(measured.width);
    let height = ceil_px(measured.height);
    if width == 0 || height == 0 {
        return Measurement::Deferred;
    }
    Measurement::Ready(GeometrySpec::floored(
        width.max(floor.0),
        height.max(floor.1),
        config.radius,
        config.depth,
    ))
}

/// Per-element minimums applied to a measurement in the given mode.
pub fn measurement_floor(config: &GlassConfig, mode: SizingMode) -> (u32, u32) {
    match mode {
        SizingMode::AutoSize => (config.min_width, config.min_height),
        SizingMode::Fixed | SizingMode::Fluid => (0, 0),
    }
}

fn ceil_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.ceil().min(f64::from(u32::MAX)) as u32
}
