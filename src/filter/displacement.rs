use crate::{
    filter::data_uri::{DisplacementMap, svg_data_uri},
    foundation::core::GeometrySpec,
};

/// Largest share (in percent) of a side that the corner radius may push a gradient inwards.
pub const GRADIENT_BAND_PERCENT: u32 = 15;

/// Start/end offsets (in percent) of one displacement gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientStops {
    pub near: u32,
    pub far: u32,
}

/// `near = ceil(radius / side * 15)` and `far = floor(100 - radius / side * 15)`.
///
/// Computed in integers so that offsets are exact: `floor(100 - x) == 100 - ceil(x)`.
pub fn gradient_stops(corner_radius: u32, side: u32) -> GradientStops {
    let side = u64::from(side.max(1));
    let scaled = u64::from(corner_radius) * u64::from(GRADIENT_BAND_PERCENT);
    let near = scaled.div_ceil(side).min(100) as u32;
    GradientStops {
        near,
        far: 100 - near,
    }
}

/// Raw SVG source of the displacement map.
///
/// Red encodes horizontal offset, green vertical offset; both are screened over a dark blue base
/// and a blurred grey rounded rectangle (the neutral, undisplaced interior) is layered on top.
pub fn displacement_map_svg(geometry: &GeometrySpec) -> String {
    let w = geometry.width();
    let h = geometry.height();
    let r = geometry.corner_radius();
    let d = geometry.edge_depth();
    let y = gradient_stops(r, h);
    let x = gradient_stops(r, w);
    let inner_w = geometry.inner_width();
    let inner_h = geometry.inner_height();

    format!(
        r##"<svg height="{h}" width="{w}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <style>
    .mix {{
      mix-blend-mode: screen;
    }}
  </style>
  <defs>
    <linearGradient id="Y" x1="0" x2="0" y1="{y1}%" y2="{y2}%">
      <stop offset="0%" stop-color="#0F0" />
      <stop offset="100%" stop-color="#000" />
    </linearGradient>
    <linearGradient id="X" x1="{x1}%" x2="{x2}%" y1="0" y2="0">
      <stop offset="0%" stop-color="#F00" />
      <stop offset="100%" stop-color="#000" />
    </linearGradient>
  </defs>
  <rect x="0" y="0" height="{h}" width="{w}" fill="#808080" />
  <g filter="blur(2px)">
    <rect x="0" y="0" height="{h}" width="{w}" fill="#000080" />
    <rect x="0" y="0" height="{h}" width="{w}" fill="url(#Y)" class="mix" />
    <rect x="0" y="0" height="{h}" width="{w}" fill="url(#X)" class="mix" />
    <rect x="{d}" y="{d}" height="{inner_h}" width="{inner_w}" fill="#808080" rx="{r}" ry="{r}" filter="blur({d}px)" />
  </g>
</svg>"##,
        y1 = y.near,
        y2 = y.far,
        x1 = x.near,
        x2 = x.far,
    )
}

/// Builds the displacement map for `geometry` as a self-contained data URI.
#[tracing::instrument(level = "trace")]
pub fn build_displacement_map(geometry: &GeometrySpec) -> DisplacementMap {
    DisplacementMap::from_uri(svg_data_uri(&displacement_map_svg(geometry)))
}
