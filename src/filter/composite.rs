use std::fmt::Write as _;

use crate::{
    filter::{
        data_uri::{CompositeFilter, svg_data_uri},
        displacement::build_displacement_map,
    },
    foundation::core::{EffectParams, GeometrySpec},
};

/// Id of the `<filter>` element; also the fragment of every [`CompositeFilter`] URI.
pub const FILTER_ID: &str = "displace";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// `feColorMatrix` values keeping only this channel (plus alpha).
    pub fn isolation_matrix(self) -> &'static str {
        match self {
            Self::Red => "1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1 0",
            Self::Green => "0 0 0 0 0 0 1 0 0 0 0 0 0 0 0 0 0 0 1 0",
            Self::Blue => "0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 0 0 1 0",
        }
    }

    fn result_name(self) -> &'static str {
        match self {
            Self::Red => "displacedR",
            Self::Green => "displacedG",
            Self::Blue => "displacedB",
        }
    }
}

/// One `feDisplacementMap` stage and the channel it keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplacementPass {
    pub channel: ColorChannel,
    pub scale: u32,
}

/// Red, green and blue passes at `strength + 2a`, `strength + a` and `strength`.
pub fn displacement_passes(params: &EffectParams) -> [DisplacementPass; 3] {
    let a = params.chromatic_aberration;
    let s = params.strength;
    [
        DisplacementPass {
            channel: ColorChannel::Red,
            scale: s.saturating_add(a.saturating_mul(2)),
        },
        DisplacementPass {
            channel: ColorChannel::Green,
            scale: s.saturating_add(a),
        },
        DisplacementPass {
            channel: ColorChannel::Blue,
            scale: s,
        },
    ]
}

/// Raw SVG source of the filter chain, with the displacement map embedded via `feImage`.
pub fn composite_filter_svg(geometry: &GeometrySpec, params: &EffectParams) -> String {
    let w = geometry.width();
    let h = geometry.height();
    let map = build_displacement_map(geometry);

    let mut stages = String::new();
    for (i, pass) in displacement_passes(params).iter().enumerate() {
        let origin = if i == 0 {
            r#" transform-origin="center""#
        } else {
            ""
        };
        // Writing into a String cannot fail.
        let _ = write!(
            stages,
            r#"
      <feDisplacementMap{origin} in="SourceGraphic" in2="displacementMap" scale="{scale}" xChannelSelector="R" yChannelSelector="G" />
      <feColorMatrix type="matrix" values="{matrix}" result="{result}" />"#,
            scale = pass.scale,
            matrix = pass.channel.isolation_matrix(),
            result = pass.channel.result_name(),
        );
    }

    format!(
        r#"<svg height="{h}" width="{w}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <filter id="{FILTER_ID}" color-interpolation-filters="sRGB">
      <feImage x="0" y="0" height="{h}" width="{w}" href="{href}" result="displacementMap" />{stages}
      <feBlend in="{r}" in2="{g}" mode="screen" />
      <feBlend in2="{b}" mode="screen" />
    </filter>
  </defs>
</svg>"#,
        href = map.as_uri(),
        r = ColorChannel::Red.result_name(),
        g = ColorChannel::Green.result_name(),
        b = ColorChannel::Blue.result_name(),
    )
}

/// Builds the composite filter for `geometry` and `params` as a data URI ending in `#displace`.
#[tracing::instrument(level = "trace")]
pub fn build_composite_filter(geometry: &GeometrySpec, params: &EffectParams) -> CompositeFilter {
    let mut uri = svg_data_uri(&composite_filter_svg(geometry, params));
    uri.push('#');
    uri.push_str(FILTER_ID);
    CompositeFilter::from_uri(uri)
}
