pub use kurbo::Size;

/// Smallest filter width the generator accepts.
pub const MIN_FILTER_WIDTH: u32 = 50;
/// Smallest filter height the generator accepts.
pub const MIN_FILTER_HEIGHT: u32 = 30;

/// Pixel geometry of one glass surface, as consumed by the filter builder.
///
/// Construction clamps the corner radius to half of the shorter side and the edge depth so the
/// inset rounded rectangle never gets a negative size. Width and height are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct GeometrySpec {
    width: u32,
    height: u32,
    corner_radius: u32,
    edge_depth: u32,
}

impl GeometrySpec {
    pub fn new(width: u32, height: u32, corner_radius: u32, edge_depth: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let half_short_side = width.min(height) / 2;
        Self {
            width,
            height,
            corner_radius: corner_radius.min(half_short_side),
            edge_depth: edge_depth.min(half_short_side),
        }
    }

    /// Same as [`GeometrySpec::new`], with width and height raised to the 50x30 filter floor.
    pub fn floored(width: u32, height: u32, corner_radius: u32, edge_depth: u32) -> Self {
        Self::new(
            width.max(MIN_FILTER_WIDTH),
            height.max(MIN_FILTER_HEIGHT),
            corner_radius,
            edge_depth,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn corner_radius(&self) -> u32 {
        self.corner_radius
    }

    pub fn edge_depth(&self) -> u32 {
        self.edge_depth
    }

    pub fn inner_width(&self) -> u32 {
        self.width - 2 * self.edge_depth
    }

    pub fn inner_height(&self) -> u32 {
        self.height - 2 * self.edge_depth
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Displacement parameters shared by all three channel passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EffectParams {
    pub strength: u32,
    pub chromatic_aberration: u32, // 0 disables the channel split
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            strength: 100,
            chromatic_aberration: 0,
        }
    }
}
