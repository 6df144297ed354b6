//! Rasterises generated SVG so displacement maps can be inspected outside a browser.

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{GlassError, GlassResult};

/// Straight-alpha RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

impl PreviewImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub fn parse_svg(svg: &str) -> GlassResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Renders `svg` at `scale` (1.0 = the document's own pixel size).
pub fn rasterize_svg(svg: &str, scale: f32) -> GlassResult<PreviewImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GlassError::validation("preview scale must be finite and > 0"));
    }
    let tree = parse_svg(svg)?;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| GlassError::render("preview size is empty"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| GlassError::render("failed to allocate preview pixmap"))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba8 = pixmap.take();
    unpremultiply_rgba8_in_place(&mut rgba8);
    Ok(PreviewImage {
        width: size.width(),
        height: size.height(),
        rgba8,
    })
}

pub fn write_png(image: &PreviewImage, path: &Path) -> GlassResult<()> {
    image::save_buffer_with_format(
        path,
        &image.rgba8,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
