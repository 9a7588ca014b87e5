use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{MotionError, MotionResult};

/// Straight-alpha RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Render an SVG document at its intrinsic size.
pub fn rasterize_svg(svg: &str) -> MotionResult<RgbaFrame> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| MotionError::render(format!("parse svg tree: {e}")))?;

    let size = tree.size().to_int_size();
    // Avoid pathological allocations from hostile width/height attributes.
    const MAX_DIM: u32 = 16_384;
    if size.width() > MAX_DIM || size.height() > MAX_DIM {
        return Err(MotionError::render(format!(
            "svg raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
            size.width(),
            size.height()
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| MotionError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    Ok(RgbaFrame {
        width: size.width(),
        height: size.height(),
        data,
    })
}

pub fn write_png(frame: &RgbaFrame, path: &Path) -> MotionResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
