use std::path::Path;

use anyhow::Context as _;
use kurbo::Shape as _;

use crate::assets::bitmap::Bitmap;
use crate::assets::fonts::TextBrushRgba8;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::composite::{Placement, over_at, over_in_place};

/// Tolerance used when flattening curves into raster paths.
const PATH_TOLERANCE: f64 = 0.1;

/// A frame-sized premultiplied RGBA8 raster target.
///
/// Every drawing primitive paints into a transparent overlay first and is then
/// composited source-over onto the existing pixels, so paint order is stacking order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a canvas filled with a straight-alpha background color.
    pub fn new(width: u32, height: u32, background: Rgba8) -> FrameloomResult<Self> {
        raster_dims(width, height)?;
        let px = background.to_premul();
        let data = px.repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap tightly packed premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> FrameloomResult<Self> {
        raster_dims(width, height)?;
        if data.len() != width as usize * height as usize * 4 {
            return Err(FrameloomError::validation(format!(
                "canvas byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap tightly packed straight-alpha RGBA8 bytes (premultiplying them).
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> FrameloomResult<Self> {
        crate::foundation::core::premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Straight-alpha color of one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        Some(Rgba8::from_premul(px))
    }

    /// Paint a filled ellipse inscribed in `bbox`.
    pub fn fill_ellipse(&mut self, bbox: Rect, color: Rgba8) -> FrameloomResult<()> {
        let path = bezpath_to_cpu(&kurbo::Ellipse::from_rect(bbox).to_path(PATH_TOLERANCE));
        self.paint_overlay(|ctx| {
            ctx.set_paint(cpu_color(color));
            ctx.fill_path(&path);
        })
    }

    /// Paint the outline of an ellipse inscribed in `bbox`.
    pub fn stroke_ellipse(&mut self, bbox: Rect, width: f64, color: Rgba8) -> FrameloomResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(FrameloomError::validation(
                "stroke width must be finite and > 0",
            ));
        }
        let path = bezpath_to_cpu(&kurbo::Ellipse::from_rect(bbox).to_path(PATH_TOLERANCE));
        self.paint_overlay(|ctx| {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
            ctx.set_paint(cpu_color(color));
            ctx.stroke_path(&path);
        })
    }

    /// Paint a shaped text layout with its top-left corner at `origin`.
    pub fn draw_text_layout(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        font: &vello_cpu::peniko::FontData,
        origin: Point,
    ) -> FrameloomResult<()> {
        self.paint_overlay(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        })
    }

    /// Alpha-composite a bitmap with its top-left corner at `origin` (rounded to pixels).
    pub fn composite(&mut self, bitmap: &Bitmap, origin: Point, opacity: f32) -> FrameloomResult<()> {
        over_at(
            &mut self.data,
            bitmap.rgba8_premul.as_slice(),
            Placement {
                dst_width: self.width,
                dst_height: self.height,
                src_width: bitmap.width,
                src_height: bitmap.height,
                x: origin.x.round() as i64,
                y: origin.y.round() as i64,
            },
            opacity,
        )
    }

    /// Copy out as a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> FrameloomResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let out = crate::foundation::core::unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| FrameloomError::validation("canvas buffer does not match its size"))
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: &Path) -> FrameloomResult<()> {
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn paint_overlay(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> FrameloomResult<()> {
        let (w, h) = raster_dims(self.width, self.height)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw(&mut ctx);
        ctx.flush();

        let mut overlay = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut overlay);
        over_in_place(&mut self.data, overlay.data_as_u8_slice(), 1.0)
    }
}

fn raster_dims(width: u32, height: u32) -> FrameloomResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(FrameloomError::validation(
            "canvas width/height must be non-zero",
        ));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameloomError::validation("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameloomError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
