use crate::foundation::core::{BezPath, Point, Rgba8, SurfaceSize};
use crate::foundation::error::{CakewalkError, CakewalkResult};
use crate::render::backend::{DrawTarget, FrameRgba, TextStyle};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use kurbo::Shape;
use std::sync::Arc;

/// Tolerance for stroke expansion and shape flattening, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

enum DrawCmd {
    Fill {
        path: BezPath,
        color: Rgba8,
    },
    Text {
        layout: Arc<parley::Layout<TextBrushRgba8>>,
        font: vello_cpu::peniko::FontData,
        origin: Point,
    },
}

/// CPU raster target backed by `vello_cpu`.
///
/// `vello_cpu` renders a context's op list into a fresh buffer, so the target
/// retains a display list and replays it on every [`DrawTarget::snapshot`].
/// That replay is what gives the turtle its incremental paint-over semantics:
/// strokes and fills accumulate until [`DrawTarget::clear`] drops the list.
pub struct RasterTarget {
    size: SurfaceSize,
    background: Option<Rgba8>,
    cmds: Vec<DrawCmd>,
    text: TextLayoutEngine,
    typeface: Option<Typeface>,
}

struct Typeface {
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for RasterTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterTarget")
            .field("size", &self.size)
            .field("background", &self.background)
            .field("cmds", &self.cmds.len())
            .field("typeface", &self.typeface.as_ref().map(|t| &t.family))
            .finish_non_exhaustive()
    }
}

impl RasterTarget {
    /// Construct a target for `size`.
    ///
    /// Fails fast when the surface cannot be represented by the raster
    /// backend (`vello_cpu` pixmaps are limited to u16 dimensions).
    pub fn new(size: SurfaceSize) -> CakewalkResult<Self> {
        if size.width > u32::from(u16::MAX) || size.height > u32::from(u16::MAX) {
            return Err(CakewalkError::surface(format!(
                "surface {}x{} exceeds raster backend limits",
                size.width, size.height
            )));
        }
        Ok(Self {
            size,
            background: None,
            cmds: Vec::new(),
            text: TextLayoutEngine::new(),
            typeface: None,
        })
    }

    /// Opaque background color painted behind the scene on every snapshot.
    pub fn with_background(mut self, color: Rgba8) -> Self {
        self.background = Some(color);
        self
    }

    /// Register the typeface used for all text draws (raw TTF/OTF bytes).
    ///
    /// Registration happens once here; every draw references the resolved
    /// family. Fails when the bytes do not contain a usable font.
    pub fn with_typeface(mut self, font_bytes: Vec<u8>) -> CakewalkResult<Self> {
        let family = self.text.register(&font_bytes)?;
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.typeface = Some(Typeface { family, font });
        Ok(self)
    }

    fn replay(&self, ctx: &mut vello_cpu::RenderContext) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some(bg) = self.background {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.size.width),
                f64::from(self.size.height),
            ));
        }

        for cmd in &self.cmds {
            match cmd {
                DrawCmd::Fill { path, color } => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawCmd::Text {
                    layout,
                    font,
                    origin,
                } => {
                    // origin sits on the first line's baseline, so shift the
                    // layout (whose glyph coordinates start at its top edge)
                    // up by one ascent.
                    let ascent = layout
                        .lines()
                        .next()
                        .map(|line| f64::from(line.metrics().ascent))
                        .unwrap_or(0.0);
                    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                        origin.x,
                        origin.y - ascent,
                    )));
                    for line in layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let brush = run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                }
            }
        }
    }
}

impl DrawTarget for RasterTarget {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.cmds.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        let mut seg = BezPath::new();
        seg.move_to(from);
        seg.line_to(to);

        let style = kurbo::Stroke::new(width)
            .with_caps(kurbo::Cap::Round)
            .with_join(kurbo::Join::Round);
        let outline = kurbo::stroke(seg, &style, &kurbo::StrokeOpts::default(), PATH_TOLERANCE);
        self.cmds.push(DrawCmd::Fill {
            path: outline,
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.cmds.push(DrawCmd::Fill {
            path: path.clone(),
            color,
        });
    }

    fn fill_dot(&mut self, center: Point, diameter: f64, color: Rgba8) {
        let circle = kurbo::Circle::new(center, diameter / 2.0);
        self.cmds.push(DrawCmd::Fill {
            path: circle.to_path(PATH_TOLERANCE),
            color,
        });
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        style: &TextStyle,
        color: Rgba8,
    ) -> CakewalkResult<()> {
        let Some(tf) = &self.typeface else {
            return Err(CakewalkError::text(
                "no typeface registered (RasterTarget::with_typeface)",
            ));
        };

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout =
            self.text
                .layout_plain(text, &tf.family, style.size_px, style.weight, brush)?;
        let font = tf.font.clone();
        self.cmds.push(DrawCmd::Text {
            layout: Arc::new(layout),
            font,
            origin,
        });
        Ok(())
    }

    fn snapshot(&mut self) -> CakewalkResult<FrameRgba> {
        let w = self.size.width as u16;
        let h = self.size.height as u16;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        self.replay(&mut ctx);
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: self.size.width,
            height: self.size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
