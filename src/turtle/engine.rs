use crate::foundation::core::{BezPath, Point, Rgba8, SurfaceSize};
use crate::foundation::error::{CakewalkError, CakewalkResult};
use crate::foundation::math::deg_to_rad;
use crate::render::backend::{DrawTarget, TextStyle};
use crate::turtle::palette::Palette;
use tracing::warn;

/// Shadow pass color for text, rgba(0, 0, 0, 0.2).
const TEXT_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 51);
const TEXT_SHADOW_OFFSET: f64 = 2.0;

/// Mutable cursor state of the drawing engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Position in engine space (center origin, Y-up).
    pub position: Point,
    /// Heading in degrees, 0 = east, counter-clockwise positive. Unbounded:
    /// turns accumulate and are never normalized into [0, 360).
    pub heading_deg: f64,
    pub pen_down: bool,
    pub pen_color: Rgba8,
    pub fill_color: Rgba8,
    pub pen_width: f64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            heading_deg: 0.0,
            pen_down: true,
            pen_color: Rgba8::BLACK,
            fill_color: Rgba8::BLACK,
            pen_width: 3.0,
        }
    }
}

/// Cursor-based drawing engine: interprets relative-motion commands against a
/// [`DrawTarget`].
///
/// One engine exclusively owns one target; concurrent command streams against
/// a shared cursor are unsupported by design.
pub struct Turtle<T: DrawTarget> {
    target: T,
    palette: Palette,
    cursor: Cursor,
    /// Open fill region outline, accumulated in surface space. At most one.
    fill: Option<BezPath>,
}

impl<T: DrawTarget> Turtle<T> {
    pub fn new(target: T) -> Self {
        Self::with_palette(target, Palette::default())
    }

    pub fn with_palette(target: T, palette: Palette) -> Self {
        Self {
            target,
            palette,
            cursor: Cursor::default(),
            fill: None,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn size(&self) -> SurfaceSize {
        self.target.size()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn pen_up(&mut self) {
        self.cursor.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.cursor.pen_down = true;
    }

    /// Move to `(x, y)` in engine space.
    ///
    /// Strokes the segment when the pen is down; always updates the position;
    /// always extends the open fill outline. Non-finite input is dropped so
    /// cursor state stays numerically well-defined.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            warn!(x, y, "ignoring move_to with non-finite coordinates");
            return;
        }

        let to = Point::new(x, y);
        let size = self.target.size();

        if self.cursor.pen_down {
            self.target.stroke_line(
                size.to_surface(self.cursor.position),
                size.to_surface(to),
                self.cursor.pen_width,
                self.cursor.pen_color,
            );
        }
        if let Some(path) = &mut self.fill {
            path.line_to(size.to_surface(to));
        }
        self.cursor.position = to;
    }

    /// Advance `distance` along the current heading.
    pub fn forward(&mut self, distance: f64) {
        let rad = deg_to_rad(self.cursor.heading_deg);
        let x = self.cursor.position.x + distance * rad.cos();
        let y = self.cursor.position.y + distance * rad.sin();
        self.move_to(x, y);
    }

    pub fn turn_left(&mut self, deg: f64) {
        self.cursor.heading_deg += deg;
    }

    pub fn turn_right(&mut self, deg: f64) {
        self.cursor.heading_deg -= deg;
    }

    pub fn set_heading(&mut self, deg: f64) {
        self.cursor.heading_deg = deg;
    }

    pub fn set_pen_width(&mut self, px: f64) {
        self.cursor.pen_width = px;
    }

    /// Set the stroke color from a palette key or literal value.
    ///
    /// Takes effect on subsequent draws only.
    pub fn set_pen_color(&mut self, spec: &str) -> CakewalkResult<()> {
        self.cursor.pen_color = self.palette.resolve(spec)?.rgba();
        Ok(())
    }

    pub fn set_fill_color(&mut self, spec: &str) -> CakewalkResult<()> {
        self.cursor.fill_color = self.palette.resolve(spec)?.rgba();
        Ok(())
    }

    /// Open a fill region anchored at the current position.
    ///
    /// Rejected while another region is open; the open region is untouched.
    pub fn begin_fill(&mut self) -> CakewalkResult<()> {
        if self.fill.is_some() {
            warn!("begin_fill while a fill region is already open");
            return Err(CakewalkError::fill(
                "a fill region is already open (unbalanced begin_fill)",
            ));
        }

        let mut path = BezPath::new();
        path.move_to(self.target.size().to_surface(self.cursor.position));
        self.fill = Some(path);
        Ok(())
    }

    /// Close the open region and fill it with the current fill color.
    pub fn end_fill(&mut self) -> CakewalkResult<()> {
        let Some(mut path) = self.fill.take() else {
            warn!("end_fill without an open fill region");
            return Err(CakewalkError::fill(
                "no fill region is open (unbalanced end_fill)",
            ));
        };

        path.close_path();
        self.target.fill_path(&path, self.cursor.fill_color);
        Ok(())
    }

    /// Stamp a filled circle of `diameter` at the cursor, independent of any
    /// open fill region.
    pub fn dot(&mut self, diameter: f64, spec: &str) -> CakewalkResult<()> {
        let color = self.palette.resolve(spec)?.rgba();
        self.stamp(diameter, color);
        Ok(())
    }

    /// Like [`dot`](Self::dot) with an already-resolved color.
    pub fn stamp(&mut self, diameter: f64, color: Rgba8) {
        let center = self.target.size().to_surface(self.cursor.position);
        self.target.fill_dot(center, diameter, color);
    }

    /// Render text at the cursor: a 2px-offset shadow pass first, then the
    /// solid text in the pen color.
    pub fn write(&mut self, text: &str, style: &TextStyle) -> CakewalkResult<()> {
        let origin = self.target.size().to_surface(self.cursor.position);
        self.target.draw_text(
            Point::new(origin.x + TEXT_SHADOW_OFFSET, origin.y + TEXT_SHADOW_OFFSET),
            text,
            style,
            TEXT_SHADOW,
        )?;
        self.target
            .draw_text(origin, text, style, self.cursor.pen_color)
    }

    /// Erase the surface. Cursor state (position, heading, colors) persists;
    /// callers reposition explicitly before drawing resumes.
    pub fn clear(&mut self) {
        self.target.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/turtle/engine.rs"]
mod tests;
