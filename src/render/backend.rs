use crate::foundation::core::{BezPath, Point, Rgba8, SurfaceSize};
use crate::foundation::error::CakewalkResult;

/// A readback of the drawing surface as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Premultiplied RGBA of the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
}

/// Font weight carried by a [`TextStyle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Requested text styling for [`DrawTarget::draw_text`].
///
/// `family` is advisory: targets with a single registered typeface shape with
/// that face and keep the family name for hosts that own a font database.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub size_px: f32,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: FontWeight::Normal,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

/// Raster sink for the turtle engine.
///
/// All coordinates are surface space (top-left origin, Y-down pixels); the
/// engine applies the center-origin mapping before calling in. Draw order is
/// paint order: later calls paint over earlier ones.
pub trait DrawTarget {
    /// Surface dimensions, fixed at construction.
    fn size(&self) -> SurfaceSize;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a straight segment with round caps and joins.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8);

    /// Fill a closed path (nonzero winding).
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    /// Fill a circle of `diameter` centered at `center`.
    fn fill_dot(&mut self, center: Point, diameter: f64, color: Rgba8);

    /// Draw `text` with its baseline-left origin at `origin`.
    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        style: &TextStyle,
        color: Rgba8,
    ) -> CakewalkResult<()>;

    /// Render everything drawn so far and read the pixels back.
    fn snapshot(&mut self) -> CakewalkResult<FrameRgba>;
}
