use crate::foundation::error::{CakewalkError, CakewalkResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Raster surface dimensions in pixels.
///
/// Engine coordinates are center-origin with Y increasing upward; surface
/// coordinates are the usual top-left-origin, Y-down pixel space. The two
/// mapping methods below are the only place that conversion happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> CakewalkResult<Self> {
        if width == 0 || height == 0 {
            return Err(CakewalkError::surface(format!(
                "surface dimensions must be non-zero (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Engine point (center origin, Y-up) to surface pixel (top-left origin, Y-down).
    pub fn to_surface(self, p: Point) -> Point {
        Point::new(f64::from(self.width) / 2.0 + p.x, f64::from(self.height) / 2.0 - p.y)
    }

    /// Inverse of [`SurfaceSize::to_surface`].
    pub fn to_engine(self, p: Point) -> Point {
        Point::new(p.x - f64::from(self.width) / 2.0, f64::from(self.height) / 2.0 - p.y)
    }
}

/// Straight-alpha RGBA8 color as set by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied byte quad, matching the pixel layout of rendered frames.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            (((u16::from(c) * u16::from(a)) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
