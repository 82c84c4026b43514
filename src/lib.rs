//! cakewalk renders a paced, turtle-style birthday cake illustration onto a
//! CPU raster surface.
//!
//! The crate splits into three layers:
//!
//! - [`render`]: the [`DrawTarget`] seam and its vello_cpu-backed
//!   [`RasterTarget`] which retains a display list and replays it per
//!   snapshot.
//! - [`turtle`]: the cursor-based drawing engine ([`Turtle`]) with named
//!   palette resolution.
//! - [`scene`]: the [`CakeScene`] choreographer which sequences the
//!   illustration phase by phase, yielding to a [`Pacer`] at every
//!   suspension point.
//!
//! ```no_run
//! use cakewalk::{CakeScene, DrawTarget, NullPacer, RasterTarget, SurfaceSize, Turtle};
//!
//! # fn main() -> cakewalk::CakewalkResult<()> {
//! let size = SurfaceSize::new(600, 500)?;
//! let target = RasterTarget::new(size)?;
//! let mut scene = CakeScene::with_seed(Turtle::new(target), 7);
//! scene.animate(&mut NullPacer)?;
//! let frame = scene.turtle_mut().target_mut().snapshot()?;
//! # let _ = frame;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod foundation;
pub mod render;
pub mod scene;
pub mod turtle;

pub use foundation::core::{Rgba8, SurfaceSize};
pub use foundation::error::{CakewalkError, CakewalkResult};
pub use foundation::math::XorShift32;
pub use render::backend::{DrawTarget, FontWeight, FrameRgba, TextStyle};
pub use render::cpu::RasterTarget;
pub use scene::cake::{AUTO_DISMISS, CakeScene, SceneState, SceneStats};
pub use scene::pacer::{CancelToken, NullPacer, Pacer, SleepPacer};
pub use turtle::engine::{Cursor, Turtle};
pub use turtle::palette::{Palette, ResolvedColor};
