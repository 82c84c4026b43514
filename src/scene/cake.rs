use crate::foundation::error::CakewalkError;
use crate::foundation::error::CakewalkResult;
use crate::foundation::math::{XorShift32, ellipse_x, ellipse_y};
use crate::render::backend::{DrawTarget, TextStyle};
use crate::scene::pacer::Pacer;
use crate::turtle::engine::Turtle;
use std::time::Duration;
use tracing::{debug, info};

/// Delay after which hosts are expected to dismiss the presentation surface
/// once the scene reports [`SceneState::Complete`].
pub const AUTO_DISMISS: Duration = Duration::from_secs(10);

/// Choreography lifecycle. Re-invoking `animate` while `Running` is a
/// silent no-op; there is no `Cancelled` state. A cancelled run returns to
/// `Idle` with the partially drawn surface left as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    Idle,
    Running,
    Complete,
}

/// Primitive-call tallies for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Closed fill regions (tiers, walls, candle bodies, flames).
    pub fill_regions: u32,
    /// Candle flames stamped.
    pub flames_lit: u32,
    /// Confetti dots scattered (excludes the two star dots).
    pub confetti_dots: u32,
    /// Text writes (captions and decorative glyphs).
    pub captions: u32,
}

/// A rectangular confetti region with its dot count and size range.
struct DotRegion {
    count: u32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    size_min: f64,
    size_max: f64,
}

const fn region(
    count: u32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    size_min: f64,
    size_max: f64,
) -> DotRegion {
    DotRegion {
        count,
        x_min,
        x_max,
        y_min,
        y_max,
        size_min,
        size_max,
    }
}

/// Candle anchor points `(x, y_base)` on the cake top, all height 50.
const CANDLE_POSITIONS: [(f64, f64); 5] =
    [(60.0, 120.0), (-60.0, 120.0), (0.0, 130.0), (30.0, 110.0), (-30.0, 110.0)];
const CANDLE_HEIGHT: f64 = 50.0;

const DOT_REGIONS: [DotRegion; 5] = [
    region(30, -120.0, 120.0, -25.0, 30.0, 2.0, 5.0),
    region(20, -90.0, 90.0, -35.0, 10.0, 2.0, 5.0),
    region(20, -80.0, 80.0, 60.0, 90.0, 2.0, 5.0),
    region(15, -50.0, 50.0, 45.0, 70.0, 2.0, 5.0),
    region(25, -200.0, 200.0, 120.0, 300.0, 3.0, 5.0),
];

const CELEBRATION_REGIONS: [DotRegion; 2] = [
    region(25, -250.0, 250.0, 180.0, 300.0, 4.0, 10.0),
    region(15, -150.0, 150.0, -80.0, -50.0, 3.0, 8.0),
];

/// Why a run stopped early.
#[derive(Debug)]
enum Interrupt {
    /// The pacer broke at a suspension point.
    Cancelled,
    Failed(CakewalkError),
}

impl From<CakewalkError> for Interrupt {
    fn from(e: CakewalkError) -> Self {
        Self::Failed(e)
    }
}

type StepResult<T = ()> = Result<T, Interrupt>;

/// Sequences the birthday-cake illustration as paced phases over a
/// [`Turtle`].
///
/// Phases run strictly in order on the calling thread; each suspension point
/// yields through the [`Pacer`], which is also the only cancellation path.
pub struct CakeScene<T: DrawTarget> {
    turtle: Turtle<T>,
    state: SceneState,
    rng: XorShift32,
    stats: SceneStats,
}

impl<T: DrawTarget> CakeScene<T> {
    pub fn new(turtle: Turtle<T>) -> Self {
        Self::with_rng(turtle, XorShift32::from_entropy())
    }

    /// Deterministic confetti for reproducible runs.
    pub fn with_seed(turtle: Turtle<T>, seed: u32) -> Self {
        Self::with_rng(turtle, XorShift32::new(seed))
    }

    fn with_rng(turtle: Turtle<T>, rng: XorShift32) -> Self {
        Self {
            turtle,
            state: SceneState::Idle,
            rng,
            stats: SceneStats::default(),
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn turtle(&self) -> &Turtle<T> {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut Turtle<T> {
        &mut self.turtle
    }

    pub fn into_turtle(self) -> Turtle<T> {
        self.turtle
    }

    /// Run the full choreography.
    ///
    /// No-op while already `Running`. On success the scene is `Complete` and
    /// the host owns the [`AUTO_DISMISS`] timer; on cancellation or failure
    /// the scene returns to `Idle` with the surface left partially drawn
    /// (the host's remedy is clear-and-retrigger).
    #[tracing::instrument(skip_all)]
    pub fn animate(&mut self, pacer: &mut dyn Pacer) -> CakewalkResult<SceneStats> {
        if self.state == SceneState::Running {
            debug!("animate called while already running; ignoring");
            return Ok(self.stats);
        }

        self.turtle.palette().validate()?;
        self.state = SceneState::Running;
        self.stats = SceneStats::default();

        match self.run_script(pacer) {
            Ok(()) => {
                self.state = SceneState::Complete;
                info!(stats = ?self.stats, "scene complete");
                Ok(self.stats)
            }
            Err(Interrupt::Cancelled) => {
                self.state = SceneState::Idle;
                info!("scene cancelled at a suspension point");
                Ok(self.stats)
            }
            Err(Interrupt::Failed(e)) => {
                self.state = SceneState::Idle;
                Err(e)
            }
        }
    }

    fn run_script(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        self.turtle.clear();
        self.intro_caption(pacer)?;
        self.base_tier(pacer)?;
        self.second_tier(pacer)?;
        self.frosting_band(pacer)?;
        self.top_tier(pacer)?;
        self.candles(pacer)?;

        info!("scattering confetti");
        self.pause(pacer, 500)?;
        for r in &DOT_REGIONS {
            self.scatter(r, pacer)?;
        }

        self.final_caption(pacer)?;

        self.pause(pacer, 500)?;
        for r in &CELEBRATION_REGIONS {
            self.scatter(r, pacer)?;
        }
        Ok(())
    }

    /// Snapshot for frame-collecting pacers, then yield.
    fn pause(&mut self, pacer: &mut dyn Pacer, ms: u64) -> StepResult {
        if pacer.wants_frames() {
            let frame = self.turtle.target_mut().snapshot()?;
            pacer.frame(&frame)?;
        }
        match pacer.suspend(Duration::from_millis(ms)) {
            std::ops::ControlFlow::Continue(()) => Ok(()),
            std::ops::ControlFlow::Break(()) => Err(Interrupt::Cancelled),
        }
    }

    /// Trace and fill a full ellipse centered at `(0, y_offset)`, pausing
    /// every 20 degrees so the outline is watchable.
    fn ellipse(
        &mut self,
        half_w: f64,
        half_h: f64,
        outline: &str,
        fill: &str,
        y_offset: f64,
        pacer: &mut dyn Pacer,
    ) -> StepResult {
        let t = &mut self.turtle;
        t.pen_up();
        t.move_to(half_w, y_offset);
        t.pen_down();
        t.set_pen_color(outline)?;
        t.set_fill_color(fill)?;
        t.begin_fill()?;

        for deg in (0..=360).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(half_w, deg), ellipse_y(half_h, deg) + y_offset);
            if deg % 20.0 == 0.0 {
                self.pause(pacer, 10)?;
            }
        }

        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;
        Ok(())
    }

    fn intro_caption(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        let t = &mut self.turtle;
        t.pen_up();
        t.move_to(-100.0, 200.0);
        t.set_pen_color("#2F4F4F")?;
        t.write(
            "Building your special cake...",
            &TextStyle::new("Dancing Script", 20.0),
        )?;
        self.stats.captions += 1;

        self.pause(pacer, 1000)?;
        self.turtle.clear();
        Ok(())
    }

    fn base_tier(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        info!("drawing base tier");
        self.ellipse(150.0, 60.0, "white", "light_green", 0.0, pacer)?;
        self.pause(pacer, 300)?;

        // Side wall: two hemicycle passes, the front one slightly deeper for
        // shading.
        let t = &mut self.turtle;
        t.pen_up();
        t.set_pen_width(4.0);
        t.move_to(150.0, 0.0);
        t.pen_down();
        t.set_fill_color("medium_green")?;
        t.begin_fill()?;

        for deg in (0..=180).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(150.0, -deg), ellipse_y(70.0, -deg));
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 20)?;
            }
        }
        for deg in (180..=360).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(150.0, deg), ellipse_y(60.0, deg));
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 20)?;
            }
        }

        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;
        Ok(())
    }

    fn second_tier(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        info!("drawing second tier");
        self.pause(pacer, 500)?;
        self.ellipse(120.0, 48.0, "white", "light_yellow", 0.0, pacer)?;

        // Side wall traced past 360 to close the spiral seam.
        let t = &mut self.turtle;
        t.set_fill_color("light_yellow")?;
        t.begin_fill()?;
        t.set_pen_width(4.0);
        t.set_pen_color("light_steel")?;

        for deg in (0..=540).step_by(10) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(120.0, deg), ellipse_y(48.0, deg) + 70.0);
            if deg % 30.0 == 0.0 {
                self.pause(pacer, 15)?;
            }
        }
        self.turtle.move_to(-120.0, 0.0);
        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;

        // Top cap double layer: outer rim plus inset highlight.
        self.ellipse(120.0, 48.0, "light_yellow", "light_yellow", 70.0, pacer)?;
        self.ellipse(110.0, 44.0, "cream", "cream", 70.0, pacer)?;
        Ok(())
    }

    fn frosting_band(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        info!("adding frosting");
        let t = &mut self.turtle;
        t.pen_up();
        t.set_pen_width(4.0);
        t.move_to(120.0, 0.0);
        t.pen_down();
        t.set_fill_color("sky_blue")?;
        t.begin_fill()?;
        t.set_pen_color("sky_blue")?;

        for deg in (0..=180).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(120.0, -deg), ellipse_y(48.0, -deg) + 10.0);
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 25)?;
            }
        }
        self.turtle.move_to(-120.0, 0.0);
        for deg in (180..=360).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(120.0, deg), ellipse_y(48.0, deg));
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 25)?;
            }
        }

        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;
        Ok(())
    }

    fn top_tier(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        info!("drawing top tier");
        self.pause(pacer, 500)?;

        let t = &mut self.turtle;
        t.pen_up();
        t.set_pen_width(4.0);
        t.move_to(80.0, 70.0);
        t.pen_down();
        t.set_fill_color("brown")?;
        t.begin_fill()?;
        t.set_pen_color("brown")?;
        t.move_to(80.0, 120.0);

        for deg in (0..=180).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(80.0, deg), ellipse_y(32.0, deg) + 120.0);
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 30)?;
            }
        }
        self.turtle.move_to(-80.0, 70.0);
        for deg in (180..=360).step_by(5) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(80.0, deg), ellipse_y(32.0, deg) + 70.0);
            if deg % 15.0 == 0.0 {
                self.pause(pacer, 30)?;
            }
        }

        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;

        self.ellipse(80.0, 32.0, "dark_brown", "dark_brown", 120.0, pacer)?;
        self.ellipse(70.0, 28.0, "orange", "orange", 120.0, pacer)?;
        Ok(())
    }

    fn candles(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        info!("adding candles");
        self.pause(pacer, 500)?;
        for &(x, y_base) in &CANDLE_POSITIONS {
            self.candle(x, y_base, CANDLE_HEIGHT, pacer)?;
            self.pause(pacer, 200)?;
        }
        Ok(())
    }

    fn candle(&mut self, x: f64, y_base: f64, height: f64, pacer: &mut dyn Pacer) -> StepResult {
        debug!(x, y_base, "drawing candle");

        // Cylindrical body: bottom ellipse, side line, top ellipse traced to
        // 540 degrees to close the seam, then back down the left side.
        let t = &mut self.turtle;
        t.pen_up();
        t.move_to(x + 4.0, y_base);
        t.pen_down();
        t.set_pen_color("teal")?;
        t.set_fill_color("teal")?;
        t.begin_fill()?;

        for deg in (0..=360).step_by(10) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(4.0, deg) + x, ellipse_y(1.0, deg) + y_base);
        }
        self.turtle.move_to(x + 4.0, y_base + height);
        for deg in (0..=540).step_by(10) {
            let deg = f64::from(deg);
            self.turtle
                .move_to(ellipse_x(4.0, deg) + x, ellipse_y(1.0, deg) + y_base + height);
            if deg % 50.0 == 0.0 {
                self.pause(pacer, 5)?;
            }
        }
        self.turtle.move_to(x - 4.0, y_base);
        self.turtle.end_fill()?;
        self.stats.fill_regions += 1;

        // Horizontal stripes across the body.
        self.turtle.set_pen_color("white")?;
        self.turtle.set_pen_width(4.0);
        for i in 1..6 {
            let y = y_base + 10.0 * f64::from(i);
            self.turtle.move_to(x + 4.0, y);
            self.turtle.pen_up();
            self.turtle.move_to(x - 4.0, y);
            self.turtle.pen_down();
            self.pause(pacer, 20)?;
        }

        // Wick.
        let t = &mut self.turtle;
        t.pen_up();
        t.move_to(x, y_base + height);
        t.pen_down();
        t.move_to(x, y_base + height + 10.0);
        t.set_pen_width(3.0);

        // Flame.
        t.pen_up();
        t.move_to(x + 4.0, y_base + height + 20.0);
        t.pen_down();
        t.set_pen_color("flame_orange")?;
        t.set_fill_color("flame_orange")?;
        t.begin_fill()?;
        for deg in (0..=360).step_by(15) {
            let deg = f64::from(deg);
            t.move_to(
                ellipse_x(4.0, deg) + x,
                ellipse_y(10.0, deg) + y_base + height + 20.0,
            );
        }
        t.end_fill()?;
        self.stats.fill_regions += 1;
        self.stats.flames_lit += 1;

        self.pause(pacer, 100)?;
        Ok(())
    }

    fn scatter(&mut self, r: &DotRegion, pacer: &mut dyn Pacer) -> StepResult {
        for i in 0..r.count {
            let x = self.rng.uniform(r.x_min, r.x_max);
            let y = self.rng.uniform(r.y_min, r.y_max);
            let size = self.rng.uniform(r.size_min, r.size_max);
            let color = *self.rng.pick(self.turtle.palette().confetti());

            let t = &mut self.turtle;
            t.pen_up();
            t.move_to(x, y);
            t.pen_down();
            t.stamp(size, color);
            self.stats.confetti_dots += 1;

            if i % 5 == 0 {
                self.pause(pacer, 10)?;
            }
        }
        Ok(())
    }

    fn final_caption(&mut self, pacer: &mut dyn Pacer) -> StepResult {
        self.pause(pacer, 1000)?;

        let t = &mut self.turtle;
        t.set_heading(90.0);
        t.pen_up();
        t.move_to(-140.0, -120.0);
        t.pen_down();
        t.set_pen_color("#2F4F4F")?;
        t.write(
            "Happy Birthday!",
            &TextStyle::new("Playfair Display", 28.0).bold(),
        )?;
        self.stats.captions += 1;

        self.pause(pacer, 300)?;

        // Star dots flanking the caption.
        let t = &mut self.turtle;
        t.pen_up();
        t.move_to(-200.0, -110.0);
        t.pen_down();
        t.dot(8.0, "#FFD700")?;
        t.pen_up();
        t.move_to(200.0, -110.0);
        t.pen_down();
        t.dot(8.0, "#FFD700")?;

        // Decorative glyphs.
        t.pen_up();
        t.move_to(-180.0, -130.0);
        t.pen_down();
        t.set_pen_color("#FF69B4")?;
        t.write("\u{2665}", &TextStyle::new("Arial", 20.0))?;
        t.pen_up();
        t.move_to(160.0, -130.0);
        t.pen_down();
        t.write("\u{2605}", &TextStyle::new("Arial", 20.0))?;
        self.stats.captions += 2;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cake.rs"]
mod tests;
