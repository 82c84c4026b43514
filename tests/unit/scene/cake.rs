use super::*;
use crate::foundation::core::{BezPath, Point, Rgba8, SurfaceSize};
use crate::render::backend::{DrawTarget, FrameRgba, TextStyle};
use crate::scene::pacer::NullPacer;
use crate::turtle::engine::Turtle;
use std::ops::ControlFlow;

/// Tallies primitive calls instead of rasterizing.
#[derive(Default)]
struct CountingTarget {
    strokes: u32,
    fills: Vec<Rgba8>,
    dots: Vec<(Point, f64, Rgba8)>,
    texts: Vec<String>,
    clears: u32,
    snapshots: u32,
}

impl DrawTarget for CountingTarget {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(600, 500).unwrap()
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn stroke_line(&mut self, _from: Point, _to: Point, _width: f64, _color: Rgba8) {
        self.strokes += 1;
    }

    fn fill_path(&mut self, _path: &BezPath, color: Rgba8) {
        self.fills.push(color);
    }

    fn fill_dot(&mut self, center: Point, diameter: f64, color: Rgba8) {
        self.dots.push((center, diameter, color));
    }

    fn draw_text(
        &mut self,
        _origin: Point,
        text: &str,
        _style: &TextStyle,
        _color: Rgba8,
    ) -> CakewalkResult<()> {
        self.texts.push(text.to_owned());
        Ok(())
    }

    fn snapshot(&mut self) -> CakewalkResult<FrameRgba> {
        self.snapshots += 1;
        Ok(FrameRgba {
            width: 600,
            height: 500,
            data: vec![0; 600 * 500 * 4],
        })
    }
}

fn scene() -> CakeScene<CountingTarget> {
    CakeScene::with_seed(Turtle::new(CountingTarget::default()), 7)
}

#[test]
fn full_run_reaches_complete_with_expected_tallies() {
    let mut s = scene();
    let stats = s.animate(&mut NullPacer).unwrap();

    assert_eq!(s.state(), SceneState::Complete);
    assert_eq!(stats.flames_lit, 5);
    // 110 confetti dots, then 40 celebration dots.
    assert_eq!(stats.confetti_dots, 150);
    // Two captions plus two decorative glyphs.
    assert_eq!(stats.captions, 4);
    // Tiers and walls (10) plus candle bodies and flames (10).
    assert_eq!(stats.fill_regions, 20);

    let target = s.turtle().target();
    assert_eq!(target.fills.len(), 20);
    // 150 confetti dots plus the two star dots.
    assert_eq!(target.dots.len(), 152);
    // Each write is a shadow pass plus a solid pass.
    assert_eq!(target.texts.len(), 8);
    // Initial reset plus the post-intro clear.
    assert_eq!(target.clears, 2);
}

#[test]
fn flame_fills_use_the_flame_color() {
    let mut s = scene();
    s.animate(&mut NullPacer).unwrap();

    let flame = Rgba8::rgb(0xff, 0x66, 0x00);
    let flames = s.turtle().target().fills.iter().filter(|&&c| c == flame).count();
    assert_eq!(flames, 5);
}

#[test]
fn same_seed_scatters_identically() {
    let mut a = scene();
    let mut b = scene();
    a.animate(&mut NullPacer).unwrap();
    b.animate(&mut NullPacer).unwrap();

    assert_eq!(a.turtle().target().dots, b.turtle().target().dots);
}

#[test]
fn reentry_while_running_is_a_no_op() {
    let mut s = scene();
    s.state = SceneState::Running;

    let stats = s.animate(&mut NullPacer).unwrap();
    assert_eq!(stats, SceneStats::default());
    assert_eq!(s.state(), SceneState::Running);
    assert_eq!(s.turtle().target().clears, 0);
    assert!(s.turtle().target().fills.is_empty());
}

/// Continues for `budget` suspensions, then breaks.
struct BudgetPacer {
    budget: u32,
    suspends: u32,
}

impl Pacer for BudgetPacer {
    fn suspend(&mut self, _hold: Duration) -> ControlFlow<()> {
        self.suspends += 1;
        if self.suspends > self.budget {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[test]
fn cancellation_returns_to_idle_with_partial_surface() {
    let mut s = scene();
    let mut pacer = BudgetPacer { budget: 40, suspends: 0 };
    let stats = s.animate(&mut pacer).unwrap();

    assert_eq!(s.state(), SceneState::Idle);
    assert_eq!(pacer.suspends, 41);
    // Something was drawn before the break, but not the whole scene.
    assert!(!s.turtle().target().fills.is_empty());
    assert!(stats.fill_regions < 20);
    assert_eq!(stats.flames_lit, 0);
}

#[test]
fn cancelled_scene_can_rerun_to_completion() {
    let mut s = scene();
    let mut pacer = BudgetPacer { budget: 10, suspends: 0 };
    s.animate(&mut pacer).unwrap();
    assert_eq!(s.state(), SceneState::Idle);

    let stats = s.animate(&mut NullPacer).unwrap();
    assert_eq!(s.state(), SceneState::Complete);
    assert_eq!(stats.flames_lit, 5);
}

/// Collects snapshots at every suspension point.
struct CollectingPacer {
    frames: Vec<(u32, u32)>,
}

impl Pacer for CollectingPacer {
    fn suspend(&mut self, _hold: Duration) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn wants_frames(&self) -> bool {
        true
    }

    fn frame(&mut self, frame: &FrameRgba) -> CakewalkResult<()> {
        self.frames.push((frame.width, frame.height));
        Ok(())
    }
}

#[test]
fn frame_collecting_pacer_gets_one_snapshot_per_suspension() {
    let mut s = scene();
    let mut pacer = CollectingPacer { frames: Vec::new() };
    s.animate(&mut pacer).unwrap();

    let snapshots = s.turtle().target().snapshots;
    assert_eq!(pacer.frames.len() as u32, snapshots);
    assert!(snapshots > 100);
    assert!(pacer.frames.iter().all(|&f| f == (600, 500)));
}

#[test]
fn scatter_honors_region_bounds_counts_and_sizes() {
    let mut s = scene();
    let region = &DOT_REGIONS[0];
    s.scatter(region, &mut NullPacer).unwrap();

    let size = s.turtle().size();
    let dots = &s.turtle().target().dots;
    assert_eq!(dots.len(), 30);
    for &(center, diameter, color) in dots {
        let engine = size.to_engine(center);
        assert!((region.x_min..region.x_max).contains(&engine.x));
        assert!((region.y_min..region.y_max).contains(&engine.y));
        assert!((region.size_min..region.size_max).contains(&diameter));
        assert!(s.turtle().palette().confetti().contains(&color));
    }
}

#[test]
fn dot_region_tables_match_the_dot_counts() {
    let counts: Vec<u32> = DOT_REGIONS.iter().map(|r| r.count).collect();
    assert_eq!(counts, [30, 20, 20, 15, 25]);
    let celebration: Vec<u32> = CELEBRATION_REGIONS.iter().map(|r| r.count).collect();
    assert_eq!(celebration, [25, 15]);
}

#[test]
fn empty_confetti_palette_fails_before_drawing() {
    let palette: crate::turtle::palette::Palette =
        serde_json::from_str(r#"{"confetti": []}"#).unwrap();
    let mut s = CakeScene::with_seed(
        Turtle::with_palette(CountingTarget::default(), palette),
        1,
    );

    assert!(s.animate(&mut NullPacer).is_err());
    assert_eq!(s.state(), SceneState::Idle);
    assert_eq!(s.turtle().target().clears, 0);
}
