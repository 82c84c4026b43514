use crate::foundation::error::CakewalkResult;
use crate::render::backend::FrameRgba;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Cooperative scheduling seam for the choreographer.
///
/// Every suspension point in a running scene calls [`Pacer::suspend`] with
/// the nominal hold duration. Returning `Break` abandons the run at that
/// checkpoint, which is the only supported cancellation path. Pacers that
/// report `wants_frames` additionally receive a surface snapshot at each
/// suspension, turning the animation into a frame sequence.
pub trait Pacer {
    /// Yield control for roughly `hold`; `Break` cancels the run.
    fn suspend(&mut self, hold: Duration) -> ControlFlow<()>;

    /// Whether this pacer wants a snapshot at each suspension point.
    fn wants_frames(&self) -> bool {
        false
    }

    /// Receive a snapshot. Only called when [`Pacer::wants_frames`] is true.
    fn frame(&mut self, frame: &FrameRgba) -> CakewalkResult<()> {
        let _ = frame;
        Ok(())
    }
}

/// Pacer that never sleeps and never cancels. Headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPacer;

impl Pacer for NullPacer {
    fn suspend(&mut self, _hold: Duration) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Shared cancellation flag checked at every suspension point.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Real-time pacer: sleeps for each hold, honoring a [`CancelToken`].
///
/// Holds are bounded (tens of milliseconds to one second), so a cancelled
/// token is observed within one hold at most.
#[derive(Clone, Debug, Default)]
pub struct SleepPacer {
    cancel: CancelToken,
}

impl SleepPacer {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }
}

impl Pacer for SleepPacer {
    fn suspend(&mut self, hold: Duration) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        std::thread::sleep(hold);
        ControlFlow::Continue(())
    }
}
