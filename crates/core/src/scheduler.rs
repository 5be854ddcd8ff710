//! Frame scheduling seam between the kernel and its host.
//!
//! The kernel never owns a frame loop. A host supplies a [`FrameScheduler`]
//! that hands out a [`FrameHandle`] per requested frame and later delivers
//! that handle back to [`WaveAnimator::on_frame`] with a timestamp.

use crate::config::{ConfigChanges, WaveStackConfig};
use crate::error::WaveError;
use crate::stack::WaveStack;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Opaque identifier of one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to request and cancel frame callbacks.
pub trait FrameScheduler {
    /// Requests one future frame.
    fn schedule(&mut self) -> FrameHandle;

    /// Withdraws a frame request. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// In-process scheduler that yields requested frames in FIFO order.
///
/// Useful for offline rendering and tests, where the caller decides when
/// each frame "fires".
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    next_id: u64,
    queue: VecDeque<FrameHandle>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest outstanding frame request.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    /// Number of outstanding frame requests.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for QueuedScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.queue.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.retain(|h| *h != handle);
    }
}

/// Drives a [`WaveStack`] from frames delivered by a [`FrameScheduler`].
///
/// At most one frame is pending at a time. Whether animation runs is decided
/// from outside through [`start`](Self::start), [`stop`](Self::stop) or
/// [`set_active`](Self::set_active).
#[derive(Debug)]
pub struct WaveAnimator<S: FrameScheduler> {
    stack: WaveStack,
    scheduler: S,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> WaveAnimator<S> {
    /// Wraps a stack; nothing is scheduled until [`start`](Self::start).
    pub fn new(stack: WaveStack, scheduler: S) -> Self {
        Self {
            stack,
            scheduler,
            pending: None,
        }
    }

    /// Requests the first frame. No-op while already running.
    ///
    /// The clock keeps its last frame timestamp across a stop, so the first
    /// frame after a restart advances by the capped gap. Call
    /// [`WaveStack::resume`] beforehand to skip the gap instead.
    pub fn start(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.schedule());
        debug!("animation started");
    }

    /// Cancels the pending frame. No-op while stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
            debug!("animation stopped");
        }
    }

    /// Starts or stops according to an external signal such as visibility.
    pub fn set_active(&mut self, active: bool) {
        if active {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the frame identified by `handle` at `timestamp_ms` and schedules
    /// the next one.
    ///
    /// Returns `None` for a handle that is not the pending one (cancelled or
    /// superseded), without touching any state.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> Option<Vec<&str>> {
        if !self.advance_frame(handle, timestamp_ms) {
            return None;
        }
        Some(self.stack.paths())
    }

    /// Like [`on_frame`](Self::on_frame) but leaves the paths in the stack
    /// instead of collecting them. Returns whether the frame ran.
    pub fn advance_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> bool {
        if self.pending != Some(handle) {
            trace!(handle = handle.id(), "ignoring stale frame");
            return false;
        }
        self.pending = Some(self.scheduler.schedule());
        self.stack.advance(timestamp_ms);
        true
    }

    /// Fully rebuilds the stack for `config` before the next frame runs.
    pub fn reconfigure(&mut self, config: WaveStackConfig) -> Result<(), WaveError> {
        self.apply(config, ConfigChanges::all())
    }

    /// Applies a configuration change set before the next frame runs.
    ///
    /// A pending frame is withdrawn and re-requested afterwards, so no frame
    /// can observe a half-applied configuration.
    pub fn apply(&mut self, config: WaveStackConfig, changes: ConfigChanges) -> Result<(), WaveError> {
        let was_running = match self.pending.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        };
        let result = self.stack.apply(config, changes).map(|_| ());
        if was_running {
            self.pending = Some(self.scheduler.schedule());
        }
        result
    }

    pub fn stack(&self) -> &WaveStack {
        &self.stack
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Consumes the animator, returning its stack.
    pub fn into_stack(self) -> WaveStack {
        self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandStyle;

    fn animator(bands: usize) -> WaveAnimator<QueuedScheduler> {
        let config = WaveStackConfig {
            bands: vec![BandStyle::default(); bands],
            ..WaveStackConfig::default()
        };
        let stack = WaveStack::with_seed(config, 42).unwrap();
        WaveAnimator::new(stack, QueuedScheduler::new())
    }

    #[test]
    fn queued_scheduler_yields_in_order_and_honors_cancel() {
        let mut s = QueuedScheduler::new();
        let a = s.schedule();
        let b = s.schedule();
        let c = s.schedule();
        s.cancel(b);
        assert_eq!(s.pending(), 2);
        assert_eq!(s.next_due(), Some(a));
        assert_eq!(s.next_due(), Some(c));
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn new_animator_is_idle() {
        let anim = animator(2);
        assert!(!anim.is_running());
        assert_eq!(anim.scheduler().pending(), 0);
    }

    #[test]
    fn start_schedules_exactly_one_frame() {
        let mut anim = animator(2);
        anim.start();
        anim.start();
        assert!(anim.is_running());
        assert_eq!(anim.scheduler().pending(), 1);
    }

    #[test]
    fn frames_produce_paths_and_reschedule() {
        let mut anim = animator(3);
        anim.start();
        for frame in 0..5 {
            let handle = anim.scheduler_mut().next_due().unwrap();
            let paths = anim.on_frame(handle, frame as f64 * 16.0).unwrap();
            assert_eq!(paths.len(), 3);
        }
        assert_eq!(anim.scheduler().pending(), 1);
        assert!(anim.stack().noise_timeline() > 0.0);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut anim = animator(1);
        anim.start();
        anim.stop();
        assert!(!anim.is_running());
        assert_eq!(anim.scheduler().pending(), 0);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut anim = animator(1);
        anim.start();
        let handle = anim.scheduler_mut().next_due().unwrap();
        anim.stop();
        assert!(anim.on_frame(handle, 16.0).is_none());
        assert!(!anim.is_running());
        assert_eq!(anim.stack().noise_timeline(), 0.0);
    }

    #[test]
    fn restart_credits_the_capped_gap() {
        let config = WaveStackConfig {
            speed: 10_000.0,
            ..WaveStackConfig::default()
        };
        let stack = WaveStack::with_seed(config, 42).unwrap();
        let mut anim = WaveAnimator::new(stack, QueuedScheduler::new());

        anim.start();
        for ts in [0.0, 10.0] {
            let handle = anim.scheduler_mut().next_due().unwrap();
            anim.on_frame(handle, ts).unwrap();
        }
        let before = anim.stack().noise_timeline();
        anim.stop();

        anim.start();
        let handle = anim.scheduler_mut().next_due().unwrap();
        anim.on_frame(handle, 5_000.0).unwrap();
        assert_eq!(anim.stack().noise_timeline() - before, 17.0);
    }

    #[test]
    fn restart_after_explicit_resume_skips_the_gap() {
        let mut anim = animator(1);
        anim.start();
        for ts in [0.0, 16.0] {
            let handle = anim.scheduler_mut().next_due().unwrap();
            anim.on_frame(handle, ts).unwrap();
        }
        let before = anim.stack().noise_timeline();
        anim.stop();

        let mut stack = anim.into_stack();
        stack.resume();
        let mut anim = WaveAnimator::new(stack, QueuedScheduler::new());
        anim.start();
        let handle = anim.scheduler_mut().next_due().unwrap();
        anim.on_frame(handle, 9_000.0).unwrap();
        assert_eq!(anim.stack().noise_timeline(), before);
    }

    #[test]
    fn advance_frame_runs_pending_and_ignores_stale() {
        let mut anim = animator(2);
        anim.start();
        let first = anim.scheduler_mut().next_due().unwrap();
        assert!(anim.advance_frame(first, 0.0));
        assert!(!anim.advance_frame(first, 16.0));
        let second = anim.scheduler_mut().next_due().unwrap();
        assert!(anim.advance_frame(second, 16.0));
        assert!(anim.stack().noise_timeline() > 0.0);
        assert_eq!(anim.stack().path_iter().len(), 2);
    }

    #[test]
    fn set_active_toggles_running_state() {
        let mut anim = animator(1);
        anim.set_active(true);
        assert!(anim.is_running());
        anim.set_active(false);
        assert!(!anim.is_running());
    }

    #[test]
    fn reconfigure_while_running_supersedes_pending_frame() {
        let mut anim = animator(2);
        anim.start();
        let old = anim.scheduler_mut().next_due().unwrap();
        anim.on_frame(old, 0.0).unwrap();

        let config = WaveStackConfig {
            bands: vec![BandStyle::default(); 4],
            ..WaveStackConfig::default()
        };
        anim.reconfigure(config).unwrap();

        assert!(anim.is_running());
        assert_eq!(anim.scheduler().pending(), 1);
        let next = anim.scheduler_mut().next_due().unwrap();
        assert_eq!(anim.on_frame(next, 16.0).unwrap().len(), 4);
    }

    #[test]
    fn reconfigure_while_stopped_does_not_start() {
        let mut anim = animator(2);
        anim.reconfigure(WaveStackConfig::default()).unwrap();
        assert!(!anim.is_running());
        assert_eq!(anim.scheduler().pending(), 0);
    }

    #[test]
    fn failed_reconfigure_keeps_animation_running() {
        let mut anim = animator(2);
        anim.start();
        let bad = WaveStackConfig {
            points: 0,
            ..WaveStackConfig::default()
        };
        assert!(anim.reconfigure(bad).is_err());
        assert!(anim.is_running());
        assert_eq!(anim.stack().shapes().len(), 2);
    }
}
