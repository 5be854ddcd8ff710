//! Offline frame pump: plays an animator at a fixed virtual frame rate.

use wave_stack_core::{QueuedScheduler, WaveAnimator, WaveStack};

/// Timestamp in milliseconds of `frame` at `fps`.
pub fn frame_timestamp(frame: usize, fps: f64) -> f64 {
    frame as f64 * 1000.0 / fps
}

/// Runs `frames` frames, calling `on_frame` with each frame's index,
/// timestamp and the updated stack. The animator is stopped afterwards.
pub fn pump_frames<F>(animator: &mut WaveAnimator<QueuedScheduler>, frames: usize, fps: f64, mut on_frame: F)
where
    F: FnMut(usize, f64, &WaveStack),
{
    animator.start();
    for frame in 0..frames {
        let Some(handle) = animator.scheduler_mut().next_due() else {
            break;
        };
        let timestamp = frame_timestamp(frame, fps);
        if animator.advance_frame(handle, timestamp) {
            on_frame(frame, timestamp, animator.stack());
        }
    }
    animator.stop();
}
