//! Real-time pacing for the tick loop.

use std::time::Duration;

use web_time::Instant;

/// Frame pacing for a real-time tick loop, with smoothed rate tracking.
///
/// The engine itself counts ticks, not seconds. This only decides when the
/// driver should issue the next tick.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target ticks per second (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target rate
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed rate using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given target rate (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
        }
    }

    /// Target rate, 0 when unlimited.
    #[must_use]
    pub const fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Whether enough time has passed since the last frame to tick again.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Time left before the next tick is due.
    #[must_use]
    pub fn until_next(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Sleep until the next tick is due.
    pub fn wait(&self) {
        let remaining = self.until_next();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Call after ticking to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed tick rate.
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_ticks() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_tick());
        assert_eq!(timing.until_next(), Duration::ZERO);
    }

    #[test]
    fn test_limited_waits_for_frame() {
        let mut timing = FrameTiming::new(10);
        timing.end_frame();
        assert!(timing.until_next() <= Duration::from_millis(100));
        timing.wait();
        assert!(timing.should_tick());
    }

    #[test]
    fn test_fps_stays_positive() {
        let mut timing = FrameTiming::new(1000);
        for _ in 0..3 {
            timing.wait();
            timing.end_frame();
        }
        assert!(timing.fps() > 0.0);
        assert_eq!(timing.target_fps(), 1000);
    }
}
