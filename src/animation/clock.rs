//! Tick-count to progress conversion.
//!
//! Stateless: every machine keeps its own elapsed-tick counter and asks the
//! clock how far through a fixed-length span it is.

use glam::Vec2;

/// Normalized progress (0.0 to 1.0) of `elapsed` ticks through a span of
/// `duration` ticks. A zero-length span is always complete.
#[must_use]
pub fn progress(elapsed: u32, duration: u32) -> f32 {
    if duration == 0 {
        1.0
    } else {
        (elapsed as f32 / duration as f32).min(1.0)
    }
}

/// Whether a span of `duration` ticks has run its course.
#[must_use]
pub fn is_complete(elapsed: u32, duration: u32) -> bool {
    elapsed >= duration
}

/// Whether a flash that toggles every half `period` is lit at `elapsed`.
#[must_use]
pub fn flash_lit(elapsed: u32, period: u32) -> bool {
    if period < 2 {
        return true;
    }
    elapsed % period < period / 2
}

/// Linear interpolation between two positions.
#[must_use]
pub fn lerp(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    start + (end - start) * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 24), 0.0);
        assert!((progress(12, 24) - 0.5).abs() < 1e-6);
        assert_eq!(progress(24, 24), 1.0);
        // Past end (clamped)
        assert_eq!(progress(48, 24), 1.0);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        assert_eq!(progress(0, 0), 1.0);
        assert!(is_complete(0, 0));
    }

    #[test]
    fn test_is_complete() {
        assert!(!is_complete(29, 30));
        assert!(is_complete(30, 30));
    }

    #[test]
    fn test_flash_lit_alternates() {
        let lit: Vec<bool> = (0..8).map(|t| flash_lit(t, 4)).collect();
        assert_eq!(
            lit,
            vec![true, true, false, false, true, true, false, false]
        );
        assert!(flash_lit(5, 1));
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp(Vec2::ZERO, Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, -2.0));
    }
}
