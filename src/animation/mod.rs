//! Timing helpers shared by the operation machines.
//!
//! Machines count ticks themselves; [`clock`] turns those counters into
//! clamped progress fractions and [`easing`] shapes the fraction used by
//! move animations.

pub mod clock;
pub mod easing;

pub use easing::EasingFunction;
