//! Shared utilities for driving the visualizer in real time.

pub mod frame_timing;
