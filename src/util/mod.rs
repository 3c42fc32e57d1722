//! Shared utilities for the camera engine.
//!
//! Easing curves for camera transitions and frame timing for the loop that
//! drives them.

pub mod easing;
pub mod frame_timing;
