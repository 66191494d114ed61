//! Simulation clock with an explicit time scale.
//!
//! A time scale of zero (or below) pauses the simulation: the scaled delta
//! becomes zero and state stepping and transitions are inert.

use serde::{Deserialize, Serialize};

/// Delta and timestamp of the tick being simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Scaled seconds since the previous tick.
    pub delta: f32,
    /// Scaled seconds since the simulation started.
    pub time: f32,
}

impl FrameTime {
    /// Creates a frame time.
    #[must_use]
    pub const fn new(delta: f32, time: f32) -> Self {
        Self { delta, time }
    }
}

/// Simulation clock.
///
/// # Example
///
/// ```
/// use stride_core::clock::Clock;
///
/// let mut clock = Clock::new();
/// clock.advance(0.5);
/// assert!(clock.is_running());
/// assert!((clock.time() - 0.5).abs() < f32::EPSILON);
///
/// clock.pause();
/// clock.advance(0.5);
/// assert!(!clock.is_running());
/// assert_eq!(clock.delta(), 0.0);
/// assert!((clock.time() - 0.5).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    delta: f32,
    time: f32,
    time_scale: f32,
    frame: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Creates a running clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delta: 0.0,
            time: 0.0,
            time_scale: 1.0,
            frame: 0,
        }
    }

    /// Advances by `unscaled_delta` seconds, applying the time scale.
    pub fn advance(&mut self, unscaled_delta: f32) {
        self.delta = unscaled_delta.max(0.0) * self.time_scale.max(0.0);
        self.time += self.delta;
        self.frame += 1;
    }

    /// Scaled delta of the last advance.
    #[must_use]
    pub const fn delta(&self) -> f32 {
        self.delta
    }

    /// Scaled time since start.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Number of advances so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Current time scale.
    #[must_use]
    pub const fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the time scale. Values at or below zero pause.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    /// Pauses the clock.
    pub fn pause(&mut self) {
        self.time_scale = 0.0;
    }

    /// Resumes at normal speed.
    pub fn resume(&mut self) {
        self.time_scale = 1.0;
    }

    /// Returns `true` unless paused.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.time_scale > 0.0
    }

    /// Delta and timestamp of the current tick.
    #[must_use]
    pub const fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.delta, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_is_running() {
        let clock = Clock::new();
        assert!(clock.is_running());
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn time_scale_scales_delta() {
        let mut clock = Clock::new();
        clock.set_time_scale(0.5);
        clock.advance(0.1);
        assert!((clock.delta() - 0.05).abs() < 1e-7);
    }

    #[test]
    fn negative_scale_is_paused() {
        let mut clock = Clock::new();
        clock.set_time_scale(-1.0);
        assert!(!clock.is_running());
        clock.advance(1.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn resume_restores_unit_scale() {
        let mut clock = Clock::new();
        clock.pause();
        clock.resume();
        assert!((clock.time_scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn frames_count_even_when_paused() {
        let mut clock = Clock::new();
        clock.pause();
        clock.advance(0.016);
        clock.advance(0.016);
        assert_eq!(clock.frame(), 2);
    }
}
