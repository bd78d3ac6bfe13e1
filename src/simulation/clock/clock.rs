//! Fixed-step reversible clock
//!
//! Simulation time is drained in sub-steps of `min_timestep` magnitude, signed
//! like the request, followed by one partial step for the remainder. Rewinding
//! by the amount a forward run consumed produces the same sub-step lengths.

use crate::core::math::sign;
use crate::core::{PhysicsError, PhysicsResult};
use crate::domain::constants::{MIN_TIMESTEP, SMALLEST_TIMESTEP};

/// Remainders this small relative to the sub-step are dropped.
const REMAINDER_EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    min_timestep: f64,
    accumulator: f64,
    elapsed: f64,
    time_scale: f64,
    time_reverse: bool,
    running: bool,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            min_timestep: MIN_TIMESTEP,
            accumulator: 0.0,
            elapsed: 0.0,
            time_scale: 1.0,
            time_reverse: false,
            running: true,
        }
    }

    pub fn min_timestep(&self) -> f64 { self.min_timestep }

    pub fn elapsed(&self) -> f64 { self.elapsed }

    pub fn time_scale(&self) -> f64 { self.time_scale }

    pub fn time_reverse(&self) -> bool { self.time_reverse }

    pub fn running(&self) -> bool { self.running }

    pub fn set_min_timestep(&mut self, step: f64) -> PhysicsResult<()> {
        if !step.is_finite() || step < SMALLEST_TIMESTEP {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "minimum timestep must be finite and at least 1e-6",
            });
        }
        self.min_timestep = step;
        Ok(())
    }

    pub fn set_time_scale(&mut self, scale: f64) -> PhysicsResult<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "time scale must be finite and non-negative",
            });
        }
        self.time_scale = scale;
        Ok(())
    }

    pub fn set_time_reverse(&mut self, reverse: bool) {
        self.time_reverse = reverse;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub(crate) fn reset(&mut self) {
        self.accumulator = 0.0;
        self.elapsed = 0.0;
    }

    /// Queue `delta` seconds of simulation time (any sign) and hand back the
    /// sub-steps that drain it. Works whether or not the clock is running.
    pub fn advance(&mut self, delta: f64) -> SubSteps {
        if !delta.is_finite() {
            return SubSteps::empty(self.min_timestep);
        }
        self.accumulator += delta;
        self.elapsed += delta;

        let remaining = std::mem::take(&mut self.accumulator);
        SubSteps::split(remaining, self.min_timestep)
    }

    /// Convert a wall-clock frame delta into simulation time. Does nothing while paused.
    pub fn frame(&mut self, wall_delta: f64) -> SubSteps {
        if !self.running {
            return SubSteps::empty(self.min_timestep);
        }
        let direction = if self.time_reverse { -1.0 } else { 1.0 };
        self.advance(wall_delta * self.time_scale * direction)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Sub-step lengths for one `advance` call.
///
/// The number of full steps is fixed up front, so the iterator ends even when
/// `remaining` is too large for a single step to change it in f64.
#[derive(Clone, Debug)]
pub struct SubSteps {
    full_steps: u64,
    step: f64,
    remainder: f64,
}

impl SubSteps {
    fn empty(min_step: f64) -> Self {
        Self { full_steps: 0, step: min_step, remainder: 0.0 }
    }

    fn split(remaining: f64, min_step: f64) -> Self {
        let full_steps = (remaining.abs() / min_step).floor();
        let step = min_step * sign(remaining);
        let remainder = remaining - step * full_steps;
        let remainder = if remainder.abs() > min_step * REMAINDER_EPSILON {
            remainder
        } else {
            0.0
        };
        // Saturates for absurd requests; f64 -> u64 casts clamp.
        Self { full_steps: full_steps as u64, step, remainder }
    }
}

impl Iterator for SubSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.full_steps > 0 {
            self.full_steps -= 1;
            return Some(self.step);
        }
        if self.remainder != 0.0 {
            return Some(std::mem::take(&mut self.remainder));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_with_step(step: f64) -> Clock {
        let mut clock = Clock::new();
        clock.set_min_timestep(step).unwrap();
        clock
    }

    #[test]
    fn drains_full_steps_then_the_remainder() {
        let mut clock = clock_with_step(0.25);
        let steps: Vec<f64> = clock.advance(0.6).collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], 0.25);
        assert_eq!(steps[1], 0.25);
        assert!((steps[2] - 0.1).abs() < 1e-12);
        assert!((clock.elapsed() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn negative_delta_yields_negative_steps() {
        let mut clock = clock_with_step(0.25);
        let steps: Vec<f64> = clock.advance(-0.5).collect();
        assert_eq!(steps, vec![-0.25, -0.25]);
        assert!((clock.elapsed() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_yields_nothing() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(0.0).count(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(f64::NAN).count(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn frame_respects_pause_scale_and_reverse() {
        let mut clock = clock_with_step(0.1);
        clock.pause();
        assert_eq!(clock.frame(1.0).count(), 0);
        assert_eq!(clock.elapsed(), 0.0);

        clock.resume();
        clock.set_time_scale(0.5).unwrap();
        clock.set_time_reverse(true);
        let total: f64 = clock.frame(0.4).sum();
        assert!((total + 0.2).abs() < 1e-12);
        assert!((clock.elapsed() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn advance_works_while_paused() {
        let mut clock = clock_with_step(0.1);
        clock.pause();
        let total: f64 = clock.advance(1.0).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn settings_are_validated() {
        let mut clock = Clock::new();
        assert!(clock.set_min_timestep(0.0).is_err());
        assert!(clock.set_min_timestep(1e-300).is_err());
        assert!(clock.set_time_scale(-1.0).is_err());
        assert!(clock.set_time_scale(f64::INFINITY).is_err());
        assert_eq!(clock.min_timestep(), MIN_TIMESTEP);
    }

    #[test]
    fn huge_requests_still_terminate() {
        let mut clock = clock_with_step(0.25);
        let mut steps = clock.advance(1e14);
        assert_eq!(steps.full_steps, 4e14 as u64);
        assert_eq!(steps.next(), Some(0.25));
        assert_eq!(steps.remainder, 0.0);

        // One step cannot move 1e14 in f64, the count still drops.
        let before = steps.full_steps;
        steps.next();
        assert_eq!(steps.full_steps, before - 1);
    }

    #[test]
    fn three_tenths_in_tenths_is_three_steps() {
        let mut clock = clock_with_step(0.1);
        let steps: Vec<f64> = clock.advance(0.3).collect();
        assert_eq!(steps.len(), 3);
        assert!((steps.iter().sum::<f64>() - 0.3).abs() < 1e-12);
    }
}
