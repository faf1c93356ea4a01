use ossuary_core::{EntityId, TickContext};

use crate::bt::{Node, Status};

/// Relative slack on the finish line, so a duration that is a whole number of steps is not
/// pushed one tick late by rounding in the step itself.
const FINISH_TOLERANCE: f64 = 1e-6;

/// Runs for `duration` seconds of accumulated `dt`, then succeeds once and starts over.
///
/// With a constant step `d` the success lands on tick `ceil(duration / d)`. Time is summed in
/// `f64` so long waits at small steps do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    duration: f64,
    elapsed: f64,
}

impl Wait {
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn seconds(seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "wait duration must be finite and non-negative, got {seconds}"
        );
        Self {
            duration: f64::from(seconds),
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

impl<W: 'static> Node<W> for Wait {
    fn tick(&mut self, ctx: &TickContext, _agent: EntityId, _world: &mut W) -> Status {
        self.elapsed += f64::from(ctx.dt_seconds);
        if self.elapsed >= self.duration * (1.0 - FINISH_TOLERANCE) {
            self.elapsed = 0.0;
            Status::Success
        } else {
            Status::Running
        }
    }
}
