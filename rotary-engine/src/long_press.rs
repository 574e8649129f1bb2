//! Long-press acceleration for the increment/decrement edges.
//!
//! A sustained press repeats on a cooperative deadline serviced from the
//! frame tick. The first two firings step by one; from the third firing on
//! the step snaps the value to the next round-ten boundary in the travel
//! direction and then continues by tens.
use crate::domain::StepDirection;

/// Number of single-unit firings before round-ten acceleration kicks in.
const FIRINGS_BEFORE_ACCELERATION: u32 = 2;

/// Lifecycle state of one press-and-hold: created on long-press down,
/// advanced once per repeat interval, destroyed on release or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongPressAccelerator {
    direction: StepDirection,
    fired: u32,
    next_deadline_nanos: u64,
}

impl LongPressAccelerator {
    /// Starts a hold in `direction`; the first firing is due immediately.
    pub fn new(direction: StepDirection, now_nanos: u64) -> Self {
        Self {
            direction,
            fired: 0,
            next_deadline_nanos: now_nanos,
        }
    }

    /// Direction of travel for this hold.
    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    /// Whether the next repeat deadline has passed.
    pub fn is_due(&self, now_nanos: u64) -> bool {
        now_nanos >= self.next_deadline_nanos
    }

    /// Signed step count for the next firing, given the current value's
    /// position on the domain's number line.
    pub fn step_for(&self, ordinal: i64) -> i64 {
        if self.fired < FIRINGS_BEFORE_ACCELERATION {
            self.direction.delta()
        } else {
            steps_to_round_ten(ordinal, self.direction)
        }
    }

    /// Records a firing and schedules the next deadline.
    pub fn advance(&mut self, now_nanos: u64, interval_nanos: u64) {
        self.fired = self.fired.saturating_add(1);
        self.next_deadline_nanos = now_nanos.saturating_add(interval_nanos);
    }
}

/// Signed steps from `ordinal` to the next multiple-of-ten boundary in
/// `direction`; a full ten when already on a boundary.
fn steps_to_round_ten(ordinal: i64, direction: StepDirection) -> i64 {
    let remainder = ordinal.rem_euclid(10);
    match direction {
        StepDirection::Increment => {
            if remainder == 0 {
                10
            } else {
                10 - remainder
            }
        }
        StepDirection::Decrement => {
            if remainder == 0 {
                -10
            } else {
                -remainder
            }
        }
    }
}
