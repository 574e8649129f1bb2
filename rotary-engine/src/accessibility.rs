//! Virtual accessibility targets for assistive technology.
//!
//! The wheel exposes three logical sub-targets: the value above the center,
//! the selected center value, and the value below. Each reports its display
//! text and whether it can be acted on; activating an edge target performs
//! one single step, equivalent to the first firing of a press-and-hold.
use crate::domain::{StepDirection, ValueDomain};
use crate::wheel::WheelEngine;
use crate::window::CENTER_SLOT;

/// One of the wheel's three logical accessibility sub-targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualTarget {
    /// The slot directly above the center: steps toward smaller values.
    Decrement,
    /// The selected center slot.
    Current,
    /// The slot directly below the center: steps toward larger values.
    Increment,
}

impl VirtualTarget {
    fn slot_index(self) -> usize {
        match self {
            Self::Decrement => CENTER_SLOT - 1,
            Self::Current => CENTER_SLOT,
            Self::Increment => CENTER_SLOT + 1,
        }
    }

    fn step_direction(self) -> Option<StepDirection> {
        match self {
            Self::Decrement => Some(StepDirection::Decrement),
            Self::Current => None,
            Self::Increment => Some(StepDirection::Increment),
        }
    }
}

/// Snapshot of one virtual target for the assistive layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
    /// Cached display text, when a formatter is installed and the slot
    /// holds a value.
    pub text: Option<String>,
    /// Whether activating the target would have an effect.
    pub enabled: bool,
}

impl<D: ValueDomain> WheelEngine<D> {
    /// Describes one virtual target: its display text and whether it can be
    /// activated. Edge targets disable at a clamped boundary.
    pub fn target_info(&self, target: VirtualTarget) -> TargetInfo {
        let text = self
            .window()
            .label(target.slot_index())
            .map(str::to_owned);
        let enabled = match target.step_direction() {
            Some(direction) => self.window().can_shift(direction),
            None => true,
        };
        TargetInfo { text, enabled }
    }

    /// Activates a virtual target. Edge targets perform one single step;
    /// the center target is already selected and does nothing. Returns
    /// whether the activation had any effect.
    pub fn activate(&mut self, target: VirtualTarget) -> bool {
        let Some(direction) = target.step_direction() else {
            return false;
        };
        if !self.window().can_shift(direction) {
            return false;
        }
        let frame = self.last_frame_nanos();
        self.step_by(direction.delta(), frame);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::IntegerDomain;
    use crate::notifier::WheelListener;
    use crate::wheel::WheelTuning;

    struct Recorder(Rc<RefCell<Vec<(i64, i64)>>>);

    impl WheelListener<i64> for Recorder {
        fn on_value_changed(&mut self, previous: &i64, current: &i64) {
            self.0.borrow_mut().push((*previous, *current));
        }
    }

    fn wheel(min: i64, max: i64, initial: i64) -> (WheelEngine<IntegerDomain>, Rc<RefCell<Vec<(i64, i64)>>>) {
        let mut engine =
            WheelEngine::new(IntegerDomain, min, max, initial, WheelTuning::default()).unwrap();
        let changes = Rc::new(RefCell::new(Vec::new()));
        engine.set_listener(Box::new(Recorder(changes.clone())));
        engine.set_formatter(Box::new(|v: &i64| v.to_string()));
        (engine, changes)
    }

    #[test]
    fn test_target_info_reports_neighbors() {
        let (engine, _) = wheel(0, 9, 5);
        let above = engine.target_info(VirtualTarget::Decrement);
        let center = engine.target_info(VirtualTarget::Current);
        let below = engine.target_info(VirtualTarget::Increment);
        assert_eq!(above.text.as_deref(), Some("4"));
        assert_eq!(center.text.as_deref(), Some("5"));
        assert_eq!(below.text.as_deref(), Some("6"));
        assert!(above.enabled && center.enabled && below.enabled);
    }

    #[test]
    fn test_edge_target_disabled_at_clamped_boundary() {
        let (engine, _) = wheel(0, 3, 0);
        let above = engine.target_info(VirtualTarget::Decrement);
        assert_eq!(above.text, None);
        assert!(!above.enabled);
        assert!(engine.target_info(VirtualTarget::Increment).enabled);
    }

    #[test]
    fn test_activate_steps_once() {
        let (mut engine, changes) = wheel(0, 9, 5);
        assert!(engine.activate(VirtualTarget::Increment));
        assert_eq!(*engine.value(), 6);
        assert!(engine.activate(VirtualTarget::Decrement));
        assert_eq!(*engine.value(), 5);
        assert_eq!(*changes.borrow(), vec![(5, 6), (6, 5)]);
    }

    #[test]
    fn test_activate_rejected_at_boundary() {
        let (mut engine, changes) = wheel(0, 3, 3);
        assert!(!engine.activate(VirtualTarget::Increment));
        assert_eq!(*engine.value(), 3);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_activate_center_is_noop() {
        let (mut engine, changes) = wheel(0, 9, 5);
        assert!(!engine.activate(VirtualTarget::Current));
        assert_eq!(*engine.value(), 5);
        assert!(changes.borrow().is_empty());
    }
}
