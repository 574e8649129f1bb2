//! Change notification and feedback throttling.
//!
//! The notifier fires exactly once per completed window shift and decouples
//! value events from sound/haptic feedback: feedback is throttled to at most
//! once per animation frame even when a single frame crosses several steps.
use tracing::trace;

use crate::wheel::ScrollState;

/// Observer for wheel value and scroll-state changes.
///
/// Callbacks run only after the engine has reached a consistent post-shift
/// state, so a callback that panics never leaves the wheel mid-shift.
pub trait WheelListener<V> {
    /// A completed shift moved the current value from `previous` to
    /// `current`. Fired exactly once per crossed step, in order.
    fn on_value_changed(&mut self, previous: &V, current: &V);

    /// The public scroll state changed.
    fn on_scroll_state_changed(&mut self, state: ScrollState) {
        let _ = state;
    }
}

/// Sound/haptic hook, throttled by the notifier's per-frame guard.
pub trait FeedbackSink {
    /// Play one step's worth of feedback.
    fn on_step_feedback(&mut self);
}

/// Dispatches listener events and throttles feedback per frame.
pub struct ChangeNotifier<V> {
    listener: Option<Box<dyn WheelListener<V>>>,
    feedback: Option<Box<dyn FeedbackSink>>,
    feedback_frame: Option<u64>,
}

impl<V> Default for ChangeNotifier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChangeNotifier<V> {
    /// Creates a notifier with no listener or feedback sink installed.
    pub fn new() -> Self {
        Self {
            listener: None,
            feedback: None,
            feedback_frame: None,
        }
    }

    /// Installs the value/state listener.
    pub fn set_listener(&mut self, listener: Box<dyn WheelListener<V>>) {
        self.listener = Some(listener);
    }

    /// Installs the feedback sink.
    pub fn set_feedback(&mut self, feedback: Box<dyn FeedbackSink>) {
        self.feedback = Some(feedback);
    }

    /// Notifies one completed gesture shift: a value event plus feedback,
    /// the latter at most once per `frame_nanos`.
    pub fn notify_shift(&mut self, previous: &V, current: &V, frame_nanos: u64) {
        if self.feedback_frame != Some(frame_nanos) {
            self.feedback_frame = Some(frame_nanos);
            if let Some(feedback) = self.feedback.as_mut() {
                feedback.on_step_feedback();
            }
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_value_changed(previous, current);
        }
    }

    /// Notifies a programmatic value change. No feedback: sound/haptic is
    /// gesture feedback only.
    pub fn notify_value_changed(&mut self, previous: &V, current: &V) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_value_changed(previous, current);
        }
    }

    /// Notifies a public scroll-state transition.
    pub fn notify_scroll_state(&mut self, state: ScrollState) {
        trace!(?state, "wheel scroll state changed");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_scroll_state_changed(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Recorder {
        changes: Rc<RefCell<Vec<(i64, i64)>>>,
        states: Rc<RefCell<Vec<ScrollState>>>,
    }

    impl WheelListener<i64> for Recorder {
        fn on_value_changed(&mut self, previous: &i64, current: &i64) {
            self.changes.borrow_mut().push((*previous, *current));
        }

        fn on_scroll_state_changed(&mut self, state: ScrollState) {
            self.states.borrow_mut().push(state);
        }
    }

    struct Clicker(Rc<RefCell<u32>>);

    impl FeedbackSink for Clicker {
        fn on_step_feedback(&mut self) {
            *self.0.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_value_events_fire_per_shift() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let states = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.set_listener(Box::new(Recorder {
            changes: changes.clone(),
            states: states.clone(),
        }));

        notifier.notify_shift(&1, &2, 100);
        notifier.notify_shift(&2, &3, 100);
        notifier.notify_scroll_state(ScrollState::Idle);
        assert_eq!(*changes.borrow(), vec![(1, 2), (2, 3)]);
        assert_eq!(*states.borrow(), vec![ScrollState::Idle]);
    }

    #[test]
    fn test_feedback_throttled_to_one_per_frame() {
        let clicks = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::<i64>::new();
        notifier.set_feedback(Box::new(Clicker(clicks.clone())));

        // Three steps crossed within one frame: one click.
        notifier.notify_shift(&0, &1, 16);
        notifier.notify_shift(&1, &2, 16);
        notifier.notify_shift(&2, &3, 16);
        assert_eq!(*clicks.borrow(), 1);

        // The guard resets on the next frame boundary.
        notifier.notify_shift(&3, &4, 32);
        assert_eq!(*clicks.borrow(), 2);
    }

    #[test]
    fn test_programmatic_change_plays_no_feedback() {
        let clicks = Rc::new(RefCell::new(0));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.set_feedback(Box::new(Clicker(clicks.clone())));
        notifier.set_listener(Box::new(Recorder {
            changes: changes.clone(),
            states: Rc::new(RefCell::new(Vec::new())),
        }));

        notifier.notify_value_changed(&5, &7);
        assert_eq!(*clicks.borrow(), 0);
        assert_eq!(*changes.borrow(), vec![(5, 7)]);
    }
}
