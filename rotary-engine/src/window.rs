//! The fixed five-slot neighborhood of values centered on the current value.
//!
//! The window is the single place where logical value advances during a
//! scroll: one whole element of scroll offset maps to one [`shift`].
//! Wraparound and boundary clamping both live here; the domain itself only
//! does plain arithmetic.
//!
//! [`shift`]: SelectorWindow::shift
use std::cmp::Ordering;

use crate::domain::{Bounds, StepDirection, ValueDomain};

/// Number of visible slots in the selector window.
pub const WINDOW_LEN: usize = 5;

/// Index of the slot mirroring the current value.
pub const CENTER_SLOT: usize = 2;

/// Formats a value into its cached per-slot display string.
///
/// The engine never interprets the returned string; it only caches it so the
/// host does not re-format on every frame.
pub trait SlotFormatter<V> {
    /// Produces the display string for `value`.
    fn format(&self, value: &V) -> String;
}

impl<V, F> SlotFormatter<V> for F
where
    F: Fn(&V) -> String,
{
    fn format(&self, value: &V) -> String {
        self(value)
    }
}

/// One visible slot: a value, or the blank sentinel shown past a clamped
/// boundary when wrapping is disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<V> {
    /// A selectable value.
    Value(V),
    /// Out-of-range placeholder; never selectable.
    Blank,
}

impl<V> Slot<V> {
    /// The contained value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Blank => None,
        }
    }

    /// Whether this slot is the blank sentinel.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Result of attempting to advance the window by one step.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftOutcome<V> {
    /// The window advanced; the center moved from `previous` to `current`.
    Shifted {
        /// Center value before the shift.
        previous: V,
        /// Center value after the shift.
        current: V,
    },
    /// The shift was rejected at a clamped boundary; the offset controller
    /// must snap back to the last valid alignment.
    Rejected,
}

/// Fixed-size window of values centered on the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorWindow<V> {
    slots: [Slot<V>; WINDOW_LEN],
    labels: [Option<String>; WINDOW_LEN],
}

impl<V: Clone + PartialEq + std::fmt::Debug> SelectorWindow<V> {
    /// Builds a window centered on `current`.
    pub fn new<D>(
        domain: &D,
        bounds: &Bounds<V>,
        wrap: bool,
        current: &V,
        formatter: Option<&dyn SlotFormatter<V>>,
    ) -> Self
    where
        D: ValueDomain<Value = V>,
    {
        let mut window = Self {
            slots: std::array::from_fn(|_| Slot::Blank),
            labels: std::array::from_fn(|_| None),
        };
        window.rebuild_around(domain, bounds, wrap, current, formatter);
        window
    }

    /// Repopulates every slot so that the center holds `current` and each
    /// neighbor is one step away, wrapping or blanking past the bounds.
    pub fn rebuild_around<D>(
        &mut self,
        domain: &D,
        bounds: &Bounds<V>,
        wrap: bool,
        current: &V,
        formatter: Option<&dyn SlotFormatter<V>>,
    ) where
        D: ValueDomain<Value = V>,
    {
        for i in 0..WINDOW_LEN {
            let offset = i as i64 - CENTER_SLOT as i64;
            let slot = neighbor(domain, bounds, wrap, current, offset);
            self.labels[i] = match (&slot, formatter) {
                (Slot::Value(v), Some(f)) => Some(f.format(v)),
                _ => None,
            };
            self.slots[i] = slot;
        }
    }

    /// Advances the window one step in `direction`.
    ///
    /// O(1): slots rotate in place and only the new edge is recomputed. The
    /// only allocation is the edge label when a formatter is installed.
    pub fn shift<D>(
        &mut self,
        domain: &D,
        bounds: &Bounds<V>,
        wrap: bool,
        direction: StepDirection,
        formatter: Option<&dyn SlotFormatter<V>>,
    ) -> ShiftOutcome<V>
    where
        D: ValueDomain<Value = V>,
    {
        if !self.can_shift(direction) {
            return ShiftOutcome::Rejected;
        }
        let previous = self.current().clone();

        match direction {
            StepDirection::Increment => {
                self.slots.rotate_left(1);
                self.labels.rotate_left(1);
            }
            StepDirection::Decrement => {
                self.slots.rotate_right(1);
                self.labels.rotate_right(1);
            }
        }

        let current = self.current().clone();
        let edge = match direction {
            StepDirection::Increment => WINDOW_LEN - 1,
            StepDirection::Decrement => 0,
        };
        let edge_offset = edge as i64 - CENTER_SLOT as i64;
        let slot = neighbor(domain, bounds, wrap, &current, edge_offset);
        self.labels[edge] = match (&slot, formatter) {
            (Slot::Value(v), Some(f)) => Some(f.format(v)),
            _ => None,
        };
        self.slots[edge] = slot;

        ShiftOutcome::Shifted { previous, current }
    }

    /// Whether a shift in `direction` would be accepted.
    pub fn can_shift(&self, direction: StepDirection) -> bool {
        let adjacent = match direction {
            StepDirection::Increment => CENTER_SLOT + 1,
            StepDirection::Decrement => CENTER_SLOT - 1,
        };
        !self.slots[adjacent].is_blank()
    }

    /// The authoritative current value (the window center).
    pub fn current(&self) -> &V {
        match &self.slots[CENTER_SLOT] {
            Slot::Value(v) => v,
            Slot::Blank => unreachable!("window center always holds a value"),
        }
    }

    /// All five slots, top to bottom.
    pub fn slots(&self) -> &[Slot<V>; WINDOW_LEN] {
        &self.slots
    }

    /// Cached display label for slot `index`, if one has been formatted.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).and_then(|l| l.as_deref())
    }
}

/// Value `offset` steps away from `from`, wrapped to the opposite bound or
/// blanked depending on the wrap policy.
fn neighbor<D, V>(
    domain: &D,
    bounds: &Bounds<V>,
    wrap: bool,
    from: &V,
    offset: i64,
) -> Slot<V>
where
    D: ValueDomain<Value = V>,
    V: Clone + PartialEq + std::fmt::Debug,
{
    if offset == 0 {
        return Slot::Value(from.clone());
    }
    let raw = domain.step(from, offset);
    let span = bounds.span(domain);
    if domain.compare(&raw, bounds.max()) == Ordering::Greater {
        if wrap {
            Slot::Value(domain.step(&raw, -span))
        } else {
            Slot::Blank
        }
    } else if domain.compare(&raw, bounds.min()) == Ordering::Less {
        if wrap {
            Slot::Value(domain.step(&raw, span))
        } else {
            Slot::Blank
        }
    } else {
        Slot::Value(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::IntegerDomain;

    fn values(window: &SelectorWindow<i64>) -> Vec<Option<i64>> {
        window.slots().iter().map(|s| s.value().copied()).collect()
    }

    #[test]
    fn test_rebuild_with_wrap() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let window = SelectorWindow::new(&domain, &bounds, true, &0, None);
        assert_eq!(
            values(&window),
            vec![Some(8), Some(9), Some(0), Some(1), Some(2)]
        );
        assert_eq!(*window.current(), 0);
    }

    #[test]
    fn test_rebuild_clamped_blanks_edges() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let window = SelectorWindow::new(&domain, &bounds, false, &0, None);
        assert_eq!(values(&window), vec![None, None, Some(0), Some(1), Some(2)]);
        assert!(!window.can_shift(StepDirection::Decrement));
        assert!(window.can_shift(StepDirection::Increment));
    }

    #[test]
    fn test_shift_advances_center() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let mut window = SelectorWindow::new(&domain, &bounds, true, &4, None);
        let outcome = window.shift(&domain, &bounds, true, StepDirection::Increment, None);
        assert_eq!(
            outcome,
            ShiftOutcome::Shifted {
                previous: 4,
                current: 5
            }
        );
        assert_eq!(
            values(&window),
            vec![Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
    }

    #[test]
    fn test_wrap_invariant_full_cycle() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let mut window = SelectorWindow::new(&domain, &bounds, true, &7, None);
        for _ in 0..10 {
            let outcome = window.shift(&domain, &bounds, true, StepDirection::Increment, None);
            assert!(matches!(outcome, ShiftOutcome::Shifted { .. }));
        }
        assert_eq!(*window.current(), 7);
    }

    #[test]
    fn test_shift_rejected_at_clamped_boundary() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let mut window = SelectorWindow::new(&domain, &bounds, false, &9, None);
        assert_eq!(
            window.shift(&domain, &bounds, false, StepDirection::Increment, None),
            ShiftOutcome::Rejected
        );
        assert_eq!(*window.current(), 9);

        // Shifting away from the boundary still works.
        let outcome = window.shift(&domain, &bounds, false, StepDirection::Decrement, None);
        assert_eq!(
            outcome,
            ShiftOutcome::Shifted {
                previous: 9,
                current: 8
            }
        );
    }

    #[test]
    fn test_labels_cached_and_rotated() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let formatter = |v: &i64| format!("#{v}");
        let mut window =
            SelectorWindow::new(&domain, &bounds, true, &4, Some(&formatter));
        assert_eq!(window.label(CENTER_SLOT), Some("#4"));
        assert_eq!(window.label(0), Some("#2"));

        window.shift(
            &domain,
            &bounds,
            true,
            StepDirection::Increment,
            Some(&formatter),
        );
        assert_eq!(window.label(CENTER_SLOT), Some("#5"));
        assert_eq!(window.label(WINDOW_LEN - 1), Some("#7"));
    }

    #[test]
    fn test_blank_slots_have_no_labels() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        let formatter = |v: &i64| v.to_string();
        let window = SelectorWindow::new(&domain, &bounds, false, &9, Some(&formatter));
        assert_eq!(window.label(WINDOW_LEN - 1), None);
        assert_eq!(window.label(CENTER_SLOT), Some("9"));
    }
}
