//! Calendar-day value domain.
//!
//! Day arithmetic is never implemented here: it is delegated to an external
//! [`CalendarStepper`] so calendar irregularities such as month lengths stay
//! with the host's date library. The domain only adapts that collaborator to
//! the engine's [`ValueDomain`] seam.
use std::cmp::Ordering;
use std::fmt;

use rotary_engine::ValueDomain;

/// Date arithmetic collaborator.
///
/// `add_days` must be monotonic in `n`; `days_between` must be its inverse.
pub trait CalendarStepper<D> {
    /// `date` moved by `n` days (negative `n` moves backward).
    fn add_days(&self, date: &D, n: i64) -> D;

    /// Total order over dates.
    fn compare(&self, a: &D, b: &D) -> Ordering;

    /// Signed number of days from `from` to `to`.
    fn days_between(&self, from: &D, to: &D) -> i64;
}

/// One selectable day on a calendar wheel.
///
/// The wrapped solar date is the single source of truth; lunar presentation
/// is a display-time re-projection and never feeds back into arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<D> {
    /// The underlying solar date.
    pub date: D,
}

impl<D> CalendarDay<D> {
    /// Wraps a solar date.
    pub fn new(date: D) -> Self {
        Self { date }
    }
}

/// [`ValueDomain`] over calendar days, backed by a [`CalendarStepper`].
///
/// `epoch` anchors the ordinal number line: ordinals are day counts from the
/// epoch, which is what long-press acceleration rounds against.
pub struct CalendarDomain<D, S> {
    stepper: S,
    epoch: D,
}

impl<D, S> CalendarDomain<D, S>
where
    S: CalendarStepper<D>,
{
    /// Creates a domain anchored at `epoch`.
    pub fn new(stepper: S, epoch: D) -> Self {
        Self { stepper, epoch }
    }

    /// The date arithmetic collaborator.
    pub fn stepper(&self) -> &S {
        &self.stepper
    }
}

impl<D, S> ValueDomain for CalendarDomain<D, S>
where
    D: Clone + PartialEq + fmt::Debug,
    S: CalendarStepper<D>,
{
    type Value = CalendarDay<D>;

    fn compare(&self, a: &CalendarDay<D>, b: &CalendarDay<D>) -> Ordering {
        self.stepper.compare(&a.date, &b.date)
    }

    fn step(&self, v: &CalendarDay<D>, n: i64) -> CalendarDay<D> {
        CalendarDay::new(self.stepper.add_days(&v.date, n))
    }

    fn distance(&self, from: &CalendarDay<D>, to: &CalendarDay<D>) -> i64 {
        self.stepper.days_between(&from.date, &to.date)
    }

    fn ordinal(&self, v: &CalendarDay<D>) -> i64 {
        self.stepper.days_between(&self.epoch, &v.date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Test stepper over plain epoch-day numbers.
    pub(crate) struct EpochDays;

    impl CalendarStepper<i64> for EpochDays {
        fn add_days(&self, date: &i64, n: i64) -> i64 {
            date + n
        }

        fn compare(&self, a: &i64, b: &i64) -> Ordering {
            a.cmp(b)
        }

        fn days_between(&self, from: &i64, to: &i64) -> i64 {
            to - from
        }
    }

    #[test]
    fn test_domain_delegates_to_stepper() {
        let domain = CalendarDomain::new(EpochDays, 0);
        let day = CalendarDay::new(10);
        assert_eq!(domain.step(&day, 3), CalendarDay::new(13));
        assert_eq!(domain.step(&day, -11), CalendarDay::new(-1));
        assert_eq!(
            domain.distance(&CalendarDay::new(4), &CalendarDay::new(9)),
            5
        );
        assert_eq!(
            domain.compare(&CalendarDay::new(1), &CalendarDay::new(2)),
            Ordering::Less
        );
    }

    #[test]
    fn test_ordinal_counts_from_epoch() {
        let domain = CalendarDomain::new(EpochDays, 100);
        assert_eq!(domain.ordinal(&CalendarDay::new(147)), 47);
        assert_eq!(domain.ordinal(&CalendarDay::new(93)), -7);
    }
}
