//! Value domains for the selector wheel.
//!
//! A domain describes an ordered, discrete, steppable value space. The wheel
//! itself never knows what a value *is*; it only compares values, steps them
//! by a signed count, and measures distances between them. Calendar-typed
//! domains live in a separate crate and plug in through [`ValueDomain`].
use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// Direction of travel for a single selector step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward smaller values.
    Decrement,
    /// Toward larger values.
    Increment,
}

impl StepDirection {
    /// Signed unit delta for this direction.
    pub fn delta(self) -> i64 {
        match self {
            Self::Decrement => -1,
            Self::Increment => 1,
        }
    }

    /// The opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Decrement => Self::Increment,
            Self::Increment => Self::Decrement,
        }
    }
}

/// An ordered, discrete, steppable value space.
///
/// `step` performs plain arithmetic with no wraparound; wrapping past a bound
/// is the selector window's responsibility, not the domain's.
pub trait ValueDomain {
    /// The value type this domain ranges over.
    type Value: Clone + PartialEq + fmt::Debug;

    /// Total order over values.
    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Ordering;

    /// Steps `v` by `n` units (negative `n` steps backward).
    fn step(&self, v: &Self::Value, n: i64) -> Self::Value;

    /// Signed number of unit steps from `from` to `to`.
    fn distance(&self, from: &Self::Value, to: &Self::Value) -> i64;

    /// Position of `v` on the domain's own number line.
    ///
    /// Used by the long-press accelerator to snap to round-number
    /// boundaries. For integers this is the value itself; calendar domains
    /// report an epoch-day number.
    fn ordinal(&self, v: &Self::Value) -> i64;
}

/// Plain bounded integer domain with unit step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerDomain;

impl ValueDomain for IntegerDomain {
    type Value = i64;

    fn compare(&self, a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }

    fn step(&self, v: &i64, n: i64) -> i64 {
        v.saturating_add(n)
    }

    fn distance(&self, from: &i64, to: &i64) -> i64 {
        to.saturating_sub(*from)
    }

    fn ordinal(&self, v: &i64) -> i64 {
        *v
    }
}

/// Errors produced by wheel configuration setters.
///
/// Configuration errors are rejected synchronously and leave the prior valid
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A bounds update would leave the minimum above the maximum.
    #[error("minimum bound is above the maximum bound")]
    InvertedBounds,
}

/// Inclusive `min..=max` bounds over a domain's values.
///
/// Invariant: `min <= max`, enforced at construction and on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<V> {
    min: V,
    max: V,
}

impl<V: Clone + PartialEq + fmt::Debug> Bounds<V> {
    /// Creates bounds, rejecting an inverted pair.
    pub fn new<D>(domain: &D, min: V, max: V) -> Result<Self, ConfigError>
    where
        D: ValueDomain<Value = V>,
    {
        if domain.compare(&min, &max) == Ordering::Greater {
            return Err(ConfigError::InvertedBounds);
        }
        Ok(Self { min, max })
    }

    /// The inclusive minimum.
    pub fn min(&self) -> &V {
        &self.min
    }

    /// The inclusive maximum.
    pub fn max(&self) -> &V {
        &self.max
    }

    /// Replaces the minimum, rejecting `min > max`.
    pub fn set_min<D>(&mut self, domain: &D, min: V) -> Result<(), ConfigError>
    where
        D: ValueDomain<Value = V>,
    {
        if domain.compare(&min, &self.max) == Ordering::Greater {
            return Err(ConfigError::InvertedBounds);
        }
        self.min = min;
        Ok(())
    }

    /// Replaces the maximum, rejecting `max < min`.
    pub fn set_max<D>(&mut self, domain: &D, max: V) -> Result<(), ConfigError>
    where
        D: ValueDomain<Value = V>,
    {
        if domain.compare(&max, &self.min) == Ordering::Less {
            return Err(ConfigError::InvertedBounds);
        }
        self.max = max;
        Ok(())
    }

    /// Whether `v` lies inside the bounds.
    pub fn contains<D>(&self, domain: &D, v: &V) -> bool
    where
        D: ValueDomain<Value = V>,
    {
        domain.compare(v, &self.min) != Ordering::Less
            && domain.compare(v, &self.max) != Ordering::Greater
    }

    /// Clamps `v` to the nearer bound. Out-of-range values are never an
    /// error for callers.
    pub fn clamp<D>(&self, domain: &D, v: V) -> V
    where
        D: ValueDomain<Value = V>,
    {
        if domain.compare(&v, &self.min) == Ordering::Less {
            self.min.clone()
        } else if domain.compare(&v, &self.max) == Ordering::Greater {
            self.max.clone()
        } else {
            v
        }
    }

    /// Number of values in the inclusive range.
    pub fn span<D>(&self, domain: &D) -> i64
    where
        D: ValueDomain<Value = V>,
    {
        domain.distance(&self.min, &self.max).saturating_add(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_domain_step_and_distance() {
        let domain = IntegerDomain;
        assert_eq!(domain.step(&5, 3), 8);
        assert_eq!(domain.step(&5, -7), -2);
        assert_eq!(domain.distance(&3, &10), 7);
        assert_eq!(domain.distance(&10, &3), -7);
        assert_eq!(domain.ordinal(&42), 42);
        assert_eq!(domain.compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn test_bounds_rejects_inverted() {
        let domain = IntegerDomain;
        assert_eq!(
            Bounds::new(&domain, 10, 5),
            Err(ConfigError::InvertedBounds)
        );

        let mut bounds = Bounds::new(&domain, 0, 9).unwrap();
        assert_eq!(bounds.set_min(&domain, 12), Err(ConfigError::InvertedBounds));
        assert_eq!(bounds.set_max(&domain, -1), Err(ConfigError::InvertedBounds));
        // Prior state untouched after rejection.
        assert_eq!(*bounds.min(), 0);
        assert_eq!(*bounds.max(), 9);
    }

    #[test]
    fn test_bounds_clamp_and_span() {
        let domain = IntegerDomain;
        let bounds = Bounds::new(&domain, 0, 9).unwrap();
        assert_eq!(bounds.clamp(&domain, -3), 0);
        assert_eq!(bounds.clamp(&domain, 12), 9);
        assert_eq!(bounds.clamp(&domain, 4), 4);
        assert!(bounds.contains(&domain, &0));
        assert!(bounds.contains(&domain, &9));
        assert!(!bounds.contains(&domain, &10));
        assert_eq!(bounds.span(&domain), 10);
    }

    #[test]
    fn test_step_direction() {
        assert_eq!(StepDirection::Increment.delta(), 1);
        assert_eq!(StepDirection::Decrement.delta(), -1);
        assert_eq!(
            StepDirection::Increment.opposite(),
            StepDirection::Decrement
        );
    }
}
