//! Calendar adapter for the rotary selector-wheel engine.
//!
//! Provides the calendar-day [`ValueDomain`](rotary_engine::ValueDomain)
//! used by date wheels. Day arithmetic is delegated to a host-supplied
//! [`CalendarStepper`]; lunar display is an optional notification-time
//! re-projection through a [`LunarConverter`], never a second value
//! representation.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod domain;
pub mod lunar;

pub use domain::{CalendarDay, CalendarDomain, CalendarStepper};
pub use lunar::{LunarConverter, LunarDate, LunarDayListener, LunarPresentation};
