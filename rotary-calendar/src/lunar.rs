//! Lunar presentation mode.
//!
//! Lunar mode never changes wheel arithmetic: the engine keeps stepping the
//! continuous solar calendar, and this module re-expresses value events
//! through an external lunar/solar converter at notification time. Without a
//! converter the wheel simply stays solar.
use std::marker::PhantomData;

use rotary_engine::{ScrollState, WheelListener};
use tracing::trace;

use crate::domain::CalendarDay;

/// A date re-projected into the lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// Lunar year.
    pub year: i32,
    /// Lunar month, 1-based.
    pub month: u32,
    /// Lunar day of month, 1-based.
    pub day: u32,
    /// Whether this falls in a leap month.
    pub is_leap_month: bool,
}

/// Lunar/solar conversion collaborator.
pub trait LunarConverter<D> {
    /// Projects a solar date into the lunar calendar.
    fn solar_to_lunar(&self, date: &D) -> LunarDate;

    /// Resolves a lunar date back to its solar date.
    fn lunar_to_solar(&self, lunar: &LunarDate) -> D;

    /// Whether `month` of lunar `year` is a leap month.
    fn is_leap_month(&self, year: i32, month: u32) -> bool;
}

/// Observer for lunar-presented day changes.
pub trait LunarDayListener {
    /// The selected day changed; both endpoints are lunar projections.
    fn on_day_changed(&mut self, previous: &LunarDate, current: &LunarDate);

    /// The wheel's public scroll state changed.
    fn on_scroll_state_changed(&mut self, state: ScrollState) {
        let _ = state;
    }
}

/// Listener decorator that re-expresses calendar value events as lunar
/// dates before forwarding them.
///
/// Install it on the engine in place of a plain listener:
/// `engine.set_listener(Box::new(LunarPresentation::new(converter, inner)))`.
pub struct LunarPresentation<D, C, L> {
    converter: C,
    inner: L,
    _date: PhantomData<D>,
}

impl<D, C, L> LunarPresentation<D, C, L>
where
    C: LunarConverter<D>,
    L: LunarDayListener,
{
    /// Wraps `inner` behind `converter`.
    pub fn new(converter: C, inner: L) -> Self {
        Self {
            converter,
            inner,
            _date: PhantomData,
        }
    }

    /// Projects an arbitrary solar date, for label formatting.
    pub fn project(&self, date: &D) -> LunarDate {
        self.converter.solar_to_lunar(date)
    }
}

impl<D, C, L> WheelListener<CalendarDay<D>> for LunarPresentation<D, C, L>
where
    C: LunarConverter<D>,
    L: LunarDayListener,
{
    fn on_value_changed(&mut self, previous: &CalendarDay<D>, current: &CalendarDay<D>) {
        let previous = self.converter.solar_to_lunar(&previous.date);
        let current = self.converter.solar_to_lunar(&current.date);
        trace!(?previous, ?current, "lunar day changed");
        self.inner.on_day_changed(&previous, &current);
    }

    fn on_scroll_state_changed(&mut self, state: ScrollState) {
        self.inner.on_scroll_state_changed(state);
    }
}
