//! Headless scroll engine for circular selector-wheel value pickers.
//!
//! A wheel shows a five-slot window of discrete values with the selected one
//! at the center. This crate owns everything between normalized input and
//! value-change events: the scroll offset, drag/fling/snap physics, the
//! window over an abstract [`ValueDomain`], long-press acceleration, change
//! notification, and the virtual accessibility targets. It draws nothing and
//! reads no clock; the host renders the slots and drives [`WheelEngine::tick`]
//! with frame timestamps.
//!
//! # Usage
//!
//! ```
//! use rotary_engine::{IntegerDomain, WheelEngine, WheelTuning};
//!
//! let tuning = WheelTuning::default().element_height(48.0);
//! let mut wheel = WheelEngine::new(IntegerDomain, 0, 59, 30, tuning)?;
//! wheel.set_formatter(Box::new(|v: &i64| format!("{v:02}")));
//!
//! wheel.on_drag_start();
//! wheel.on_drag_delta(96.0); // two elements of travel
//! assert_eq!(*wheel.value(), 32);
//! wheel.on_release(0.0, 0);
//! # Ok::<(), rotary_engine::ConfigError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod accessibility;
pub mod domain;
pub mod long_press;
pub mod notifier;
pub mod scroller;
pub mod wheel;
pub mod window;

pub use accessibility::{TargetInfo, VirtualTarget};
pub use domain::{Bounds, ConfigError, IntegerDomain, StepDirection, ValueDomain};
pub use notifier::{FeedbackSink, WheelListener};
pub use wheel::{ScrollState, WheelEngine, WheelTuning};
pub use window::{CENTER_SLOT, SelectorWindow, ShiftOutcome, Slot, SlotFormatter, WINDOW_LEN};
