//! The selector-wheel scroll engine.
//!
//! [`WheelEngine`] owns the scalar scroll offset, maps accumulated offset
//! deltas into selector-window shifts, and drives one scroller strategy at a
//! time: direct drag follow, ballistic fling, timed snap-adjust, or the
//! scripted intro. It is single-threaded and frame-driven: the host feeds it
//! normalized drag samples, release velocities, and per-frame `tick` calls
//! carrying nanosecond timestamps, and consumes value/state events through
//! the listener seam.
use std::time::Duration;

use derive_setters::Setters;
use tracing::{debug, warn};

use crate::domain::{Bounds, ConfigError, StepDirection, ValueDomain};
use crate::long_press::LongPressAccelerator;
use crate::notifier::{ChangeNotifier, FeedbackSink, WheelListener};
use crate::scroller::{FlingScroller, IntroScroller, Scroller, SnapScroller};
use crate::window::{SelectorWindow, ShiftOutcome, Slot, SlotFormatter, WINDOW_LEN};

const DEFAULT_MIN_FLING_VELOCITY: f32 = 150.0;
const DEFAULT_MAX_FLING_VELOCITY: f32 = 8000.0;
const DEFAULT_FLING_DECAY: f32 = 4.5;
const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);
const DEFAULT_INTRO_DURATION: Duration = Duration::from_millis(900);
const DEFAULT_INTRO_TRAVEL_FRACTION: f32 = 0.45;
const DEFAULT_LONG_PRESS_INTERVAL: Duration = Duration::from_millis(300);
const DEFAULT_LONG_PRESS_SKIP_INTERVAL: Duration = Duration::from_millis(600);

/// Externally visible scroll state, reported through the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// Settled; the offset is perfectly aligned.
    Idle,
    /// A finger is driving the offset directly.
    TouchScroll,
    /// An animated scroller (fling or snap-adjust) is driving the offset.
    Fling,
}

/// Internal phase machine; richer than the public [`ScrollState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    TouchScroll,
    Fling,
    SnapAdjust,
    Intro,
}

impl Phase {
    /// Public mapping: animated phases report `Fling`, except the decorative
    /// intro which is invisible to the listener.
    fn public(self) -> ScrollState {
        match self {
            Self::Idle | Self::Intro => ScrollState::Idle,
            Self::TouchScroll => ScrollState::TouchScroll,
            Self::Fling | Self::SnapAdjust => ScrollState::Fling,
        }
    }
}

/// Physics and timing parameters for a wheel.
///
/// `element_height` is the pixel height of one value slot; zero means layout
/// has not happened yet and all scroll operations are deferred.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct WheelTuning {
    /// Pixels of offset per one value step. Zero until laid out.
    pub element_height: f32,
    /// Release speeds at or below this settle via snap-adjust instead of a
    /// fling (pixels per second).
    pub min_fling_velocity: f32,
    /// Release speeds are clamped to this magnitude (pixels per second).
    pub max_fling_velocity: f32,
    /// Exponential decay constant for fling deceleration (per second).
    pub fling_decay: f32,
    /// Duration of the snap-adjust corrective animation.
    pub snap_duration: Duration,
    /// Duration of the scripted intro animation.
    pub intro_duration: Duration,
    /// Intro excursion as a fraction of `element_height`; below one so the
    /// intro never crosses a value boundary.
    pub intro_travel_fraction: f32,
    /// Repeat interval while a long press is held.
    pub long_press_interval: Duration,
    /// Lengthened repeat interval while skip mode is active.
    pub long_press_skip_interval: Duration,
}

impl Default for WheelTuning {
    fn default() -> Self {
        Self {
            element_height: 0.0,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            fling_decay: DEFAULT_FLING_DECAY,
            snap_duration: DEFAULT_SNAP_DURATION,
            intro_duration: DEFAULT_INTRO_DURATION,
            intro_travel_fraction: DEFAULT_INTRO_TRAVEL_FRACTION,
            long_press_interval: DEFAULT_LONG_PRESS_INTERVAL,
            long_press_skip_interval: DEFAULT_LONG_PRESS_SKIP_INTERVAL,
        }
    }
}

/// The circular selector-wheel scroll engine.
///
/// One instance per wheel. All state lives here; there are no process-wide
/// formatters or caches, and the engine never probes its host for optional
/// behavior at runtime: everything optional arrives through configuration.
pub struct WheelEngine<D: ValueDomain> {
    domain: D,
    bounds: Bounds<D::Value>,
    wrap_preferred: bool,
    wrap: bool,
    current: D::Value,
    window: SelectorWindow<D::Value>,
    formatter: Option<Box<dyn SlotFormatter<D::Value>>>,
    notifier: ChangeNotifier<D::Value>,
    tuning: WheelTuning,
    skip_on_long_press: bool,
    phase: Phase,
    reported_state: ScrollState,
    scroll_offset: f32,
    initial_offset: f32,
    scroller: Option<Scroller>,
    last_scroller_offset: f32,
    last_travel: Option<StepDirection>,
    long_press: Option<LongPressAccelerator>,
    pending_intro: bool,
    pending_fling: Option<f32>,
    last_frame_nanos: u64,
}

impl<D: ValueDomain> WheelEngine<D> {
    /// Creates an engine over `domain` with inclusive bounds and an initial
    /// value (clamped into range).
    pub fn new(
        domain: D,
        min: D::Value,
        max: D::Value,
        initial: D::Value,
        tuning: WheelTuning,
    ) -> Result<Self, ConfigError> {
        let bounds = Bounds::new(&domain, min, max)?;
        let current = bounds.clamp(&domain, initial);
        let wrap_preferred = true;
        let wrap =
            domain.distance(bounds.min(), bounds.max()) >= WINDOW_LEN as i64 && wrap_preferred;
        let window = SelectorWindow::new(&domain, &bounds, wrap, &current, None);
        Ok(Self {
            domain,
            bounds,
            wrap_preferred,
            wrap,
            current,
            window,
            formatter: None,
            notifier: ChangeNotifier::new(),
            tuning,
            skip_on_long_press: false,
            phase: Phase::Idle,
            reported_state: ScrollState::Idle,
            scroll_offset: 0.0,
            initial_offset: 0.0,
            scroller: None,
            last_scroller_offset: 0.0,
            last_travel: None,
            long_press: None,
            pending_intro: false,
            pending_fling: None,
            last_frame_nanos: 0,
        })
    }

    // --- configuration surface ---

    /// Replaces the minimum bound, clamping the current value if needed.
    pub fn set_min(&mut self, min: D::Value) -> Result<(), ConfigError> {
        if let Err(err) = self.bounds.set_min(&self.domain, min) {
            warn!(%err, "rejected minimum bound update");
            return Err(err);
        }
        self.after_bounds_change();
        Ok(())
    }

    /// Replaces the maximum bound, clamping the current value if needed.
    pub fn set_max(&mut self, max: D::Value) -> Result<(), ConfigError> {
        if let Err(err) = self.bounds.set_max(&self.domain, max) {
            warn!(%err, "rejected maximum bound update");
            return Err(err);
        }
        self.after_bounds_change();
        Ok(())
    }

    /// Sets whether wrapping past a bound is preferred. Wrapping engages
    /// only when the range also holds more values than one full window.
    pub fn set_wrap_preferred(&mut self, wrap_preferred: bool) {
        if self.wrap_preferred == wrap_preferred {
            return;
        }
        self.wrap_preferred = wrap_preferred;
        let wrap = self.derive_wrap();
        if wrap != self.wrap {
            self.wrap = wrap;
            self.rebuild_window();
        }
    }

    /// Sets the current value directly, clamped into bounds. A no-op when
    /// the clamped value equals the current one: no rebuild, no event.
    pub fn set_value(&mut self, value: D::Value) {
        let clamped = self.bounds.clamp(&self.domain, value);
        if clamped == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, clamped);
        self.rebuild_window();
        self.notifier.notify_value_changed(&previous, &self.current);
    }

    /// Enables or disables skip mode (a lengthened long-press repeat
    /// interval).
    pub fn set_skip_on_long_press(&mut self, skip: bool) {
        self.skip_on_long_press = skip;
    }

    /// Supplies layout metrics. An in-flight scroller is settled under the
    /// old metrics first, then the offset realigns; a queued intro request
    /// replays on the next tick.
    pub fn set_element_height(&mut self, height: f32) {
        self.settle_active_scroller();
        self.tuning.element_height = height.max(0.0);
        self.scroll_offset = self.initial_offset;
        if self.phase != Phase::TouchScroll {
            self.set_phase(Phase::Idle);
        }
    }

    /// Installs the value/state listener.
    pub fn set_listener(&mut self, listener: Box<dyn WheelListener<D::Value>>) {
        self.notifier.set_listener(listener);
    }

    /// Installs the sound/haptic feedback sink.
    pub fn set_feedback(&mut self, feedback: Box<dyn FeedbackSink>) {
        self.notifier.set_feedback(feedback);
    }

    /// Installs the label formatter and refreshes the cached slot labels.
    pub fn set_formatter(&mut self, formatter: Box<dyn SlotFormatter<D::Value>>) {
        self.formatter = Some(formatter);
        self.rebuild_window();
    }

    // --- getters ---

    /// The current value.
    pub fn value(&self) -> &D::Value {
        &self.current
    }

    /// The inclusive minimum bound.
    pub fn min(&self) -> &D::Value {
        self.bounds.min()
    }

    /// The inclusive maximum bound.
    pub fn max(&self) -> &D::Value {
        self.bounds.max()
    }

    /// Whether wrapping past a bound is currently in effect.
    pub fn wrap_enabled(&self) -> bool {
        self.wrap
    }

    /// The externally visible scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.phase.public()
    }

    /// The current scroll offset in pixels; equals the alignment offset
    /// whenever the wheel is settled.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The five visible slots, top to bottom.
    pub fn slots(&self) -> &[Slot<D::Value>; WINDOW_LEN] {
        self.window.slots()
    }

    /// The cached display label for slot `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.window.label(index)
    }

    /// The active tuning parameters.
    pub fn tuning(&self) -> &WheelTuning {
        &self.tuning
    }

    /// Whether the host must keep ticking this wheel.
    pub fn needs_frame(&self) -> bool {
        self.scroller.is_some()
            || self.long_press.is_some()
            || self.pending_intro
            || self.pending_fling.is_some()
    }

    // --- gesture surface ---

    /// A touch went down and a drag is beginning. Any in-flight scroller is
    /// forced to its resting state first so two scrollers never run at once.
    pub fn on_drag_start(&mut self) {
        self.settle_active_scroller();
        self.long_press = None;
        self.pending_fling = None;
        self.set_phase(Phase::TouchScroll);
    }

    /// A drag sample moved the finger by `dy` pixels. Crossed slot
    /// boundaries shift the window and notify; with wrap disabled further
    /// travel past a bound is discarded.
    pub fn on_drag_delta(&mut self, dy: f32) {
        if self.tuning.element_height <= 0.0 {
            return;
        }
        if self.phase != Phase::TouchScroll {
            self.on_drag_start();
        }
        if dy > 0.0 {
            self.last_travel = Some(StepDirection::Increment);
        } else if dy < 0.0 {
            self.last_travel = Some(StepDirection::Decrement);
        }
        let frame = self.last_frame_nanos;
        self.apply_offset_delta(dy, frame);
    }

    /// The finger lifted with `velocity_y` pixels per second. Fast releases
    /// fling; slow ones settle through snap-adjust with the minimum-one-step
    /// bias. Before layout the velocity is queued and replayed once metrics
    /// arrive.
    pub fn on_release(&mut self, velocity_y: f32, now_nanos: u64) {
        if self.phase != Phase::TouchScroll {
            return;
        }
        if self.tuning.element_height <= 0.0 {
            self.pending_fling = Some(velocity_y);
            self.set_phase(Phase::Idle);
            return;
        }
        self.launch_release(velocity_y, now_nanos);
    }

    /// The gesture was cancelled: velocity is discarded and the wheel
    /// settles onto the nearest alignment.
    pub fn on_cancel(&mut self, now_nanos: u64) {
        self.long_press = None;
        self.pending_fling = None;
        if self.tuning.element_height <= 0.0 {
            self.scroller = None;
            self.set_phase(Phase::Idle);
            return;
        }
        self.start_snap(now_nanos, false);
    }

    /// Requests the one-shot decorative intro animation. Deferred until
    /// layout metrics arrive when `element_height` is still zero.
    pub fn play_intro(&mut self, now_nanos: u64) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.tuning.element_height <= 0.0 {
            debug!("intro requested before layout; deferring");
            self.pending_intro = true;
            return;
        }
        self.pending_intro = false;
        let travel = self.tuning.element_height * self.tuning.intro_travel_fraction;
        let intro = IntroScroller::new(
            self.scroll_offset,
            travel,
            now_nanos,
            self.tuning.intro_duration.as_nanos() as u64,
        );
        self.last_scroller_offset = self.scroll_offset;
        self.scroller = Some(Scroller::Intro(intro));
        self.set_phase(Phase::Intro);
    }

    /// Begins a press-and-hold on the increment or decrement edge. The
    /// first step fires immediately; repeats are serviced by `tick`.
    pub fn start_long_press(&mut self, direction: StepDirection, now_nanos: u64) {
        self.settle_active_scroller();
        self.set_phase(Phase::Idle);
        self.long_press = Some(LongPressAccelerator::new(direction, now_nanos));
        self.service_long_press(now_nanos);
    }

    /// Ends a press-and-hold, resetting acceleration to tier zero.
    pub fn end_long_press(&mut self) {
        self.long_press = None;
    }

    /// Advances the engine by one animation frame.
    pub fn tick(&mut self, frame_nanos: u64) {
        self.last_frame_nanos = frame_nanos;

        if self.phase == Phase::Idle && self.tuning.element_height > 0.0 {
            if let Some(velocity) = self.pending_fling.take() {
                self.launch_release(velocity, frame_nanos);
            } else if self.pending_intro {
                self.play_intro(frame_nanos);
            }
        }
        self.service_long_press(frame_nanos);

        let Some(scroller) = self.scroller.clone() else {
            return;
        };
        let new_offset = scroller.offset_at(frame_nanos);
        let delta = new_offset - self.last_scroller_offset;
        self.last_scroller_offset = new_offset;
        if delta > 0.0 {
            self.last_travel = Some(StepDirection::Increment);
        } else if delta < 0.0 {
            self.last_travel = Some(StepDirection::Decrement);
        }
        if delta != 0.0 {
            self.apply_offset_delta(delta, frame_nanos);
        }

        if scroller.is_finished(frame_nanos) {
            self.scroller = None;
            match self.phase {
                Phase::Fling => {
                    // Final exact adjustment to eliminate residual drift.
                    self.start_snap(frame_nanos, false);
                }
                _ => {
                    self.scroll_offset = self.initial_offset;
                    self.set_phase(Phase::Idle);
                }
            }
        }
    }

    // --- internals ---

    /// Routes a release velocity to a fling or a biased snap.
    fn launch_release(&mut self, velocity_y: f32, now_nanos: u64) {
        let velocity = velocity_y.clamp(
            -self.tuning.max_fling_velocity,
            self.tuning.max_fling_velocity,
        );
        if velocity.abs() <= self.tuning.min_fling_velocity {
            self.start_snap(now_nanos, true);
        } else {
            self.start_fling(velocity, now_nanos);
        }
    }

    fn derive_wrap(&self) -> bool {
        // Wrap needs strictly more values than the window shows: a range of
        // exactly five fills the window and still clamps.
        self.domain.distance(self.bounds.min(), self.bounds.max()) >= WINDOW_LEN as i64
            && self.wrap_preferred
    }

    fn rebuild_window(&mut self) {
        self.window.rebuild_around(
            &self.domain,
            &self.bounds,
            self.wrap,
            &self.current,
            self.formatter.as_deref(),
        );
    }

    fn after_bounds_change(&mut self) {
        self.wrap = self.derive_wrap();
        let clamped = self.bounds.clamp(&self.domain, self.current.clone());
        let changed = clamped != self.current;
        let previous = std::mem::replace(&mut self.current, clamped);
        self.rebuild_window();
        if changed {
            self.notifier.notify_value_changed(&previous, &self.current);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(?phase, "wheel phase transition");
        }
        self.phase = phase;
        let public = phase.public();
        if public != self.reported_state {
            self.reported_state = public;
            self.notifier.notify_scroll_state(public);
        }
    }

    /// Accumulates `dy` into the scroll offset and converts every whole
    /// element of travel into one window shift, rebasing the offset per
    /// shift so it always stays within one element of alignment.
    fn apply_offset_delta(&mut self, dy: f32, frame_nanos: u64) {
        let height = self.tuning.element_height;
        if height <= 0.0 {
            return;
        }
        self.scroll_offset += dy;
        loop {
            let travel = self.scroll_offset - self.initial_offset;
            let direction = if travel >= height {
                StepDirection::Increment
            } else if travel <= -height {
                StepDirection::Decrement
            } else {
                break;
            };
            match self.window.shift(
                &self.domain,
                &self.bounds,
                self.wrap,
                direction,
                self.formatter.as_deref(),
            ) {
                ShiftOutcome::Shifted { previous, current } => {
                    self.scroll_offset -= height * direction.delta() as f32;
                    self.current = current.clone();
                    self.notifier.notify_shift(&previous, &current, frame_nanos);
                }
                ShiftOutcome::Rejected => {
                    // Hard edge with wrap disabled: discard further travel.
                    self.scroll_offset = self.initial_offset;
                    break;
                }
            }
        }
    }

    /// Forces any in-flight scroller to its final resting state so a new
    /// gesture never overlaps a running one. Remaining whole-step crossings
    /// are applied; sub-step drift is dropped.
    fn settle_active_scroller(&mut self) {
        let Some(scroller) = self.scroller.take() else {
            return;
        };
        let final_offset = scroller.offset_at(u64::MAX);
        let delta = final_offset - self.last_scroller_offset;
        let frame = self.last_frame_nanos;
        if delta != 0.0 {
            self.apply_offset_delta(delta, frame);
        }
        self.scroll_offset = self.initial_offset;
    }

    /// Starts the snap-adjust run. `bias_one_step` is set on drag release so
    /// any non-zero residual completes a full step instead of reverting;
    /// post-fling and cancel adjustments round to the nearest alignment,
    /// with midpoint ties resolved toward the direction of last motion.
    fn start_snap(&mut self, now_nanos: u64, bias_one_step: bool) {
        let height = self.tuning.element_height;
        let residual = self.scroll_offset - self.initial_offset;
        if height <= 0.0 || residual == 0.0 {
            self.scroller = None;
            self.set_phase(Phase::Idle);
            return;
        }
        // The bias follows the gesture's net displacement (the residual's
        // sign); the last individual sample only breaks exact-midpoint
        // ties, so a small counter-move at the end never flips the step.
        let direction = if residual > 0.0 {
            StepDirection::Increment
        } else {
            StepDirection::Decrement
        };
        let half = height / 2.0;
        let complete = if residual.abs() > half {
            true
        } else if residual.abs() == half {
            self.last_travel == Some(direction)
        } else {
            bias_one_step
        };
        let complete = complete && self.window.can_shift(direction);
        let target = if complete {
            self.initial_offset + height * direction.delta() as f32
        } else {
            self.initial_offset
        };
        let snap = SnapScroller::new(
            self.scroll_offset,
            target,
            now_nanos,
            self.tuning.snap_duration.as_nanos() as u64,
        );
        self.last_scroller_offset = self.scroll_offset;
        self.scroller = Some(Scroller::Snap(snap));
        self.set_phase(Phase::SnapAdjust);
    }

    /// Starts a ballistic fling, clamping the projected travel to the valid
    /// range when wrap is disabled. A fling at a hard edge with nothing
    /// further to reveal is a no-op.
    fn start_fling(&mut self, velocity: f32, now_nanos: u64) {
        let height = self.tuning.element_height;
        let mut fling = FlingScroller::new(
            self.scroll_offset,
            velocity,
            self.tuning.fling_decay,
            self.tuning.min_fling_velocity,
            now_nanos,
        );
        if !self.wrap {
            let direction = if velocity > 0.0 {
                StepDirection::Increment
            } else {
                StepDirection::Decrement
            };
            let available = match direction {
                StepDirection::Increment => self.domain.distance(&self.current, self.bounds.max()),
                StepDirection::Decrement => self.domain.distance(&self.current, self.bounds.min()),
            };
            let residual = self.scroll_offset - self.initial_offset;
            if available == 0 && residual == 0.0 {
                debug!("fling at boundary ignored; nothing further to reveal");
                self.scroller = None;
                self.set_phase(Phase::Idle);
                return;
            }
            fling.clamp_total_delta(available as f32 * height - residual);
        }
        self.last_scroller_offset = self.scroll_offset;
        self.scroller = Some(Scroller::Fling(fling));
        self.set_phase(Phase::Fling);
    }

    /// Services the long-press repeat deadline, at most once per tick.
    fn service_long_press(&mut self, now_nanos: u64) {
        let interval = if self.skip_on_long_press {
            self.tuning.long_press_skip_interval
        } else {
            self.tuning.long_press_interval
        }
        .as_nanos() as u64;

        let Some(hold) = self.long_press.as_ref() else {
            return;
        };
        if !hold.is_due(now_nanos) {
            return;
        }
        let steps = hold.step_for(self.domain.ordinal(&self.current));
        if let Some(hold) = self.long_press.as_mut() {
            hold.advance(now_nanos, interval);
        }
        self.step_by(steps, now_nanos);
    }

    /// Applies `steps` immediate shifts, stopping at a clamped boundary.
    /// Feedback stays throttled to once per frame even for multi-step jumps.
    pub(crate) fn step_by(&mut self, steps: i64, frame_nanos: u64) {
        let direction = if steps >= 0 {
            StepDirection::Increment
        } else {
            StepDirection::Decrement
        };
        for _ in 0..steps.unsigned_abs() {
            match self.window.shift(
                &self.domain,
                &self.bounds,
                self.wrap,
                direction,
                self.formatter.as_deref(),
            ) {
                ShiftOutcome::Shifted { previous, current } => {
                    self.current = current.clone();
                    self.notifier.notify_shift(&previous, &current, frame_nanos);
                }
                ShiftOutcome::Rejected => break,
            }
        }
    }

    pub(crate) fn window(&self) -> &SelectorWindow<D::Value> {
        &self.window
    }

    pub(crate) fn last_frame_nanos(&self) -> u64 {
        self.last_frame_nanos
    }
}
