//! Scroller strategies that animate the scroll offset over time.
//!
//! Each scroller is created per gesture, produces an absolute offset for a
//! given frame timestamp, and is discarded on completion. At most one
//! scroller drives the wheel's per-tick offset delta.
const NANOS_PER_SEC: f32 = 1_000_000_000.0;

/// Cubic ease-in-out mapping over linear progress in `[0.0, 1.0]`.
pub(crate) fn ease_in_out_cubic(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ballistic fling under exponential velocity decay.
///
/// The trajectory is the closed form of `v(t) = v0 * exp(-decay * t)`: the
/// run ends when speed falls to `min_velocity`, and the projected travel is
/// `(v0 - sign(v0) * min_velocity) / decay`. The projected target can be
/// clamped after construction without changing the deceleration shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FlingScroller {
    start_offset: f32,
    total_delta: f32,
    decay: f32,
    duration_nanos: u64,
    end_factor: f32,
    start_nanos: u64,
}

impl FlingScroller {
    /// Projects a fling from `velocity` (pixels per second).
    pub fn new(
        start_offset: f32,
        velocity: f32,
        decay: f32,
        min_velocity: f32,
        start_nanos: u64,
    ) -> Self {
        let speed = velocity.abs();
        if speed <= min_velocity || decay <= 0.0 || !velocity.is_finite() {
            return Self {
                start_offset,
                total_delta: 0.0,
                decay,
                duration_nanos: 0,
                end_factor: 1.0,
                start_nanos,
            };
        }
        let duration_secs = (speed / min_velocity).ln() / decay;
        let total_delta = (velocity - velocity.signum() * min_velocity) / decay;
        let end_factor = 1.0 - (-decay * duration_secs).exp();
        Self {
            start_offset,
            total_delta,
            decay,
            duration_nanos: (duration_secs * NANOS_PER_SEC) as u64,
            end_factor: end_factor.max(f32::EPSILON),
            start_nanos,
        }
    }

    /// Limits the projected travel to `allowed_delta` (same sign), keeping
    /// the deceleration shape so the run still animates smoothly.
    pub fn clamp_total_delta(&mut self, allowed_delta: f32) {
        if self.total_delta.abs() > allowed_delta.abs() {
            self.total_delta = allowed_delta;
        }
    }

    /// Projected travel relative to the start offset.
    pub fn total_delta(&self) -> f32 {
        self.total_delta
    }

    /// Absolute offset at `now`.
    pub fn offset_at(&self, now_nanos: u64) -> f32 {
        if self.duration_nanos == 0 {
            return self.start_offset + self.total_delta;
        }
        let t = now_nanos.saturating_sub(self.start_nanos);
        if t >= self.duration_nanos {
            return self.start_offset + self.total_delta;
        }
        let secs = t as f32 / NANOS_PER_SEC;
        let progress = ((1.0 - (-self.decay * secs).exp()) / self.end_factor).clamp(0.0, 1.0);
        self.start_offset + self.total_delta * progress
    }

    /// Whether the run has reached its final resting offset.
    pub fn is_finished(&self, now_nanos: u64) -> bool {
        now_nanos.saturating_sub(self.start_nanos) >= self.duration_nanos
    }
}

/// Timed corrective animation onto an exact alignment target.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapScroller {
    start_offset: f32,
    target_offset: f32,
    start_nanos: u64,
    duration_nanos: u64,
}

impl SnapScroller {
    /// Animates from `start_offset` to `target_offset` over `duration_nanos`.
    pub fn new(
        start_offset: f32,
        target_offset: f32,
        start_nanos: u64,
        duration_nanos: u64,
    ) -> Self {
        Self {
            start_offset,
            target_offset,
            start_nanos,
            duration_nanos,
        }
    }

    /// The exact alignment offset this snap terminates on.
    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }

    /// Absolute offset at `now`.
    pub fn offset_at(&self, now_nanos: u64) -> f32 {
        if self.duration_nanos == 0 {
            return self.target_offset;
        }
        let t = now_nanos.saturating_sub(self.start_nanos);
        if t >= self.duration_nanos {
            return self.target_offset;
        }
        let progress = ease_in_out_cubic(t as f32 / self.duration_nanos as f32);
        self.start_offset + (self.target_offset - self.start_offset) * progress
    }

    /// Whether the snap has converged on its target.
    pub fn is_finished(&self, now_nanos: u64) -> bool {
        now_nanos.saturating_sub(self.start_nanos) >= self.duration_nanos
    }
}

/// One-shot decorative intro run: eases away from rest and back again,
/// ending exactly where it started. Played once at first display, never in
/// response to user input.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroScroller {
    rest_offset: f32,
    travel: f32,
    start_nanos: u64,
    duration_nanos: u64,
}

impl IntroScroller {
    /// Scripts an out-and-back excursion of `travel` pixels.
    pub fn new(rest_offset: f32, travel: f32, start_nanos: u64, duration_nanos: u64) -> Self {
        Self {
            rest_offset,
            travel,
            start_nanos,
            duration_nanos,
        }
    }

    /// Absolute offset at `now`.
    pub fn offset_at(&self, now_nanos: u64) -> f32 {
        if self.duration_nanos == 0 {
            return self.rest_offset;
        }
        let t = now_nanos.saturating_sub(self.start_nanos);
        if t >= self.duration_nanos {
            return self.rest_offset;
        }
        let progress = t as f32 / self.duration_nanos as f32;
        self.rest_offset + self.travel * (std::f32::consts::PI * progress).sin()
    }

    /// Whether the excursion has returned to rest.
    pub fn is_finished(&self, now_nanos: u64) -> bool {
        now_nanos.saturating_sub(self.start_nanos) >= self.duration_nanos
    }
}

/// The scroller currently driving the offset, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum Scroller {
    /// Ballistic fling after a fast release.
    Fling(FlingScroller),
    /// Corrective snap onto an aligned offset.
    Snap(SnapScroller),
    /// Scripted decorative intro.
    Intro(IntroScroller),
}

impl Scroller {
    /// Absolute offset at `now`.
    pub fn offset_at(&self, now_nanos: u64) -> f32 {
        match self {
            Self::Fling(s) => s.offset_at(now_nanos),
            Self::Snap(s) => s.offset_at(now_nanos),
            Self::Intro(s) => s.offset_at(now_nanos),
        }
    }

    /// Whether the active run has completed.
    pub fn is_finished(&self, now_nanos: u64) -> bool {
        match self {
            Self::Fling(s) => s.is_finished(now_nanos),
            Self::Snap(s) => s.is_finished(now_nanos),
            Self::Intro(s) => s.is_finished(now_nanos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // Clamped outside the unit interval.
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_fling_projection_monotonic_and_converges() {
        let fling = FlingScroller::new(0.0, 2000.0, 4.5, 150.0, 0);
        assert!(fling.total_delta() > 0.0);
        assert!(!fling.is_finished(0));

        let mut last = fling.offset_at(0);
        let mut t = 0;
        while !fling.is_finished(t) {
            t += 16 * MS;
            let offset = fling.offset_at(t);
            assert!(offset >= last);
            last = offset;
        }
        assert!((fling.offset_at(t) - fling.total_delta()).abs() < 1e-3);
    }

    #[test]
    fn test_fling_below_threshold_is_inert() {
        let fling = FlingScroller::new(10.0, 50.0, 4.5, 150.0, 0);
        assert_eq!(fling.total_delta(), 0.0);
        assert!(fling.is_finished(0));
        assert_eq!(fling.offset_at(123 * MS), 10.0);
    }

    #[test]
    fn test_fling_clamp_limits_travel() {
        let mut fling = FlingScroller::new(0.0, -6000.0, 4.5, 150.0, 0);
        assert!(fling.total_delta() < -400.0);
        fling.clamp_total_delta(-300.0);
        assert_eq!(fling.total_delta(), -300.0);
        let mut t = 0;
        while !fling.is_finished(t) {
            t += 16 * MS;
        }
        assert!((fling.offset_at(t) + 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_snap_reaches_exact_target() {
        let snap = SnapScroller::new(37.0, 100.0, 0, 300 * MS);
        assert_eq!(snap.offset_at(0), 37.0);
        assert!(!snap.is_finished(150 * MS));
        assert!(snap.is_finished(300 * MS));
        assert_eq!(snap.offset_at(300 * MS), 100.0);
        assert_eq!(snap.offset_at(400 * MS), 100.0);

        let mid = snap.offset_at(150 * MS);
        assert!(mid > 37.0 && mid < 100.0);
    }

    #[test]
    fn test_intro_returns_to_rest() {
        let intro = IntroScroller::new(0.0, 45.0, 0, 900 * MS);
        assert_eq!(intro.offset_at(0), 0.0);
        let peak = intro.offset_at(450 * MS);
        assert!((peak - 45.0).abs() < 1e-3);
        assert!(intro.is_finished(900 * MS));
        assert_eq!(intro.offset_at(900 * MS), 0.0);
    }
}
