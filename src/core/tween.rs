//! Clock-driven tweens.
//!
//! Nothing here owns a timer. A [`Tween`] remembers when it was started and
//! is sampled against the scene clock each frame, so an instance that is
//! never sampled costs nothing and there is nothing to cancel on teardown.

use std::f32::consts::PI;

/// Easing curves used by the scene (Penner formulations).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    QuadOut,
    SineInOut,
    ExpoInOut,
    /// Overshoots past 1.0 before settling; the value is the overshoot strength.
    BackOut(f32),
}

impl Ease {
    /// Map normalized time `t` in \[0, 1\] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::SineInOut => sine_in_out(t),
            Ease::ExpoInOut => expo_in_out(t),
            Ease::BackOut(s) => back_out(t, s),
        }
    }
}

#[inline]
pub fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[inline]
pub fn expo_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

#[inline]
pub fn back_out(t: f32, overshoot: f32) -> f32 {
    let u = t - 1.0;
    1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
}

/// A one-shot interpolation from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_sec: f64,
    pub delay_sec: f32,
    pub duration_sec: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_sec: f64, duration_sec: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_sec,
            delay_sec: 0.0,
            duration_sec,
            ease,
        }
    }

    pub fn with_delay(mut self, delay_sec: f32) -> Self {
        self.delay_sec = delay_sec;
        self
    }

    /// Linear progress in \[0, 1\]; 0 until the delay has elapsed.
    pub fn progress(&self, now_sec: f64) -> f32 {
        let elapsed = (now_sec - self.start_sec) as f32 - self.delay_sec;
        if elapsed <= 0.0 {
            0.0
        } else if self.duration_sec <= 0.0 || elapsed >= self.duration_sec {
            1.0
        } else {
            elapsed / self.duration_sec
        }
    }

    pub fn value(&self, now_sec: f64) -> f32 {
        let p = self.progress(now_sec);
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(p)
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }
}

/// Endless back-and-forth swing: rises to `amplitude` over `half_period_sec`,
/// eases back to zero over the next half period, and repeats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub amplitude: f32,
    pub half_period_sec: f32,
    pub start_sec: f64,
}

impl Oscillation {
    pub fn new(amplitude: f32, half_period_sec: f32, start_sec: f64) -> Self {
        Self {
            amplitude,
            half_period_sec,
            start_sec,
        }
    }

    /// Offset at `now_sec`, always within \[0, amplitude\].
    pub fn offset(&self, now_sec: f64) -> f32 {
        if self.half_period_sec <= 0.0 {
            return 0.0;
        }
        let elapsed = (now_sec - self.start_sec).max(0.0);
        let cycles = elapsed / self.half_period_sec as f64;
        let leg = cycles.floor() as u64;
        let frac = (cycles - cycles.floor()) as f32;
        let t = if leg % 2 == 0 { frac } else { 1.0 - frac };
        self.amplitude * sine_in_out(t)
    }
}
