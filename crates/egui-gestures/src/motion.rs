//! Frame driven tweens shared by the widget state machines.
//!
//! Controllers own their tweens and advance them from `tick(dt)`; a finished
//! tween is reported back to the owner as an explicit completion event.

use egui::emath::easing;

/// Curve applied to the linear time fraction of a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
    /// Fast start with a long settle, no overshoot.
    Smooth,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => easing::linear(t),
            Easing::EaseInOut => easing::cubic_in_out(t),
            Easing::Smooth => easing::cubic_out(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    pub fn ease_in_out(from: f32, to: f32, duration: f32) -> Self {
        Self::new(from, to, duration, Easing::EaseInOut)
    }

    pub fn smooth(from: f32, to: f32, duration: f32) -> Self {
        Self::new(from, to, duration, Easing::Smooth)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        egui::lerp(self.from..=self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Moves the tween forward by `dt` seconds. Returns `true` once it has
    /// reached its target.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.is_finished()
    }
}
