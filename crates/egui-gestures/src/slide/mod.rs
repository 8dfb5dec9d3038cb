//! Slide to confirm control.
//!
//! A knob dragged along a capsule track. The gesture only commits when the
//! knob is released exactly at the end of the track; anything short of that
//! springs back to the start. Completion is terminal for the lifetime of the
//! control.

mod view;
mod visuals;

pub use view::SlideToConfirm;
pub use visuals::SlideVisuals;

use crate::errors::GestureError;
use crate::motion::Tween;
use egui::Color32;
use tracing::{debug, info};

const RESET_DURATION: f32 = 0.5;
const COMPLETION_DURATION: f32 = 0.5;
const SHIMMER_PERIOD: f32 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SlideConfig {
    pub idle_text: String,
    pub in_progress_text: String,
    pub confirmation_text: String,
    pub tint: Color32,
    pub foreground: Color32,
    pub track_height: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            idle_text: "Swipe to pay".to_owned(),
            in_progress_text: "Confirms payment".to_owned(),
            confirmation_text: "Success!".to_owned(),
            tint: Color32::from_rgb(52, 199, 89),
            foreground: Color32::WHITE,
            track_height: 70.0,
        }
    }
}

impl SlideConfig {
    pub fn new(
        idle_text: impl Into<String>,
        in_progress_text: impl Into<String>,
        confirmation_text: impl Into<String>,
    ) -> Self {
        Self {
            idle_text: idle_text.into(),
            in_progress_text: in_progress_text.into(),
            confirmation_text: confirmation_text.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn tint(mut self, tint: Color32) -> Self {
        self.tint = tint;
        self
    }

    #[inline]
    pub fn foreground(mut self, foreground: Color32) -> Self {
        self.foreground = foreground;
        self
    }

    #[inline]
    pub fn track_height(mut self, track_height: f32) -> Self {
        self.track_height = track_height;
        self
    }

    pub fn validate(&self) -> Result<(), GestureError> {
        if !self.track_height.is_finite() || self.track_height <= 0.0 {
            return Err(GestureError::InvalidTrackHeight(self.track_height));
        }
        for (name, text) in [
            ("idle text", &self.idle_text),
            ("in progress text", &self.in_progress_text),
            ("confirmation text", &self.confirmation_text),
        ] {
            if text.trim().is_empty() {
                return Err(GestureError::EmptyText(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    #[default]
    Idle,
    Dragging,
    /// Released short of the end, knob animating back to the start.
    Reverting,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAnimation {
    Reset,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideEvent {
    GeometryChanged { track_width: f32, knob_diameter: f32 },
    DragChanged { delta_x: f32 },
    DragEnded { delta_x: f32, velocity_x: f32 },
    AnimationCompleted(SlideAnimation),
}

/// Outcome of releasing the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRelease {
    /// Released at the end of the track. Reported once per control.
    Completed,
    Reverting,
    /// The control had already completed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideState {
    pub phase: SlidePhase,
    pub drag_offset: f32,
    pub max_travel: f32,
    pub progress: f32,
    pub completed: bool,
    /// Eased 0..1 value of the completion morph.
    pub completion: f32,
    /// Position of the shimmer sweep in its 0..1 cycle.
    pub shimmer: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SlideController {
    phase: SlidePhase,
    drag_offset: f32,
    max_travel: f32,
    reset_tween: Option<Tween>,
    completion: f32,
    completion_tween: Option<Tween>,
    shimmer: f32,
}

impl SlideController {
    pub fn new(track_width: f32, knob_diameter: f32) -> Self {
        let mut controller = Self::default();
        controller.set_geometry(track_width, knob_diameter);
        controller
    }

    pub fn state(&self) -> SlideState {
        SlideState {
            phase: self.phase,
            drag_offset: self.drag_offset,
            max_travel: self.max_travel,
            progress: self.progress(),
            completed: self.is_completed(),
            completion: self.completion,
            shimmer: self.shimmer,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.is_completed() {
            1.0
        } else if self.max_travel > 0.0 {
            (self.drag_offset / self.max_travel).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SlidePhase::Completed
    }

    pub fn is_animating(&self) -> bool {
        self.reset_tween.is_some() || self.completion_tween.is_some()
    }

    pub fn set_geometry(&mut self, track_width: f32, knob_diameter: f32) {
        self.handle(SlideEvent::GeometryChanged {
            track_width,
            knob_diameter,
        });
    }

    pub fn on_drag_changed(&mut self, delta_x: f32) {
        self.handle(SlideEvent::DragChanged { delta_x });
    }

    pub fn on_drag_ended(&mut self, delta_x: f32, velocity_x: f32) -> SlideRelease {
        self.handle(SlideEvent::DragEnded {
            delta_x,
            velocity_x,
        })
        .unwrap_or(SlideRelease::Ignored)
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(mut tween) = self.reset_tween.take() {
            let done = tween.advance(dt);
            self.drag_offset = tween.value().clamp(0.0, self.max_travel);
            if done {
                self.handle(SlideEvent::AnimationCompleted(SlideAnimation::Reset));
            } else {
                self.reset_tween = Some(tween);
            }
        }

        if let Some(mut tween) = self.completion_tween.take() {
            let done = tween.advance(dt);
            self.completion = tween.value();
            if done {
                self.handle(SlideEvent::AnimationCompleted(SlideAnimation::Completion));
            } else {
                self.completion_tween = Some(tween);
            }
        }

        if !self.is_completed() && dt.is_finite() && dt > 0.0 {
            self.shimmer = (self.shimmer + dt / SHIMMER_PERIOD).rem_euclid(1.0);
        }
    }

    /// Feeds one event through the state machine. Only releases produce an
    /// outcome.
    pub fn handle(&mut self, event: SlideEvent) -> Option<SlideRelease> {
        let before = self.phase;
        let release = match event {
            SlideEvent::GeometryChanged {
                track_width,
                knob_diameter,
            } => {
                let max_travel = track_width - knob_diameter;
                self.max_travel = if max_travel.is_finite() {
                    max_travel.max(0.0)
                } else {
                    0.0
                };
                self.drag_offset = if self.is_completed() {
                    self.max_travel
                } else {
                    self.drag_offset.clamp(0.0, self.max_travel)
                };
                None
            }
            SlideEvent::DragChanged { delta_x } => {
                self.drag_to(delta_x);
                None
            }
            SlideEvent::DragEnded {
                delta_x,
                velocity_x,
            } => Some(self.release(delta_x, velocity_x)),
            SlideEvent::AnimationCompleted(animation) => {
                match animation {
                    SlideAnimation::Reset => {
                        if self.phase == SlidePhase::Reverting {
                            self.drag_offset = 0.0;
                            self.phase = SlidePhase::Idle;
                        }
                    }
                    SlideAnimation::Completion => self.completion = 1.0,
                }
                None
            }
        };

        if before != self.phase {
            debug!(from = ?before, to = ?self.phase, "slide phase changed");
        }
        release
    }

    fn drag_to(&mut self, delta_x: f32) {
        if self.is_completed() {
            return;
        }
        let delta_x = if delta_x.is_nan() { 0.0 } else { delta_x };
        self.reset_tween = None;
        self.phase = SlidePhase::Dragging;
        self.drag_offset = delta_x.clamp(0.0, self.max_travel);
    }

    fn release(&mut self, delta_x: f32, velocity_x: f32) -> SlideRelease {
        if self.is_completed() {
            return SlideRelease::Ignored;
        }
        self.drag_to(delta_x);
        debug!(
            offset = self.drag_offset,
            max_travel = self.max_travel,
            velocity_x,
            "slide released"
        );

        // exact end of the track only, no snapping from "close enough"
        if self.max_travel > 0.0 && self.drag_offset == self.max_travel {
            self.phase = SlidePhase::Completed;
            self.completion_tween = Some(Tween::smooth(self.completion, 1.0, COMPLETION_DURATION));
            info!("slide to confirm completed");
            return SlideRelease::Completed;
        }

        if self.drag_offset > 0.0 {
            self.phase = SlidePhase::Reverting;
            self.reset_tween = Some(Tween::smooth(self.drag_offset, 0.0, RESET_DURATION));
        } else {
            self.phase = SlidePhase::Idle;
        }
        SlideRelease::Reverting
    }
}
