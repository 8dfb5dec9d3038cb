use super::SlideState;
use egui::{vec2, Vec2};

const KNOB_COMPLETED_SCALE: f32 = 0.6;
const COMPLETED_HEIGHT: f32 = 50.0;
const IDLE_WIDTH_RATIO: f32 = 0.8;
const COMPLETED_WIDTH_RATIO: f32 = 0.5;
const SHIMMER_START: f32 = -1.0 / 1.8;
const SHIMMER_TRAVEL: f32 = 1.2;

/// Everything the renderer needs, derived from a [`SlideState`] snapshot.
///
/// Never stored: recompute it from the current state every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVisuals {
    /// Width of the tinted capsule growing behind the knob.
    pub fill_width: f32,
    pub knob_offset: f32,
    pub knob_scale: f32,
    pub chevron_opacity: f32,
    pub checkmark_opacity: f32,
    /// Fraction of the track, from the leading edge, showing the in progress
    /// and confirmation labels.
    pub leading_reveal: f32,
    pub in_progress_opacity: f32,
    pub confirmation_opacity: f32,
    /// Fraction of the track, from the trailing edge, showing the idle label.
    pub idle_reveal: f32,
    /// Shimmer band center relative to the idle label center, in label widths.
    pub shimmer_offset: f32,
    pub show_shimmer: bool,
}

impl SlideVisuals {
    pub fn compute(state: &SlideState, knob_diameter: f32) -> Self {
        let progress = state.progress.clamp(0.0, 1.0);
        let completion = state.completion.clamp(0.0, 1.0);

        Self {
            fill_width: knob_diameter + state.max_travel * progress,
            knob_offset: if state.completed {
                state.max_travel
            } else {
                state.drag_offset
            },
            knob_scale: egui::lerp(1.0..=KNOB_COMPLETED_SCALE, completion),
            chevron_opacity: 1.0 - progress,
            checkmark_opacity: progress,
            leading_reveal: progress,
            in_progress_opacity: 1.0 - completion,
            confirmation_opacity: completion,
            idle_reveal: 1.0 - progress,
            shimmer_offset: SHIMMER_START + SHIMMER_TRAVEL * state.shimmer,
            show_shimmer: !state.completed,
        }
    }

    /// Outer size of the control: 80% of the available width shrinking to 50%
    /// as it completes, capped at `max_width`.
    pub fn outer_size(
        completion: f32,
        track_height: f32,
        available_width: f32,
        max_width: f32,
    ) -> Vec2 {
        let completion = completion.clamp(0.0, 1.0);
        let ratio = egui::lerp(IDLE_WIDTH_RATIO..=COMPLETED_WIDTH_RATIO, completion);
        let height = egui::lerp(track_height..=COMPLETED_HEIGHT, completion);
        vec2((available_width * ratio).min(max_width), height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideController;

    #[test]
    fn idle_visuals() {
        let slide = SlideController::new(300.0, 50.0);
        let visuals = SlideVisuals::compute(&slide.state(), 50.0);
        assert_eq!(visuals.fill_width, 50.0);
        assert_eq!(visuals.knob_offset, 0.0);
        assert_eq!(visuals.knob_scale, 1.0);
        assert_eq!(visuals.chevron_opacity, 1.0);
        assert_eq!(visuals.checkmark_opacity, 0.0);
        assert_eq!(visuals.idle_reveal, 1.0);
        assert_eq!(visuals.leading_reveal, 0.0);
        assert_eq!(visuals.shimmer_offset, SHIMMER_START);
        assert!(visuals.show_shimmer);
    }

    #[test]
    fn visuals_follow_progress() {
        let mut slide = SlideController::new(300.0, 50.0);
        slide.on_drag_changed(125.0);
        let visuals = SlideVisuals::compute(&slide.state(), 50.0);
        assert_eq!(visuals.fill_width, 175.0);
        assert_eq!(visuals.knob_offset, 125.0);
        assert_eq!(visuals.chevron_opacity, 0.5);
        assert_eq!(visuals.checkmark_opacity, 0.5);
        assert_eq!(visuals.in_progress_opacity, 1.0);
    }

    #[test]
    fn completed_visuals() {
        let mut slide = SlideController::new(300.0, 50.0);
        slide.on_drag_ended(250.0, 0.0);
        slide.tick(1.0);
        let visuals = SlideVisuals::compute(&slide.state(), 50.0);
        assert_eq!(visuals.fill_width, 300.0);
        assert_eq!(visuals.knob_offset, 250.0);
        assert_eq!(visuals.knob_scale, KNOB_COMPLETED_SCALE);
        assert_eq!(visuals.checkmark_opacity, 1.0);
        assert_eq!(visuals.confirmation_opacity, 1.0);
        assert_eq!(visuals.in_progress_opacity, 0.0);
        assert_eq!(visuals.idle_reveal, 0.0);
        assert!(!visuals.show_shimmer);
    }

    #[test]
    fn outer_size_shrinks_on_completion() {
        assert_eq!(SlideVisuals::outer_size(0.0, 70.0, 300.0, 300.0), vec2(240.0, 70.0));
        assert_eq!(SlideVisuals::outer_size(1.0, 70.0, 300.0, 300.0), vec2(150.0, 50.0));
        assert_eq!(SlideVisuals::outer_size(0.0, 70.0, 1000.0, 300.0).x, 300.0);
    }
}
