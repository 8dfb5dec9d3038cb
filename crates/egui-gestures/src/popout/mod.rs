//! Expandable popout panel.
//!
//! The panel lives inline as a compact row. Opening it mounts an overlay at
//! the row's exact bounds, then reveals the full frame one frame later so the
//! container never resizes and fades its content at the same time. Closing
//! runs the same animation backwards and only unmounts the overlay once the
//! content has faded out.

mod view;

pub use view::Popout;

use crate::motion::Tween;
use egui::{pos2, vec2, Rect};
use tracing::debug;

const REVEAL_DURATION: f32 = 0.25;
const SCALE_RESTORE_DURATION: f32 = 0.25;
const DISMISS_DAMPING: f32 = 0.1;
const DISMISS_THRESHOLD: f32 = 0.5;
const RELEASE_VELOCITY_DIVISOR: f32 = 5.0;

pub(crate) const EXPANDED_INSET: f32 = 15.0;
pub(crate) const COLLAPSED_CORNER_RADIUS: f32 = 10.0;
const EXPANDED_CORNER_RADIUS: f32 = 20.0;
const BACKDROP_ALPHA: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Closed,
    /// Overlay mounted at the origin bounds, reveal scheduled or running.
    Expanding,
    Expanded,
    /// Drag-to-dismiss in progress, nested inside `Expanded`.
    DismissDragging,
    Collapsing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAnimation {
    Reveal,
    Conceal,
    ScaleRestore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    Toggle,
    LayoutMeasured(Rect),
    DismissRequested,
    DismissDragChanged {
        delta_y: f32,
        viewport_height: f32,
    },
    DismissDragEnded {
        delta_y: f32,
        velocity_y: f32,
        viewport_height: f32,
    },
    AnimationCompleted(PanelAnimation),
}

/// Read-only projection handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub phase: PanelPhase,
    pub is_open: bool,
    pub is_revealed: bool,
    pub origin_bounds: Rect,
    pub drag_dismiss_scale: f32,
    /// Eased reveal value, 0 at the origin bounds and 1 at the full frame.
    pub reveal: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelVisuals {
    pub frame: Rect,
    pub corner_radius: f32,
    pub backdrop_alpha: f32,
    pub content_opacity: f32,
    pub show_content: bool,
    pub hide_inline: bool,
}

impl PanelVisuals {
    pub fn compute(state: &PanelState, viewport: Rect) -> Self {
        let t = state.reveal.clamp(0.0, 1.0);
        let frame = state
            .origin_bounds
            .lerp_towards(&viewport.shrink(EXPANDED_INSET), t);
        let frame = scale_from_top(frame, state.drag_dismiss_scale);
        let open = if state.is_open { 1.0 } else { 0.0 };

        Self {
            frame,
            corner_radius: egui::lerp(COLLAPSED_CORNER_RADIUS..=EXPANDED_CORNER_RADIUS, t),
            backdrop_alpha: BACKDROP_ALPHA * t * open,
            content_opacity: t * open,
            show_content: state.is_open && (state.is_revealed || t > 0.0),
            hide_inline: state.is_open,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PanelController {
    phase: PanelPhase,
    is_open: bool,
    is_revealed: bool,
    reveal_pending: bool,
    origin_bounds: Rect,
    reveal: f32,
    reveal_tween: Option<Tween>,
    drag_dismiss_scale: f32,
    scale_tween: Option<Tween>,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelController {
    pub fn new() -> Self {
        Self {
            phase: PanelPhase::Closed,
            is_open: false,
            is_revealed: false,
            reveal_pending: false,
            origin_bounds: Rect::ZERO,
            reveal: 0.0,
            reveal_tween: None,
            drag_dismiss_scale: 1.0,
            scale_tween: None,
        }
    }

    pub fn state(&self) -> PanelState {
        PanelState {
            phase: self.phase,
            is_open: self.is_open,
            is_revealed: self.is_revealed,
            origin_bounds: self.origin_bounds,
            drag_dismiss_scale: self.drag_dismiss_scale,
            reveal: self.reveal,
        }
    }

    pub fn visuals(&self, viewport: Rect) -> PanelVisuals {
        PanelVisuals::compute(&self.state(), viewport)
    }

    pub fn is_animating(&self) -> bool {
        self.reveal_pending || self.reveal_tween.is_some() || self.scale_tween.is_some()
    }

    pub fn toggle(&mut self) {
        self.handle(PanelEvent::Toggle);
    }

    pub fn on_layout_measured(&mut self, bounds: Rect) {
        self.handle(PanelEvent::LayoutMeasured(bounds));
    }

    pub fn on_dismiss_requested(&mut self) {
        self.handle(PanelEvent::DismissRequested);
    }

    pub fn on_dismiss_drag_changed(&mut self, delta_y: f32, viewport_height: f32) {
        self.handle(PanelEvent::DismissDragChanged {
            delta_y,
            viewport_height,
        });
    }

    pub fn on_dismiss_drag_ended(&mut self, delta_y: f32, velocity_y: f32, viewport_height: f32) {
        self.handle(PanelEvent::DismissDragEnded {
            delta_y,
            velocity_y,
            viewport_height,
        });
    }

    /// Advances running animations by `dt` seconds and starts a scheduled
    /// reveal. Finished animations come back through [`Self::handle`].
    pub fn tick(&mut self, dt: f32) {
        if let Some(mut tween) = self.reveal_tween.take() {
            let done = tween.advance(dt);
            self.reveal = tween.value();
            if done {
                let animation = if tween.target() > 0.0 {
                    PanelAnimation::Reveal
                } else {
                    PanelAnimation::Conceal
                };
                self.handle(PanelEvent::AnimationCompleted(animation));
            } else {
                self.reveal_tween = Some(tween);
            }
        }

        if let Some(mut tween) = self.scale_tween.take() {
            let done = tween.advance(dt);
            self.drag_dismiss_scale = tween.value();
            if done {
                self.handle(PanelEvent::AnimationCompleted(PanelAnimation::ScaleRestore));
            } else {
                self.scale_tween = Some(tween);
            }
        }

        if self.reveal_pending {
            self.start_reveal();
        }
    }

    pub fn handle(&mut self, event: PanelEvent) {
        let before = self.phase;
        match event {
            PanelEvent::Toggle => match self.phase {
                PanelPhase::Closed => self.open(),
                PanelPhase::Expanding | PanelPhase::Expanded | PanelPhase::DismissDragging => {
                    self.dismiss()
                }
                PanelPhase::Collapsing => {}
            },
            PanelEvent::LayoutMeasured(bounds) => {
                if self.phase == PanelPhase::Closed {
                    self.origin_bounds = bounds;
                }
            }
            PanelEvent::DismissRequested => self.dismiss(),
            PanelEvent::DismissDragChanged {
                delta_y,
                viewport_height,
            } => {
                if matches!(
                    self.phase,
                    PanelPhase::Expanded | PanelPhase::DismissDragging
                ) {
                    self.phase = PanelPhase::DismissDragging;
                    self.scale_tween = None;
                    self.drag_dismiss_scale = dismiss_scale(delta_y, viewport_height);
                }
            }
            PanelEvent::DismissDragEnded {
                delta_y,
                velocity_y,
                viewport_height,
            } => {
                if self.phase == PanelPhase::DismissDragging {
                    let ratio = release_ratio(delta_y, velocity_y, viewport_height);
                    if ratio.abs() > DISMISS_THRESHOLD {
                        self.dismiss();
                    } else {
                        self.phase = PanelPhase::Expanded;
                        self.restore_scale();
                    }
                }
            }
            PanelEvent::AnimationCompleted(animation) => match animation {
                PanelAnimation::Reveal => {
                    if self.phase == PanelPhase::Expanding {
                        self.phase = PanelPhase::Expanded;
                    }
                }
                PanelAnimation::Conceal => {
                    if self.phase == PanelPhase::Collapsing {
                        self.close();
                    }
                }
                PanelAnimation::ScaleRestore => self.drag_dismiss_scale = 1.0,
            },
        }

        debug_assert!(
            self.is_open || !self.is_revealed,
            "popout revealed while closed"
        );
        if before != self.phase {
            debug!(from = ?before, to = ?self.phase, "popout phase changed");
        }
    }

    fn open(&mut self) {
        self.is_open = true;
        self.is_revealed = false;
        self.reveal = 0.0;
        self.reveal_pending = true;
        self.phase = PanelPhase::Expanding;
    }

    fn start_reveal(&mut self) {
        self.reveal_pending = false;
        self.is_revealed = true;
        self.reveal_tween = Some(Tween::ease_in_out(self.reveal, 1.0, REVEAL_DURATION));
    }

    fn dismiss(&mut self) {
        if matches!(self.phase, PanelPhase::Closed | PanelPhase::Collapsing) {
            return;
        }
        self.is_revealed = false;
        self.reveal_pending = false;
        self.phase = PanelPhase::Collapsing;
        self.restore_scale();

        if self.reveal <= 0.0 {
            // nothing was revealed yet, no content to fade out
            self.close();
        } else {
            self.reveal_tween = Some(Tween::ease_in_out(self.reveal, 0.0, REVEAL_DURATION));
        }
    }

    fn close(&mut self) {
        self.phase = PanelPhase::Closed;
        self.is_open = false;
        self.is_revealed = false;
        self.reveal = 0.0;
        self.reveal_tween = None;
        self.scale_tween = None;
        self.drag_dismiss_scale = 1.0;
    }

    fn restore_scale(&mut self) {
        self.scale_tween = if self.drag_dismiss_scale != 1.0 {
            Some(Tween::ease_in_out(
                self.drag_dismiss_scale,
                1.0,
                SCALE_RESTORE_DURATION,
            ))
        } else {
            None
        };
    }
}

fn dismiss_scale(delta_y: f32, viewport_height: f32) -> f32 {
    let ratio = delta_y / viewport_height;
    if viewport_height <= 0.0 || !ratio.is_finite() {
        return 1.0;
    }
    1.0 + ratio.clamp(-1.0, 1.0) * DISMISS_DAMPING
}

fn release_ratio(delta_y: f32, velocity_y: f32, viewport_height: f32) -> f32 {
    let ratio = (delta_y + velocity_y / RELEASE_VELOCITY_DIVISOR) / viewport_height;
    if viewport_height <= 0.0 || !ratio.is_finite() {
        return 0.0;
    }
    ratio
}

fn scale_from_top(rect: Rect, scale: f32) -> Rect {
    let size = vec2(rect.width() * scale, rect.height() * scale);
    Rect::from_min_size(pos2(rect.center().x - size.x / 2.0, rect.top()), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn row() -> Rect {
        Rect::from_min_size(pos2(40.0, 20.0), vec2(200.0, 50.0))
    }

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 800.0))
    }

    fn assert_invariant(panel: &PanelController) {
        let state = panel.state();
        assert!(state.is_open || !state.is_revealed, "{state:?}");
    }

    fn settle(panel: &mut PanelController) {
        for _ in 0..120 {
            panel.tick(FRAME);
            assert_invariant(panel);
            if !panel.is_animating() {
                break;
            }
        }
    }

    fn expanded() -> PanelController {
        let mut panel = PanelController::new();
        panel.on_layout_measured(row());
        panel.toggle();
        settle(&mut panel);
        assert_eq!(panel.state().phase, PanelPhase::Expanded);
        panel
    }

    #[test]
    fn starts_closed() {
        let state = PanelController::default().state();
        assert_eq!(state.phase, PanelPhase::Closed);
        assert!(!state.is_open);
        assert!(!state.is_revealed);
        assert_eq!(state.drag_dismiss_scale, 1.0);
    }

    #[test]
    fn toggle_mounts_at_origin_before_revealing() {
        let mut panel = PanelController::new();
        panel.on_layout_measured(row());
        panel.toggle();

        let state = panel.state();
        assert!(state.is_open);
        assert!(!state.is_revealed);
        assert_eq!(state.phase, PanelPhase::Expanding);
        assert_eq!(state.origin_bounds, row());
        assert_eq!(panel.visuals(viewport()).frame, row());

        panel.tick(FRAME);
        assert!(panel.state().is_revealed);
        assert_eq!(panel.state().reveal, 0.0);

        settle(&mut panel);
        let state = panel.state();
        assert_eq!(state.phase, PanelPhase::Expanded);
        assert_eq!(state.reveal, 1.0);
        assert_eq!(
            panel.visuals(viewport()).frame,
            viewport().shrink(EXPANDED_INSET)
        );
    }

    #[test]
    fn toggle_twice_closes_after_conceal() {
        let mut panel = expanded();
        panel.toggle();
        assert_invariant(&panel);

        let state = panel.state();
        assert_eq!(state.phase, PanelPhase::Collapsing);
        assert!(state.is_open);
        assert!(!state.is_revealed);

        panel.tick(FRAME);
        let reveal = panel.state().reveal;
        assert!(reveal > 0.0 && reveal < 1.0);

        settle(&mut panel);
        let state = panel.state();
        assert_eq!(state.phase, PanelPhase::Closed);
        assert!(!state.is_open);
        assert!(!state.is_revealed);
    }

    #[test]
    fn toggle_twice_before_reveal_closes_immediately() {
        let mut panel = PanelController::new();
        panel.toggle();
        panel.toggle();
        let state = panel.state();
        assert!(!state.is_open);
        assert!(!state.is_revealed);
        assert!(!panel.is_animating());
    }

    #[test]
    fn toggle_during_collapse_is_ignored() {
        let mut panel = expanded();
        panel.toggle();
        panel.toggle();
        assert_eq!(panel.state().phase, PanelPhase::Collapsing);
    }

    #[test]
    fn layout_measured_only_while_closed() {
        let mut panel = PanelController::new();
        panel.on_layout_measured(row());
        panel.toggle();
        panel.on_layout_measured(viewport());
        assert_eq!(panel.state().origin_bounds, row());

        panel.on_dismiss_requested();
        settle(&mut panel);
        panel.on_layout_measured(viewport());
        assert_eq!(panel.state().origin_bounds, viewport());
    }

    #[test]
    fn dismiss_while_closed_is_noop() {
        let mut panel = PanelController::new();
        panel.on_dismiss_requested();
        assert_eq!(panel.state(), PanelController::new().state());
    }

    #[test]
    fn drag_scales_with_damping_and_clamp() {
        let mut panel = expanded();
        panel.on_dismiss_drag_changed(-200.0, 800.0);
        let state = panel.state();
        assert_eq!(state.phase, PanelPhase::DismissDragging);
        assert!((state.drag_dismiss_scale - 0.975).abs() < 1e-6);

        panel.on_dismiss_drag_changed(-5000.0, 800.0);
        assert!((panel.state().drag_dismiss_scale - 0.9).abs() < 1e-6);

        panel.on_dismiss_drag_changed(5000.0, 800.0);
        assert!((panel.state().drag_dismiss_scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn drag_ignored_unless_expanded() {
        let mut panel = PanelController::new();
        panel.on_dismiss_drag_changed(-300.0, 800.0);
        assert_eq!(panel.state().drag_dismiss_scale, 1.0);

        panel.toggle();
        panel.on_dismiss_drag_changed(-300.0, 800.0);
        assert_eq!(panel.state().phase, PanelPhase::Expanding);
        assert_eq!(panel.state().drag_dismiss_scale, 1.0);
    }

    #[test]
    fn release_at_half_viewport_stays_open() {
        let mut panel = expanded();
        panel.on_dismiss_drag_changed(-50.0, 100.0);
        panel.on_dismiss_drag_ended(-50.0, 0.0, 100.0);
        assert_eq!(panel.state().phase, PanelPhase::Expanded);
        assert!(panel.state().is_revealed);

        settle(&mut panel);
        assert_eq!(panel.state().drag_dismiss_scale, 1.0);
    }

    #[test]
    fn release_past_half_viewport_dismisses() {
        let mut panel = expanded();
        panel.on_dismiss_drag_changed(-51.0, 100.0);
        panel.on_dismiss_drag_ended(-51.0, 0.0, 100.0);
        assert_eq!(panel.state().phase, PanelPhase::Collapsing);

        settle(&mut panel);
        let state = panel.state();
        assert!(!state.is_open);
        assert_eq!(state.drag_dismiss_scale, 1.0);
    }

    #[test]
    fn release_velocity_counts_toward_dismiss() {
        let mut panel = expanded();
        panel.on_dismiss_drag_changed(-30.0, 100.0);
        // -30 + (-150 / 5) = -60
        panel.on_dismiss_drag_ended(-30.0, -150.0, 100.0);
        assert_eq!(panel.state().phase, PanelPhase::Collapsing);
    }

    #[test]
    fn downward_release_dismisses_by_magnitude() {
        let mut panel = expanded();
        panel.on_dismiss_drag_changed(60.0, 100.0);
        panel.on_dismiss_drag_ended(60.0, 0.0, 100.0);
        assert_eq!(panel.state().phase, PanelPhase::Collapsing);
    }

    #[test]
    fn collapsed_visuals_hide_overlay() {
        let visuals = PanelController::new().visuals(viewport());
        assert!(!visuals.hide_inline);
        assert!(!visuals.show_content);
        assert_eq!(visuals.backdrop_alpha, 0.0);
        assert_eq!(visuals.content_opacity, 0.0);
    }

    #[test]
    fn expanded_visuals_cover_viewport() {
        let visuals = expanded().visuals(viewport());
        assert!(visuals.hide_inline);
        assert!(visuals.show_content);
        assert_eq!(visuals.corner_radius, EXPANDED_CORNER_RADIUS);
        assert_eq!(visuals.backdrop_alpha, BACKDROP_ALPHA);
        assert_eq!(visuals.content_opacity, 1.0);
    }

    #[test]
    fn half_revealed_frame_sits_between_row_and_viewport() {
        let state = PanelState {
            phase: PanelPhase::Expanding,
            is_open: true,
            is_revealed: false,
            origin_bounds: row(),
            drag_dismiss_scale: 1.0,
            reveal: 0.5,
        };
        let visuals = PanelVisuals::compute(&state, viewport());
        assert_eq!(visuals.frame.min, pos2(27.5, 17.5));
        assert_eq!(visuals.frame.max, pos2(312.5, 427.5));
        assert_eq!(visuals.corner_radius, 15.0);
    }

    #[test]
    fn scaled_frame_keeps_top_edge() {
        let rect = Rect::from_min_size(pos2(0.0, 10.0), vec2(100.0, 200.0));
        let scaled = scale_from_top(rect, 0.9);
        assert_eq!(scaled.top(), 10.0);
        assert_eq!(scaled.center().x, 50.0);
        assert!((scaled.width() - 90.0).abs() < 1e-4);
    }
}
