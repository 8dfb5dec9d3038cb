use super::{SlideConfig, SlideController, SlideRelease, SlideVisuals};
use crate::icons;
use crate::pointer::drag_translation;
use egui::{
    pos2, vec2, Align2, Color32, Context, FontId, Id, Painter, Rect, Response, Sense, Ui, Widget,
};
use std::hash::Hash;
use tracing::debug;

const DEFAULT_MAX_WIDTH: f32 = 300.0;
const KNOB_PADDING: f32 = 6.0;
const LABEL_FONT_SIZE: f32 = 16.0;
const ICON_FONT_SIZE: f32 = 20.0;
const SHIMMER_BAND_WIDTH: f32 = 15.0;

#[derive(Clone, Default)]
pub struct SlideViewState {
    pub controller: SlideController,
    pub drag_translation: f32,
}

impl SlideViewState {
    pub fn load(ctx: &Context, id: Id) -> Self {
        ctx.data_mut(|d| d.get_temp::<Self>(id).unwrap_or_default())
    }

    pub fn store(self, ctx: &Context, id: Id) {
        ctx.data_mut(|d| d.insert_temp(id, self));
    }
}

/// Capsule shaped "slide to confirm" control.
///
/// `on_complete` runs once, in the frame the knob is released at the end of
/// the track. The returned [`Response`] is marked changed in that frame.
pub struct SlideToConfirm<'a> {
    id_salt: Id,
    config: &'a SlideConfig,
    max_width: f32,
    on_complete: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> SlideToConfirm<'a> {
    pub fn new(id_salt: impl Hash, config: &'a SlideConfig) -> Self {
        Self {
            id_salt: Id::new(id_salt),
            config,
            max_width: DEFAULT_MAX_WIDTH,
            on_complete: None,
        }
    }

    #[inline]
    pub fn on_complete(mut self, on_complete: impl FnOnce() + 'a) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    #[inline]
    pub fn max_width(mut self, max_width: f32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Whether the control with this id salt, placed in `ui`, has completed.
    pub fn is_completed(ui: &Ui, id_salt: impl Hash) -> bool {
        let id = ui.make_persistent_id(Id::new(id_salt));
        SlideViewState::load(ui.ctx(), id).controller.is_completed()
    }
}

impl Widget for SlideToConfirm<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let id = ui.make_persistent_id(self.id_salt);
        let ctx = ui.ctx().clone();
        let mut state = SlideViewState::load(&ctx, id);
        state.controller.tick(ui.input(|i| i.stable_dt));

        let size = SlideVisuals::outer_size(
            state.controller.state().completion,
            self.config.track_height,
            ui.available_width(),
            self.max_width,
        );
        let (rect, track) = ui.allocate_exact_size(size, Sense::hover());
        let knob_diameter = rect.height();
        state.controller.set_geometry(rect.width(), knob_diameter);

        let knob_offset = SlideVisuals::compute(&state.controller.state(), knob_diameter).knob_offset;
        let knob_rect = Rect::from_min_size(
            rect.min + vec2(knob_offset, 0.0),
            vec2(knob_diameter, knob_diameter),
        );
        let knob_sense = if state.controller.is_completed() {
            Sense::hover()
        } else {
            Sense::drag()
        };
        let knob = ui.interact(knob_rect, id.with("knob"), knob_sense);

        let mut completed_now = false;
        if knob.drag_started() {
            state.drag_translation = 0.0;
        }
        if knob.dragged() {
            state.drag_translation = drag_translation(ui)
                .map(|translation| translation.x)
                .unwrap_or(state.drag_translation + knob.drag_delta().x);
            state.controller.on_drag_changed(state.drag_translation);
        }
        if knob.drag_stopped() {
            let velocity = ui.input(|i| i.pointer.velocity());
            let release = state
                .controller
                .on_drag_ended(state.drag_translation, velocity.x);
            debug!(?release, "slide knob released");
            state.drag_translation = 0.0;
            if release == SlideRelease::Completed {
                completed_now = true;
                if let Some(on_complete) = self.on_complete {
                    on_complete();
                }
            }
        }

        if ui.is_rect_visible(rect) {
            let visuals = SlideVisuals::compute(&state.controller.state(), knob_diameter);
            paint(ui, rect, self.config, &visuals, state.controller.is_completed());
        }

        if state.controller.is_animating() || !state.controller.is_completed() {
            // the idle shimmer loops until completion
            ctx.request_repaint();
        }
        state.store(&ctx, id);

        let mut response = track.union(knob);
        if completed_now {
            response.mark_changed();
        }
        response
    }
}

fn paint(ui: &Ui, rect: Rect, config: &SlideConfig, visuals: &SlideVisuals, completed: bool) {
    let painter = ui.painter_at(rect);
    let knob_diameter = rect.height();
    let radius = knob_diameter / 2.0;
    let font = FontId::proportional(LABEL_FONT_SIZE);

    painter.rect_filled(rect, radius, Color32::GRAY.gamma_multiply(0.25));
    painter.rect_filled(
        Rect::from_min_size(rect.min, vec2(visuals.fill_width, knob_diameter)),
        radius,
        config.tint,
    );

    // leading labels, revealed from the left edge as the knob moves
    let leading_center = pos2(
        (rect.left() + rect.right() - radius * visuals.knob_scale) / 2.0,
        rect.center().y,
    );
    let leading = painter.with_clip_rect(Rect::from_min_size(
        rect.min,
        vec2(rect.width() * visuals.leading_reveal, knob_diameter),
    ));
    leading.text(
        leading_center,
        Align2::CENTER_CENTER,
        &config.in_progress_text,
        font.clone(),
        config.foreground.gamma_multiply(visuals.in_progress_opacity),
    );
    leading.text(
        leading_center,
        Align2::CENTER_CENTER,
        &config.confirmation_text,
        font.clone(),
        config.foreground.gamma_multiply(visuals.confirmation_opacity),
    );

    // idle label, masked from the right edge
    let idle_text = if completed {
        &config.confirmation_text
    } else {
        &config.idle_text
    };
    let idle_center = pos2(
        (rect.left() + knob_diameter + rect.right() - radius) / 2.0,
        rect.center().y,
    );
    let idle = painter.with_clip_rect(Rect::from_min_max(
        pos2(rect.right() - rect.width() * visuals.idle_reveal, rect.top()),
        rect.max,
    ));
    let label_rect = idle.text(
        idle_center,
        Align2::CENTER_CENTER,
        idle_text,
        font.clone(),
        Color32::GRAY.gamma_multiply(0.6),
    );
    if visuals.show_shimmer {
        paint_shimmer(&idle, label_rect, idle_center, idle_text, font, visuals.shimmer_offset);
    }

    let knob_center = rect.min + vec2(visuals.knob_offset + radius, radius);
    let icon_color = ui.visuals().strong_text_color();
    painter.circle_filled(
        knob_center,
        (radius - KNOB_PADDING) * visuals.knob_scale,
        ui.visuals().extreme_bg_color,
    );
    let icon_font = FontId::proportional(ICON_FONT_SIZE * visuals.knob_scale);
    painter.text(
        knob_center,
        Align2::CENTER_CENTER,
        icons::CHEVRON,
        icon_font.clone(),
        icon_color.gamma_multiply(visuals.chevron_opacity),
    );
    painter.text(
        knob_center,
        Align2::CENTER_CENTER,
        icons::CHECKMARK,
        icon_font,
        icon_color.gamma_multiply(visuals.checkmark_opacity),
    );
}

/// Re-draws the label brighter inside a narrow vertical band sweeping across it.
fn paint_shimmer(
    painter: &Painter,
    label_rect: Rect,
    center: egui::Pos2,
    text: &str,
    font: FontId,
    offset: f32,
) {
    let band_x = label_rect.center().x + label_rect.width() * offset;
    let band = Rect::from_min_max(
        pos2(band_x - SHIMMER_BAND_WIDTH / 2.0, label_rect.top()),
        pos2(band_x + SHIMMER_BAND_WIDTH / 2.0, label_rect.bottom()),
    );
    painter.with_clip_rect(band.intersect(painter.clip_rect())).text(
        center,
        Align2::CENTER_CENTER,
        text,
        font,
        Color32::WHITE.gamma_multiply(0.8),
    );
}
