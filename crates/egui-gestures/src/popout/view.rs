use super::{PanelController, COLLAPSED_CORNER_RADIUS, EXPANDED_INSET};
use crate::icons;
use crate::pointer::drag_translation;
use egui::{
    Area, Button, Color32, Context, Frame, Id, Margin, Order, Rect, Response, RichText, Sense, Ui,
    UiBuilder,
};
use std::hash::Hash;
use tracing::debug;

const INLINE_MARGIN_X: f32 = 10.0;
const INLINE_MARGIN_Y: f32 = 6.0;
const CLOSE_ICON_SIZE: f32 = 18.0;

#[derive(Clone, Default)]
pub struct PopoutViewState {
    pub controller: PanelController,
    pub drag_translation: f32,
}

impl PopoutViewState {
    pub fn load(ctx: &Context, id: Id) -> Self {
        ctx.data_mut(|d| d.get_temp::<Self>(id).unwrap_or_default())
    }

    pub fn store(self, ctx: &Context, id: Id) {
        ctx.data_mut(|d| d.insert_temp(id, self));
    }
}

/// A compact row that pops out into a full screen overlay when clicked.
///
/// `header` is drawn both inline and at the top of the overlay, `content`
/// only inside the overlay. Both receive whether the panel is expanded.
pub struct Popout {
    id_salt: Id,
    fill: Option<Color32>,
}

impl Popout {
    pub fn new(id_salt: impl Hash) -> Self {
        Self {
            id_salt: Id::new(id_salt),
            fill: None,
        }
    }

    /// Background of the collapsed row. Defaults to the theme's faint background.
    #[inline]
    pub fn fill(mut self, fill: Color32) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn show(
        self,
        ui: &mut Ui,
        mut header: impl FnMut(&mut Ui, bool),
        mut content: impl FnMut(&mut Ui, bool),
    ) -> Response {
        let id = ui.make_persistent_id(self.id_salt);
        let ctx = ui.ctx().clone();
        let mut state = PopoutViewState::load(&ctx, id);
        state.controller.tick(ui.input(|i| i.stable_dt));

        let fill = self.fill.unwrap_or_else(|| ui.visuals().faint_bg_color);
        let is_open = state.controller.state().is_open;
        let inline = ui.scope(|ui| {
            if is_open {
                ui.set_invisible();
            }
            Frame::new()
                .fill(fill)
                .corner_radius(COLLAPSED_CORNER_RADIUS as u8)
                .inner_margin(Margin::symmetric(
                    INLINE_MARGIN_X as i8,
                    INLINE_MARGIN_Y as i8,
                ))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    header(ui, false);
                });
        });

        let rect = inline.response.rect;
        let response = ui.interact(rect, id.with("inline"), Sense::click());
        state.controller.on_layout_measured(rect);
        if response.clicked() {
            debug!("popout row clicked");
            state.controller.toggle();
        }

        if state.controller.state().is_open {
            show_overlay(&ctx, id, fill, &mut state, &mut header, &mut content);
        }

        if state.controller.is_animating() {
            ctx.request_repaint();
        }
        state.store(&ctx, id);
        response
    }
}

fn show_overlay(
    ctx: &Context,
    id: Id,
    inline_fill: Color32,
    state: &mut PopoutViewState,
    header: &mut impl FnMut(&mut Ui, bool),
    content: &mut impl FnMut(&mut Ui, bool),
) {
    let viewport = ctx.screen_rect();
    let panel = state.controller.state();
    let visuals = state.controller.visuals(viewport);
    let reveal = panel.reveal.clamp(0.0, 1.0);

    Area::new(id.with("overlay"))
        .order(Order::Foreground)
        .fixed_pos(viewport.min)
        .show(ctx, |ui| {
            let backdrop = ui.interact(viewport, id.with("backdrop"), Sense::click_and_drag());
            ui.painter().rect_filled(
                viewport,
                0.0,
                Color32::BLACK.gamma_multiply(visuals.backdrop_alpha),
            );

            if backdrop.clicked() {
                state.controller.on_dismiss_requested();
            }
            if backdrop.drag_started() {
                state.drag_translation = 0.0;
            }
            if backdrop.dragged() {
                state.drag_translation = drag_translation(ui)
                    .map(|translation| translation.y)
                    .unwrap_or(state.drag_translation + backdrop.drag_delta().y);
                state
                    .controller
                    .on_dismiss_drag_changed(state.drag_translation, viewport.height());
            }
            if backdrop.drag_stopped() {
                let velocity = ui.input(|i| i.pointer.velocity());
                debug!(
                    translation = state.drag_translation,
                    velocity = velocity.y,
                    "popout dismiss drag released"
                );
                state.controller.on_dismiss_drag_ended(
                    state.drag_translation,
                    velocity.y,
                    viewport.height(),
                );
                state.drag_translation = 0.0;
            }

            let frame = visuals.frame;
            let corner_radius = visuals.corner_radius;
            let painter = ui.painter();
            painter.rect_filled(
                frame,
                corner_radius,
                ui.visuals().window_fill.gamma_multiply(reveal),
            );
            painter.rect_filled(frame, corner_radius, inline_fill.gamma_multiply(1.0 - reveal));
            // swallow clicks on the panel itself so they don't reach the backdrop
            ui.interact(frame, id.with("panel"), Sense::click());

            let inner = inner_rect(frame, reveal);
            ui.scope_builder(UiBuilder::new().max_rect(inner), |ui| {
                ui.set_clip_rect(frame);
                ui.horizontal(|ui| {
                    if panel.is_revealed {
                        let close = Button::new(RichText::new(icons::CLOSE).size(CLOSE_ICON_SIZE))
                            .frame(false);
                        if ui.add(close).clicked() {
                            state.controller.on_dismiss_requested();
                        }
                    }
                    header(ui, panel.is_revealed);
                });

                if visuals.show_content {
                    ui.add_space(EXPANDED_INSET * reveal);
                    ui.scope(|ui| {
                        ui.multiply_opacity(visuals.content_opacity);
                        content(ui, true);
                    });
                }
            });
        });
}

fn inner_rect(frame: Rect, reveal: f32) -> Rect {
    let x = egui::lerp(INLINE_MARGIN_X..=EXPANDED_INSET, reveal);
    let y = egui::lerp(INLINE_MARGIN_Y..=EXPANDED_INSET, reveal);
    Rect::from_min_max(frame.min + egui::vec2(x, y), frame.max - egui::vec2(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::testing::Frames;
    use crate::popout::PanelPhase;
    use egui::{pos2, vec2};
    use std::cell::Cell;

    fn run_frame(ctx: &Context, mut add_contents: impl FnMut(&mut Ui)) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        });
    }

    #[test]
    fn renders_collapsed_row_headless() {
        let ctx = Context::default();
        let mut expanded_flags = vec![];
        for _ in 0..2 {
            run_frame(&ctx, |ui| {
                Popout::new("channel").show(
                    ui,
                    |ui, expanded| {
                        expanded_flags.push(expanded);
                        ui.label("general");
                    },
                    |ui, _| {
                        ui.label("never shown");
                    },
                );
            });
        }
        assert!(!expanded_flags.is_empty());
        assert!(expanded_flags.iter().all(|expanded| !expanded));
    }

    #[test]
    fn inner_rect_tracks_reveal() {
        let frame = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0));
        assert_eq!(inner_rect(frame, 0.0).min, egui::pos2(10.0, 6.0));
        assert_eq!(inner_rect(frame, 1.0).min, egui::pos2(15.0, 15.0));
    }

    struct Harness {
        row: Cell<Rect>,
        phase: Cell<PanelPhase>,
        is_open: Cell<bool>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                row: Cell::new(Rect::NOTHING),
                phase: Cell::new(PanelPhase::Closed),
                is_open: Cell::new(false),
            }
        }

        fn show(&self, ui: &mut Ui) {
            let response = Popout::new("channel").show(
                ui,
                |ui, _| {
                    ui.label("general");
                },
                |ui, _| {
                    ui.label("36 members");
                },
            );
            self.row.set(response.rect);
            let id = ui.make_persistent_id(Id::new("channel"));
            let panel = PopoutViewState::load(ui.ctx(), id).controller.state();
            self.phase.set(panel.phase);
            self.is_open.set(panel.is_open);
        }
    }

    /// Left of the panel's inset, so it lands on the backdrop.
    const BACKDROP: egui::Pos2 = pos2(2.0, 700.0);

    fn expanded(harness: &Harness, show: &mut impl FnMut(&mut Ui)) -> Frames {
        let mut frames = Frames::new(vec2(800.0, 800.0));
        frames.idle(2, show);
        frames.click(harness.row.get().center(), show);
        frames.idle(30, show);
        assert_eq!(harness.phase.get(), PanelPhase::Expanded);
        assert!(harness.is_open.get());
        frames
    }

    #[test]
    fn backdrop_click_closes_panel() {
        let harness = Harness::new();
        let mut show = |ui: &mut Ui| harness.show(ui);
        let mut frames = expanded(&harness, &mut show);

        frames.click(BACKDROP, &mut show);
        assert_eq!(harness.phase.get(), PanelPhase::Collapsing);
        frames.idle(30, &mut show);
        assert_eq!(harness.phase.get(), PanelPhase::Closed);
        assert!(!harness.is_open.get());
    }

    #[test]
    fn backdrop_drag_past_half_the_viewport_dismisses() {
        let harness = Harness::new();
        let mut show = |ui: &mut Ui| harness.show(ui);
        let mut frames = expanded(&harness, &mut show);

        // 402 of 800 px; counting only the travel after egui's drag threshold
        // would land under the 0.5 ratio
        frames.drag(BACKDROP, BACKDROP - vec2(0.0, 402.0), 134, &mut show);
        frames.idle(30, &mut show);
        assert_eq!(harness.phase.get(), PanelPhase::Closed);
        assert!(!harness.is_open.get());
    }

    #[test]
    fn short_backdrop_drag_restores_panel() {
        let harness = Harness::new();
        let mut show = |ui: &mut Ui| harness.show(ui);
        let mut frames = expanded(&harness, &mut show);

        frames.drag(BACKDROP, BACKDROP - vec2(0.0, 300.0), 100, &mut show);
        frames.idle(30, &mut show);
        assert_eq!(harness.phase.get(), PanelPhase::Expanded);
        assert!(harness.is_open.get());
    }
}
