use crate::app::GestureLab;
use crate::consts::GLOBAL_COUNTER;
use egui::Ui;
use egui_gestures::SlideToConfirm;
use tracing::{debug, info};

const BOTTOM_SPACE: f32 = 140.0;

impl GestureLab {
    pub fn slide_page(&mut self, ui: &mut Ui) {
        let slide = &mut self.slide;
        let id_salt = ("slide", slide.instance);

        ui.vertical_centered(|ui| {
            ui.add_space((ui.available_height() - BOTTOM_SPACE).max(0.0));

            let confirmations = &mut slide.confirmations;
            let response = ui.add(
                SlideToConfirm::new(id_salt, &slide.config).on_complete(|| {
                    *confirmations += 1;
                    info!(confirmations = *confirmations, "payment confirmed");
                }),
            );
            if response.changed() {
                debug!("slide control completed this frame");
            }

            ui.add_space(16.0);
            if SlideToConfirm::is_completed(ui, id_salt) {
                if ui.button("Start over").clicked() {
                    slide.instance = GLOBAL_COUNTER.next();
                }
            } else {
                ui.weak(format!("confirmed {} time(s)", slide.confirmations));
            }
        });
    }
}
