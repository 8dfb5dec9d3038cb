use crate::app::GestureLab;
use egui::{vec2, Button, RichText, Ui};
use egui_gestures::Popout;
use egui_phosphor::regular::{CARET_LEFT, CARET_RIGHT, CHAT_CIRCLE, FOLDER, HASH, HEADPHONES, NOTE};
use tracing::info;

const ROW_HEIGHT: f32 = 50.0;
const SIDE_ICON_WIDTH: f32 = 28.0;
const MENU: [(&str, &str); 3] = [
    (CHAT_CIRCLE, "Messages"),
    (NOTE, "#general"),
    (FOLDER, "Bookmarks"),
];

impl GestureLab {
    pub fn popout_page(&mut self, ui: &mut Ui) {
        let popout = &mut self.popout;
        let (title, subtitle) = (popout.title.as_str(), popout.subtitle.as_str());
        let last_opened = &mut popout.last_opened;

        ui.horizontal(|ui| {
            ui.label(RichText::new(CARET_LEFT).size(20.0));

            let width = (ui.available_width() - SIDE_ICON_WIDTH).max(0.0);
            ui.allocate_ui(vec2(width, ROW_HEIGHT), |ui| {
                Popout::new("channel").show(
                    ui,
                    |ui, expanded| channel_header(ui, title, subtitle, expanded),
                    |ui, _| channel_menu(ui, last_opened),
                );
            });

            ui.label(RichText::new(HEADPHONES).size(20.0));
        });

        if let Some(entry) = popout.last_opened {
            ui.add_space(12.0);
            ui.weak(format!("last opened: {entry}"));
        }
    }
}

fn channel_header(ui: &mut Ui, title: &str, subtitle: &str, expanded: bool) {
    ui.horizontal(|ui| {
        if !expanded {
            ui.label(RichText::new(HASH).strong());
        }
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                if expanded {
                    ui.label(RichText::new(HASH).strong().size(11.0));
                }
                ui.label(RichText::new(title).strong());
            });
            ui.label(RichText::new(subtitle).small().weak());
        });
    });
}

fn channel_menu(ui: &mut Ui, last_opened: &mut Option<&'static str>) {
    ui.spacing_mut().item_spacing.y = 12.0;
    for (icon, title) in MENU {
        let text = format!("{icon}   {title}   {CARET_RIGHT}");
        let btn = Button::new(text).frame(false).min_size(vec2(ui.available_width(), 0.0));
        if ui.add(btn).clicked() {
            info!("opened {title}");
            *last_opened = Some(title);
        }
    }
}
