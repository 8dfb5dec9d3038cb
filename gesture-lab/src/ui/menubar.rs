use crate::app::{GestureLab, Page};
use crate::consts::REPOSITORY_URL;
use egui::{Button, Modifiers};
use tracing::{debug, error};

const BTN_WIDTH: f32 = 200.0;

impl GestureLab {
    pub fn menubar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            // Demo
            self.demo_menu(ui);
            // Help
            help_menu(ui);
        });
    }

    fn demo_menu(&mut self, ui: &mut egui::Ui) {
        let pages = [
            (Page::Popout, "Popout", egui::Key::Num1),
            (Page::SlideToConfirm, "Slide to Confirm", egui::Key::Num2),
        ];
        for (page, _, key) in pages {
            let shortcut = egui::KeyboardShortcut::new(Modifiers::COMMAND, key);
            if ui.input_mut(|i| i.consume_shortcut(&shortcut)) {
                self.show_page(page);
            }
        }

        ui.menu_button("Demo", |ui| {
            for (page, title, key) in pages {
                let shortcut = egui::KeyboardShortcut::new(Modifiers::COMMAND, key);
                let shortcut = ui.ctx().format_shortcut(&shortcut);
                let btn = Button::new(title)
                    .selected(self.page == page)
                    .min_size((BTN_WIDTH, 0.).into())
                    .shortcut_text(shortcut);
                if ui.add(btn).clicked() {
                    self.show_page(page);
                    ui.close();
                }
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn show_page(&mut self, page: Page) {
        if self.page != page {
            debug!(?page, "switching demo page");
            self.page = page;
        }
    }
}

fn help_menu(ui: &mut egui::Ui) {
    ui.menu_button("Help", |ui| {
        let about_btn = Button::new("About").min_size((BTN_WIDTH, 0.).into());
        if ui.add(about_btn).clicked() {
            if let Err(err) = open::that(REPOSITORY_URL) {
                error!("opening page {REPOSITORY_URL} error: {err}");
            }
            ui.close();
        }
    });
}
