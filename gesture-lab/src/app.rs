use crate::config::LabConfig;
use crate::consts::GLOBAL_COUNTER;
use eframe::{egui, NativeOptions};
use egui_gestures::SlideConfig;
use egui_theme_switch::global_theme_switch;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Popout,
    SlideToConfirm,
}

#[derive(Debug, Clone)]
pub struct PopoutOptions {
    pub title: String,
    pub subtitle: String,
    pub last_opened: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SlideOptions {
    pub config: SlideConfig,
    /// Id salt of the mounted control; bumping it mounts a fresh one.
    pub instance: u64,
    pub confirmations: u32,
}

pub struct GestureLab {
    pub page: Page,
    pub popout: PopoutOptions,
    pub slide: SlideOptions,
}

impl GestureLab {
    pub fn new(config: &LabConfig) -> Self {
        let slide_config = config.slide_config().unwrap_or_else(|err| {
            error!("invalid slide config, using defaults: {err}");
            SlideConfig::default()
        });
        Self {
            page: Page::default(),
            popout: PopoutOptions {
                title: config.popout.title.clone(),
                subtitle: config.popout.subtitle.clone(),
                last_opened: None,
            },
            slide: SlideOptions {
                config: slide_config,
                instance: GLOBAL_COUNTER.next(),
                confirmations: 0,
            },
        }
    }

    pub fn start(options: NativeOptions, config: LabConfig) -> eframe::Result<()> {
        eframe::run_native(
            "Gesture Lab",
            options,
            Box::new(move |cc| {
                catppuccin_egui::set_theme(&cc.egui_ctx, catppuccin_egui::FRAPPE);
                set_font(&cc.egui_ctx);
                Ok(Box::new(GestureLab::new(&config)))
            }),
        )
    }
}

impl eframe::App for GestureLab {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("main_top_panel").show(ctx, |ui| {
            self.menubar(ui);
        });
        egui::TopBottomPanel::bottom("main_bottom_panel").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                global_theme_switch(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Popout => self.popout_page(ui),
            Page::SlideToConfirm => self.slide_page(ui),
        });
    }
}

fn set_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_gestures::install_icons(&mut fonts);
    ctx.set_fonts(fonts);
}
