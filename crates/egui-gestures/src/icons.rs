use egui::FontDefinitions;
use egui_phosphor::regular;

pub(crate) const CLOSE: &str = regular::X;
pub(crate) const CHEVRON: &str = regular::CARET_RIGHT;
pub(crate) const CHECKMARK: &str = regular::CHECK;

/// Registers the phosphor icon font the widgets draw their glyphs with.
///
/// Call it while building the host's font definitions, before `Context::set_fonts`.
pub fn install_icons(fonts: &mut FontDefinitions) {
    egui_phosphor::add_to_fonts(fonts, egui_phosphor::Variant::Regular);
}
