use egui::{Ui, Vec2};

/// Pointer travel since the press that started the current drag, including
/// the movement made before egui recognised the drag.
///
/// `None` once the button is released.
pub(crate) fn drag_translation(ui: &Ui) -> Option<Vec2> {
    ui.input(|i| Some(i.pointer.interact_pos()? - i.pointer.press_origin()?))
}
