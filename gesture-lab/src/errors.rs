#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid color `{0}`, expected #rrggbb")]
    Color(String),
    #[error("{0}")]
    Gesture(#[from] egui_gestures::GestureError),
}
