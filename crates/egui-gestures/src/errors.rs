#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    #[error("track height must be a positive number, got {0}")]
    InvalidTrackHeight(f32),
    #[error("{0} must not be empty")]
    EmptyText(&'static str),
}
