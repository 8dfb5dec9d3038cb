mod errors;
mod icons;
mod motion;
mod pointer;
mod popout;
mod slide;

pub use errors::GestureError;
pub use icons::install_icons;
pub use motion::{Easing, Tween};
pub use popout::{
    PanelAnimation, PanelController, PanelEvent, PanelPhase, PanelState, PanelVisuals, Popout,
};
pub use slide::{
    SlideAnimation, SlideConfig, SlideController, SlideEvent, SlidePhase, SlideRelease,
    SlideState, SlideToConfirm, SlideVisuals,
};
