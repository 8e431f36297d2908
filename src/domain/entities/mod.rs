//! Domain entity definitions.

mod app_info;
mod host;
mod resource;
mod view;

pub use app_info::AppInfo;
pub use host::{
    DisplayedScreen, Host, HostChild, HostEffect, HostSize, LOADING_INDICATOR_STYLE_CLASS,
    Overlay, OverlayKind, SHADE_BLUR_RADIUS, SHADE_SCRIM_OPACITY, SHADE_STYLE_CLASS,
};
pub use resource::ViewResource;
pub use view::{Transform, View, ViewHandle};
