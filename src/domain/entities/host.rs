//! Single-slot display container.
//!
//! The host keeps an ordered display list. Slot 0 is reserved for the
//! displayed screen; overlays are stacked above it. During a transition an
//! engine may temporarily place the incoming screen in slot 1.

use crate::domain::ScreenName;

use super::ViewHandle;

/// Blur radius applied while the host is shaded.
pub const SHADE_BLUR_RADIUS: f32 = 5.0;

/// Opacity of the shade scrim.
pub const SHADE_SCRIM_OPACITY: f32 = 0.2;

/// Style class of the loading indicator overlay.
pub const LOADING_INDICATOR_STYLE_CLASS: &str = "loading-indicator-overlay";

/// Style class of the shade scrim.
pub const SHADE_STYLE_CLASS: &str = "shade-screen-overlay";

/// Host dimensions in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSize {
    pub width: u16,
    pub height: u16,
}

impl HostSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Visual effect applied to the whole host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEffect {
    Blur { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    LoadingIndicator,
    Shade,
}

/// Layered element stacked above the displayed screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub style_class: &'static str,
    pub opacity: f32,
    /// Whether the overlay follows the host's dimensions.
    pub tracks_host_size: bool,
    pub size: HostSize,
}

impl Overlay {
    #[must_use]
    pub fn loading_indicator(host_size: HostSize) -> Self {
        Self {
            kind: OverlayKind::LoadingIndicator,
            style_class: LOADING_INDICATOR_STYLE_CLASS,
            opacity: 1.0,
            tracks_host_size: true,
            size: host_size,
        }
    }

    #[must_use]
    pub fn shade_scrim(host_size: HostSize) -> Self {
        Self {
            kind: OverlayKind::Shade,
            style_class: SHADE_STYLE_CLASS,
            opacity: SHADE_SCRIM_OPACITY,
            tracks_host_size: true,
            size: host_size,
        }
    }
}

/// Entry in the host display list.
#[derive(Debug, Clone)]
pub enum HostChild {
    Screen { name: ScreenName, view: ViewHandle },
    Overlay(Overlay),
}

impl HostChild {
    #[must_use]
    pub fn screen(name: ScreenName, view: ViewHandle) -> Self {
        Self::Screen { name, view }
    }

    #[must_use]
    pub const fn is_screen(&self) -> bool {
        matches!(self, Self::Screen { .. })
    }

    #[must_use]
    pub fn overlay_kind(&self) -> Option<OverlayKind> {
        match self {
            Self::Overlay(overlay) => Some(overlay.kind),
            Self::Screen { .. } => None,
        }
    }
}

/// Screen as handed to transition engines.
#[derive(Debug, Clone)]
pub struct DisplayedScreen {
    pub name: ScreenName,
    pub view: ViewHandle,
}

#[derive(Debug, Default)]
pub struct Host {
    children: Vec<HostChild>,
    effect: Option<HostEffect>,
    size: HostSize,
}

impl Host {
    #[must_use]
    pub fn new(size: HostSize) -> Self {
        Self {
            children: Vec::new(),
            effect: None,
            size,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[HostChild] {
        &self.children
    }

    #[must_use]
    pub const fn size(&self) -> HostSize {
        self.size
    }

    /// Resizes the host; overlays that track the host follow.
    pub fn resize(&mut self, size: HostSize) {
        self.size = size;
        for child in &mut self.children {
            if let HostChild::Overlay(overlay) = child
                && overlay.tracks_host_size
            {
                overlay.size = size;
            }
        }
    }

    #[must_use]
    pub const fn effect(&self) -> Option<HostEffect> {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Option<HostEffect>) {
        self.effect = effect;
    }

    /// The screen in slot 0, if any.
    #[must_use]
    pub fn displayed_screen(&self) -> Option<DisplayedScreen> {
        match self.children.first() {
            Some(HostChild::Screen { name, view }) => Some(DisplayedScreen {
                name: name.clone(),
                view: view.clone(),
            }),
            _ => None,
        }
    }

    /// Removes the screen in slot 0. Anything else in slot 0 is left alone.
    pub fn remove_displayed_screen(&mut self) -> Option<DisplayedScreen> {
        let displayed = self.displayed_screen()?;
        self.children.remove(0);
        Some(displayed)
    }

    /// Makes `screen` the sole displayed screen.
    pub fn display_screen(&mut self, screen: DisplayedScreen) {
        self.remove_displayed_screen();
        self.insert_screen(screen);
    }

    /// Puts `screen` in slot 0 without removing anything.
    pub fn insert_screen(&mut self, screen: DisplayedScreen) {
        self.children
            .insert(0, HostChild::screen(screen.name, screen.view));
    }

    /// Places a screen directly above the displayed one, below all overlays.
    pub fn stage_screen(&mut self, screen: DisplayedScreen) {
        let index = usize::from(self.displayed_screen().is_some());
        self.children
            .insert(index, HostChild::screen(screen.name, screen.view));
    }

    /// Removes the child holding `view`.
    pub fn remove_view(&mut self, view: &ViewHandle) -> bool {
        let before = self.children.len();
        self.children.retain(|child| match child {
            HostChild::Screen { view: shown, .. } => !shown.ptr_eq(view),
            HostChild::Overlay(_) => true,
        });
        before != self.children.len()
    }

    #[must_use]
    pub fn screen_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_screen()).count()
    }

    #[must_use]
    pub fn overlay_count(&self, kind: OverlayKind) -> usize {
        self.children
            .iter()
            .filter(|c| c.overlay_kind() == Some(kind))
            .count()
    }

    #[must_use]
    pub fn has_overlay(&self, kind: OverlayKind) -> bool {
        self.overlay_count(kind) > 0
    }

    /// Pushes an overlay on top unless one of the same kind is present.
    pub fn add_overlay(&mut self, mut overlay: Overlay) -> bool {
        if self.has_overlay(overlay.kind) {
            return false;
        }
        if overlay.tracks_host_size {
            overlay.size = self.size;
        }
        self.children.push(HostChild::Overlay(overlay));
        true
    }

    pub fn remove_overlay(&mut self, kind: OverlayKind) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.overlay_kind() != Some(kind));
        before != self.children.len()
    }
}
