use std::collections::BTreeSet;

use crate::catalog::DeskId;
use crate::geometry::CloneBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerPhase {
    /// No selection; the gallery is fully interactive.
    #[default]
    Idle,
    /// A desk was clicked and the pop-out has not started yet.
    Selecting,
    /// The clone is popping out; waiting on the first photo.
    AwaitingFirstPhoto,
    ViewerReady,
    /// Another desk was picked while the viewer was already up.
    Switching,
    /// Dismissed; the clone is animating back into the gallery.
    Closing,
}

/// Snapshot of the gallery element a desk was opened from.
#[derive(Debug, Clone, PartialEq)]
pub struct DeskClone {
    pub desk_id: DeskId,
    pub bounds: CloneBounds,
    pub image: String,
}

impl DeskClone {
    pub fn new(desk_id: DeskId, bounds: CloneBounds, image: impl Into<String>) -> Self {
        Self {
            desk_id,
            bounds,
            image: image.into(),
        }
    }
}

/// Deferred screen flash to play once the presentation layer has the new desk on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashEffect {
    pub desk_id: DeskId,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerFlags {
    pub photo_viewer_visible: bool,
    pub photo_slider_visible: bool,
    pub gallery_faded: bool,
    pub carousel_locked: bool,
    pub initial_photo_loading: bool,
    pub desk_switching: bool,
    pub photo_slider_transitioning: bool,
    pub photo_viewer_ready: bool,
}

impl ViewerFlags {
    pub const IDLE: Self = Self {
        photo_viewer_visible: false,
        photo_slider_visible: true,
        gallery_faded: false,
        carousel_locked: false,
        initial_photo_loading: false,
        desk_switching: false,
        photo_slider_transitioning: false,
        photo_viewer_ready: false,
    };

    /// True while any load or animation owns the viewer.
    pub const fn busy(self) -> bool {
        self.initial_photo_loading || self.desk_switching || self.photo_slider_transitioning
    }
}

impl Default for ViewerFlags {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerState {
    pub phase: ViewerPhase,
    pub selected_id: Option<DeskId>,
    pub hidden_ids: BTreeSet<DeskId>,
    pub clone: Option<DeskClone>,
    pub pending_flash: Option<FlashEffect>,
    pub flags: ViewerFlags,
}

impl ViewerState {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
