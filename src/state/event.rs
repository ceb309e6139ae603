use super::model::ViewerPhase;
use crate::catalog::DeskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    SelectDesk(DeskId),
    ShowViewer,
    HideViewer,
    PhotoLoadingStarted,
    FirstPhotoLoaded,
    DeskSwitchStarted,
    DeskSwitchSettled,
    ViewerReady,
    ViewerUnready,
    SlideStarted,
    SlideSettled,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: ViewerPhase,
    pub event: ViewerEvent,
    pub to: ViewerPhase,
}

impl StateTransition {
    pub const fn new(from: ViewerPhase, event: ViewerEvent, to: ViewerPhase) -> Self {
        Self { from, event, to }
    }
}

/// Tags an asynchronous completion with the selection that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub desk_id: DeskId,
    pub generation: u64,
}

/// Tags a slide-finished signal with the slide that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTicket {
    pub load: LoadTicket,
    pub slide: u64,
}
