use super::event::{LoadTicket, SlideTicket, ViewerEvent};
use super::model::ViewerPhase;
use crate::catalog::DeskId;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: ViewerPhase,
        event: ViewerEvent,
    },
    #[error("stale completion for {ticket:?}; current selection is {selected:?}")]
    StaleCompletion {
        ticket: LoadTicket,
        selected: Option<DeskId>,
    },
    #[error("stale slide completion for {slide:?}; current slide is {current}")]
    StaleSlide { slide: SlideTicket, current: u64 },
}
