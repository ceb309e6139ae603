pub mod error;
pub mod event;
pub mod gates;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{LoadTicket, SlideTicket, StateTransition, ViewerEvent};
pub use gates::InteractionGates;
pub use machine::ViewerStateMachine;
pub use model::{DeskClone, FlashEffect, ViewerFlags, ViewerPhase, ViewerState};
