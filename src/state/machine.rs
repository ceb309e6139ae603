use std::collections::{BTreeSet, VecDeque};

use super::error::{StateError, StateResult};
use super::event::{LoadTicket, SlideTicket, StateTransition, ViewerEvent};
use super::gates::InteractionGates;
use super::model::{DeskClone, FlashEffect, ViewerFlags, ViewerPhase, ViewerState};
use crate::catalog::DeskId;

const TRANSITION_HISTORY_LIMIT: usize = 64;

/// Owns the viewer state and applies every change through the transition table.
#[derive(Debug)]
pub struct ViewerStateMachine {
    state: ViewerState,
    generation: u64,
    slides_started: u64,
    window_width: u32,
    transition_history: VecDeque<StateTransition>,
}

impl ViewerStateMachine {
    pub fn new() -> Self {
        Self {
            state: ViewerState::default(),
            generation: 0,
            slides_started: 0,
            window_width: 0,
            transition_history: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn phase(&self) -> ViewerPhase {
        self.state.phase
    }

    pub fn flags(&self) -> ViewerFlags {
        self.state.flags
    }

    pub fn selected_id(&self) -> Option<DeskId> {
        self.state.selected_id
    }

    pub fn clone_descriptor(&self) -> Option<&DeskClone> {
        self.state.clone.as_ref()
    }

    pub fn pending_flash_effect(&self) -> Option<&FlashEffect> {
        self.state.pending_flash.as_ref()
    }

    pub fn hidden_desk_ids(&self) -> &BTreeSet<DeskId> {
        &self.state.hidden_ids
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last reported viewport width in pixels; 0 until the presentation layer reports one.
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn gates(&self) -> InteractionGates {
        InteractionGates::from_flags(self.state.flags)
    }

    pub fn can_transition(&self, event: ViewerEvent) -> bool {
        self.next_phase(event).is_some()
    }

    pub fn next_phase(&self, event: ViewerEvent) -> Option<ViewerPhase> {
        use ViewerEvent as E;
        use ViewerPhase as P;

        let phase = self.state.phase;
        let flags = self.state.flags;
        match (phase, event) {
            (_, E::Reset) => Some(P::Idle),
            (_, E::SelectDesk(_)) if flags.photo_viewer_visible => Some(P::Switching),
            (_, E::SelectDesk(_)) => Some(P::Selecting),

            (P::Selecting, E::ShowViewer) => Some(P::AwaitingFirstPhoto),
            (P::AwaitingFirstPhoto | P::Switching | P::ViewerReady, E::ShowViewer) => Some(phase),

            (P::Idle, E::HideViewer) => Some(P::Idle),
            (_, E::HideViewer) => Some(P::Closing),

            (P::ViewerReady, E::PhotoLoadingStarted | E::DeskSwitchStarted) => Some(P::Switching),
            (
                P::Selecting | P::AwaitingFirstPhoto | P::Switching,
                E::PhotoLoadingStarted | E::DeskSwitchStarted,
            ) => Some(phase),

            (P::Idle, E::FirstPhotoLoaded | E::DeskSwitchSettled | E::ViewerUnready) => None,
            (_, E::FirstPhotoLoaded | E::DeskSwitchSettled) => Some(phase),

            (
                P::Selecting | P::AwaitingFirstPhoto | P::Switching | P::ViewerReady,
                E::ViewerReady,
            ) if !flags.initial_photo_loading => Some(P::ViewerReady),
            (P::ViewerReady, E::ViewerUnready) => Some(P::Switching),
            (_, E::ViewerUnready) => Some(phase),

            (P::ViewerReady, E::SlideStarted)
                if !flags.carousel_locked && !flags.photo_slider_transitioning =>
            {
                Some(P::ViewerReady)
            }
            (_, E::SlideSettled) => Some(phase),

            _ => None,
        }
    }

    fn validate(&self, event: ViewerEvent) -> StateResult<ViewerPhase> {
        self.next_phase(event).ok_or_else(|| {
            let from = self.state.phase;
            tracing::warn!(from = ?from, event = ?event, "invalid viewer transition requested");
            StateError::InvalidStateTransition { from, event }
        })
    }

    fn check_ticket(&self, ticket: LoadTicket) -> StateResult<()> {
        if ticket.generation == self.generation && self.state.selected_id == Some(ticket.desk_id) {
            return Ok(());
        }
        tracing::debug!(
            ?ticket,
            generation = self.generation,
            selected = ?self.state.selected_id,
            "discarding stale viewer completion"
        );
        Err(StateError::StaleCompletion {
            ticket,
            selected: self.state.selected_id,
        })
    }

    fn commit(&mut self, event: ViewerEvent, next: ViewerPhase) {
        tracing::debug!(from = ?self.state.phase, event = ?event, to = ?next, "viewer transition");
        let record = StateTransition::new(self.state.phase, event, next);
        self.state.phase = next;
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history.push_back(record);
    }

    fn transition(&mut self, event: ViewerEvent) -> StateResult<ViewerPhase> {
        let next = self.validate(event)?;
        self.commit(event, next);
        Ok(next)
    }

    fn ticketed_transition(
        &mut self,
        event: ViewerEvent,
        ticket: LoadTicket,
    ) -> StateResult<ViewerPhase> {
        let next = self.validate(event)?;
        self.check_ticket(ticket)?;
        self.commit(event, next);
        Ok(next)
    }

    /// Selects a desk, restarting any transition already under way.
    ///
    /// The returned ticket must accompany the completion signals for this selection; it goes
    /// stale as soon as another desk is selected or the viewer is reset.
    pub fn set_selected_desk_id(&mut self, id: DeskId) -> StateResult<LoadTicket> {
        self.transition(ViewerEvent::SelectDesk(id))?;

        self.generation += 1;
        self.state.selected_id = Some(id);

        let flags = &mut self.state.flags;
        if flags.photo_slider_transitioning {
            tracing::debug!(desk = %id, "selection interrupted an in-flight slide");
        }
        flags.desk_switching = true;
        flags.initial_photo_loading = true;
        flags.carousel_locked = true;
        flags.photo_viewer_ready = false;
        flags.photo_slider_transitioning = false;

        if self.state.clone.as_ref().is_some_and(|clone| clone.desk_id != id) {
            self.state.clone = None;
        }
        if self
            .state
            .pending_flash
            .as_ref()
            .is_some_and(|flash| flash.desk_id != id)
        {
            self.state.pending_flash = None;
        }

        Ok(LoadTicket {
            desk_id: id,
            generation: self.generation,
        })
    }

    pub fn set_photo_viewer_visible(&mut self, visible: bool) -> StateResult<()> {
        if visible {
            self.transition(ViewerEvent::ShowViewer)?;
            self.state.flags.photo_viewer_visible = true;
            return Ok(());
        }

        let next = self.transition(ViewerEvent::HideViewer)?;
        let flags = &mut self.state.flags;
        flags.photo_viewer_visible = false;
        flags.photo_viewer_ready = false;
        flags.photo_slider_transitioning = false;
        if next == ViewerPhase::Closing {
            // Carousel stays frozen while the clone pops back in.
            flags.carousel_locked = true;
        }
        Ok(())
    }

    /// `false` is the "first photo loaded" signal from the presentation layer.
    pub fn set_initial_photo_loading(&mut self, loading: bool, ticket: LoadTicket) -> StateResult<()> {
        let event = if loading {
            ViewerEvent::PhotoLoadingStarted
        } else {
            ViewerEvent::FirstPhotoLoaded
        };
        self.ticketed_transition(event, ticket)?;
        self.state.flags.initial_photo_loading = loading;
        if loading {
            self.state.flags.photo_viewer_ready = false;
        }
        Ok(())
    }

    pub fn set_desk_switching(&mut self, switching: bool, ticket: LoadTicket) -> StateResult<()> {
        let event = if switching {
            ViewerEvent::DeskSwitchStarted
        } else {
            ViewerEvent::DeskSwitchSettled
        };
        self.ticketed_transition(event, ticket)?;
        self.state.flags.desk_switching = switching;
        if switching {
            self.state.flags.photo_viewer_ready = false;
        }
        Ok(())
    }

    /// Marks the carousel loaded. Readiness ends the switch and unlocks the carousel.
    pub fn set_photo_viewer_ready(&mut self, ready: bool, ticket: LoadTicket) -> StateResult<()> {
        let event = if ready {
            ViewerEvent::ViewerReady
        } else {
            ViewerEvent::ViewerUnready
        };
        self.ticketed_transition(event, ticket)?;

        let flags = &mut self.state.flags;
        flags.photo_viewer_ready = ready;
        if ready {
            flags.desk_switching = false;
            flags.carousel_locked = false;
        }
        Ok(())
    }

    fn current_ticket(&self) -> Option<LoadTicket> {
        self.state.selected_id.map(|desk_id| LoadTicket {
            desk_id,
            generation: self.generation,
        })
    }

    /// Starts a carousel slide. Slides are rejected, never queued, while one is running or the
    /// carousel is locked.
    pub fn start_photo_slide(&mut self) -> StateResult<SlideTicket> {
        let next = self.validate(ViewerEvent::SlideStarted)?;
        let Some(load) = self.current_ticket() else {
            return Err(StateError::InvalidStateTransition {
                from: self.state.phase,
                event: ViewerEvent::SlideStarted,
            });
        };
        self.commit(ViewerEvent::SlideStarted, next);

        self.slides_started += 1;
        self.state.flags.photo_slider_transitioning = true;
        Ok(SlideTicket {
            load,
            slide: self.slides_started,
        })
    }

    /// Settles the slide `slide` was issued for. Signals from an earlier slide or selection are
    /// discarded so they cannot settle the one now running.
    pub fn finish_photo_slide(&mut self, slide: SlideTicket) -> StateResult<()> {
        let next = self.validate(ViewerEvent::SlideSettled)?;
        self.check_ticket(slide.load)?;
        if slide.slide != self.slides_started {
            tracing::debug!(?slide, current = self.slides_started, "discarding stale slide completion");
            return Err(StateError::StaleSlide {
                slide,
                current: self.slides_started,
            });
        }
        self.commit(ViewerEvent::SlideSettled, next);
        self.state.flags.photo_slider_transitioning = false;
        Ok(())
    }

    /// Layout input only; kept across resets.
    pub fn set_window_width(&mut self, width: u32) {
        self.window_width = width;
    }

    pub fn set_photo_slider_visible(&mut self, visible: bool) {
        self.state.flags.photo_slider_visible = visible;
    }

    pub fn set_gallery_faded(&mut self, faded: bool) {
        self.state.flags.gallery_faded = faded;
    }

    pub fn set_carousel_locked(&mut self, locked: bool) {
        tracing::trace!(locked, "carousel lock");
        self.state.flags.carousel_locked = locked;
    }

    pub fn set_selected_desk_clone(&mut self, clone: Option<DeskClone>) {
        self.state.clone = clone;
    }

    pub fn set_pending_flash_effect(&mut self, flash: Option<FlashEffect>) {
        self.state.pending_flash = flash;
    }

    pub fn take_pending_flash_effect(&mut self) -> Option<FlashEffect> {
        self.state.pending_flash.take()
    }

    pub fn add_hidden_desk_id(&mut self, id: DeskId) {
        self.state.hidden_ids.insert(id);
    }

    pub fn clear_hidden_desk_ids(&mut self) {
        self.state.hidden_ids.clear();
    }

    /// Returns to the canonical idle state from anywhere; outstanding tickets go stale.
    pub fn reset_viewer_state(&mut self) {
        self.commit(ViewerEvent::Reset, ViewerPhase::Idle);
        self.state = ViewerState::default();
        self.generation += 1;
    }
}

#[cfg(test)]
impl ViewerStateMachine {
    fn history(&self) -> Vec<StateTransition> {
        self.transition_history.iter().copied().collect()
    }
}

impl Default for ViewerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewerStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ViewerPhase::{:?}", self.state.phase)
    }
}
