use crate::audio::{AudioManager, SoundCue, SoundSink};
use crate::catalog::{CatalogError, CatalogResult, DeskCatalog, DeskId, DeskRecord, DeskSource};
use crate::effects::{EffectsCoordinator, EffectsSignal};
use crate::error::AppResult;
use crate::overlay::{OverlayCoordinator, OverlayKind, OverlaySignal};
use crate::routing::Route;
use crate::state::{
    DeskClone, FlashEffect, InteractionGates, LoadTicket, SlideTicket, ViewerPhase,
    ViewerStateMachine,
};

/// Owns every coordinator and routes signals between them in dispatch order.
#[derive(Debug)]
pub struct Showcase<S> {
    catalog: DeskCatalog,
    viewer: ViewerStateMachine,
    overlays: OverlayCoordinator,
    effects: EffectsCoordinator,
    audio: AudioManager<S>,
    effects_outbox: Vec<EffectsSignal>,
}

impl<S: SoundSink> Showcase<S> {
    pub fn new(catalog: DeskCatalog, audio: AudioManager<S>) -> Self {
        Self {
            catalog,
            viewer: ViewerStateMachine::new(),
            overlays: OverlayCoordinator::new(),
            effects: EffectsCoordinator::new(),
            audio,
            effects_outbox: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &DeskCatalog {
        &self.catalog
    }

    pub fn viewer(&self) -> &ViewerStateMachine {
        &self.viewer
    }

    /// Completion signals from the presentation layer go straight to the machine.
    pub fn viewer_mut(&mut self) -> &mut ViewerStateMachine {
        &mut self.viewer
    }

    pub fn overlays(&self) -> &OverlayCoordinator {
        &self.overlays
    }

    pub fn effects(&self) -> &EffectsCoordinator {
        &self.effects
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<S> {
        &mut self.audio
    }

    pub fn gates(&self) -> InteractionGates {
        self.viewer.gates()
    }

    pub fn selected_desk(&self) -> Option<&DeskRecord> {
        self.viewer
            .selected_id()
            .and_then(|id| self.catalog.find_by_id(id))
    }

    pub fn load_catalog(&mut self, source: &dyn DeskSource) -> CatalogResult<usize> {
        self.catalog.load(source)
    }

    /// The first click, key or touch unlocks audio for the rest of the session.
    pub fn user_interacted(&mut self) {
        self.audio.grant_playback();
    }

    /// Master switch for ambient effects. Only real changes reach the outbox: turning effects
    /// off while they run emits `Pause`, turning them back on attempts a resume.
    pub fn set_effects_enabled(&mut self, enabled: bool) {
        if self.effects.is_enabled() == enabled {
            return;
        }
        let was_running = self.effects.should_run();
        self.effects.set_enabled(enabled);
        if !enabled {
            if was_running {
                self.pause_effects();
            }
        } else if !self.effects.is_running() {
            self.resume_effects();
        }
    }

    pub fn drain_effects_signals(&mut self) -> Vec<EffectsSignal> {
        std::mem::take(&mut self.effects_outbox)
    }

    pub fn show_overlay(&mut self, kind: OverlayKind) {
        let signal = self.overlays.show(kind);
        self.audio.play_cue(SoundCue::HeaderClick);
        self.apply_overlay_signal(signal);
    }

    pub fn hide_overlay(&mut self, kind: OverlayKind) {
        let signal = self.overlays.hide(kind);
        self.apply_overlay_signal(signal);
    }

    fn apply_overlay_signal(&mut self, signal: OverlaySignal) {
        match signal {
            OverlaySignal::Pause => self.pause_effects(),
            OverlaySignal::Resume => self.resume_effects(),
        }
    }

    fn pause_effects(&mut self) {
        let signal = self.effects.pause();
        self.effects_outbox.push(signal);
    }

    fn resume_effects(&mut self) {
        let overlay_visible = self.overlays.any_visible();
        let viewer_visible = self.viewer.flags().photo_viewer_visible;
        if let Some(signal) = self.effects.resume(overlay_visible, viewer_visible) {
            self.effects_outbox.push(signal);
        }
    }

    /// A gallery desk was clicked (or routed to). Restarts any transition in flight.
    pub fn open_desk(&mut self, id: DeskId, clone: Option<DeskClone>) -> AppResult<LoadTicket> {
        let desk = self
            .catalog
            .find_by_id(id)
            .ok_or(CatalogError::UnknownDesk(id))?;
        let flash = desk.first_photo().map(|image| FlashEffect {
            desk_id: id,
            image: image.to_string(),
        });

        let ticket = self.viewer.set_selected_desk_id(id)?;
        self.viewer.set_selected_desk_clone(clone);
        self.viewer.set_pending_flash_effect(flash);
        self.viewer.set_gallery_faded(true);
        self.viewer.add_hidden_desk_id(id);
        self.pause_effects();
        self.audio.play_cue(SoundCue::GalleryClick);

        tracing::debug!(desk = %id, generation = ticket.generation, "desk opened");
        Ok(ticket)
    }

    /// The clone has started popping out.
    pub fn show_viewer(&mut self) -> AppResult<()> {
        self.viewer.set_photo_viewer_visible(true)?;
        Ok(())
    }

    pub fn first_photo_loaded(&mut self, ticket: LoadTicket) -> AppResult<()> {
        self.viewer.set_initial_photo_loading(false, ticket)?;
        self.audio.play_cue(SoundCue::PhotoViewerLoad);
        Ok(())
    }

    pub fn viewer_ready(&mut self, ticket: LoadTicket) -> AppResult<()> {
        self.viewer.set_photo_viewer_ready(true, ticket)?;
        Ok(())
    }

    /// The returned ticket must accompany the matching [`Self::finish_slide`].
    pub fn start_slide(&mut self) -> AppResult<SlideTicket> {
        let slide = self.viewer.start_photo_slide()?;
        self.audio.play_cue(SoundCue::PhotoViewerClick);
        Ok(slide)
    }

    pub fn finish_slide(&mut self, slide: SlideTicket) -> AppResult<()> {
        self.viewer.finish_photo_slide(slide)?;
        Ok(())
    }

    /// Starts the pop-in. The gallery stays faded until [`Self::finish_close`].
    pub fn close_viewer(&mut self) -> AppResult<()> {
        self.viewer.set_photo_viewer_visible(false)?;
        Ok(())
    }

    /// The pop-in animation finished; back to the idle gallery.
    pub fn finish_close(&mut self) {
        self.viewer.reset_viewer_state();
        self.resume_effects();
    }

    /// Applies a URL change. Returns a ticket when a new desk load began.
    pub fn navigate(&mut self, route: &Route) -> AppResult<Option<LoadTicket>> {
        match route {
            Route::Desk(slug) => {
                let id = self
                    .catalog
                    .find_by_slug(slug)
                    .filter(|desk| desk.is_visible())
                    .map(|desk| desk.id)
                    .ok_or_else(|| CatalogError::UnknownSlug(slug.clone()))?;
                let already_open = self.viewer.selected_id() == Some(id)
                    && self.viewer.phase() != ViewerPhase::Closing;
                if already_open {
                    return Ok(None);
                }
                self.open_desk(id, None).map(Some)
            }
            Route::Home | Route::Admin => {
                if !matches!(self.viewer.phase(), ViewerPhase::Idle | ViewerPhase::Closing) {
                    self.close_viewer()?;
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioConfig, AudioResult, Playback};
    use crate::catalog::{sample_desk, DeskStatus};
    use crate::error::AppError;
    use crate::geometry::CloneBounds;
    use crate::state::StateError;

    #[derive(Debug, Default)]
    struct CountingSink {
        played: Vec<String>,
    }

    impl SoundSink for CountingSink {
        fn load(&mut self, _name: &str, _locator: &str) -> AudioResult<()> {
            Ok(())
        }

        fn play(&mut self, name: &str, _playback: Playback) -> AudioResult<()> {
            self.played.push(name.to_string());
            Ok(())
        }

        fn stop(&mut self, _name: &str) -> AudioResult<()> {
            Ok(())
        }

        fn unload(&mut self, _name: &str) {}
    }

    fn showcase() -> Showcase<CountingSink> {
        let catalog = DeskCatalog::with_desks(vec![
            sample_desk(1, "Ada Lovelace"),
            sample_desk(3, "Alan Turing"),
            sample_desk(5, "Grace Hopper"),
        ]);
        let mut audio = AudioManager::new(CountingSink::default());
        audio.initialize(&AudioConfig::default());
        Showcase::new(catalog, audio)
    }

    fn gallery_clone(id: u64) -> DeskClone {
        DeskClone::new(
            DeskId(id),
            CloneBounds::new(0.0, 0.0, 200.0, 150.0),
            format!("/profiles/{id}.jpg"),
        )
    }

    fn open_to_ready(showcase: &mut Showcase<CountingSink>, id: u64) -> LoadTicket {
        let ticket = showcase
            .open_desk(DeskId(id), Some(gallery_clone(id)))
            .expect("desk exists");
        showcase.show_viewer().expect("selection allows the viewer");
        showcase.first_photo_loaded(ticket).expect("ticket is current");
        showcase.viewer_ready(ticket).expect("first photo is loaded");
        ticket
    }

    #[test]
    fn overlays_pause_effects_and_resume_only_when_everything_is_closed() {
        let mut showcase = showcase();
        showcase.show_overlay(OverlayKind::About);
        showcase.show_overlay(OverlayKind::Submit);
        assert!(!showcase.overlays().is_visible(OverlayKind::About));
        assert_eq!(
            showcase.drain_effects_signals(),
            vec![EffectsSignal::Pause, EffectsSignal::Pause]
        );

        showcase.hide_overlay(OverlayKind::Submit);
        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Resume]);
        assert!(showcase.effects().should_run());
    }

    #[test]
    fn hiding_overlay_over_open_viewer_keeps_effects_paused() {
        let mut showcase = showcase();
        open_to_ready(&mut showcase, 3);
        showcase.show_overlay(OverlayKind::About);
        showcase.hide_overlay(OverlayKind::About);

        assert_eq!(
            showcase.drain_effects_signals(),
            vec![EffectsSignal::Pause, EffectsSignal::Pause]
        );
        assert!(!showcase.effects().should_run());
    }

    #[test]
    fn open_desk_prepares_viewer_for_pop_out() {
        let mut showcase = showcase();
        showcase.user_interacted();
        let ticket = showcase
            .open_desk(DeskId(3), Some(gallery_clone(3)))
            .expect("desk 3 exists");

        let viewer = showcase.viewer();
        assert_eq!(ticket.desk_id, DeskId(3));
        assert_eq!(viewer.phase(), ViewerPhase::Selecting);
        assert!(viewer.flags().gallery_faded);
        assert!(viewer.hidden_desk_ids().contains(&DeskId(3)));
        assert_eq!(
            viewer.clone_descriptor().map(|clone| clone.desk_id),
            Some(DeskId(3))
        );
        assert_eq!(
            viewer.pending_flash_effect().map(|flash| flash.image.as_str()),
            Some("/photos/3-1.jpg")
        );
        assert_eq!(
            showcase.selected_desk().map(|desk| desk.name.as_str()),
            Some("Alan Turing")
        );
        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Pause]);
        assert_eq!(showcase.audio().sink().played, vec!["gallery_click"]);
    }

    #[test]
    fn open_unknown_desk_leaves_state_untouched() {
        let mut showcase = showcase();
        let err = showcase
            .open_desk(DeskId(42), None)
            .expect_err("desk 42 does not exist");

        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::UnknownDesk(DeskId(42)))
        ));
        assert!(showcase.viewer().state().is_idle());
        assert!(showcase.drain_effects_signals().is_empty());
    }

    #[test]
    fn full_open_and_close_cycle_returns_to_idle_and_resumes_effects() {
        let mut showcase = showcase();
        showcase.user_interacted();
        open_to_ready(&mut showcase, 5);

        let gates = showcase.gates();
        assert!(gates.logo_clickable);
        assert!(gates.desk_slider_interactive);
        assert!(gates.carousel_navigable);

        let slide = showcase.start_slide().expect("ready carousel accepts a slide");
        assert!(showcase.start_slide().is_err());
        showcase.finish_slide(slide).unwrap();

        showcase.close_viewer().unwrap();
        assert_eq!(showcase.viewer().phase(), ViewerPhase::Closing);
        showcase.finish_close();

        assert!(showcase.viewer().state().is_idle());
        assert_eq!(
            showcase.drain_effects_signals(),
            vec![EffectsSignal::Pause, EffectsSignal::Resume]
        );
        assert_eq!(
            showcase.audio().sink().played,
            vec!["gallery_click", "photoviewer_load", "photoviewer_click"]
        );
    }

    #[test]
    fn stale_completion_from_previous_desk_is_rejected() {
        let mut showcase = showcase();
        let first = showcase.open_desk(DeskId(1), None).unwrap();
        showcase.show_viewer().unwrap();
        let second = showcase.open_desk(DeskId(3), None).unwrap();

        let err = showcase
            .first_photo_loaded(first)
            .expect_err("desk 1 is no longer selected");
        assert!(matches!(
            err,
            AppError::State(StateError::StaleCompletion { .. })
        ));
        assert!(showcase.viewer().flags().initial_photo_loading);

        showcase.first_photo_loaded(second).unwrap();
        assert!(!showcase.viewer().flags().initial_photo_loading);
    }

    #[test]
    fn navigate_selects_by_slug_and_ignores_repeat() {
        let mut showcase = showcase();
        let ticket = showcase
            .navigate(&Route::parse("/grace-hopper"))
            .expect("slug exists");
        assert_eq!(ticket.map(|ticket| ticket.desk_id), Some(DeskId(5)));

        let repeat = showcase.navigate(&Route::parse("/grace-hopper/")).unwrap();
        assert_eq!(repeat, None);
        assert_eq!(showcase.viewer().generation(), 1);

        let err = showcase
            .navigate(&Route::parse("/nobody"))
            .expect_err("unknown slug");
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::UnknownSlug(_))
        ));
        assert_eq!(showcase.viewer().selected_id(), Some(DeskId(5)));
    }

    #[test]
    fn navigate_skips_desks_awaiting_approval() {
        let mut pending = sample_desk(8, "Pending Person");
        pending.status = Some(DeskStatus::Pending);
        let mut audio = AudioManager::new(CountingSink::default());
        audio.initialize(&AudioConfig::default());
        let mut showcase = Showcase::new(DeskCatalog::with_desks(vec![pending]), audio);

        let err = showcase
            .navigate(&Route::parse("/pending-person"))
            .expect_err("pending desks are not public");
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::UnknownSlug(_))
        ));
        assert!(showcase.viewer().state().is_idle());
    }

    #[test]
    fn navigate_home_closes_open_viewer() {
        let mut showcase = showcase();
        open_to_ready(&mut showcase, 1);

        showcase.navigate(&Route::Home).unwrap();
        assert_eq!(showcase.viewer().phase(), ViewerPhase::Closing);

        showcase.navigate(&Route::Admin).unwrap();
        assert_eq!(showcase.viewer().phase(), ViewerPhase::Closing);
    }

    #[test]
    fn disabled_effects_stay_paused_after_close() {
        let mut showcase = showcase();
        showcase.set_effects_enabled(false);
        open_to_ready(&mut showcase, 1);
        showcase.close_viewer().unwrap();
        showcase.finish_close();

        assert_eq!(
            showcase.drain_effects_signals(),
            vec![EffectsSignal::Pause, EffectsSignal::Pause]
        );
        assert!(!showcase.effects().should_run());

        showcase.set_effects_enabled(true);
        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Resume]);
        assert!(showcase.effects().should_run());
    }

    #[test]
    fn effects_switch_signals_only_on_real_changes() {
        let mut showcase = showcase();
        showcase.set_effects_enabled(true);
        showcase.set_effects_enabled(true);
        assert!(showcase.drain_effects_signals().is_empty());

        showcase.set_effects_enabled(false);
        showcase.set_effects_enabled(false);
        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Pause]);
        assert!(!showcase.effects().should_run());

        showcase.set_effects_enabled(true);
        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Resume]);
        assert!(showcase.effects().should_run());
    }

    #[test]
    fn enabling_effects_under_an_overlay_stays_quiet() {
        let mut showcase = showcase();
        showcase.show_overlay(OverlayKind::About);
        showcase.set_effects_enabled(false);
        showcase.set_effects_enabled(true);

        assert_eq!(showcase.drain_effects_signals(), vec![EffectsSignal::Pause]);
        assert!(!showcase.effects().should_run());
    }

    #[test]
    fn late_slide_finish_from_previous_desk_is_discarded() {
        let mut showcase = showcase();
        open_to_ready(&mut showcase, 1);
        let old_slide = showcase.start_slide().unwrap();

        let ticket = showcase.open_desk(DeskId(3), None).unwrap();
        showcase.first_photo_loaded(ticket).unwrap();
        showcase.viewer_ready(ticket).unwrap();
        let slide = showcase.start_slide().unwrap();

        let err = showcase
            .finish_slide(old_slide)
            .expect_err("desk 1 slide is stale");
        assert!(matches!(
            err,
            AppError::State(StateError::StaleCompletion { .. })
        ));
        assert!(showcase.viewer().flags().photo_slider_transitioning);
        assert!(!showcase.gates().carousel_navigable);

        showcase.finish_slide(slide).unwrap();
        assert!(showcase.gates().carousel_navigable);
    }
}
