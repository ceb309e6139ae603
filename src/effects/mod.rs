/// Instruction for the presentation layer's ambient shuffle/jump animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectsSignal {
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectsCoordinator {
    enabled: bool,
    running: bool,
}

impl EffectsCoordinator {
    pub const fn new() -> Self {
        Self {
            enabled: true,
            running: true,
        }
    }

    pub const fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            running: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the presentation layer may currently run ambient effects.
    pub fn should_run(&self) -> bool {
        self.enabled && self.running
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "ambient effects override");
        self.enabled = enabled;
    }

    pub fn pause(&mut self) -> EffectsSignal {
        self.running = false;
        EffectsSignal::Pause
    }

    /// Resuming under an open overlay or photo viewer would animate the gallery behind it.
    pub fn resume(
        &mut self,
        overlay_any_visible: bool,
        photo_viewer_visible: bool,
    ) -> Option<EffectsSignal> {
        if overlay_any_visible || photo_viewer_visible {
            tracing::debug!(
                overlay_any_visible,
                photo_viewer_visible,
                "ambient effects stay paused"
            );
            return None;
        }
        if !self.enabled {
            tracing::debug!("ambient effects disabled; resume suppressed");
            return None;
        }
        self.running = true;
        Some(EffectsSignal::Resume)
    }
}

impl Default for EffectsCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
