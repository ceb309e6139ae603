#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    About,
    Submit,
}

impl OverlayKind {
    const fn other(self) -> Self {
        match self {
            Self::About => Self::Submit,
            Self::Submit => Self::About,
        }
    }
}

/// What the gallery's ambient effects should do after an overlay change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySignal {
    Pause,
    Resume,
}

/// Keeps at most one modal overlay on screen. Knows nothing about the effects it signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayCoordinator {
    about_visible: bool,
    submit_visible: bool,
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::About => self.about_visible,
            OverlayKind::Submit => self.submit_visible,
        }
    }

    pub fn any_visible(&self) -> bool {
        self.about_visible || self.submit_visible
    }

    pub fn visible_overlay(&self) -> Option<OverlayKind> {
        [OverlayKind::About, OverlayKind::Submit]
            .into_iter()
            .find(|kind| self.is_visible(*kind))
    }

    fn set_visible(&mut self, kind: OverlayKind, visible: bool) {
        match kind {
            OverlayKind::About => self.about_visible = visible,
            OverlayKind::Submit => self.submit_visible = visible,
        }
    }

    pub fn show(&mut self, kind: OverlayKind) -> OverlaySignal {
        let other = kind.other();
        if self.is_visible(other) {
            tracing::debug!(?other, "hiding overlay to make room");
            self.set_visible(other, false);
        }
        self.set_visible(kind, true);
        tracing::debug!(?kind, "overlay shown");
        OverlaySignal::Pause
    }

    pub fn hide(&mut self, kind: OverlayKind) -> OverlaySignal {
        self.set_visible(kind, false);
        tracing::debug!(?kind, "overlay hidden");
        OverlaySignal::Resume
    }

    pub fn show_about(&mut self) -> OverlaySignal {
        self.show(OverlayKind::About)
    }

    pub fn show_submit(&mut self) -> OverlaySignal {
        self.show(OverlayKind::Submit)
    }

    pub fn hide_about(&mut self) -> OverlaySignal {
        self.hide(OverlayKind::About)
    }

    pub fn hide_submit(&mut self) -> OverlaySignal {
        self.hide(OverlayKind::Submit)
    }
}
