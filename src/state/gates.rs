//! Derived interaction permissions. Everything here is a pure function of [`ViewerFlags`],
//! so callers recompute on every read instead of caching.

use super::model::ViewerFlags;

/// The header logo resets the gallery, so it waits for every load, slide and lock to clear.
pub const fn logo_clickable(flags: ViewerFlags) -> bool {
    !(flags.busy() || flags.carousel_locked)
}

pub const fn desk_slider_interactive(flags: ViewerFlags) -> bool {
    !flags.busy() && (flags.photo_viewer_ready || !flags.photo_viewer_visible)
}

pub const fn carousel_navigable(flags: ViewerFlags) -> bool {
    flags.photo_viewer_visible
        && flags.photo_viewer_ready
        && !flags.carousel_locked
        && !flags.busy()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionGates {
    pub logo_clickable: bool,
    pub desk_slider_interactive: bool,
    pub carousel_navigable: bool,
}

impl InteractionGates {
    pub const fn from_flags(flags: ViewerFlags) -> Self {
        Self {
            logo_clickable: logo_clickable(flags),
            desk_slider_interactive: desk_slider_interactive(flags),
            carousel_navigable: carousel_navigable(flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_from_bits(bits: u8) -> ViewerFlags {
        let bit = |index: u8| bits & (1 << index) != 0;
        ViewerFlags {
            photo_viewer_visible: bit(0),
            photo_slider_visible: bit(1),
            gallery_faded: bit(2),
            carousel_locked: bit(3),
            initial_photo_loading: bit(4),
            desk_switching: bit(5),
            photo_slider_transitioning: bit(6),
            photo_viewer_ready: bit(7),
        }
    }

    fn all_flag_combinations() -> impl Iterator<Item = ViewerFlags> {
        (0..=u8::MAX).map(flags_from_bits)
    }

    #[test]
    fn desk_slider_blocked_whenever_first_photo_is_loading() {
        for flags in all_flag_combinations().filter(|flags| flags.initial_photo_loading) {
            assert!(!desk_slider_interactive(flags), "{flags:?}");
        }
    }

    #[test]
    fn every_busy_flag_blocks_all_gates() {
        for flags in all_flag_combinations().filter(|flags| flags.busy()) {
            assert!(!desk_slider_interactive(flags), "{flags:?}");
            assert!(!logo_clickable(flags), "{flags:?}");
            assert!(!carousel_navigable(flags), "{flags:?}");
        }
    }

    #[test]
    fn logo_requires_unlocked_carousel() {
        for flags in all_flag_combinations().filter(|flags| flags.carousel_locked) {
            assert!(!logo_clickable(flags), "{flags:?}");
            assert!(!carousel_navigable(flags), "{flags:?}");
        }
    }

    #[test]
    fn desk_slider_waits_for_visible_viewer_to_be_ready() {
        let mut flags = ViewerFlags::IDLE;
        assert!(desk_slider_interactive(flags));

        flags.photo_viewer_visible = true;
        assert!(!desk_slider_interactive(flags));

        flags.photo_viewer_ready = true;
        assert!(desk_slider_interactive(flags));
    }

    #[test]
    fn idle_flags_open_gallery_gates_but_not_carousel() {
        let gates = InteractionGates::from_flags(ViewerFlags::IDLE);
        assert_eq!(
            gates,
            InteractionGates {
                logo_clickable: true,
                desk_slider_interactive: true,
                carousel_navigable: false,
            }
        );
    }
}
