use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to load sound {name:?} from {locator}: {reason}")]
    Load {
        name: String,
        locator: String,
        reason: String,
    },
    #[error("failed to play sound {name:?}: {reason}")]
    Playback { name: String, reason: String },
}

pub type AudioResult<T> = std::result::Result<T, AudioError>;

/// The named cues the gallery triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    GalleryClick,
    GalleryHover,
    GalleryShuffle,
    GalleryJump,
    HeaderClick,
    HeaderHover,
    PhotoViewerClick,
    PhotoViewerHover,
    PhotoViewerLoad,
}

impl SoundCue {
    pub const ALL: [Self; 9] = [
        Self::GalleryClick,
        Self::GalleryHover,
        Self::GalleryShuffle,
        Self::GalleryJump,
        Self::HeaderClick,
        Self::HeaderHover,
        Self::PhotoViewerClick,
        Self::PhotoViewerHover,
        Self::PhotoViewerLoad,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GalleryClick => "gallery_click",
            Self::GalleryHover => "gallery_hover",
            Self::GalleryShuffle => "gallery_shuffle",
            Self::GalleryJump => "gallery_jump",
            Self::HeaderClick => "header_click",
            Self::HeaderHover => "header_hover",
            Self::PhotoViewerClick => "photoviewer_click",
            Self::PhotoViewerHover => "photoviewer_hover",
            Self::PhotoViewerLoad => "photoviewer_load",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    pub sounds: BTreeMap<String, String>,
    pub default_volume: f32,
}

impl AudioConfig {
    /// Every [`SoundCue`] mapped to `<sound_dir>/<name>.mp3`.
    pub fn with_default_sounds(sound_dir: &str) -> Self {
        let sound_dir = sound_dir.trim_end_matches('/');
        let sounds = SoundCue::ALL
            .iter()
            .map(|cue| (cue.as_str().to_string(), format!("{sound_dir}/{cue}.mp3")))
            .collect();
        Self {
            sounds,
            default_volume: DEFAULT_VOLUME,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::with_default_sounds("assets/sounds")
    }
}

/// Settings resolved for a single play call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub volume: f32,
    pub looped: bool,
    pub start_at: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayOptions {
    pub volume: Option<f32>,
    pub looped: Option<bool>,
    pub start_at: Option<Duration>,
}

impl PlayOptions {
    pub fn volume(volume: f32) -> Self {
        Self {
            volume: Some(volume),
            ..Self::default()
        }
    }
}

/// Whatever actually makes noise. The manager only decides whether a cue fires.
pub trait SoundSink {
    fn load(&mut self, name: &str, locator: &str) -> AudioResult<()>;
    fn play(&mut self, name: &str, playback: Playback) -> AudioResult<()>;
    fn stop(&mut self, name: &str) -> AudioResult<()>;
    fn unload(&mut self, name: &str);
}

/// Sink that only reports cues to the log; used when no audio backend is attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn load(&mut self, name: &str, locator: &str) -> AudioResult<()> {
        tracing::debug!(name, locator, "sound registered");
        Ok(())
    }

    fn play(&mut self, name: &str, playback: Playback) -> AudioResult<()> {
        tracing::info!(name, volume = playback.volume, looped = playback.looped, "play sound");
        Ok(())
    }

    fn stop(&mut self, name: &str) -> AudioResult<()> {
        tracing::debug!(name, "stop sound");
        Ok(())
    }

    fn unload(&mut self, _name: &str) {}
}

#[derive(Debug, Clone)]
struct SoundEntry {
    locator: String,
    volume: f32,
}

/// Gates named sound cues behind a one-time playback grant and a mute switch.
#[derive(Debug)]
pub struct AudioManager<S> {
    sink: S,
    sounds: BTreeMap<String, SoundEntry>,
    default_volume: f32,
    initialized: bool,
    playback_granted: bool,
    muted: bool,
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sounds: BTreeMap::new(),
            default_volume: DEFAULT_VOLUME,
            initialized: false,
            playback_granted: false,
            muted: false,
        }
    }

    /// Registers every configured sound once. Later calls are ignored until [`Self::dispose`].
    pub fn initialize(&mut self, config: &AudioConfig) {
        if self.initialized {
            tracing::debug!("audio already initialized");
            return;
        }
        self.default_volume = clamp_volume(config.default_volume);
        for (name, locator) in &config.sounds {
            if let Err(err) = self.sink.load(name, locator) {
                tracing::warn!(%err, "skipping sound that failed to load");
                continue;
            }
            self.sounds.insert(
                name.clone(),
                SoundEntry {
                    locator: locator.clone(),
                    volume: self.default_volume,
                },
            );
        }
        self.initialized = true;
        tracing::info!(count = self.sounds.len(), "audio initialized");
    }

    pub fn dispose(&mut self) {
        for name in self.sounds.keys() {
            self.sink.unload(name);
        }
        self.sounds.clear();
        self.initialized = false;
        self.playback_granted = false;
        tracing::debug!("audio disposed");
    }

    /// Records the first user interaction. Returns whether this call granted playback.
    pub fn grant_playback(&mut self) -> bool {
        if self.playback_granted || self.sounds.is_empty() {
            return false;
        }
        self.playback_granted = true;
        tracing::info!("audio enabled after user interaction");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_playback_granted(&self) -> bool {
        self.playback_granted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn default_volume(&self) -> f32 {
        self.default_volume
    }

    pub fn available_sounds(&self) -> Vec<&str> {
        self.sounds.keys().map(String::as_str).collect()
    }

    pub fn locator(&self, name: &str) -> Option<&str> {
        self.sounds.get(name).map(|entry| entry.locator.as_str())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Fire and forget; failures are logged and never reach the caller.
    pub fn play(&mut self, name: &str, options: PlayOptions) {
        let Some(entry) = self.sounds.get(name) else {
            tracing::warn!(name, "sound not found");
            return;
        };
        if !self.playback_granted {
            tracing::debug!(name, "audio not enabled yet; waiting for user interaction");
            return;
        }
        if self.muted {
            return;
        }

        let playback = Playback {
            volume: options.volume.map(clamp_volume).unwrap_or(entry.volume),
            looped: options.looped.unwrap_or(false),
            start_at: options.start_at.unwrap_or(Duration::ZERO),
        };
        if let Err(err) = self.sink.play(name, playback) {
            tracing::warn!(%err, "could not play sound");
        }
    }

    pub fn play_cue(&mut self, cue: SoundCue) {
        self.play(cue.as_str(), PlayOptions::default());
    }

    pub fn stop(&mut self, name: &str) {
        if !self.sounds.contains_key(name) {
            return;
        }
        if let Err(err) = self.sink.stop(name) {
            tracing::warn!(%err, "could not stop sound");
        }
    }

    /// Sets one sound's volume, or the default and every sound when `name` is `None`.
    pub fn set_volume(&mut self, volume: f32, name: Option<&str>) {
        let volume = clamp_volume(volume);
        match name {
            Some(name) => {
                if let Some(entry) = self.sounds.get_mut(name) {
                    entry.volume = volume;
                }
            }
            None => {
                self.default_volume = volume;
                for entry in self.sounds.values_mut() {
                    entry.volume = volume;
                }
            }
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return DEFAULT_VOLUME;
    }
    volume.clamp(0.0, 1.0)
}
