//! This module defines the sounds the core requests and the sink that plays them.
//!
//! Decoding and mixing happen outside the core; an [`AudioSink`] receives
//! fire-and-forget requests drained from the world's event queue.

use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, trace};

use crate::events::GameEvent;

/// The sound effects used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Sound {
    Jump,
    Dash,
    Hit,
    Shoot,
    /// Looped for the whole session.
    Ambience,
}

impl Sound {
    /// Playback volume, from 0 to 1.
    pub const fn volume(self) -> f32 {
        match self {
            Sound::Ambience => 0.2,
            Sound::Shoot => 0.4,
            Sound::Hit => 0.8,
            Sound::Dash => 0.3,
            Sound::Jump => 0.5,
        }
    }

    pub const fn looping(self) -> bool {
        matches!(self, Sound::Ambience)
    }
}

/// The volume music tracks are played at.
pub const MUSIC_VOLUME: f32 = 0.2;

/// Receives audio requests from the core.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    /// Starts looping a music track. The sink wraps `track` over its playlist.
    fn play_music(&mut self, track: usize);

    fn stop_music(&mut self);
}

/// A sink that only logs what it would play.
#[derive(Debug, Default, Clone)]
pub struct NullAudio {
    muted: bool,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.muted = mute;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl AudioSink for NullAudio {
    fn play(&mut self, sound: Sound) {
        if self.muted {
            return;
        }
        trace!(%sound, volume = sound.volume(), "Playing sound");
    }

    fn play_music(&mut self, track: usize) {
        debug!(track, volume = MUSIC_VOLUME, "Playing music");
    }

    fn stop_music(&mut self) {
        debug!("Stopping music");
    }
}

/// Forwards every audio request in `events` to the sink, ignoring other events.
pub fn dispatch<'a>(sink: &mut dyn AudioSink, events: impl IntoIterator<Item = &'a GameEvent>) {
    for event in events {
        match *event {
            GameEvent::Sound(sound) => sink.play(sound),
            GameEvent::PlayMusic { track } => sink.play_music(track),
            GameEvent::StopMusic => sink.stop_music(),
            _ => {}
        }
    }
}
