use crate::audio::Sound;

/// Notifications the world emits for its collaborators (audio, presentation).
///
/// Queued during a tick and drained by the caller with [`crate::world::World::drain_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Sound(Sound),
    PlayMusic { track: usize },
    StopMusic,
    LevelLoaded { level: usize },
    /// The player lost a life to a projectile.
    PlayerHit { lives: i32 },
    /// The player fell for too long and lost all lives.
    PlayerFell,
    /// The last level was cleared.
    GameOver,
}

impl From<Sound> for GameEvent {
    fn from(sound: Sound) -> Self {
        GameEvent::Sound(sound)
    }
}
