/// Song bar state. `Idle` covers both "never played" and "finished".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// What the front-end has to do after a song-toggle click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Schedule the tune from the top, then start the mic and progress loop.
    Start,
    /// Suspend audio output and release the mic.
    Pause,
    /// Resume audio output and re-acquire the mic.
    Resume,
}

#[derive(Clone, Debug)]
pub struct Playback {
    state: PlaybackState,
    played_once: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            played_once: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Blowing only counts while the tune is playing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn toggle(&mut self) -> PlaybackAction {
        let (next, action) = match self.state {
            PlaybackState::Idle => (PlaybackState::Playing, PlaybackAction::Start),
            PlaybackState::Playing => (PlaybackState::Paused, PlaybackAction::Pause),
            PlaybackState::Paused => (PlaybackState::Playing, PlaybackAction::Resume),
        };
        self.state = next;
        if action == PlaybackAction::Start {
            self.played_once = true;
        }
        action
    }

    /// The tune reached its end. Returns false if it was not playing.
    pub fn finish(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Idle;
        true
    }

    pub fn button_label(&self) -> &'static str {
        match (self.state, self.played_once) {
            (PlaybackState::Playing, _) => "⏸️ Pause",
            (PlaybackState::Paused, _) => "▶️ Resume",
            (PlaybackState::Idle, true) => "▶️ Play again",
            (PlaybackState::Idle, false) => "▶️ Play",
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}
