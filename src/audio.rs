//! Sound notifications
//!
//! The sim never waits on audio. Events are mapped to sound effects and
//! handed to whatever backend is plugged in; with no backend nothing happens.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Flap,
    /// Pair cleared
    Score,
    /// Collision ended the round
    Hit,
}

/// Backend-agnostic description of a generated sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration_ms: u32,
    /// Base amplitude before the manager's volume is applied (0.0 - 1.0)
    pub amplitude: f32,
}

impl SoundEffect {
    /// Sound for a sim event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Collided { .. } => Some(SoundEffect::Hit),
            GameEvent::RoundStarted { .. } | GameEvent::SpeedUp { .. } => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            // Short high chirp
            SoundEffect::Flap => Tone {
                frequency: 880.0,
                duration_ms: 50,
                amplitude: 0.2,
            },
            SoundEffect::Score => Tone {
                frequency: 1000.0,
                duration_ms: 40,
                amplitude: 0.3,
            },
            // Low thud
            SoundEffect::Hit => Tone {
                frequency: 220.0,
                duration_ms: 250,
                amplitude: 0.4,
            },
        }
    }
}

/// Something that can play tones
///
/// Implementations must not panic; a failing backend should just stay quiet.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::trace!(
            "♪ {:?}: {} Hz for {} ms at {:.2}",
            effect,
            tone.frequency,
            tone.duration_ms,
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_sink", &self.sink.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Some(sink),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with no backend (audio disabled)
    pub fn silent() -> Self {
        Self {
            sink: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let tone = effect.tone();
        sink.play(effect, tone, tone.amplitude * vol);
    }

    /// Play whatever sound belongs to a sim event
    pub fn notify(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
