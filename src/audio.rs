use crate::game::GameEvent;

/// Cue played when a fruit is eaten.
pub const CUE_EAT: &str = "snakeEat";

/// Cue played once per segment during the death sequence.
pub const CUE_DIE: &str = "snakeDie";

/// Fire-and-forget audio collaborator supplied by the host application.
pub trait AudioSink {
    /// Plays the named effect, its pitch shifted by `pitch_modifier` steps.
    fn play_sound_effect(&mut self, name: &str, pitch_modifier: i32);

    /// Fades in the next music layer.
    fn advance_music_layer(&mut self);

    /// Drops back to the base music layer.
    fn reset_music_layers(&mut self);
}

/// Translates simulation events into audio cues.
pub fn dispatch_cues<A: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut A) {
    for event in events {
        match event {
            GameEvent::Turned(direction) => sink.play_sound_effect(direction.turn_cue(), 0),
            GameEvent::FruitEaten { .. } => {
                sink.advance_music_layer();
                sink.play_sound_effect(CUE_EAT, 0);
            }
            GameEvent::GameOver { death_sequence, .. } => {
                sink.reset_music_layers();
                for pitch in 0..death_sequence.len() {
                    sink.play_sound_effect(CUE_DIE, i32::try_from(pitch).unwrap_or(i32::MAX));
                }
            }
        }
    }
}

/// Sink for hosts without audio output; cues only reach the log.
#[derive(Debug, Default)]
pub struct SilentAudio {
    music_layer: usize,
}

impl SilentAudio {
    #[must_use]
    pub fn music_layer(&self) -> usize {
        self.music_layer
    }
}

impl AudioSink for SilentAudio {
    fn play_sound_effect(&mut self, name: &str, pitch_modifier: i32) {
        log::trace!("sound {name} (pitch {pitch_modifier:+})");
    }

    fn advance_music_layer(&mut self) {
        self.music_layer += 1;
        log::trace!("music layer {}", self.music_layer);
    }

    fn reset_music_layers(&mut self) {
        self.music_layer = 0;
    }
}
