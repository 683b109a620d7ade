use serde::{Deserialize, Serialize};

/// Fixed vocabulary of sounds the game asks for, one per player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    Click,
    Flag,
    Unflag,
    Explosion,
    Win,
}

/// Gain every voice decays to before it stops.
pub const RELEASE_GAIN: f32 = 0.01;

/// Synthesis recipe for a cue. Times are in seconds relative to the moment the cue is played.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Voice {
    /// Sine tone gliding exponentially from `from_hz` to `to_hz`.
    Sweep {
        from_hz: f32,
        to_hz: f32,
        duration: f64,
        gain: f32,
    },
    /// White-noise burst.
    Noise { duration: f64, gain: f32 },
    /// Short notes played one after another, `step` apart, each lasting `step`.
    Arpeggio {
        notes: &'static [f32],
        step: f64,
        gain: f32,
    },
}

impl Voice {
    /// Time from start until the last sound stops.
    pub fn duration(self) -> f64 {
        match self {
            Self::Sweep { duration, .. } | Self::Noise { duration, .. } => duration,
            Self::Arpeggio { notes, step, .. } => step * notes.len() as f64,
        }
    }
}

impl AudioCue {
    pub const ALL: [AudioCue; 5] = [
        Self::Click,
        Self::Flag,
        Self::Unflag,
        Self::Explosion,
        Self::Win,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Flag => "flag",
            Self::Unflag => "unflag",
            Self::Explosion => "explosion",
            Self::Win => "win",
        }
    }

    pub const fn voice(self) -> Voice {
        const WIN_NOTES: &[f32] = &[400.0, 500.0, 600.0, 800.0];

        match self {
            Self::Click => Voice::Sweep {
                from_hz: 800.0,
                to_hz: 400.0,
                duration: 0.1,
                gain: 0.3,
            },
            Self::Flag => Voice::Sweep {
                from_hz: 600.0,
                to_hz: 800.0,
                duration: 0.1,
                gain: 0.3,
            },
            Self::Unflag => Voice::Sweep {
                from_hz: 800.0,
                to_hz: 600.0,
                duration: 0.1,
                gain: 0.3,
            },
            Self::Explosion => Voice::Noise {
                duration: 0.5,
                gain: 0.5,
            },
            Self::Win => Voice::Arpeggio {
                notes: WIN_NOTES,
                step: 0.1,
                gain: 0.3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        for (i, a) in AudioCue::ALL.iter().enumerate() {
            for b in &AudioCue::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn flag_and_unflag_sweep_in_opposite_directions() {
        let Voice::Sweep { from_hz: f0, to_hz: t0, .. } = AudioCue::Flag.voice() else {
            panic!("flag should be a sweep");
        };
        let Voice::Sweep { from_hz: f1, to_hz: t1, .. } = AudioCue::Unflag.voice() else {
            panic!("unflag should be a sweep");
        };

        assert!(f0 < t0);
        assert!(f1 > t1);
    }

    #[test]
    fn every_voice_decays_above_release_gain() {
        for cue in AudioCue::ALL {
            let gain = match cue.voice() {
                Voice::Sweep { gain, .. } | Voice::Noise { gain, .. } | Voice::Arpeggio { gain, .. } => {
                    gain
                }
            };
            assert!(gain > RELEASE_GAIN, "{}", cue.name());
        }
    }

    #[test]
    fn win_arpeggio_lasts_four_steps() {
        let duration = AudioCue::Win.voice().duration();
        assert!(duration > 0.399 && duration < 0.401);
        assert_eq!(AudioCue::Explosion.voice().duration(), 0.5);
    }
}
