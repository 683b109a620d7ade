#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use cue::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use preferences::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod cue;
mod difficulty;
mod error;
mod generator;
mod preferences;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn cue(self) -> Option<AudioCue> {
        match self {
            Self::NoChange => None,
            Self::Flagged => Some(AudioCue::Flag),
            Self::Unflagged => Some(AudioCue::Unflag),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// A winning reveal only announces the win, not the click that caused it.
    pub const fn cue(self) -> Option<AudioCue> {
        match self {
            Self::NoChange => None,
            Self::Revealed => Some(AudioCue::Click),
            Self::HitMine => Some(AudioCue::Explosion),
            Self::Won => Some(AudioCue::Win),
        }
    }
}
