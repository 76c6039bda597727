//! Playback mode resolution
//!
//! Turns the UI's shuffle/loop toggles, the repeat menu, or a menu label
//! into the single iteration policy the playlist model understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Iteration policy for the live playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Play through once, stop at the end
    Sequential,

    /// Wrap from the last track back to the first
    LoopAll,

    /// Replay the current track
    RepeatCurrent,

    /// Jump to a random other track
    Shuffle,
}

/// Explicit choice from the "Repeat" menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatChoice {
    /// Repeat Off
    Off,
    /// Repeat Single
    Single,
    /// Repeat All
    All,
}

impl PlaybackMode {
    /// Resolve the shuffle and loop toggle buttons
    ///
    /// Loop wins over shuffle, and with nothing toggled playback keeps going
    /// around the playlist (`LoopAll`, not `Sequential`).
    ///
    /// | shuffle | loop  | mode            |
    /// |---------|-------|-----------------|
    /// | true    | true  | `RepeatCurrent` |
    /// | true    | false | `Shuffle`       |
    /// | false   | true  | `RepeatCurrent` |
    /// | false   | false | `LoopAll`       |
    pub fn from_toggles(shuffle: bool, loop_enabled: bool) -> Self {
        match (shuffle, loop_enabled) {
            (_, true) => Self::RepeatCurrent,
            (true, false) => Self::Shuffle,
            (false, false) => Self::LoopAll,
        }
    }

    /// Resolve the explicit repeat menu
    pub fn from_repeat_choice(choice: RepeatChoice) -> Self {
        match choice {
            RepeatChoice::Off => Self::Sequential,
            RepeatChoice::Single => Self::RepeatCurrent,
            RepeatChoice::All => Self::LoopAll,
        }
    }

    /// Resolve a playback-mode menu entry
    ///
    /// Accepts "Shuffle", "Repeat Single", "Repeat All" and "Repeat Off"
    /// (case-insensitive). Unknown labels resolve to `None`.
    pub fn from_menu_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("shuffle") {
            return Some(Self::Shuffle);
        }
        [
            ("repeat single", RepeatChoice::Single),
            ("repeat all", RepeatChoice::All),
            ("repeat off", RepeatChoice::Off),
        ]
        .into_iter()
        .find(|(name, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, choice)| Self::from_repeat_choice(choice))
    }

    /// Menu label for this mode
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Repeat Off",
            Self::LoopAll => "Repeat All",
            Self::RepeatCurrent => "Repeat Single",
            Self::Shuffle => "Shuffle",
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
