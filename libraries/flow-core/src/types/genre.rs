//! Popular-music genres known to the catalog

use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genre filter for the "popular" catalog listing
///
/// Discriminants are the catalog's own genre ids (note the gaps: 20 is unused,
/// Alternative is 21).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Rock
    Rock = 1,
    /// Pop
    Pop = 2,
    /// Rap & Hip-hop
    RapAndHipHop = 3,
    /// Easy Listening
    EasyListening = 4,
    /// Dance & House
    DanceAndHouse = 5,
    /// Instrumental
    Instrumental = 6,
    /// Metal
    Metal = 7,
    /// Dubstep
    Dubstep = 8,
    /// Jazz & Blues
    JazzAndBlues = 9,
    /// Drum & Bass
    DrumAndBass = 10,
    /// Trance
    Trance = 11,
    /// Chanson
    Chanson = 12,
    /// Ethnic
    Ethnic = 13,
    /// Acoustic & Vocal
    AcousticAndVocal = 14,
    /// Reggae
    Reggae = 15,
    /// Classical
    Classical = 16,
    /// Indie Pop
    IndiePop = 17,
    /// Other
    Other = 18,
    /// Speech
    Speech = 19,
    /// Alternative
    Alternative = 21,
    /// Electropop & Disco
    ElectropopAndDisco = 22,
}

impl Genre {
    /// All genres, ordered by menu label
    pub const ALL: [Genre; 21] = [
        Self::AcousticAndVocal,
        Self::Alternative,
        Self::Chanson,
        Self::Classical,
        Self::DanceAndHouse,
        Self::DrumAndBass,
        Self::Dubstep,
        Self::EasyListening,
        Self::ElectropopAndDisco,
        Self::Ethnic,
        Self::IndiePop,
        Self::Instrumental,
        Self::JazzAndBlues,
        Self::Metal,
        Self::Other,
        Self::Pop,
        Self::RapAndHipHop,
        Self::Reggae,
        Self::Rock,
        Self::Speech,
        Self::Trance,
    ];

    /// Catalog genre id (`genre_id` request parameter)
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Pop => "Pop",
            Self::RapAndHipHop => "Rap & Hip-hop",
            Self::EasyListening => "Easy Listening",
            Self::DanceAndHouse => "Dance & House",
            Self::Instrumental => "Instrumental",
            Self::Metal => "Metal",
            Self::Dubstep => "Dubstep",
            Self::JazzAndBlues => "Jazz & Blues",
            Self::DrumAndBass => "Drum & Bass",
            Self::Trance => "Trance",
            Self::Chanson => "Chanson",
            Self::Ethnic => "Ethnic",
            Self::AcousticAndVocal => "Acoustic & Vocal",
            Self::Reggae => "Reggae",
            Self::Classical => "Classical",
            Self::IndiePop => "Indie Pop",
            Self::Other => "Other",
            Self::Speech => "Speech",
            Self::Alternative => "Alternative",
            Self::ElectropopAndDisco => "Electropop & Disco",
        }
    }

    /// Look up a genre by catalog id
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.id() == id)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = FlowError;

    /// Accepts the menu label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FlowError::UnknownGenre(wanted.to_string()))
    }
}
