// Style Tables - Hip-hop styles and their scales
// Each style maps to an ordered set of semitone offsets from the root

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Common scales as ordered semitone offsets from the root
pub mod scales {
    pub const MINOR_PENTATONIC: &[u8] = &[0, 3, 5, 7, 10];
    pub const MAJOR_PENTATONIC: &[u8] = &[0, 2, 4, 7, 9];
    pub const NATURAL_MINOR: &[u8] = &[0, 2, 3, 5, 7, 8, 10];
    pub const MAJOR: &[u8] = &[0, 2, 4, 5, 7, 9, 11];

    /// Minor with a phrygian tint (flat sixth, no fourth or seventh)
    pub const PHRYGIAN_MINOR: &[u8] = &[0, 2, 3, 7, 8];
}

/// Hip-hop style, determining the scale shared by all components of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Trap - minor pentatonic
    Trap,

    /// Boom bap - minor pentatonic
    BoomBap,

    /// Lo-fi - natural minor
    LoFi,

    /// Drill - minor with phrygian flavor
    Drill,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Trap, Style::BoomBap, Style::LoFi, Style::Drill];

    /// Ordered semitone offsets for this style's scale
    pub fn scale(&self) -> &'static [u8] {
        match self {
            Style::Trap | Style::BoomBap => scales::MINOR_PENTATONIC,
            Style::LoFi => scales::NATURAL_MINOR,
            Style::Drill => scales::PHRYGIAN_MINOR,
        }
    }

    /// Human-readable style name
    pub fn name(&self) -> &'static str {
        match self {
            Style::Trap => "Trap",
            Style::BoomBap => "Boom Bap",
            Style::LoFi => "Lo-Fi",
            Style::Drill => "Drill",
        }
    }

    /// Pick a style uniformly at random
    pub fn pick(rng: &mut impl Rng) -> Style {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
