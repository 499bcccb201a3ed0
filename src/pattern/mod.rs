// Pattern Emission - Components, note events, and per-component emitters
// Converts resolved parameters into timed note events on a shared beat grid

pub mod bass;
pub mod drums;
pub mod grid;
pub mod melody;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use grid::OccupancyGrid;
pub use melody::MelodyConfig;

/// Beats per measure - everything here is 4/4
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Single shared note for all drum hits (GM kick, C1)
pub const DRUM_NOTE: u8 = 36;

/// Lowest bass pitch (C2 region; scale offset and interval stack on top)
pub const BASS_BASE_NOTE: u8 = 36;

/// Lowest melody pitch (C6); the melody register spans two octaves above this
pub const MELODY_BASE_NOTE: u8 = 84;

/// One generated component, mapping to one output track and one sub-algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Kick,
    Snare,
    Hihat,
    Bass,
    Melody,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Kick,
        Component::Snare,
        Component::Hihat,
        Component::Bass,
        Component::Melody,
    ];

    /// The three percussive components expanded from the legacy "drums" name
    pub const DRUMS: [Component; 3] = [Component::Kick, Component::Snare, Component::Hihat];

    /// Lowercase component name, as used in selections and file names
    pub fn name(&self) -> &'static str {
        match self {
            Component::Kick => "kick",
            Component::Snare => "snare",
            Component::Hihat => "hihat",
            Component::Bass => "bass",
            Component::Melody => "melody",
        }
    }

    /// Parse a component name; returns None for anything outside the closed set
    pub fn from_name(name: &str) -> Option<Component> {
        match name {
            "kick" => Some(Component::Kick),
            "snare" => Some(Component::Snare),
            "hihat" => Some(Component::Hihat),
            "bass" => Some(Component::Bass),
            "melody" => Some(Component::Melody),
            _ => None,
        }
    }

    /// Whether this component is a drum hit (subject to grid rules, except kick)
    pub fn is_percussive(&self) -> bool {
        matches!(self, Component::Kick | Component::Snare | Component::Hihat)
    }

    /// MIDI channel for this component (channel 10, 0-indexed 9, is drums)
    pub fn channel(&self) -> u8 {
        if self.is_percussive() {
            9
        } else {
            0
        }
    }
}

/// A single timed note produced by an emitter
///
/// Times and durations are in beats from the start of the loop. Immutable
/// once created; the MIDI exporter consumes these without further edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Component that produced this note
    pub component: Component,

    /// Absolute start time in beats
    pub time: f64,

    /// MIDI pitch (0-127)
    pub pitch: u8,

    /// Duration in beats
    pub duration: f64,

    /// MIDI velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Create a new note event, clamping velocity into MIDI range
    pub fn new(component: Component, time: f64, pitch: u8, duration: f64, velocity: u8) -> Self {
        NoteEvent {
            component,
            time,
            pitch: pitch.min(127),
            duration,
            velocity: velocity.min(127),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_round_trip() {
        for component in Component::ALL {
            assert_eq!(Component::from_name(component.name()), Some(component));
        }
        assert_eq!(Component::from_name("drums"), None);
        assert_eq!(Component::from_name("cowbell"), None);
    }

    #[test]
    fn test_channels() {
        assert_eq!(Component::Kick.channel(), 9);
        assert_eq!(Component::Snare.channel(), 9);
        assert_eq!(Component::Hihat.channel(), 9);
        assert_eq!(Component::Bass.channel(), 0);
        assert_eq!(Component::Melody.channel(), 0);
    }

    #[test]
    fn test_note_event_clamps_velocity() {
        let note = NoteEvent::new(Component::Bass, 0.0, 40, 1.0, 200);
        assert_eq!(note.velocity, 127);
    }
}
