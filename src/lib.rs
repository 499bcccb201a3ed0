// Loopsmith - Procedural hip-hop MIDI loop generator
// Module declarations

pub mod generate;
pub mod midi;
pub mod params;
pub mod pattern;

// Re-export main types
pub use generate::{
    expand_selection, generate_beat, generate_melody_loop, output_path_for, GenerateError,
    GenerateRequest, MelodyRequest,
};
pub use midi::{render_midi, MidiExportOptions, NoteTrack};
pub use params::{scales, Style, TempoBucket, TempoMarking};
pub use pattern::{Component, MelodyConfig, NoteEvent, OccupancyGrid};
