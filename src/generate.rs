// Generation Entry Point - Resolves a selection and writes one MIDI file
// One invocation = one fresh occupancy grid and one output file

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use crate::midi::{render_midi, MidiExportOptions, NoteTrack};
use crate::pattern::{bass, drums, melody, Component, MelodyConfig, OccupancyGrid};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid component selection: {0}")]
    InvalidSelection(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Parameters for one generation run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Output path for the MIDI file
    pub output: PathBuf,

    /// Loop length in measures
    pub measures: u32,

    /// Tempo in BPM (file metadata only; note times are in beats)
    pub tempo: u16,

    /// Ordered semitone offsets shared by all components
    pub scale: Vec<u8>,

    /// Requested components; None means all five
    pub components: Option<Vec<String>>,
}

/// Expand a raw component selection into the closed component set
///
/// None selects every component. The legacy "drums" name expands to
/// kick, snare, and hihat. The input is never mutated; duplicates are
/// dropped while preserving first-seen order (which fixes track order).
pub fn expand_selection(selection: Option<&[String]>) -> GenerateResult<Vec<Component>> {
    let names = match selection {
        None => return Ok(Component::ALL.to_vec()),
        Some(names) => names,
    };

    fn push_unique(component: Component, components: &mut Vec<Component>) {
        if !components.contains(&component) {
            components.push(component);
        }
    }

    let mut components = Vec::new();
    for name in names {
        if name == "drums" {
            for component in Component::DRUMS {
                push_unique(component, &mut components);
            }
        } else {
            let component = Component::from_name(name)
                .ok_or_else(|| GenerateError::InvalidSelection(name.clone()))?;
            push_unique(component, &mut components);
        }
    }

    if components.is_empty() {
        return Err(GenerateError::InvalidSelection(
            "no components selected".to_string(),
        ));
    }
    Ok(components)
}

/// Generate a beat and write it to the requested path
///
/// Emits each requested component against a grid created fresh for this
/// call, renders the tracks through the MIDI exporter, and writes the
/// file. Returns a human-readable status string describing the output.
pub fn generate_beat(request: &GenerateRequest, rng: &mut impl Rng) -> GenerateResult<String> {
    let components = expand_selection(request.components.as_deref())?;
    let mut grid = OccupancyGrid::new();
    let mut tracks = Vec::with_capacity(components.len());

    for &component in &components {
        let events = match component {
            Component::Kick => drums::emit_kick(request.measures, rng),
            Component::Snare => drums::emit_snare(request.measures, &mut grid, rng),
            Component::Hihat => drums::emit_hihat(request.measures, &mut grid, rng),
            Component::Bass => bass::emit_bass(request.measures, &request.scale, rng),
            Component::Melody => melody::emit_melody(request.measures, &request.scale, rng),
        };

        log::debug!(
            "{}: {} events over {} measures",
            component.name(),
            events.len(),
            request.measures
        );

        tracks.push(NoteTrack {
            name: component.name().to_uppercase(),
            channel: component.channel(),
            events,
        });
    }

    let bytes = render_midi(&tracks, request.tempo, &MidiExportOptions::default())?;
    fs::write(&request.output, &bytes)?;

    let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
    let status = format!(
        "Wrote {} ({} measures, {} BPM, components: {})",
        request.output.display(),
        request.measures,
        request.tempo,
        names.join(", ")
    );
    log::info!("{}", status);
    Ok(status)
}

/// Parameters for a standalone melody run
#[derive(Debug, Clone)]
pub struct MelodyRequest {
    pub output: PathBuf,
    pub measures: u32,
    pub tempo: u16,
    pub scale: Vec<u8>,

    /// Lowest pitch of the melody register
    pub base_note: u8,

    /// Second voice doubled at this semitone offset, on its own track
    pub second_voice_offset: Option<i8>,
}

/// Generate a standalone melody loop (optionally two voices) and write it
pub fn generate_melody_loop(request: &MelodyRequest, rng: &mut impl Rng) -> GenerateResult<String> {
    let config = MelodyConfig {
        base_note: request.base_note,
        octaves: 1,
    };
    let events = melody::emit_melody_with(&config, request.measures, &request.scale, rng);

    let mut tracks = vec![NoteTrack {
        name: "MELODY".to_string(),
        channel: 0,
        events: events.clone(),
    }];

    if let Some(offset) = request.second_voice_offset {
        let doubled = events
            .iter()
            .map(|note| {
                let mut copy = note.clone();
                copy.pitch = (note.pitch as i16 + offset as i16).clamp(0, 127) as u8;
                copy
            })
            .collect();
        tracks.push(NoteTrack {
            name: "MELODY_2".to_string(),
            channel: 1,
            events: doubled,
        });
    }

    let bytes = render_midi(&tracks, request.tempo, &MidiExportOptions::default())?;
    fs::write(&request.output, &bytes)?;

    let voices = if request.second_voice_offset.is_some() { 2 } else { 1 };
    let status = format!(
        "Wrote {} ({} measures, {} BPM, {} voice{})",
        request.output.display(),
        request.measures,
        request.tempo,
        voices,
        if voices > 1 { "s" } else { "" }
    );
    log::info!("{}", status);
    Ok(status)
}

/// Derive the output file name for a component set, in `dir`
///
/// Single components get `hiphop_<name>.mid`; the full drum set gets
/// `hiphop_drums.mid`; other multi-sets join their names.
pub fn output_path_for(dir: &Path, components: &[Component]) -> PathBuf {
    let stem = if components.len() == 1 {
        format!("hiphop_{}", components[0].name())
    } else if components.iter().all(|c| Component::DRUMS.contains(c)) {
        "hiphop_drums".to_string()
    } else {
        let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
        format!("hiphop_{}", names.join("_"))
    };
    dir.join(format!("{}.mid", stem))
}
