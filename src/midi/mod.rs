// MIDI Export - Convert note events to MIDI files using midly crate
// Produces DAW-friendly MIDI files with proper timing and metadata

use midly::{Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use serde::{Deserialize, Serialize};

use crate::pattern::{NoteEvent, BEATS_PER_MEASURE};

/// Largest value the tempo meta message can carry (24-bit, microseconds
/// per quarter note)
const MAX_TEMPO_US: u32 = 0xFF_FFFF;

/// MIDI export options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiExportOptions {
    /// Pulses per quarter note (PPQ) - typically 480 or 960
    pub ppq: u16,

    /// Include tempo metadata
    pub include_tempo: bool,

    /// Include time signature metadata
    pub include_time_signature: bool,

    /// Include track names
    pub track_names: bool,
}

impl Default for MidiExportOptions {
    fn default() -> Self {
        MidiExportOptions {
            ppq: 480,
            include_tempo: true,
            include_time_signature: true,
            track_names: true,
        }
    }
}

/// A named sequence of note events bound for one SMF track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteTrack {
    /// Track name (e.g., "KICK", "BASS")
    pub name: String,

    /// MIDI channel (9 for drums, 0 for pitched parts)
    pub channel: u8,

    /// Note events, times in beats
    pub events: Vec<NoteEvent>,
}

/// Render note tracks to MIDI file bytes
///
/// Track 0 carries tempo and time-signature metadata; each note track
/// becomes its own SMF track. Returns bytes ready to be written to disk.
pub fn render_midi(
    tracks: &[NoteTrack],
    tempo_bpm: u16,
    options: &MidiExportOptions,
) -> std::io::Result<Vec<u8>> {
    let header = Header {
        format: midly::Format::Parallel,
        timing: Timing::Metrical(options.ppq.into()),
    };

    let mut smf_tracks = Vec::with_capacity(tracks.len() + 1);

    // Track 0: tempo and time signature metadata
    let mut meta_track = Track::new();
    if options.track_names {
        meta_track.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(b"META")),
        });
    }
    if options.include_tempo {
        add_tempo(&mut meta_track, tempo_bpm);
    }
    if options.include_time_signature {
        add_time_signature(&mut meta_track);
    }
    meta_track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf_tracks.push(meta_track);

    for track in tracks {
        smf_tracks.push(create_note_track(track, options));
    }

    let smf = Smf {
        header,
        tracks: smf_tracks,
    };

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes)?;
    Ok(bytes)
}

/// Create one SMF track from a note track
fn create_note_track<'a>(track: &'a NoteTrack, options: &MidiExportOptions) -> Track<'a> {
    let ppq = options.ppq as f64;
    let mut smf_track = Track::new();
    let mut timed: Vec<(u32, TrackEventKind)> = Vec::with_capacity(track.events.len() * 2);

    if options.track_names {
        smf_track.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(track.name.as_bytes())),
        });
    }

    for note in &track.events {
        let tick_on = (note.time * ppq).round() as u32;
        let duration_ticks = ((note.duration * ppq).round() as u32).max(1);

        timed.push((
            tick_on,
            TrackEventKind::Midi {
                channel: track.channel.into(),
                message: MidiMessage::NoteOn {
                    key: note.pitch.into(),
                    vel: note.velocity.into(),
                },
            },
        ));
        timed.push((
            tick_on + duration_ticks,
            TrackEventKind::Midi {
                channel: track.channel.into(),
                message: MidiMessage::NoteOff {
                    key: note.pitch.into(),
                    vel: 0.into(),
                },
            },
        ));
    }

    // Stable sort keeps each note-off ahead of a same-tick note-on
    timed.sort_by_key(|(tick, _)| *tick);

    let mut last_tick = 0;
    for (tick, kind) in timed {
        smf_track.push(TrackEvent {
            delta: tick.saturating_sub(last_tick).into(),
            kind,
        });
        last_tick = tick;
    }

    // Pad the track out to the next measure boundary so loops line up
    let end_tick = measure_end_tick(last_tick, options.ppq);
    smf_track.push(TrackEvent {
        delta: end_tick.saturating_sub(last_tick).into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    smf_track
}

/// Smallest measure boundary at or after `tick`
fn measure_end_tick(tick: u32, ppq: u16) -> u32 {
    let measure_ticks = ppq as u32 * BEATS_PER_MEASURE as u32;
    tick.div_ceil(measure_ticks) * measure_ticks
}

/// Add tempo meta message (microseconds per quarter note)
fn add_tempo(track: &mut Track<'_>, bpm: u16) {
    // A zero tempo is malformed input; guard the division and cap the
    // result at the meta message's 24-bit range
    let us_per_quarter = (60_000_000 / bpm.max(1) as u32).min(MAX_TEMPO_US);
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(us_per_quarter.into())),
    });
}

/// Add a 4/4 time signature meta message
fn add_time_signature(track: &mut Track<'_>) {
    // numerator 4, denominator 2^2=4, 24 clocks/click, 8 32nds/quarter
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Component;

    fn kick_track() -> NoteTrack {
        NoteTrack {
            name: "KICK".to_string(),
            channel: 9,
            events: vec![
                NoteEvent::new(Component::Kick, 0.0, 36, 0.25, 110),
                NoteEvent::new(Component::Kick, 2.0, 36, 0.25, 110),
            ],
        }
    }

    #[test]
    fn test_render_empty() {
        let bytes = render_midi(&[], 90, &MidiExportOptions::default()).unwrap();
        assert!(!bytes.is_empty());

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.tracks.len(), 1);
    }

    #[test]
    fn test_render_round_trip() {
        let tracks = vec![kick_track()];
        let bytes = render_midi(&tracks, 90, &MidiExportOptions::default()).unwrap();

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, midly::Format::Parallel);
        assert_eq!(smf.tracks.len(), 2);

        // The note track carries 2 note-ons at the expected ticks
        let note_ons: Vec<u32> = {
            let mut tick = 0u32;
            let mut ons = Vec::new();
            for event in &smf.tracks[1] {
                tick += event.delta.as_int();
                if let TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { .. },
                    ..
                } = event.kind
                {
                    ons.push(tick);
                }
            }
            ons
        };
        assert_eq!(note_ons, vec![0, 960]);
    }

    #[test]
    fn test_tempo_meta() {
        let bytes = render_midi(&[], 120, &MidiExportOptions::default()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let tempo = smf.tracks[0].iter().find_map(|e| match e.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
            _ => None,
        });
        assert_eq!(tempo, Some(500_000));
    }

    #[test]
    fn test_zero_tempo_renders_without_panicking() {
        let bytes = render_midi(&[kick_track()], 0, &MidiExportOptions::default()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let tempo = smf.tracks[0].iter().find_map(|e| match e.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
            _ => None,
        });
        assert_eq!(tempo, Some(MAX_TEMPO_US));
    }

    #[test]
    fn test_options_toggle_metadata() {
        let options = MidiExportOptions {
            include_tempo: false,
            include_time_signature: false,
            track_names: false,
            ..Default::default()
        };
        let bytes = render_midi(&[kick_track()], 90, &options).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        // Meta track holds only the end-of-track marker
        assert_eq!(smf.tracks[0].len(), 1);
    }

    #[test]
    fn test_tracks_end_on_measure_boundary() {
        assert_eq!(measure_end_tick(0, 480), 0);
        assert_eq!(measure_end_tick(1, 480), 1920);
        assert_eq!(measure_end_tick(1920, 480), 1920);
        assert_eq!(measure_end_tick(1921, 480), 3840);
    }
}
