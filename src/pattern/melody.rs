// Melody Emitter - Short phrase in a fixed register, repeated as a motif
// Rhythm comes from enumerated duration templates; pitches walk the scale

use rand::Rng;

use super::{Component, NoteEvent, BEATS_PER_MEASURE, MELODY_BASE_NOTE};

const TRIPLET: f64 = 1.0 / 3.0;

/// Duration-sequence templates, in beats
///
/// A 0.0 entry encodes a rest that advances time by half a beat without
/// emitting a note. Each template fills a whole number of measures.
const DURATION_TEMPLATES: [&[f64]; 4] = [
    // Straight quarters, one measure
    &[1.0, 1.0, 1.0, 1.0],
    // Eighth and quarter mix, two measures
    &[0.5, 0.5, 1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, 1.0, 0.5, 0.5],
    // Sparse with rests, one measure
    &[0.5, 0.5, 0.0, 0.5, 1.0, 0.0, 0.5],
    // Triplet subdivisions, one measure
    &[TRIPLET, TRIPLET, TRIPLET, 1.0, TRIPLET, TRIPLET, TRIPLET, 1.0],
];

/// How far the time cursor moves for a rest slot
const REST_ADVANCE: f64 = 0.5;

/// Widest step (in scale degrees) the pitch walk takes between notes
const MAX_WALK_STEP: i32 = 2;

const MIN_VELOCITY: u8 = 80;
const MAX_VELOCITY: u8 = 110;

/// Register and repetition settings for melody generation
#[derive(Debug, Clone)]
pub struct MelodyConfig {
    /// Lowest pitch of the register
    pub base_note: u8,

    /// How many octaves of the scale the pitch walk may span
    pub octaves: u8,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        // Hip-hop beat register: two octaves starting at C6
        MelodyConfig {
            base_note: MELODY_BASE_NOTE,
            octaves: 2,
        }
    }
}

/// One slot of the generated phrase, relative to the phrase start
#[derive(Debug, Clone)]
struct PhraseNote {
    offset: f64,
    pitch: u8,
    duration: f64,
    velocity: u8,
}

/// Emit the melody for `measures` measures over `scale` in the default
/// high register (all pitches land in 84..=107 for in-octave scales)
pub fn emit_melody(measures: u32, scale: &[u8], rng: &mut impl Rng) -> Vec<NoteEvent> {
    emit_melody_with(&MelodyConfig::default(), measures, scale, rng)
}

/// Emit a melody with an explicit register configuration
///
/// The phrase is generated once and repeated across the full duration,
/// so the result reads as a motif rather than independent random notes.
pub fn emit_melody_with(
    config: &MelodyConfig,
    measures: u32,
    scale: &[u8],
    rng: &mut impl Rng,
) -> Vec<NoteEvent> {
    let (phrase, phrase_beats) = build_phrase(config, scale, rng);
    let total_beats = measures as f64 * BEATS_PER_MEASURE;
    let mut events = Vec::new();

    let mut phrase_start = 0.0;
    while phrase_start < total_beats - 1e-9 {
        for note in &phrase {
            let time = phrase_start + note.offset;
            if time >= total_beats - 1e-9 {
                break;
            }
            events.push(NoteEvent::new(
                Component::Melody,
                time,
                note.pitch,
                note.duration,
                note.velocity,
            ));
        }
        phrase_start += phrase_beats;
    }

    events
}

/// Build one phrase: pick a duration template, then walk the scale ladder
///
/// The ladder is every scale pitch across the configured octave span.
/// Each note moves at most two degrees from the previous one, which keeps
/// the line singable instead of jumping across the register.
fn build_phrase(
    config: &MelodyConfig,
    scale: &[u8],
    rng: &mut impl Rng,
) -> (Vec<PhraseNote>, f64) {
    let template = DURATION_TEMPLATES[rng.gen_range(0..DURATION_TEMPLATES.len())];
    let ladder = pitch_ladder(config, scale);

    let mut phrase = Vec::new();
    let mut cursor = 0.0;
    let mut degree = rng.gen_range(0..ladder.len()) as i32;

    for &duration in template {
        if duration == 0.0 {
            cursor += REST_ADVANCE;
            continue;
        }

        let step = rng.gen_range(-MAX_WALK_STEP..=MAX_WALK_STEP);
        degree = (degree + step).clamp(0, ladder.len() as i32 - 1);

        phrase.push(PhraseNote {
            offset: cursor,
            pitch: ladder[degree as usize],
            duration,
            velocity: rng.gen_range(MIN_VELOCITY..=MAX_VELOCITY),
        });
        cursor += duration;
    }

    // Templates fill whole measures; round away triplet float error
    let phrase_beats = cursor.round();
    (phrase, phrase_beats)
}

/// All pitches of `scale` across the configured octave span, ascending
fn pitch_ladder(config: &MelodyConfig, scale: &[u8]) -> Vec<u8> {
    let octaves = config.octaves.max(1);
    let mut ladder = Vec::with_capacity(scale.len() * octaves as usize);

    for octave in 0..octaves {
        for &offset in scale {
            let pitch = config.base_note as u16 + offset as u16 + 12 * octave as u16;
            if pitch <= 127 {
                ladder.push(pitch as u8);
            }
        }
    }

    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::scales;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_melody_stays_in_high_register() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let events = emit_melody(8, scales::MINOR_PENTATONIC, &mut rng);

            assert!(!events.is_empty());
            for event in &events {
                assert!(
                    (84..=107).contains(&event.pitch),
                    "seed {}: pitch {} outside register",
                    seed,
                    event.pitch
                );
            }
        }
    }

    #[test]
    fn test_melody_repeats_as_motif() {
        let mut rng = StdRng::seed_from_u64(17);
        let events = emit_melody(8, scales::NATURAL_MINOR, &mut rng);

        // The phrase spans 1 or 2 measures, so beat 8 is always a phrase
        // start and must restate the opening note exactly
        let first = &events[0];
        assert_eq!(first.time, 0.0);
        let restart = events
            .iter()
            .find(|e| e.time == 2.0 * BEATS_PER_MEASURE)
            .expect("no event at the phrase restart");
        assert_eq!(restart.pitch, first.pitch);
        assert_eq!(restart.velocity, first.velocity);
    }

    #[test]
    fn test_phrase_spans_whole_measures() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = MelodyConfig::default();
            let (_, phrase_beats) = build_phrase(&config, scales::MINOR_PENTATONIC, &mut rng);

            assert!(phrase_beats == 4.0 || phrase_beats == 8.0);
        }
    }

    #[test]
    fn test_all_events_within_requested_duration() {
        let mut rng = StdRng::seed_from_u64(4);
        let measures = 3;
        let events = emit_melody(measures, scales::PHRYGIAN_MINOR, &mut rng);

        let total = measures as f64 * BEATS_PER_MEASURE;
        assert!(events.iter().all(|e| e.time < total));
    }

    #[test]
    fn test_custom_register() {
        let config = MelodyConfig {
            base_note: 60,
            octaves: 1,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let events = emit_melody_with(&config, 4, scales::MAJOR_PENTATONIC, &mut rng);

        assert!(events.iter().all(|e| (60..72).contains(&e.pitch)));
    }
}
