// Bass Emitter - One-measure rhythmic template replayed with variation
// Template is built once per run; odd measures get stochastic tweaks

use rand::Rng;

use super::{Component, NoteEvent, BASS_BASE_NOTE, BEATS_PER_MEASURE};

/// Rhythm templates: sorted beat offsets within one measure
const RHYTHM_TEMPLATES: [&[f64]; 4] = [
    &[0.0, 2.0],
    &[0.0, 0.5, 2.0, 2.5],
    &[0.0, 1.5, 2.0, 3.5],
    &[0.0, 2.0, 3.0],
];

/// Harmonic intervals above the chosen scale note: root, fifth, octave
const INTERVALS: [u8; 3] = [0, 7, 12];

const BASS_VELOCITY: u8 = 95;
const VARIATION_CHANCE: f64 = 0.3;
const MICRO_SHIFT: f64 = 0.125;
const ACCENT_BOOST: u8 = 10;

/// One slot of the bass template, relative to the measure start
#[derive(Debug, Clone)]
struct TemplateNote {
    offset: f64,
    pitch: u8,
    duration: f64,
    velocity: u8,
}

/// Emit the bass line for `measures` measures over `scale`
///
/// A one-measure template is built once and replayed every measure. On
/// every odd-indexed measure each note independently has a 30% chance of
/// variation: either its interval is re-rolled and applied against the
/// tonic (the substitution deliberately ignores the scale offset the
/// template chose), or its start shifts by an eighth of a beat and its
/// velocity gets an accent.
pub fn emit_bass(measures: u32, scale: &[u8], rng: &mut impl Rng) -> Vec<NoteEvent> {
    let template = build_template(scale, rng);
    let mut events = Vec::new();

    for measure in 0..measures {
        let start = measure as f64 * BEATS_PER_MEASURE;
        let vary = measure % 2 == 1;

        for note in &template {
            let mut time = start + note.offset;
            let mut pitch = note.pitch;
            let mut velocity = note.velocity;

            if vary && rng.gen_bool(VARIATION_CHANCE) {
                if rng.gen_bool(0.5) {
                    // Substitute: new interval from the tonic
                    let interval = INTERVALS[rng.gen_range(0..INTERVALS.len())];
                    pitch = BASS_BASE_NOTE + interval;
                } else {
                    // Micro-timing shift with a velocity accent
                    let shift = if rng.gen_bool(0.5) { MICRO_SHIFT } else { -MICRO_SHIFT };
                    time = (time + shift).max(0.0);
                    velocity = velocity.saturating_add(ACCENT_BOOST).min(127);
                }
            }

            events.push(NoteEvent::new(
                Component::Bass,
                time,
                pitch,
                note.duration,
                velocity,
            ));
        }
    }

    events
}

/// Build the one-measure template: pick a rhythm, then a pitch per offset
///
/// Note durations fill the gap to the next offset, and the last note
/// sustains to the end of the measure.
fn build_template(scale: &[u8], rng: &mut impl Rng) -> Vec<TemplateNote> {
    let offsets = RHYTHM_TEMPLATES[rng.gen_range(0..RHYTHM_TEMPLATES.len())];
    let mut template = Vec::with_capacity(offsets.len());

    for (i, &offset) in offsets.iter().enumerate() {
        let duration = match offsets.get(i + 1) {
            Some(next) => next - offset,
            None => BEATS_PER_MEASURE - offset,
        };

        let scale_offset = scale[rng.gen_range(0..scale.len())];
        let interval = INTERVALS[rng.gen_range(0..INTERVALS.len())];

        template.push(TemplateNote {
            offset,
            pitch: BASS_BASE_NOTE + scale_offset + interval,
            duration,
            velocity: BASS_VELOCITY,
        });
    }

    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::scales;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every bass pitch must decompose as base + scale offset + interval,
    /// or (for substituted notes) base + interval alone
    fn pitch_is_valid(pitch: u8, scale: &[u8]) -> bool {
        let offset = pitch - BASS_BASE_NOTE;
        let from_scale = scale
            .iter()
            .any(|&s| INTERVALS.iter().any(|&i| s + i == offset));
        let from_tonic = INTERVALS.contains(&offset);
        from_scale || from_tonic
    }

    #[test]
    fn test_bass_pitches_decompose() {
        let scale = scales::MINOR_PENTATONIC;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let events = emit_bass(8, scale, &mut rng);

            assert!(!events.is_empty());
            for event in &events {
                assert!(
                    pitch_is_valid(event.pitch, scale),
                    "seed {}: pitch {} not derivable",
                    seed,
                    event.pitch
                );
            }
        }
    }

    #[test]
    fn test_even_measures_replay_template_exactly() {
        let scale = scales::NATURAL_MINOR;
        let mut rng = StdRng::seed_from_u64(13);
        let events = emit_bass(4, scale, &mut rng);

        // Events come out measure by measure, template length per measure
        let per_measure = events.len() / 4;
        let measure_0 = &events[0..per_measure];
        let measure_2 = &events[2 * per_measure..3 * per_measure];

        // Even measures are unvaried replays of the template
        for (a, b) in measure_0.iter().zip(measure_2) {
            assert_eq!(a.pitch, b.pitch);
            assert_eq!(a.velocity, b.velocity);
            assert_eq!(a.time + 2.0 * BEATS_PER_MEASURE, b.time);
        }
    }

    #[test]
    fn test_template_fills_the_measure() {
        let scale = scales::MINOR_PENTATONIC;
        let mut rng = StdRng::seed_from_u64(21);
        let events = emit_bass(1, scale, &mut rng);

        let covered: f64 = events.iter().map(|e| e.duration).sum();
        assert!((covered - BEATS_PER_MEASURE).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_capped() {
        let scale = scales::MINOR_PENTATONIC;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let events = emit_bass(8, scale, &mut rng);
            assert!(events.iter().all(|e| e.velocity <= 127));
        }
    }
}
