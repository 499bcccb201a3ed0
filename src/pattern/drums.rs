// Drum Emitters - Kick, snare, and hi-hat note placement
// Kick overlaps freely; snare and hi-hat respect the occupancy grid

use rand::Rng;

use super::grid::OccupancyGrid;
use super::{Component, NoteEvent, BEATS_PER_MEASURE, DRUM_NOTE};

/// Velocity profiles for the drum kit
pub const KICK_VELOCITY: u8 = 110;
pub const SNARE_VELOCITY: u8 = 90;
pub const CLAP_VELOCITY: u8 = 85;
pub const CLOSED_HAT_VELOCITY: u8 = 80;
pub const OPEN_HAT_VELOCITY: u8 = 85;

/// Duration of a single drum hit, in beats
const HIT_DURATION: f64 = 0.25;

const EXTRA_KICK_CHANCE: f64 = 0.2;
const CLAP_CHANCE: f64 = 0.3;
const OPEN_HAT_CHANCE: f64 = 0.1;

/// Emit the kick pattern: beats 0 and 2 of every measure, plus an extra
/// hit at beat 1.5 with 20% probability
///
/// The kick never consults or claims the grid. It sits in its own
/// frequency range, so overlap with any other component is permitted.
pub fn emit_kick(measures: u32, rng: &mut impl Rng) -> Vec<NoteEvent> {
    let mut events = Vec::new();

    for measure in 0..measures {
        let start = measure as f64 * BEATS_PER_MEASURE;

        for beat in [0.0, 2.0] {
            events.push(NoteEvent::new(
                Component::Kick,
                start + beat,
                DRUM_NOTE,
                HIT_DURATION,
                KICK_VELOCITY,
            ));
        }

        if rng.gen_bool(EXTRA_KICK_CHANCE) {
            events.push(NoteEvent::new(
                Component::Kick,
                start + 1.5,
                DRUM_NOTE,
                HIT_DURATION,
                KICK_VELOCITY,
            ));
        }
    }

    events
}

/// Emit the snare pattern: beats 1 and 3 of every measure, skipping slots
/// already claimed in the grid; 30% of hits use the clap velocity profile
pub fn emit_snare(measures: u32, grid: &mut OccupancyGrid, rng: &mut impl Rng) -> Vec<NoteEvent> {
    let mut events = Vec::new();

    for measure in 0..measures {
        let start = measure as f64 * BEATS_PER_MEASURE;

        for beat in [1.0, 3.0] {
            let time = start + beat;
            if !grid.claim(time, Component::Snare) {
                continue;
            }

            let velocity = if rng.gen_bool(CLAP_CHANCE) {
                CLAP_VELOCITY
            } else {
                SNARE_VELOCITY
            };

            events.push(NoteEvent::new(
                Component::Snare,
                time,
                DRUM_NOTE,
                HIT_DURATION,
                velocity,
            ));
        }
    }

    events
}

/// Emit the hi-hat pattern: both eighth-note subdivisions of every beat,
/// skipping claimed slots; 10% of hits use the open-hat velocity profile
pub fn emit_hihat(measures: u32, grid: &mut OccupancyGrid, rng: &mut impl Rng) -> Vec<NoteEvent> {
    let mut events = Vec::new();
    let beats_per_measure = BEATS_PER_MEASURE as u32;

    for measure in 0..measures {
        let start = measure as f64 * BEATS_PER_MEASURE;

        for beat in 0..beats_per_measure {
            for half in 0..2 {
                let time = start + beat as f64 + half as f64 * 0.5;
                if !grid.claim(time, Component::Hihat) {
                    continue;
                }

                let velocity = if rng.gen_bool(OPEN_HAT_CHANCE) {
                    OPEN_HAT_VELOCITY
                } else {
                    CLOSED_HAT_VELOCITY
                };

                events.push(NoteEvent::new(
                    Component::Hihat,
                    time,
                    DRUM_NOTE,
                    HIT_DURATION,
                    velocity,
                ));
            }
        }
    }

    events
}
