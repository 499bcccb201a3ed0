// Occupancy Grid - Prevents two non-kick percussive hits sharing a time slot
// Lives for one generation call; kick is never checked against or recorded

use std::collections::HashMap;

use super::Component;

/// Resolution used to quantize beat positions into grid keys
///
/// 480 ticks per beat keeps every subdivision the emitters use (halves,
/// eighth-shifts, triplets) on distinct integer keys.
const TICKS_PER_BEAT: f64 = 480.0;

/// Per-run map from quantized beat position to the component that claimed it
#[derive(Debug, Default)]
pub struct OccupancyGrid {
    slots: HashMap<u32, Component>,
}

impl OccupancyGrid {
    /// Create a fresh, empty grid
    pub fn new() -> Self {
        OccupancyGrid::default()
    }

    fn key(time: f64) -> u32 {
        (time * TICKS_PER_BEAT).round() as u32
    }

    /// Whether the slot at `time` (in beats, fractional allowed) is unclaimed
    pub fn is_free(&self, time: f64) -> bool {
        !self.slots.contains_key(&Self::key(time))
    }

    /// Claim the slot at `time` for `component` if it is free
    ///
    /// Returns true if the claim succeeded. Callers never claim for the
    /// kick, which is exempt from the grid by design.
    pub fn claim(&mut self, time: f64, component: Component) -> bool {
        let key = Self::key(time);
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, component);
        true
    }

    /// Component holding the slot at `time`, if any
    pub fn claimed_by(&self, time: f64) -> Option<Component> {
        self.slots.get(&Self::key(time)).copied()
    }

    /// Number of claimed slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
