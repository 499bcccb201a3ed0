// Tempo Selection - Named BPM buckets with uniform random selection
// Pick a bucket uniformly, then an integer BPM uniformly within its bounds

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hip-hop tempo bucket with an inclusive BPM range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoBucket {
    /// Slow hip-hop (75-85 BPM)
    Downtempo,

    /// Classic hip-hop (86-95 BPM)
    Classic,

    /// Modern hip-hop (96-105 BPM)
    Modern,
}

impl TempoBucket {
    pub const ALL: [TempoBucket; 3] = [
        TempoBucket::Downtempo,
        TempoBucket::Classic,
        TempoBucket::Modern,
    ];

    /// Inclusive BPM bounds for this bucket
    pub fn bounds(&self) -> (u16, u16) {
        match self {
            TempoBucket::Downtempo => (75, 85),
            TempoBucket::Classic => (86, 95),
            TempoBucket::Modern => (96, 105),
        }
    }

    /// Human-readable bucket name
    pub fn name(&self) -> &'static str {
        match self {
            TempoBucket::Downtempo => "Downtempo",
            TempoBucket::Classic => "Classic",
            TempoBucket::Modern => "Modern",
        }
    }

    /// Pick a bucket uniformly, then a BPM uniformly within its bounds
    pub fn pick(rng: &mut impl Rng) -> (u16, TempoBucket) {
        let bucket = Self::ALL[rng.gen_range(0..Self::ALL.len())];
        let (min_bpm, max_bpm) = bucket.bounds();
        (rng.gen_range(min_bpm..=max_bpm), bucket)
    }
}

/// Classical tempo marking with an inclusive BPM range
///
/// Used by the standalone melody generator, which covers the full
/// 60-180 BPM span rather than the hip-hop pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoMarking {
    Largo,
    Adagio,
    Andante,
    Moderato,
    Allegro,
    Vivace,
    Presto,
}

impl TempoMarking {
    pub const ALL: [TempoMarking; 7] = [
        TempoMarking::Largo,
        TempoMarking::Adagio,
        TempoMarking::Andante,
        TempoMarking::Moderato,
        TempoMarking::Allegro,
        TempoMarking::Vivace,
        TempoMarking::Presto,
    ];

    /// Inclusive BPM bounds for this marking
    pub fn bounds(&self) -> (u16, u16) {
        match self {
            TempoMarking::Largo => (60, 75),
            TempoMarking::Adagio => (76, 90),
            TempoMarking::Andante => (91, 110),
            TempoMarking::Moderato => (111, 130),
            TempoMarking::Allegro => (131, 150),
            TempoMarking::Vivace => (151, 170),
            TempoMarking::Presto => (171, 180),
        }
    }

    /// Human-readable marking name
    pub fn name(&self) -> &'static str {
        match self {
            TempoMarking::Largo => "Largo",
            TempoMarking::Adagio => "Adagio",
            TempoMarking::Andante => "Andante",
            TempoMarking::Moderato => "Moderato",
            TempoMarking::Allegro => "Allegro",
            TempoMarking::Vivace => "Vivace",
            TempoMarking::Presto => "Presto",
        }
    }

    /// Pick a marking uniformly, then a BPM uniformly within its bounds
    pub fn pick(rng: &mut impl Rng) -> (u16, TempoMarking) {
        let marking = Self::ALL[rng.gen_range(0..Self::ALL.len())];
        let (min_bpm, max_bpm) = marking.bounds();
        (rng.gen_range(min_bpm..=max_bpm), marking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bucket_bounds() {
        assert_eq!(TempoBucket::Downtempo.bounds(), (75, 85));
        assert_eq!(TempoBucket::Classic.bounds(), (86, 95));
        assert_eq!(TempoBucket::Modern.bounds(), (96, 105));
    }

    #[test]
    fn test_pick_within_named_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let (bpm, bucket) = TempoBucket::pick(&mut rng);
            let (min_bpm, max_bpm) = bucket.bounds();
            assert!(
                bpm >= min_bpm && bpm <= max_bpm,
                "BPM {} outside {} bounds {}-{}",
                bpm,
                bucket.name(),
                min_bpm,
                max_bpm
            );
        }
    }

    #[test]
    fn test_pick_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(TempoBucket::pick(&mut rng_a), TempoBucket::pick(&mut rng_b));
        }
    }

    #[test]
    fn test_markings_cover_60_to_180() {
        // Ranges tile the full span with no gaps
        let mut expected_min = 60;
        for marking in TempoMarking::ALL {
            let (min_bpm, max_bpm) = marking.bounds();
            assert_eq!(min_bpm, expected_min, "gap before {}", marking.name());
            expected_min = max_bpm + 1;
        }
        assert_eq!(expected_min, 181);
    }

    #[test]
    fn test_marking_pick_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let (bpm, marking) = TempoMarking::pick(&mut rng);
            let (min_bpm, max_bpm) = marking.bounds();
            assert!(bpm >= min_bpm && bpm <= max_bpm);
        }
    }
}
