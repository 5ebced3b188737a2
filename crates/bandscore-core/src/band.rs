//! Raw score to band conversion.
//!
//! Each skill has its own fixed table of `(minimum correct, band)` rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Skill;

/// Highest raw score a table covers.
pub const MAX_RAW: u32 = 40;

/// A band from 0.0 to 9.0 in half-band steps.
///
/// Stored as a count of half bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct BandScore(u8);

impl BandScore {
    pub const MIN: BandScore = BandScore(0);
    pub const MAX: BandScore = BandScore(18);

    /// Build from a count of half bands (`13` is band 6.5).
    pub const fn from_halves(halves: u8) -> Option<Self> {
        if halves <= Self::MAX.0 {
            Some(BandScore(halves))
        } else {
            None
        }
    }

    pub const fn halves(self) -> u8 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl From<BandScore> for f64 {
    fn from(band: BandScore) -> f64 {
        band.value()
    }
}

impl TryFrom<f64> for BandScore {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let halves = value * 2.0;
        if !halves.is_finite() || halves.fract() != 0.0 || !(0.0..=18.0).contains(&halves) {
            return Err(format!("invalid band score: {value}"));
        }
        Ok(BandScore(halves as u8))
    }
}

impl fmt::Display for BandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// A skill's lookup table, ascending by threshold.
#[derive(Debug)]
pub struct BandTable {
    skill: Skill,
    rows: &'static [(u32, BandScore)],
}

const fn b(halves: u8) -> BandScore {
    BandScore(halves)
}

static LISTENING_ROWS: [(u32, BandScore); 17] = [
    (0, b(0)),
    (1, b(2)),
    (2, b(4)),
    (4, b(5)),
    (6, b(6)),
    (8, b(7)),
    (10, b(8)),
    (13, b(9)),
    (16, b(10)),
    (18, b(11)),
    (23, b(12)),
    (26, b(13)),
    (30, b(14)),
    (32, b(15)),
    (35, b(16)),
    (37, b(17)),
    (39, b(18)),
];

static READING_ROWS: [(u32, BandScore); 17] = [
    (0, b(0)),
    (1, b(2)),
    (2, b(4)),
    (4, b(5)),
    (6, b(6)),
    (8, b(7)),
    (10, b(8)),
    (13, b(9)),
    (15, b(10)),
    (19, b(11)),
    (23, b(12)),
    (27, b(13)),
    (30, b(14)),
    (33, b(15)),
    (35, b(16)),
    (37, b(17)),
    (39, b(18)),
];

static LISTENING: BandTable = BandTable {
    skill: Skill::Listening,
    rows: &LISTENING_ROWS,
};

static READING: BandTable = BandTable {
    skill: Skill::Reading,
    rows: &READING_ROWS,
};

/// The fixed table for `skill`.
pub fn band_table(skill: Skill) -> &'static BandTable {
    match skill {
        Skill::Reading => &READING,
        Skill::Listening => &LISTENING,
    }
}

/// Convert a raw correct count to a band for `skill`.
///
/// Out-of-range counts are clamped to `0..=MAX_RAW`; this never fails.
pub fn to_band(raw_correct: i64, skill: Skill) -> BandScore {
    band_table(skill).lookup(raw_correct)
}

impl BandTable {
    pub fn skill(&self) -> Skill {
        self.skill
    }

    pub fn rows(&self) -> &'static [(u32, BandScore)] {
        self.rows
    }

    /// Band for the highest threshold not above `raw_correct`.
    pub fn lookup(&self, raw_correct: i64) -> BandScore {
        let raw = raw_correct.clamp(0, i64::from(MAX_RAW)) as u32;
        self.rows
            .iter()
            .rev()
            .find(|(threshold, _)| *threshold <= raw)
            .map(|(_, band)| *band)
            .unwrap_or(BandScore::MIN)
    }

    /// Inclusive `(low, high, band)` ranges, highest band first.
    pub fn ranges(&self) -> Vec<(u32, u32, BandScore)> {
        let mut ranges = Vec::with_capacity(self.rows.len());
        let mut upper = MAX_RAW;
        for &(threshold, band) in self.rows.iter().rev() {
            ranges.push((threshold, upper, band));
            upper = threshold.saturating_sub(1);
        }
        ranges
    }
}
