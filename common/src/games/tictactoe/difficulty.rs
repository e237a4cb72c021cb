use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::move_rng::MoveRng;

/// How often the bot skips its defensive stages, from 0 (never) to
/// 10 (always). Lower is stronger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MAX: u8 = 10;

    pub const STRONGEST: Difficulty = Difficulty(0);
    pub const WEAKEST: Difficulty = Difficulty(Self::MAX);

    /// Out-of-range values are clamped rather than rejected.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, Self::MAX as i32) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether a skippable stage runs this time: passes when a draw from
    /// `0..10` is at least the difficulty value.
    pub fn gate(&self, rng: &mut impl MoveRng) -> bool {
        rng.gate_draw() >= u32::from(self.0)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        DifficultyLevel::default().into()
    }
}

/// The three settings offered to players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyLevel> for Difficulty {
    fn from(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Easy => Difficulty::new(10),
            DifficultyLevel::Medium => Difficulty::new(5),
            DifficultyLevel::Hard => Difficulty::new(0),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}
