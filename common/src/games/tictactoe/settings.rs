use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::difficulty::{Difficulty, DifficultyLevel};
use super::types::FirstPlayerMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSessionSettings {
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub first_player_mode: FirstPlayerMode,
    /// Fixed seed for reproducible matches; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Raw gate threshold, overriding `difficulty` when set. Out-of-range
    /// values are clamped.
    #[serde(default)]
    pub difficulty_override: Option<i32>,
}

impl TicTacToeSessionSettings {
    pub fn effective_difficulty(&self) -> Difficulty {
        match self.difficulty_override {
            Some(value) => Difficulty::new(value),
            None => self.difficulty.into(),
        }
    }
}

impl Validate for TicTacToeSessionSettings {
    fn validate(&self) -> Result<(), String> {
        if let Some(value) = self.difficulty_override
            && !(0..=i32::from(Difficulty::MAX)).contains(&value)
        {
            return Err(format!(
                "difficulty_override must be between 0 and {}, got {}",
                Difficulty::MAX,
                value
            ));
        }
        Ok(())
    }
}
