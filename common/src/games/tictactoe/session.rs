use crate::games::SessionRng;
use super::choose_move;
use super::difficulty::Difficulty;
use super::error::PlaceError;
use super::game_state::GameState;
use super::settings::TicTacToeSessionSettings;
use super::types::{FirstPlayerMode, GameStatus, Mark, MatchStatus, WinningLine};

/// One human against the bot. The side that moves first always plays `X`.
pub struct TicTacToeSession {
    settings: TicTacToeSessionSettings,
    difficulty: Difficulty,
    state: GameState,
    human_mark: Mark,
    rng: SessionRng,
}

impl TicTacToeSession {
    pub fn start(settings: TicTacToeSessionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self::with_rng(settings, rng)
    }

    pub fn with_rng(settings: TicTacToeSessionSettings, mut rng: SessionRng) -> Self {
        let human_mark = pick_human_mark(settings.first_player_mode, &mut rng);
        Self {
            difficulty: settings.effective_difficulty(),
            settings,
            state: GameState::new(),
            human_mark,
            rng,
        }
    }

    /// Clears the board for a rematch, keeping settings and the random stream.
    pub fn restart(&mut self) {
        self.state = self.state.clear();
        self.human_mark = pick_human_mark(self.settings.first_player_mode, &mut self.rng);
    }

    pub fn settings(&self) -> &TicTacToeSessionSettings {
        &self.settings
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn bot_mark(&self) -> Mark {
        self.human_mark.opponent().unwrap_or(Mark::O)
    }

    pub fn play_human(&mut self, index: usize) -> Result<MatchStatus, PlaceError> {
        self.ensure_turn(self.human_mark)?;
        self.state = self.state.place(index)?;
        Ok(self.status())
    }

    /// Lets the bot move. `Ok(None)` means the game was already over.
    pub fn play_bot(&mut self) -> Result<Option<usize>, PlaceError> {
        if self.state.status().is_over() {
            return Ok(None);
        }
        self.ensure_turn(self.bot_mark())?;

        let Some(index) = choose_move(
            self.state.board(),
            self.state.turn(),
            self.difficulty,
            &mut self.rng,
        ) else {
            return Ok(None);
        };

        self.state = self.state.place(index)?;
        Ok(Some(index))
    }

    pub fn status(&self) -> MatchStatus {
        match self.state.status() {
            GameStatus::Draw => MatchStatus::Draw,
            GameStatus::InProgress if self.state.turn() == self.human_mark => {
                MatchStatus::AwaitingSelf
            }
            GameStatus::InProgress => MatchStatus::AwaitingOpponent,
            status if status.winner() == Some(self.human_mark) => MatchStatus::Won,
            _ => MatchStatus::Lost,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.state.winning_line()
    }

    fn ensure_turn(&self, mark: Mark) -> Result<(), PlaceError> {
        if self.state.status().is_over() {
            return Err(PlaceError::GameOver);
        }
        if self.state.turn() != mark {
            return Err(PlaceError::NotYourTurn);
        }
        Ok(())
    }
}

fn pick_human_mark(mode: FirstPlayerMode, rng: &mut SessionRng) -> Mark {
    match mode {
        FirstPlayerMode::Human => Mark::X,
        FirstPlayerMode::Bot => Mark::O,
        FirstPlayerMode::Random => {
            if rng.flip() {
                Mark::X
            } else {
                Mark::O
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::difficulty::DifficultyLevel;

    fn settings(
        difficulty: DifficultyLevel,
        first_player_mode: FirstPlayerMode,
    ) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            difficulty,
            first_player_mode,
            seed: Some(42),
            difficulty_override: None,
        }
    }

    #[test]
    fn test_human_moves_first_by_default() {
        let session = TicTacToeSession::start(TicTacToeSessionSettings {
            seed: Some(1),
            ..Default::default()
        });
        assert_eq!(session.human_mark(), Mark::X);
        assert_eq!(session.bot_mark(), Mark::O);
        assert_eq!(session.status(), MatchStatus::AwaitingSelf);
        assert_eq!(session.seed(), 1);
        assert_eq!(session.difficulty().value(), 10);
    }

    #[test]
    fn test_bot_cannot_move_out_of_turn() {
        let mut session = TicTacToeSession::start(settings(
            DifficultyLevel::Hard,
            FirstPlayerMode::Human,
        ));
        assert_eq!(session.play_bot(), Err(PlaceError::NotYourTurn));
    }

    #[test]
    fn test_human_cannot_move_out_of_turn() {
        let mut session = TicTacToeSession::start(settings(
            DifficultyLevel::Hard,
            FirstPlayerMode::Bot,
        ));
        assert_eq!(session.status(), MatchStatus::AwaitingOpponent);
        assert_eq!(session.play_human(0), Err(PlaceError::NotYourTurn));
        let index = session.play_bot().unwrap();
        assert!(index.is_some());
        assert_eq!(session.status(), MatchStatus::AwaitingSelf);
    }

    #[test]
    fn test_occupied_cell_is_reported() {
        let mut session = TicTacToeSession::start(settings(
            DifficultyLevel::Hard,
            FirstPlayerMode::Human,
        ));
        session.play_human(4).unwrap();
        let bot_cell = session.play_bot().unwrap().unwrap();
        assert_eq!(session.play_human(bot_cell), Err(PlaceError::CellOccupied(bot_cell)));
        assert_eq!(session.play_human(12), Err(PlaceError::InvalidPosition(12)));
    }

    #[test]
    fn test_hard_bot_never_loses_to_corner_opening() {
        for seed in 0..30 {
            let mut session = TicTacToeSession::start(TicTacToeSessionSettings {
                seed: Some(seed),
                ..settings(DifficultyLevel::Hard, FirstPlayerMode::Human)
            });
            // Human keeps taking the lowest free cell.
            while !session.status().is_over() {
                let index = session.state().board().available_moves()[0];
                session.play_human(index).unwrap();
                if session.status().is_over() {
                    break;
                }
                session.play_bot().unwrap();
            }
            assert_ne!(session.status(), MatchStatus::Won, "seed {}", seed);
        }
    }

    #[test]
    fn test_play_bot_after_game_over() {
        let mut session = TicTacToeSession::start(settings(
            DifficultyLevel::Easy,
            FirstPlayerMode::Human,
        ));
        while !session.status().is_over() {
            let index = session.state().board().available_moves()[0];
            session.play_human(index).unwrap();
            if !session.status().is_over() {
                session.play_bot().unwrap();
            }
        }
        assert_eq!(session.play_bot(), Ok(None));
        assert_eq!(session.play_human(0), Err(PlaceError::GameOver));
        if matches!(session.status(), MatchStatus::Won | MatchStatus::Lost) {
            assert!(session.winning_line().is_some());
        }
    }

    #[test]
    fn test_restart_clears_board() {
        let mut session = TicTacToeSession::start(settings(
            DifficultyLevel::Medium,
            FirstPlayerMode::Human,
        ));
        session.play_human(0).unwrap();
        session.restart();
        assert!(session.state().board().is_empty());
        assert_eq!(session.status(), MatchStatus::AwaitingSelf);
    }

    #[test]
    fn test_same_seed_replays_same_match() {
        let run = || {
            let mut session = TicTacToeSession::start(settings(
                DifficultyLevel::Medium,
                FirstPlayerMode::Bot,
            ));
            let mut moves = Vec::new();
            while !session.status().is_over() {
                if let Some(index) = session.play_bot().unwrap() {
                    moves.push(index);
                }
                if session.status().is_over() {
                    break;
                }
                let index = session.state().board().available_moves()[0];
                session.play_human(index).unwrap();
                moves.push(index);
            }
            moves
        };
        assert_eq!(run(), run());
    }
}
