use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("position {0} is outside the board")]
    InvalidPosition(usize),
    #[error("cell {0} is already marked")]
    CellOccupied(usize),
    #[error("cannot place an empty mark")]
    EmptyMark,
    #[error("game is already over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
}
