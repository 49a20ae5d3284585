use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card position")]
    InvalidPosition,
    #[error("Board shape must hold an even number of cells, at least two")]
    InvalidShape,
    #[error("Deck must hold every pair exactly twice")]
    InvalidDeck,
}

pub type Result<T> = core::result::Result<T, GameError>;
