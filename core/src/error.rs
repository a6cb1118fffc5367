use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be positive, got {0:?}")]
    InvalidDimensions(Coord2),
    #[error("Layout size {layout:?} does not match configured size {config:?}")]
    LayoutSizeMismatch { layout: Coord2, config: Coord2 },
    #[error("Unknown monster type")]
    UnknownMonster,
    #[error("Two monsters placed on the same cell")]
    OverlappingMonsters,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
