use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Copy of everything a host draws in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub cells: Array2<Cell>,
    pub stats: RoundStats,
}

impl BoardSnapshot {
    pub fn from_engine<R: RandomSource, C: Clock>(engine: &Engine<R, C>) -> Self {
        Self {
            size: engine.size(),
            cells: engine.board().clone(),
            stats: engine.stats(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}
