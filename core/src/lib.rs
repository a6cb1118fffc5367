#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use monster::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod layout;
mod monster;
mod snapshot;
mod types;

/// Share of the board occupied by monsters, capped by [`MAX_DENSITY_PERCENT`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn density_percent(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Normal => 12,
            Self::Hard => 20,
        }
    }
}

pub const MAX_DENSITY_PERCENT: u32 = 30;

/// Board presets offered by the mode selection screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapSize {
    Small,
    Medium,
    Large,
}

impl MapSize {
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Small => (8, 6),
            Self::Medium => (12, 9),
            Self::Large => (16, 12),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub size: Coord2,
    pub lives: u8,
    pub mode: MonsterMode,
    pub difficulty: Difficulty,
}

impl RoundConfig {
    pub const fn new(size: Coord2, lives: u8, mode: MonsterMode, difficulty: Difficulty) -> Self {
        Self {
            size,
            lives,
            mode,
            difficulty,
        }
    }

    /// Settings of the guided first round.
    pub const fn tutorial() -> Self {
        Self::new(
            MapSize::Small.size(),
            3,
            MonsterMode::DEMONS,
            Difficulty::Easy,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimensions(self.size));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Number of monsters a generated round gets.
    ///
    /// Density share of the board, at least one and at most 30% of it, never more than the board.
    pub fn monster_count(&self) -> CellCount {
        let total = u32::from(self.total_cells());
        let wanted = total * self.difficulty.density_percent() / 100;
        let cap = total * MAX_DENSITY_PERCENT / 100;
        if wanted > cap {
            log::warn!(
                "Monster count capped from {} to {} on a {} cell board",
                wanted,
                cap,
                total
            );
        }
        wanted.min(cap).max(1).min(total) as CellCount
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new(
            MapSize::Small.size(),
            3,
            MonsterMode::DEMONS,
            Difficulty::Normal,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    /// A monster was opened but a life absorbed it.
    ///
    /// The monster stays revealed and can no longer be labelled, so the round can only be
    /// lost or restarted from here.
    SurvivedHit,
    Lost,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            SurvivedHit => true,
            Lost => true,
            Won => true,
        }
    }

    /// Whether this reveal ended the round in defeat.
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(size: Coord2, difficulty: Difficulty) -> CellCount {
        RoundConfig::new(size, 3, MonsterMode::DEMONS, difficulty).monster_count()
    }

    #[test]
    fn monster_count_follows_density_table() {
        // 8x6 = 48 cells
        assert_eq!(count((8, 6), Difficulty::Easy), 3);
        assert_eq!(count((8, 6), Difficulty::Normal), 5);
        assert_eq!(count((8, 6), Difficulty::Hard), 9);
        // 16x12 = 192 cells
        assert_eq!(count((16, 12), Difficulty::Hard), 38);
    }

    #[test]
    fn monster_count_is_at_least_one() {
        assert_eq!(count((3, 3), Difficulty::Easy), 1);
        assert_eq!(count((1, 1), Difficulty::Hard), 1);
        assert_eq!(count((2, 1), Difficulty::Normal), 1);
    }

    #[test]
    fn monster_count_stays_under_cap() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for w in 1..=20 {
                for h in 1..=20 {
                    let total = u32::from(mult(w, h));
                    let cap = (total * MAX_DENSITY_PERCENT / 100).max(1);
                    assert!(u32::from(count((w, h), difficulty)) <= cap);
                }
            }
        }
    }

    #[test]
    fn validate_rejects_empty_board() {
        let config = RoundConfig::new((0, 4), 3, MonsterMode::DEMONS, Difficulty::Easy);
        assert_eq!(config.validate(), Err(GameError::InvalidDimensions((0, 4))));
        assert_eq!(RoundConfig::default().validate(), Ok(()));
    }

    #[test]
    fn presets_match_mode_selection() {
        assert_eq!(RoundConfig::default().size, (8, 6));
        assert_eq!(RoundConfig::tutorial().difficulty, Difficulty::Easy);
        assert_eq!(MapSize::Large.size(), (16, 12));
    }

    #[test]
    fn only_lost_counts_as_loss() {
        assert!(RevealOutcome::Lost.is_loss());
        assert!(!RevealOutcome::SurvivedHit.is_loss());
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(MarkOutcome::Won.has_update());
    }
}
