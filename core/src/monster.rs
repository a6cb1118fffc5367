use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Edge length in pixels of a single sprite inside the monster atlas.
pub const SPRITE_SIZE: u32 = 72;

/// Positions influenced by one monster, at most one entry per offset.
pub type AffectedPositions = SmallVec<[Coord2; 12]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterId {
    DemonA,
    DemonB,
    DemonC,
    SaucerA,
    SaucerB,
    SlimeA,
    SlimeB,
}

impl MonsterId {
    pub const ALL: [MonsterId; 7] = [
        Self::DemonA,
        Self::DemonB,
        Self::DemonC,
        Self::SaucerA,
        Self::SaucerB,
        Self::SlimeA,
        Self::SlimeB,
    ];

    pub const fn as_str(self) -> &'static str {
        use MonsterId::*;
        match self {
            DemonA => "demon_a",
            DemonB => "demon_b",
            DemonC => "demon_c",
            SaucerA => "saucer_a",
            SaucerB => "saucer_b",
            SlimeA => "slime_a",
            SlimeB => "slime_b",
        }
    }

    /// Catalog entry for this id.
    pub fn monster_type(self) -> &'static MonsterType {
        MonsterCatalog::get(self)
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonsterId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or(GameError::UnknownMonster)
    }
}

/// Where a monster's artwork sits in the sprite atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteLocator {
    pub row: u8,
    pub col: u8,
}

impl SpriteLocator {
    /// `(x, y, width, height)` of the sprite in atlas pixels.
    pub const fn pixel_rect(self) -> (u32, u32, u32, u32) {
        (
            self.col as u32 * SPRITE_SIZE,
            self.row as u32 * SPRITE_SIZE,
            SPRITE_SIZE,
            SPRITE_SIZE,
        )
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MonsterType {
    pub id: MonsterId,
    pub display_name: &'static str,
    pub value: u8,
    pub offsets: &'static [Offset],
    pub sprite: SpriteLocator,
}

impl MonsterType {
    /// Cells covered by a monster of this type standing at `origin`, clipped to a board of `size`.
    pub fn affected_positions(&self, origin: Coord2, size: Coord2) -> AffectedPositions {
        let mut positions: AffectedPositions = self
            .offsets
            .iter()
            .filter_map(|&delta| apply_offset(origin, delta, size))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

const RING_AND_ARMS: [Offset; 12] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (0, -2),
    (0, 2),
    (-2, 0),
    (2, 0),
];

const ORTHOGONAL_CROSS: [Offset; 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-2, 0),
    (0, 2),
    (2, 0),
    (0, -2),
];

const DIAGONAL_CROSS: [Offset; 8] = [
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-2, -2),
    (2, 2),
    (2, -2),
    (-2, 2),
];

// indexed by `MonsterId as usize`
static CATALOG: [MonsterType; 7] = [
    MonsterType {
        id: MonsterId::DemonA,
        display_name: "Demon A",
        value: 1,
        offsets: &RING_AND_ARMS,
        sprite: SpriteLocator { row: 0, col: 0 },
    },
    MonsterType {
        id: MonsterId::DemonB,
        display_name: "Demon B",
        value: 2,
        offsets: &RING_AND_ARMS,
        sprite: SpriteLocator { row: 0, col: 1 },
    },
    MonsterType {
        id: MonsterId::DemonC,
        display_name: "Demon C",
        value: 3,
        offsets: &RING_AND_ARMS,
        sprite: SpriteLocator { row: 0, col: 2 },
    },
    MonsterType {
        id: MonsterId::SaucerA,
        display_name: "Saucer A",
        value: 1,
        offsets: &NEIGHBOR_OFFSETS,
        sprite: SpriteLocator { row: 0, col: 3 },
    },
    MonsterType {
        id: MonsterId::SaucerB,
        display_name: "Saucer B",
        value: 2,
        offsets: &NEIGHBOR_OFFSETS,
        sprite: SpriteLocator { row: 2, col: 0 },
    },
    MonsterType {
        id: MonsterId::SlimeA,
        display_name: "Slime A",
        value: 2,
        offsets: &ORTHOGONAL_CROSS,
        sprite: SpriteLocator { row: 2, col: 1 },
    },
    MonsterType {
        id: MonsterId::SlimeB,
        display_name: "Slime B",
        value: 2,
        offsets: &DIAGONAL_CROSS,
        sprite: SpriteLocator { row: 2, col: 2 },
    },
];

/// Selects which slice of the catalog is in play for a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterMode(pub u8);

impl MonsterMode {
    pub const DEMONS: Self = Self(1);
    pub const SAUCERS: Self = Self(2);
    pub const DEMONS_AND_SAUCERS: Self = Self(3);
    pub const SIX_KINDS: Self = Self(4);
    pub const ALL_KINDS: Self = Self(5);

    /// Whether this mode has a roster of its own rather than falling back to the default.
    pub const fn is_known(self) -> bool {
        matches!(self.0, 1..=5)
    }

    pub const fn description(self) -> &'static str {
        match self.0 {
            2 => "Saucers only",
            3 => "Demons and saucers (5 kinds)",
            4 => "6 kinds",
            5 => "All 7 kinds",
            _ => "Demons only",
        }
    }
}

impl Default for MonsterMode {
    fn default() -> Self {
        Self::DEMONS
    }
}

/// Immutable registry of every monster type.
pub struct MonsterCatalog;

impl MonsterCatalog {
    pub fn list_all() -> &'static [MonsterType] {
        &CATALOG
    }

    pub fn get(id: MonsterId) -> &'static MonsterType {
        &CATALOG[id as usize]
    }

    /// Eligible types for `mode`; unknown modes get the demon roster.
    pub fn list_for_mode(mode: MonsterMode) -> &'static [MonsterType] {
        if !mode.is_known() {
            log::warn!("Unknown monster mode {}, falling back to mode 1", mode.0);
        }
        match mode.0 {
            2 => &CATALOG[3..5],
            3 => &CATALOG[0..5],
            4 => &CATALOG[0..6],
            5 => &CATALOG[..],
            _ => &CATALOG[0..3],
        }
    }
}
