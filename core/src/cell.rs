use serde::{Deserialize, Serialize};

use crate::*;

/// Per-position record stored by the engine.
///
/// Mutation goes through the engine; hosts only ever receive copies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Coord2,
    revealed: bool,
    marked: Option<MonsterId>,
    occupant: Option<MonsterId>,
    value: u16,
}

impl Cell {
    pub const fn new(position: Coord2) -> Self {
        Self {
            position,
            revealed: false,
            marked: None,
            occupant: None,
            value: 0,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_marked(&self) -> bool {
        self.marked.is_some()
    }

    pub const fn marked_type(&self) -> Option<MonsterId> {
        self.marked
    }

    pub const fn is_monster(&self) -> bool {
        self.occupant.is_some()
    }

    pub const fn occupant(&self) -> Option<MonsterId> {
        self.occupant
    }

    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Whether the cell carries the label of its own occupant.
    pub fn is_correctly_marked(&self) -> bool {
        self.occupant.is_some() && self.marked == self.occupant
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.position);
    }

    pub fn place_monster(&mut self, monster: &MonsterType) {
        self.occupant = Some(monster.id);
        self.value = monster.value.into();
    }

    pub(crate) fn add_value(&mut self, amount: u8) {
        self.value = self.value.saturating_add(amount.into());
    }

    /// Sets or clears the label, refused once the cell is revealed.
    pub fn mark(&mut self, label: Option<MonsterId>) -> bool {
        if self.revealed {
            return false;
        }
        self.marked = label;
        true
    }

    /// Opens the cell and reports whether a monster was hiding in it.
    ///
    /// Revealed and marked cells are left alone and report `false`.
    pub fn reveal(&mut self) -> bool {
        if self.revealed || self.is_marked() {
            return false;
        }
        self.revealed = true;
        self.is_monster()
    }

    pub(crate) fn force_reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn force_mark(&mut self, label: MonsterId) {
        self.marked = Some(label);
    }

    pub fn glyph(&self) -> CellGlyph {
        match (self.revealed, self.marked, self.occupant) {
            (false, Some(label), _) => CellGlyph::Marked(label),
            (false, None, _) => CellGlyph::Blank,
            (true, _, Some(monster)) => CellGlyph::Monster(monster),
            (true, _, None) if self.value > 0 => CellGlyph::Value(self.value),
            (true, _, None) => CellGlyph::Blank,
        }
    }

    pub fn color_key(&self) -> ColorKey {
        match (self.revealed, self.is_marked(), self.is_monster()) {
            (false, true, _) => ColorKey::Marked,
            (false, false, _) => ColorKey::Hidden,
            (true, _, true) => ColorKey::Monster,
            (true, _, false) => ColorKey::Value(self.value),
        }
    }
}

/// What a cell should display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellGlyph {
    Blank,
    Marked(MonsterId),
    Monster(MonsterId),
    Value(u16),
}

/// Color class of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorKey {
    Hidden,
    Marked,
    Monster,
    Value(u16),
}

const VALUE_PALETTE: [&str; 9] = [
    "#000", "#00f", "#0a0", "#f00", "#008", "#800", "#088", "#808", "#880",
];

impl ColorKey {
    pub fn hex(self) -> &'static str {
        match self {
            Self::Hidden => "#555",
            Self::Marked => "#ffd700",
            Self::Monster => "#ff5252",
            Self::Value(value) => VALUE_PALETTE
                .get(usize::from(value))
                .copied()
                .unwrap_or("#000"),
        }
    }
}
