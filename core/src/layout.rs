use alloc::vec::Vec;
use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedMonster {
    pub position: Coord2,
    pub id: MonsterId,
}

impl PlacedMonster {
    pub const fn new(position: Coord2, id: MonsterId) -> Self {
        Self { position, id }
    }

    pub fn monster_type(&self) -> &'static MonsterType {
        MonsterCatalog::get(self.id)
    }
}

/// Where every monster of a round stands.
///
/// Serialized as its size and placements; deserializing goes through the same checks as
/// [`MonsterLayout::from_placements`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutRepr", into = "LayoutRepr")]
pub struct MonsterLayout {
    occupants: Array2<Option<MonsterId>>,
    placed: Vec<PlacedMonster>,
}

#[derive(Serialize, Deserialize)]
struct LayoutRepr {
    size: Coord2,
    placed: Vec<PlacedMonster>,
}

impl TryFrom<LayoutRepr> for MonsterLayout {
    type Error = GameError;

    fn try_from(repr: LayoutRepr) -> Result<Self> {
        Self::from_placements(repr.size, &repr.placed)
    }
}

impl From<MonsterLayout> for LayoutRepr {
    fn from(layout: MonsterLayout) -> Self {
        Self {
            size: layout.size(),
            placed: layout.placed,
        }
    }
}

impl MonsterLayout {
    pub fn from_placements(size: Coord2, placements: &[PlacedMonster]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions(size));
        }

        let mut occupants: Array2<Option<MonsterId>> = Array2::default(size.to_nd_index());
        for placement in placements {
            let (x, y) = placement.position;
            if x >= size.0 || y >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            let slot = &mut occupants[placement.position.to_nd_index()];
            if slot.is_some() {
                return Err(GameError::OverlappingMonsters);
            }
            *slot = Some(placement.id);
        }

        Ok(Self {
            occupants,
            placed: placements.to_vec(),
        })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.occupants.dim();
        (
            Coord::try_from(dim.0).unwrap_or(Coord::MAX),
            Coord::try_from(dim.1).unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn monster_count(&self) -> CellCount {
        self.placed.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.monster_count()
    }

    pub fn placed(&self) -> &[PlacedMonster] {
        &self.placed
    }

    /// Aggregated hint for `coords`: every monster covering it contributes its value.
    ///
    /// Monster cells report their own type's value.
    pub fn value_at(&self, coords: Coord2) -> u16 {
        if let Some(id) = self[coords] {
            return MonsterCatalog::get(id).value.into();
        }
        let size = self.size();
        self.placed
            .iter()
            .filter(|monster| {
                monster
                    .monster_type()
                    .affected_positions(monster.position, size)
                    .contains(&coords)
            })
            .map(|monster| u16::from(monster.monster_type().value))
            .sum()
    }

    /// Fresh cells for a round with monsters placed and values aggregated.
    pub fn build_cells(&self) -> Array2<Cell> {
        let size = self.size();
        let mut cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            Cell::new((x as Coord, y as Coord))
        });

        for monster in &self.placed {
            cells[monster.position.to_nd_index()].place_monster(monster.monster_type());
        }

        for monster in &self.placed {
            let monster_type = monster.monster_type();
            for pos in monster_type.affected_positions(monster.position, size) {
                let cell = &mut cells[pos.to_nd_index()];
                if !cell.is_monster() {
                    cell.add_value(monster_type.value);
                }
            }
        }

        cells
    }
}

impl Index<Coord2> for MonsterLayout {
    type Output = Option<MonsterId>;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.occupants[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MonsterId::*;

    #[test]
    fn from_placements_rejects_bad_input() {
        let outside = [PlacedMonster::new((3, 0), DemonA)];
        assert_eq!(
            MonsterLayout::from_placements((3, 3), &outside),
            Err(GameError::InvalidCoords)
        );

        let stacked = [
            PlacedMonster::new((1, 1), DemonA),
            PlacedMonster::new((1, 1), DemonB),
        ];
        assert_eq!(
            MonsterLayout::from_placements((3, 3), &stacked),
            Err(GameError::OverlappingMonsters)
        );

        assert_eq!(
            MonsterLayout::from_placements((0, 3), &[]),
            Err(GameError::InvalidDimensions((0, 3)))
        );
    }

    #[test]
    fn values_sum_overlapping_patterns() {
        let placements = [
            PlacedMonster::new((0, 0), SaucerB),
            PlacedMonster::new((2, 0), DemonC),
        ];
        let layout = MonsterLayout::from_placements((4, 3), &placements).unwrap();
        let cells = layout.build_cells();

        // (1, 0) is next to both
        assert_eq!(cells[[1, 0]].value(), 5);
        // (3, 1) only sees the demon
        assert_eq!(cells[[3, 1]].value(), 3);
        // (0, 2) is covered by the demon's arm, not by the saucer ring
        assert_eq!(cells[[0, 2]].value(), 0);
        assert_eq!(cells[[0, 0]].value(), 2);
        assert_eq!(cells[[2, 0]].value(), 3);
        assert_eq!(layout.safe_cell_count(), 10);

        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(cells[[x, y]].value(), layout.value_at((x as u8, y as u8)));
            }
        }
    }

    #[test]
    fn deserializing_checks_placements() {
        let outside = r#"{"size":[2,2],"placed":[{"position":[9,9],"id":"demon_a"}]}"#;
        assert!(serde_json::from_str::<MonsterLayout>(outside).is_err());

        let stacked = r#"{"size":[2,2],"placed":[
            {"position":[1,1],"id":"demon_a"},
            {"position":[1,1],"id":"saucer_a"}
        ]}"#;
        assert!(serde_json::from_str::<MonsterLayout>(stacked).is_err());

        let empty = r#"{"size":[0,2],"placed":[]}"#;
        assert!(serde_json::from_str::<MonsterLayout>(empty).is_err());

        let layout =
            MonsterLayout::from_placements((2, 2), &[PlacedMonster::new((1, 0), SaucerA)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let restored: MonsterLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, layout);
        assert_eq!(restored[(1, 0)], Some(SaucerA));
        assert_eq!(restored.build_cells()[[0, 0]].value(), 1);
    }

    #[test]
    fn monsters_do_not_add_to_each_other() {
        let placements = [
            PlacedMonster::new((0, 0), SaucerA),
            PlacedMonster::new((1, 0), SaucerB),
        ];
        let layout = MonsterLayout::from_placements((2, 1), &placements).unwrap();
        let cells = layout.build_cells();

        assert_eq!(cells[[0, 0]].value(), 1);
        assert_eq!(cells[[1, 0]].value(), 2);
    }
}
