use alloc::vec::Vec;

use rand::prelude::*;

use super::*;

/// Default random source, a `SmallRng` seeded by the host.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Generation strategy that scatters monsters uniformly over the whole board.
#[derive(Debug)]
pub struct RandomLayoutGenerator<R> {
    random: R,
}

impl<R: RandomSource> RandomLayoutGenerator<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomSource> LayoutGenerator for RandomLayoutGenerator<R> {
    fn generate(mut self, config: &RoundConfig) -> Result<MonsterLayout> {
        config.validate()?;

        let (width, height) = config.size;
        let monster_count = usize::from(config.monster_count());
        let roster = MonsterCatalog::list_for_mode(config.mode);

        let mut positions: Vec<Coord2> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        shuffle(&mut positions, &mut self.random);

        let placements: Vec<PlacedMonster> = positions[..monster_count]
            .iter()
            .map(|&position| {
                let monster = &roster[self.random.next_index(roster.len())];
                PlacedMonster::new(position, monster.id)
            })
            .collect();

        log::debug!(
            "Generated {}x{} layout with {} monsters from {} eligible types",
            width,
            height,
            placements.len(),
            roster.len()
        );

        MonsterLayout::from_placements(config.size, &placements)
    }
}
