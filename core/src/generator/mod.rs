use crate::*;
pub use random::*;

mod random;

/// Source of uniform indices driving shuffles and type picks.
pub trait RandomSource {
    /// Uniform index in `0..bound`, `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

pub trait LayoutGenerator {
    fn generate(self, config: &RoundConfig) -> Result<MonsterLayout>;
}

/// Fisher–Yates: walk down from the last index, swapping each slot with a uniform pick from `0..=i`.
pub fn shuffle<T>(items: &mut [T], random: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = random.next_index(i + 1);
        items.swap(i, j);
    }
}
