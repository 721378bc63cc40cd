//! Random sources driving the world simulation
//!
//! Systems never talk to a concrete generator. They take any [`WorldRng`],
//! which lets tests script exact draw sequences while the world itself runs
//! on the table-driven [`SemiRandom`].

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256StarStar;

/// Number of slots in the pre-shuffled table
pub const TABLE_SIZE: usize = 1024;

/// Seed used by [`World::new`](crate::world::World::new)
pub const DEFAULT_SEED: u64 = 0x5A4D_B0C5;

/// Random number generator trait for world simulation
pub trait WorldRng {
    /// Integer in `0..bound`. A bound of 0 yields 0.
    fn next_below(&mut self, bound: u32) -> u32;

    /// True with probability `1 / n`
    fn one_in(&mut self, n: u32) -> bool {
        self.next_below(n) == 0
    }
}

/// Cheap deterministic source: a shuffled permutation of `0..1024` read
/// through a rotating cursor
///
/// Any 1024 consecutive draws consume every slot exactly once, whatever
/// bounds they ask for. Results are biased when the bound does not divide
/// 1024 and are trivially predictable; this source exists for visual variety.
#[derive(Clone, Debug)]
pub struct SemiRandom {
    table: Vec<u16>,
    cursor: usize,
}

impl SemiRandom {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u16> = (0..TABLE_SIZE as u16).collect();
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        table.shuffle(&mut rng);

        Self {
            table,
            // Parked on the last slot so the first draw reads slot 0
            cursor: TABLE_SIZE - 1,
        }
    }

    /// Slot read by the most recent draw
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn table(&self) -> &[u16] {
        &self.table
    }
}

impl Default for SemiRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl WorldRng for SemiRandom {
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        self.cursor = if self.cursor + 1 == TABLE_SIZE {
            0
        } else {
            self.cursor + 1
        };
        u32::from(self.table[self.cursor]) % bound.max(1)
    }
}
