//! Grid initializers.
//!
//! Every worker builds an identical full grid from the shared seed, so
//! no broadcast is needed: after initialization each worker's view of
//! rows it does not own is consistent with everyone else's by
//! construction.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::cell::{Cell, CellKind};
use crate::config::SimConfig;
use crate::grid::Grid;

/// Spawn chances out of 100 for the combat domain.
const AGGRESSOR_PROB: u32 = 2;
const DEFENDER_PROB: u32 = 18;

/// Vitality ranges per kind (combat domain).
const AGGRESSOR_VITALITY: std::ops::RangeInclusive<i32> = 1..=100;
const DEFENDER_VITALITY: std::ops::RangeInclusive<i32> = 1..=20;
const BACKGROUND_VITALITY: std::ops::RangeInclusive<i32> = 0..=10_000;

/// Random combat-domain grid: mostly tissue, a sprinkling of medicine,
/// a rare strong cancer cell. Deterministic in the seed.
pub fn random_grid(config: &SimConfig) -> Grid {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut grid = Grid::new(config.rows, config.cols);
    for row in 0..config.rows {
        for col in 0..config.cols {
            let roll = rng.gen_range(0..100u32);
            let cell = if roll < AGGRESSOR_PROB {
                Cell::new(CellKind::Aggressor, rng.gen_range(AGGRESSOR_VITALITY))
            } else if roll < AGGRESSOR_PROB + DEFENDER_PROB {
                Cell::new(CellKind::Defender, rng.gen_range(DEFENDER_VITALITY))
            } else {
                Cell::new(CellKind::Background, rng.gen_range(BACKGROUND_VITALITY))
            };
            grid.set(row, col, cell);
        }
    }
    grid
}

/// Colony-domain starting grid: two seed hives on an otherwise empty
/// board, at the positions and sizes the scenario prescribes.
pub fn colony_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols);
    grid.set(1, 1, Cell::new(CellKind::Defender, 10_000)); // European
    grid.set(1, 4, Cell::new(CellKind::Aggressor, 9_000)); // African
    grid
}
