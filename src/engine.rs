//! Local update engine.
//!
//! Applies a pluggable rule over a worker's row band, row-major and in
//! place: there is no double buffer, so a cell rewritten earlier in the
//! pass is seen fresh by cells visited later. Neighbor enumeration is
//! clipped to the band and the grid edge, never out of bounds; rows the
//! band does not own are supplied later by the halo pass.

use crate::cell::Cell;
use crate::grid::Grid;
use crate::partition::Band;
use crate::rules::UpdateRule;

/// Bookkeeping for an edge row whose decay decision must wait for one
/// or two halo rows. A cell whose only opposing neighbor lives across
/// the band boundary must not be decayed by the local pass alone.
#[derive(Debug)]
pub struct EdgePending {
    row: usize,
    opposed: Vec<bool>,
    awaiting: u8,
}

impl EdgePending {
    fn new(row: usize, cols: usize) -> EdgePending {
        EdgePending {
            row,
            opposed: vec![false; cols],
            awaiting: 1,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }
}

/// Runs one local pass over the band.
///
/// `defer_top` / `defer_bottom` flag edge rows that will receive a halo
/// this step; their decay is postponed and returned as [`EdgePending`]
/// entries (at most two, one per distinct edge row — a one-row band
/// yields a single entry awaiting both halos).
pub fn update_band<R: UpdateRule>(
    grid: &mut Grid,
    band: Band,
    rule: &R,
    defer_top: bool,
    defer_bottom: bool,
) -> Vec<EdgePending> {
    let mut pendings: Vec<EdgePending> = Vec::new();
    if band.is_empty() {
        return pendings;
    }
    let cols = grid.cols();
    if defer_top {
        pendings.push(EdgePending::new(band.start_row(), cols));
    }
    if defer_bottom {
        if let Some(pending) = pendings.iter_mut().find(|p| p.row == band.end_row()) {
            pending.awaiting += 1;
        } else {
            pendings.push(EdgePending::new(band.end_row(), cols));
        }
    }

    for row in band.rows() {
        let deferred = pendings.iter().position(|p| p.row == row);
        for col in 0..cols {
            let mut cell = match grid.get(row, col) {
                Some(cell) => cell,
                None => continue,
            };
            rule.begin(&mut cell);
            let mut opposed = false;
            for (nr, nc) in moore_neighbors(row, col, band, cols) {
                let mut neighbor = match grid.get(nr, nc) {
                    Some(neighbor) => neighbor,
                    None => continue,
                };
                if rule.opposes(&cell, &neighbor) {
                    opposed = true;
                }
                rule.engage(&mut cell, &mut neighbor);
                grid.set(nr, nc, neighbor);
            }
            match deferred {
                Some(idx) => pendings[idx].opposed[col] = opposed,
                None => {
                    if rule.is_active(&cell) && !opposed {
                        rule.decay(&mut cell);
                    }
                }
            }
            grid.set(row, col, cell);
        }
    }
    pendings
}

/// Runs the halo-aware pass over one deferred edge row.
///
/// Each edge cell engages its up-to-3 neighbors in the halo row, which
/// is a read-only copy and is never written back. Once the row has seen
/// every halo it was waiting for, the postponed decay is applied.
pub fn update_edge<R: UpdateRule>(
    grid: &mut Grid,
    pending: &mut EdgePending,
    halo: &[Cell],
    rule: &R,
) {
    let cols = grid.cols();
    debug_assert_eq!(halo.len(), cols);
    for col in 0..cols {
        let mut cell = match grid.get(pending.row, col) {
            Some(cell) => cell,
            None => continue,
        };
        let lo = col.saturating_sub(1);
        let hi = (col + 1).min(cols.saturating_sub(1));
        for neighbor in &halo[lo..=hi] {
            if rule.opposes(&cell, neighbor) {
                pending.opposed[col] = true;
            }
            rule.engage_halo(&mut cell, neighbor);
        }
        grid.set(pending.row, col, cell);
    }

    pending.awaiting -= 1;
    if pending.awaiting == 0 {
        for col in 0..cols {
            let mut cell = match grid.get(pending.row, col) {
                Some(cell) => cell,
                None => continue,
            };
            if rule.is_active(&cell) && !pending.opposed[col] {
                rule.decay(&mut cell);
                grid.set(pending.row, col, cell);
            }
        }
    }
}

/// Moore neighborhood of `(row, col)` clipped to the band's rows and the
/// grid's columns. Edge cells simply have fewer neighbors.
fn moore_neighbors(
    row: usize,
    col: usize,
    band: Band,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let nr = row.checked_add_signed(dr)?;
        let nc = col.checked_add_signed(dc)?;
        (band.contains(nr) && nc < cols).then_some((nr, nc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellKind};
    use crate::rules::CombatRule;

    fn full_band(grid: &Grid) -> Band {
        Band::partition(0, 1, grid.rows())
    }

    #[test]
    fn isolated_weak_agent_decays_to_background() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, Cell::new(CellKind::Defender, 15));
        let band = full_band(&grid);
        let pendings = update_band(&mut grid, band, &CombatRule, false, false);
        assert!(pendings.is_empty());
        assert!(grid.get(1, 1).unwrap().is_background());
    }

    #[test]
    fn opposed_agent_fights_instead_of_decaying() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, Cell::new(CellKind::Defender, 100));
        grid.set(1, 2, Cell::new(CellKind::Aggressor, 500));
        let band = full_band(&grid);
        update_band(&mut grid, band, &CombatRule, false, false);
        let defender = grid.get(1, 1).unwrap();
        assert_eq!(defender.kind, CellKind::Defender);
        assert!(defender.vitality < 100);
    }

    #[test]
    fn single_column_grid_does_not_index_out_of_bounds() {
        let mut grid = Grid::new(3, 1);
        grid.set(0, 0, Cell::new(CellKind::Aggressor, 50));
        grid.set(1, 0, Cell::new(CellKind::Defender, 500));
        let band = full_band(&grid);
        update_band(&mut grid, band, &CombatRule, false, false);
        // the aggressor saw the defender below it and took one hit
        assert!(grid.get(0, 0).unwrap().vitality < 50 || grid.get(0, 0).unwrap().is_background());
    }

    #[test]
    fn neighbors_outside_band_are_invisible_to_local_pass() {
        let mut grid = Grid::new(4, 4);
        // opposing pair straddling the band boundary at rows 1|2
        grid.set(1, 1, Cell::new(CellKind::Aggressor, 100));
        grid.set(2, 1, Cell::new(CellKind::Defender, 100));
        let lower = Band::partition(1, 2, 4);
        update_band(&mut grid, lower, &CombatRule, false, false);
        // without deferral the defender cannot see row 1 and decays
        assert!(grid.get(2, 1).unwrap().is_background());
        // the aggressor's row was not part of this band at all
        assert_eq!(grid.get(1, 1).unwrap().vitality, 100);
    }

    #[test]
    fn deferred_edge_row_waits_for_the_halo() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 1, Cell::new(CellKind::Defender, 100));
        let lower = Band::partition(1, 2, 4);
        let mut pendings = update_band(&mut grid, lower, &CombatRule, true, false);
        assert_eq!(pendings.len(), 1);
        assert_eq!(pendings[0].row(), 2);
        // still alive: decay deferred until the halo pass
        assert_eq!(grid.get(2, 1).unwrap().kind, CellKind::Defender);

        let halo = vec![
            Cell::background(),
            Cell::new(CellKind::Aggressor, 100),
            Cell::background(),
            Cell::background(),
        ];
        update_edge(&mut grid, &mut pendings[0], &halo, &CombatRule);
        let defender = grid.get(2, 1).unwrap();
        assert_eq!(defender.kind, CellKind::Defender);
        assert_eq!(defender.vitality, 100 - crate::rules::combat::AGGRESSOR_DAMAGE);
    }

    #[test]
    fn unopposed_deferred_cell_decays_after_the_halo_pass() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 1, Cell::new(CellKind::Defender, 100));
        let lower = Band::partition(1, 2, 4);
        let mut pendings = update_band(&mut grid, lower, &CombatRule, true, false);
        let halo = vec![Cell::background(); 4];
        update_edge(&mut grid, &mut pendings[0], &halo, &CombatRule);
        assert!(grid.get(2, 1).unwrap().is_background());
    }

    #[test]
    fn one_row_band_waits_for_both_halos() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, Cell::new(CellKind::Defender, 100));
        let middle = Band::partition(1, 3, 3);
        assert_eq!(middle.rows(), 1..2);
        let mut pendings = update_band(&mut grid, middle, &CombatRule, true, true);
        assert_eq!(pendings.len(), 1);

        // empty halo from above: no decay yet, one halo still pending
        let blank = vec![Cell::background(); 3];
        update_edge(&mut grid, &mut pendings[0], &blank, &CombatRule);
        assert_eq!(grid.get(1, 1).unwrap().kind, CellKind::Defender);

        // aggressor below keeps the defender in the fight
        let halo = vec![
            Cell::background(),
            Cell::new(CellKind::Aggressor, 100),
            Cell::background(),
        ];
        update_edge(&mut grid, &mut pendings[0], &halo, &CombatRule);
        let defender = grid.get(1, 1).unwrap();
        assert_eq!(defender.kind, CellKind::Defender);
        assert!(defender.vitality < 100);
    }

    #[test]
    fn empty_band_is_a_no_op() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, Cell::new(CellKind::Aggressor, 10));
        let empty = Band::partition(0, 5, 3);
        assert!(empty.is_empty());
        let before = grid.clone();
        let pendings = update_band(&mut grid, empty, &CombatRule, true, true);
        assert!(pendings.is_empty());
        assert_eq!(grid, before);
    }
}
