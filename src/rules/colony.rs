//! Hive growth/split/migration rule.
//!
//! The Aggressor tag is the African hive, the Defender tag the European
//! hive, background an empty square. A hive grows every step; once over
//! its cap it halves and the freed half seeds a neighboring square —
//! an empty one outright, an occupied opposing one only if the half is
//! the stronger colony. Hives never decay from isolation.

use crate::cell::{Cell, CellKind};
use crate::rules::UpdateRule;

pub const EUROPEAN_INCREMENT: i32 = 3_000;
pub const EUROPEAN_MAX_SIZE: i32 = 20_000;
pub const AFRICAN_INCREMENT: i32 = 4_000;
pub const AFRICAN_MAX_SIZE: i32 = 26_000;

#[derive(Debug, Clone, Copy, Default)]
pub struct ColonyRule;

impl ColonyRule {
    fn increment(kind: CellKind) -> i32 {
        match kind {
            CellKind::Aggressor => AFRICAN_INCREMENT,
            CellKind::Defender => EUROPEAN_INCREMENT,
            CellKind::Background => 0,
        }
    }

    fn max_size(kind: CellKind) -> i32 {
        match kind {
            CellKind::Aggressor => AFRICAN_MAX_SIZE,
            CellKind::Defender => EUROPEAN_MAX_SIZE,
            CellKind::Background => 0,
        }
    }

    fn over_cap(cell: &Cell) -> bool {
        !cell.is_background() && cell.vitality > Self::max_size(cell.kind)
    }

    /// Larger colony keeps the square.
    fn strongest(a: Cell, b: Cell) -> Cell {
        if a.vitality > b.vitality {
            a
        } else {
            b
        }
    }
}

impl UpdateRule for ColonyRule {
    fn begin(&self, cell: &mut Cell) {
        if !cell.is_background() {
            cell.vitality += Self::increment(cell.kind);
        }
    }

    fn opposes(&self, cell: &Cell, neighbor: &Cell) -> bool {
        !cell.is_background() && !neighbor.is_background() && cell.kind != neighbor.kind
    }

    fn engage(&self, cell: &mut Cell, neighbor: &mut Cell) {
        if !Self::over_cap(cell) {
            return;
        }
        if neighbor.is_background() {
            // Split: half stays, half migrates into the empty square.
            cell.vitality /= 2;
            *neighbor = *cell;
        } else if self.opposes(cell, neighbor) {
            cell.vitality /= 2;
            *neighbor = Self::strongest(*neighbor, *cell);
        }
    }

    fn engage_halo(&self, cell: &mut Cell, neighbor: &Cell) {
        // Cross-band reconcile: the edge square goes to the stronger
        // colony. Only the local side mutates; the halo copy is dropped.
        if neighbor.vitality > cell.vitality {
            *cell = *neighbor;
        }
    }

    fn is_active(&self, _cell: &Cell) -> bool {
        false
    }

    fn decay(&self, _cell: &mut Cell) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hives_grow_by_kind_increment() {
        let rule = ColonyRule;
        let mut african = Cell::new(CellKind::Aggressor, 9_000);
        let mut european = Cell::new(CellKind::Defender, 10_000);
        let mut empty = Cell::background();
        rule.begin(&mut african);
        rule.begin(&mut european);
        rule.begin(&mut empty);
        assert_eq!(african.vitality, 13_000);
        assert_eq!(european.vitality, 13_000);
        assert!(empty.is_background());
    }

    #[test]
    fn over_cap_hive_splits_into_empty_square() {
        let rule = ColonyRule;
        let mut hive = Cell::new(CellKind::Defender, 22_000);
        let mut empty = Cell::background();
        rule.engage(&mut hive, &mut empty);
        assert_eq!(hive.vitality, 11_000);
        assert_eq!(empty, Cell::new(CellKind::Defender, 11_000));
    }

    #[test]
    fn under_cap_hive_stays_put() {
        let rule = ColonyRule;
        let mut hive = Cell::new(CellKind::Defender, 5_000);
        let mut empty = Cell::background();
        rule.engage(&mut hive, &mut empty);
        assert_eq!(hive.vitality, 5_000);
        assert!(empty.is_background());
    }

    #[test]
    fn takeover_of_weaker_opposing_hive() {
        let rule = ColonyRule;
        let mut hive = Cell::new(CellKind::Aggressor, 28_000);
        let mut rival = Cell::new(CellKind::Defender, 1_000);
        rule.engage(&mut hive, &mut rival);
        assert_eq!(hive.vitality, 14_000);
        assert_eq!(rival, Cell::new(CellKind::Aggressor, 14_000));
    }

    #[test]
    fn stronger_opposing_hive_holds_the_square() {
        let rule = ColonyRule;
        let mut hive = Cell::new(CellKind::Aggressor, 28_000);
        let mut rival = Cell::new(CellKind::Defender, 19_000);
        rule.engage(&mut hive, &mut rival);
        assert_eq!(hive.vitality, 14_000);
        assert_eq!(rival, Cell::new(CellKind::Defender, 19_000));
    }

    #[test]
    fn edge_cell_adopts_stronger_halo_colony() {
        let rule = ColonyRule;
        let mut edge = Cell::new(CellKind::Defender, 4_000);
        let halo = Cell::new(CellKind::Aggressor, 12_000);
        rule.engage_halo(&mut edge, &halo);
        assert_eq!(edge, halo);

        let mut strong_edge = Cell::new(CellKind::Defender, 15_000);
        rule.engage_halo(&mut strong_edge, &halo);
        assert_eq!(strong_edge.vitality, 15_000);
    }
}
