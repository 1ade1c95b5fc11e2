//! Cancer/tissue/medicine combat rule.
//!
//! Tissue is the background and never takes damage; combat happens only
//! between the two agent kinds. Each agent cell loses vitality for every
//! opposing neighbor it sees, and an agent that sees no opponent at all
//! decays back to background tissue.

use crate::cell::{Cell, CellKind};
use crate::rules::UpdateRule;

/// Vitality an agent loses per adjacent Aggressor (cancer) neighbor.
pub const AGGRESSOR_DAMAGE: i32 = 25;
/// Vitality an agent loses per adjacent Defender (medicine) neighbor.
pub const DEFENDER_DAMAGE: i32 = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct CombatRule;

impl CombatRule {
    fn damage_dealt_by(kind: CellKind) -> i32 {
        match kind {
            CellKind::Aggressor => AGGRESSOR_DAMAGE,
            CellKind::Defender => DEFENDER_DAMAGE,
            CellKind::Background => 0,
        }
    }

    /// Damage intake model: the visited cell absorbs a hit from one
    /// opposing neighbor. Exhausted cells become background.
    fn take_hit(cell: &mut Cell, from: CellKind) {
        cell.vitality -= Self::damage_dealt_by(from);
        if cell.vitality <= 0 {
            *cell = Cell::background();
        }
    }
}

impl UpdateRule for CombatRule {
    fn opposes(&self, cell: &Cell, neighbor: &Cell) -> bool {
        matches!(
            (cell.kind, neighbor.kind),
            (CellKind::Aggressor, CellKind::Defender)
                | (CellKind::Defender, CellKind::Aggressor)
        )
    }

    fn engage(&self, cell: &mut Cell, neighbor: &mut Cell) {
        if self.opposes(cell, neighbor) {
            Self::take_hit(cell, neighbor.kind);
        }
    }

    fn engage_halo(&self, cell: &mut Cell, neighbor: &Cell) {
        if self.opposes(cell, neighbor) {
            Self::take_hit(cell, neighbor.kind);
        }
    }

    fn is_active(&self, cell: &Cell) -> bool {
        !cell.is_background()
    }

    fn decay(&self, cell: &mut Cell) {
        *cell = Cell::background();
    }
}
