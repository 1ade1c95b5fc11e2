//! Pluggable per-cell update rules.
//!
//! The engine owns traversal and neighbor visibility; a rule owns the
//! domain semantics. Rules are pure of I/O and see one neighbor pair at
//! a time, which keeps them agnostic to band boundaries: the same hooks
//! run against in-band neighbors and against read-only halo rows.

pub mod colony;
pub mod combat;

pub use colony::ColonyRule;
pub use combat::CombatRule;

use crate::cell::Cell;

pub trait UpdateRule {
    /// Self-driven transition, applied once when a cell is visited and
    /// before any of its neighbors are considered (e.g. colony growth).
    fn begin(&self, _cell: &mut Cell) {}

    /// Whether `neighbor` counts as opposing for `cell`. Drives both
    /// combat bookkeeping and the isolation-decay side effect.
    fn opposes(&self, cell: &Cell, neighbor: &Cell) -> bool;

    /// Interaction with one in-band neighbor; both sides may mutate.
    /// Updates are single-buffered, so mutations are visible to cells
    /// visited later in the same pass.
    fn engage(&self, cell: &mut Cell, neighbor: &mut Cell);

    /// Interaction with one halo neighbor. Halo rows are borrowed
    /// read-only copies, so only the local side may mutate.
    fn engage_halo(&self, cell: &mut Cell, neighbor: &Cell);

    /// Whether `cell` is subject to isolation decay at all.
    fn is_active(&self, cell: &Cell) -> bool;

    /// Applied by the engine when an active cell finished its pass
    /// without seeing a single opposing neighbor.
    fn decay(&self, cell: &mut Cell);
}
