//! Cell values and the extremum result of the final reduction.

use std::fmt;

/// Category tag for a grid cell.
///
/// Both sample domains are three-valued and map onto the same tags:
/// tissue / cancer / medicine in the combat domain, empty square /
/// African hive / European hive in the colony domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CellKind {
    Background = 0,
    Aggressor = 1,
    Defender = 2,
}

impl CellKind {
    /// Wire decoding for transports that ship cells as flat integers.
    pub fn from_i32(raw: i32) -> Option<CellKind> {
        match raw {
            0 => Some(CellKind::Background),
            1 => Some(CellKind::Aggressor),
            2 => Some(CellKind::Defender),
            _ => None,
        }
    }
}

/// A single grid cell: a kind tag plus a non-negative magnitude whose
/// meaning depends on the kind (remaining health, colony size).
///
/// Cells are plain values with no identity beyond their grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub vitality: i32,
}

impl Cell {
    pub const fn new(kind: CellKind, vitality: i32) -> Cell {
        Cell { kind, vitality }
    }

    /// An empty background square.
    pub const fn background() -> Cell {
        Cell::new(CellKind::Background, 0)
    }

    pub fn is_background(&self) -> bool {
        self.kind == CellKind::Background
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::background()
    }
}

/// Strongest matching cell found by a scan, or the "none found" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremum {
    pub kind: CellKind,
    pub vitality: i32,
}

impl Extremum {
    /// Identity element of [`Extremum::combine`]: no matching cell seen.
    pub const NONE: Extremum = Extremum {
        kind: CellKind::Background,
        vitality: -1,
    };

    pub fn from_cell(cell: Cell) -> Extremum {
        Extremum {
            kind: cell.kind,
            vitality: cell.vitality,
        }
    }

    pub fn is_none(&self) -> bool {
        self.vitality < 0
    }

    /// Max-by-vitality combine, ties broken in favor of `b`.
    ///
    /// Pure and stateless so it is safe under any grouping or order a
    /// distributed reduction chooses; `NONE` is its identity.
    pub fn combine(a: Extremum, b: Extremum) -> Extremum {
        if a.vitality > b.vitality {
            a
        } else {
            b
        }
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{:?}({})", self.kind, self.vitality)
        }
    }
}
