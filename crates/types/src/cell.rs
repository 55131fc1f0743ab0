//! Cell states and their single-byte wire codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of one automaton cell.
///
/// The discriminant is the wire code: ghost rows travel as one byte per
/// cell. No other byte value is ever valid, and the enum makes invalid
/// states unrepresentable everywhere past the decode boundary.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty = 0,
    Tree = 1,
    Burning = 2,
}

/// A byte that is not a valid cell-state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid cell code: {0}")]
pub struct InvalidCellCode(pub u8);

impl Cell {
    /// Wire code for this state.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidCellCode;

    fn try_from(code: u8) -> Result<Self, InvalidCellCode> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Tree),
            2 => Ok(Cell::Burning),
            other => Err(InvalidCellCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for cell in [Cell::Empty, Cell::Tree, Cell::Burning] {
            assert_eq!(Cell::try_from(cell.code()), Ok(cell));
        }
    }

    #[test]
    fn test_invalid_codes_rejected() {
        for code in 3..=u8::MAX {
            assert_eq!(Cell::try_from(code), Err(InvalidCellCode(code)));
        }
    }
}
