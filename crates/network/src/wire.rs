//! Ghost-row wire format.
//!
//! # Wire Format
//!
//! ```text
//! [Ny single-byte cell codes]
//! ```
//!
//! No framing and no length prefix: both ends know `ny` in advance, so the
//! length is implicit. Any byte outside the three valid state codes is a
//! decode error.

use firegrid_types::{Cell, InvalidCellCode};

/// Encode a row as one byte per cell.
#[inline]
pub fn encode_row(row: &[Cell]) -> Vec<u8> {
    row.iter().map(|cell| cell.code()).collect()
}

/// Decode received bytes back into cells.
#[inline]
pub fn decode_row(bytes: &[u8]) -> Result<Vec<Cell>, InvalidCellCode> {
    bytes.iter().map(|&code| Cell::try_from(code)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let row = vec![
            Cell::Empty,
            Cell::Tree,
            Cell::Burning,
            Cell::Tree,
            Cell::Empty,
        ];
        let bytes = encode_row(&row);
        assert_eq!(bytes, vec![0, 1, 2, 1, 0]);
        assert_eq!(decode_row(&bytes).unwrap(), row);
    }

    #[test]
    fn test_empty_row() {
        assert_eq!(encode_row(&[]), Vec::<u8>::new());
        assert_eq!(decode_row(&[]).unwrap(), Vec::<Cell>::new());
    }

    #[test]
    fn test_invalid_byte_rejected() {
        let err = decode_row(&[0, 1, 7, 2]).unwrap_err();
        assert_eq!(err, InvalidCellCode(7));
    }
}
