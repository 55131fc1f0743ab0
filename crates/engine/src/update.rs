//! The halo-aware cellular-automaton update rule.

use firegrid_types::{BlockView, Cell};
use rand::Rng;

/// Offsets of the Moore neighborhood (the 8 surrounding cells).
const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Compute one synchronous step for a block padded above and below by the
/// neighbors' boundary rows.
///
/// Rules, per cell:
/// - `Burning` becomes `Empty`.
/// - `Tree` becomes `Burning` if any Moore neighbor is `Burning`; otherwise
///   it ignites spontaneously with probability `f`, else stays `Tree`.
/// - `Empty` grows a `Tree` with probability `p`, else stays `Empty`.
///
/// A `None` ghost row stands for a missing neighbor and reads as all
/// `Empty` (closed, non-wrapping boundary); columns never wrap either.
/// Reads only the step-start snapshot and writes a fresh buffer, so no cell
/// observes an already-updated neighbor. At most one uniform draw per cell,
/// in row-major order.
pub fn update_block<R: Rng>(
    block: BlockView<'_>,
    top_ghost: Option<&[Cell]>,
    bottom_ghost: Option<&[Cell]>,
    p: f64,
    f: f64,
    rng: &mut R,
) -> Vec<Cell> {
    let rows = block.rows();
    let ny = block.ny();
    debug_assert!(top_ghost.map_or(true, |ghost| ghost.len() == ny));
    debug_assert!(bottom_ghost.map_or(true, |ghost| ghost.len() == ny));

    let mut next = Vec::with_capacity(rows * ny);
    for i in 0..rows {
        for j in 0..ny {
            let state = match block.get(i, j) {
                Cell::Burning => Cell::Empty,
                Cell::Tree => {
                    if burning_neighbor(block, top_ghost, bottom_ghost, i, j) {
                        Cell::Burning
                    } else if rng.gen::<f64>() < f {
                        Cell::Burning
                    } else {
                        Cell::Tree
                    }
                }
                Cell::Empty => {
                    if rng.gen::<f64>() < p {
                        Cell::Tree
                    } else {
                        Cell::Empty
                    }
                }
            };
            next.push(state);
        }
    }
    next
}

/// Whether any Moore neighbor of `(i, j)` is `Burning`, reading vertical
/// out-of-block neighbors from the ghost rows.
fn burning_neighbor(
    block: BlockView<'_>,
    top_ghost: Option<&[Cell]>,
    bottom_ghost: Option<&[Cell]>,
    i: usize,
    j: usize,
) -> bool {
    let rows = block.rows() as isize;
    let ny = block.ny() as isize;
    MOORE.iter().any(|&(di, dj)| {
        let nj = j as isize + dj;
        if nj < 0 || nj >= ny {
            // Columns do not wrap.
            return false;
        }
        let nj = nj as usize;
        let ni = i as isize + di;
        let neighbor = if ni < 0 {
            match top_ghost {
                Some(ghost) => ghost[nj],
                None => Cell::Empty,
            }
        } else if ni >= rows {
            match bottom_ghost {
                Some(ghost) => ghost[nj],
                None => Cell::Empty,
            }
        } else {
            block.get(ni as usize, nj)
        };
        neighbor == Cell::Burning
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker_rng;
    use firegrid_types::GridBlock;

    fn step(block: &GridBlock, top: Option<&[Cell]>, bottom: Option<&[Cell]>, p: f64, f: f64) -> GridBlock {
        let mut rng = worker_rng(1, 0);
        let next = update_block(block.view(), top, bottom, p, f, &mut rng);
        GridBlock::from_cells(block.ny(), next)
    }

    #[test]
    fn test_burning_becomes_empty_in_one_step() {
        let mut block = GridBlock::new(3, 3);
        block.set(1, 1, Cell::Burning);
        // Regardless of p and f.
        let next = step(&block, None, None, 1.0, 1.0);
        assert_eq!(next.get(1, 1), Cell::Empty);
    }

    #[test]
    fn test_tree_without_fire_stays_tree() {
        let block = GridBlock::from_cells(3, vec![Cell::Tree; 9]);
        let mut current = block;
        for _ in 0..5 {
            current = step(&current, None, None, 0.0, 0.0);
        }
        assert_eq!(current.count(Cell::Tree), 9);
    }

    #[test]
    fn test_tree_ignites_from_every_moore_neighbor() {
        for (di, dj) in MOORE {
            let mut block = GridBlock::from_cells(3, vec![Cell::Tree; 9]);
            let ni = (1 + di) as usize;
            let nj = (1 + dj) as usize;
            block.set(ni, nj, Cell::Burning);
            let next = step(&block, None, None, 0.0, 0.0);
            assert_eq!(next.get(1, 1), Cell::Burning, "offset ({di},{dj})");
        }
    }

    #[test]
    fn test_ghost_rows_ignite_boundary_rows() {
        let block = GridBlock::from_cells(3, vec![Cell::Tree; 3]);
        let top = [Cell::Empty, Cell::Burning, Cell::Empty];

        let next = step(&block, Some(&top), None, 0.0, 0.0);
        assert_eq!(next.cells(), &[Cell::Burning; 3]);

        let bottom = [Cell::Burning, Cell::Empty, Cell::Empty];
        let next = step(&block, None, Some(&bottom), 0.0, 0.0);
        assert_eq!(
            next.cells(),
            &[Cell::Burning, Cell::Burning, Cell::Tree]
        );
    }

    #[test]
    fn test_absent_ghost_reads_as_empty() {
        // A burning cell in a would-be neighbor must not be seen when the
        // channel is absent: an all-tree block stays all-tree.
        let block = GridBlock::from_cells(4, vec![Cell::Tree; 8]);
        let next = step(&block, None, None, 0.0, 0.0);
        assert_eq!(next.count(Cell::Tree), 8);
    }

    #[test]
    fn test_columns_do_not_wrap() {
        // Fire at column 0 must not reach column 2 through the side edge.
        let mut block = GridBlock::from_cells(3, vec![Cell::Tree; 3]);
        block.set(0, 0, Cell::Burning);
        let next = step(&block, None, None, 0.0, 0.0);
        assert_eq!(next.get(0, 1), Cell::Burning);
        assert_eq!(next.get(0, 2), Cell::Tree);
    }

    #[test]
    fn test_spontaneous_ignition_with_certainty() {
        let block = GridBlock::from_cells(5, vec![Cell::Tree; 5]);
        let next = step(&block, None, None, 0.0, 1.0);
        assert_eq!(next.count(Cell::Burning), 5);
    }

    #[test]
    fn test_empty_cells_never_ignite_spontaneously() {
        // 1x5 all-empty block, p=0, f=1: ignition only applies to trees.
        let block = GridBlock::new(1, 5);
        let next = step(&block, None, None, 0.0, 1.0);
        assert_eq!(next.count(Cell::Empty), 5);
    }

    #[test]
    fn test_growth_with_certainty() {
        let block = GridBlock::new(2, 3);
        let next = step(&block, None, None, 1.0, 0.0);
        assert_eq!(next.count(Cell::Tree), 6);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut rng_a = worker_rng(99, 3);
        let mut rng_b = worker_rng(99, 3);
        let block = GridBlock::random(16, 16, 0.5, &mut worker_rng(7, 0));
        let a = update_block(block.view(), None, None, 0.3, 0.05, &mut rng_a);
        let b = update_block(block.view(), None, None, 0.3, 0.05, &mut rng_b);
        assert_eq!(a, b);
    }
}
