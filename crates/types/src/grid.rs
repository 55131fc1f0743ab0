//! Owned grid blocks and borrowed views.

use crate::Cell;
use rand::Rng;

/// A worker's partition of the full grid: `rows × ny` cells, row-major.
///
/// Exclusively owned by one worker and replaced wholesale once per step
/// (synchronous update): the next state is fully computed from the old block
/// before it is swapped in, so no cell ever observes an already-updated
/// neighbor within the same step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBlock {
    ny: usize,
    cells: Vec<Cell>,
}

impl GridBlock {
    /// All-`Empty` block.
    pub fn new(rows: usize, ny: usize) -> Self {
        debug_assert!(rows > 0 && ny > 0);
        Self {
            ny,
            cells: vec![Cell::Empty; rows * ny],
        }
    }

    /// Block seeded by one Bernoulli(`d0`) trial per cell: `Tree` with
    /// probability `d0`, `Empty` otherwise. Draws are row-major.
    pub fn random<R: Rng>(rows: usize, ny: usize, d0: f64, rng: &mut R) -> Self {
        debug_assert!(rows > 0 && ny > 0);
        let cells = (0..rows * ny)
            .map(|_| {
                if rng.gen::<f64>() < d0 {
                    Cell::Tree
                } else {
                    Cell::Empty
                }
            })
            .collect();
        Self { ny, cells }
    }

    /// Build a block from existing row-major cells.
    pub fn from_cells(ny: usize, cells: Vec<Cell>) -> Self {
        debug_assert!(ny > 0 && !cells.is_empty() && cells.len() % ny == 0);
        Self { ny, cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.ny
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn get(&self, i: usize, j: usize) -> Cell {
        self.cells[i * self.ny + j]
    }

    pub fn set(&mut self, i: usize, j: usize, state: Cell) {
        self.cells[i * self.ny + j] = state;
    }

    /// Local row `i` as a slice.
    pub fn row(&self, i: usize) -> &[Cell] {
        &self.cells[i * self.ny..(i + 1) * self.ny]
    }

    /// First local row, what the upper neighbor receives as its bottom ghost.
    pub fn top_row(&self) -> &[Cell] {
        self.row(0)
    }

    /// Last local row, what the lower neighbor receives as its top ghost.
    pub fn bottom_row(&self) -> &[Cell] {
        self.row(self.rows() - 1)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Commit the next step's cells, replacing the block wholesale.
    pub fn replace(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    /// Swap the block's cells with `other`, reusing both allocations.
    ///
    /// The threaded variant commits each step this way: the old cells land
    /// in the scratch arena and are overwritten next step.
    pub fn swap_cells(&mut self, other: &mut Vec<Cell>) {
        debug_assert_eq!(other.len(), self.cells.len());
        std::mem::swap(&mut self.cells, other);
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Read-only view of the whole block.
    pub fn view(&self) -> BlockView<'_> {
        BlockView {
            ny: self.ny,
            cells: &self.cells,
        }
    }

    /// Read-only view of local rows `[i0, i1)`.
    pub fn rows_view(&self, i0: usize, i1: usize) -> BlockView<'_> {
        debug_assert!(i0 < i1 && i1 <= self.rows());
        BlockView {
            ny: self.ny,
            cells: &self.cells[i0 * self.ny..i1 * self.ny],
        }
    }
}

/// Borrowed, read-only view of a row-major block.
///
/// The update rule takes a view so the threaded variant can run it over
/// disjoint sub-ranges of one shared arena without copying, while owned
/// blocks pass [`GridBlock::view`].
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    ny: usize,
    cells: &'a [Cell],
}

impl<'a> BlockView<'a> {
    pub fn new(ny: usize, cells: &'a [Cell]) -> Self {
        debug_assert!(ny > 0 && !cells.is_empty() && cells.len() % ny == 0);
        Self { ny, cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.ny
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn get(&self, i: usize, j: usize) -> Cell {
        self.cells[i * self.ny + j]
    }

    pub fn row(&self, i: usize) -> &[Cell] {
        &self.cells[i * self.ny..(i + 1) * self.ny]
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells
    }
}
