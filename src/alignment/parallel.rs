use log::{debug, trace};
use rayon::prelude::*;

use crate::alignment::matrix::{min_edit_cost, CostMatrix};

/// Minimum number of diagonal cells handed to a single rayon task.
/// Shorter diagonals are computed in one task, which keeps the corners of the grid cheap.
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 256;

/// One completed anti-diagonal of the grid, i.e. all cells `(i, j)` with `i + j == k` for some `k`.
/// The cells are ordered by row, so `cells[x]` is the value at row `first_row + x`.
#[derive(Clone, Debug, Default)]
struct Diagonal {
    /// The smallest row index present on this diagonal
    first_row: usize,
    /// Cell values, ordered by increasing row
    cells: Vec<usize>
}

impl Diagonal {
    /// Value of the cell on this diagonal at row `i`
    #[inline]
    fn at_row(&self, i: usize) -> usize {
        self.cells[i - self.first_row]
    }
}

/// Returns the inclusive range of rows covered by anti-diagonal `k` in an `(m+1) x (n+1)` grid.
#[inline]
fn diagonal_rows(k: usize, m: usize, n: usize) -> (usize, usize) {
    (k.saturating_sub(n), k.min(m))
}

/// Core wavefront sweep over all `m+n+1` anti-diagonals.
/// Every cell on diagonal `k` only reads diagonals `k-1` and `k-2`, so the cells of one diagonal are computed in parallel.
/// Collecting a diagonal is the join point: diagonal `k+1` never starts before every cell of `k` is written.
/// Only three diagonal buffers are alive at any time and they are recycled between iterations.
/// # Arguments
/// * `a` - the sequence on the rows
/// * `b` - the sequence on the columns
/// * `min_chunk` - minimum number of cells per rayon task, 0 is treated as 1
/// * `on_diagonal` - callback invoked with `(k, diagonal)` once diagonal `k` is complete
fn wavefront_sweep<T, F>(a: &[T], b: &[T], min_chunk: usize, mut on_diagonal: F) -> usize
where
    T: PartialEq + Sync,
    F: FnMut(usize, &Diagonal)
{
    let m = a.len();
    let n = b.len();
    let min_chunk = min_chunk.max(1);

    let mut prev2 = Diagonal::default();
    let mut prev = Diagonal::default();
    let mut next = Diagonal::default();

    for k in 0..=(m + n) {
        let (first_row, last_row) = diagonal_rows(k, m, n);
        next.first_row = first_row;
        (first_row..last_row + 1).into_par_iter()
            .with_min_len(min_chunk)
            .map(|i| {
                let j = k - i;
                if i == 0 || j == 0 {
                    // row 0 holds j and column 0 holds i, both of which are k on this diagonal
                    k
                } else {
                    min_edit_cost(
                        prev.at_row(i - 1),
                        prev.at_row(i),
                        prev2.at_row(i - 1),
                        a[i - 1] == b[j - 1]
                    )
                }
            })
            .collect_into_vec(&mut next.cells);

        on_diagonal(k, &next);

        // rotate so that `prev` is the new diagonal and the oldest buffer gets reused
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut next);
    }

    // the final diagonal is the single bottom-right cell
    prev.at_row(m)
}

/// Returns the edit distance between two sequences using the anti-diagonal wavefront on the current rayon pool.
/// Results are identical to `sequential::edit_distance`.
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
pub fn edit_distance_parallel<T: PartialEq + Sync>(a: &[T], b: &[T]) -> usize {
    edit_distance_parallel_with_chunk(a, b, DEFAULT_MIN_CHUNK_SIZE)
}

/// Same as `edit_distance_parallel`, but with a custom minimum number of cells per rayon task.
/// Small values create more parallelism on short diagonals at the cost of scheduling overhead.
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
/// * `min_chunk` - minimum number of cells per task, 0 is treated as 1
pub fn edit_distance_parallel_with_chunk<T: PartialEq + Sync>(a: &[T], b: &[T], min_chunk: usize) -> usize {
    debug!(
        "wavefront edit distance: {}x{} over {} diagonals, min chunk {min_chunk}",
        a.len(), b.len(), a.len() + b.len() + 1
    );
    let distance = wavefront_sweep(a, b, min_chunk, |_k, _diagonal| {});
    trace!("wavefront edit distance {}x{} = {distance}", a.len(), b.len());
    distance
}

/// Fills a complete cost matrix with the wavefront sweep.
/// Each diagonal is written into the flat matrix after its join point, so the result matches `sequential::fill_cost_matrix` cell for cell.
/// # Arguments
/// * `a` - the sequence on the rows
/// * `b` - the sequence on the columns
pub fn fill_cost_matrix_parallel<T: PartialEq + Sync>(a: &[T], b: &[T]) -> CostMatrix {
    fill_cost_matrix_parallel_with_chunk(a, b, DEFAULT_MIN_CHUNK_SIZE)
}

/// Same as `fill_cost_matrix_parallel`, but with a custom minimum number of cells per rayon task
/// # Arguments
/// * `a` - the sequence on the rows
/// * `b` - the sequence on the columns
/// * `min_chunk` - minimum number of cells per task, 0 is treated as 1
pub fn fill_cost_matrix_parallel_with_chunk<T: PartialEq + Sync>(a: &[T], b: &[T], min_chunk: usize) -> CostMatrix {
    let mut matrix = CostMatrix::new(a.len(), b.len());
    wavefront_sweep(a, b, min_chunk, |k, diagonal| {
        for (offset, &value) in diagonal.cells.iter().enumerate() {
            let i = diagonal.first_row + offset;
            matrix.set(i, k - i, value);
        }
    });
    matrix
}
