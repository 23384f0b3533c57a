use log::trace;

use crate::alignment::matrix::{min_edit_cost, CostMatrix};

/// Returns the edit distance between two sequences by doing the full grid calculation.
/// This version is row-based (each row spans `b`, one row per symbol of `a`) and only keeps two rows in memory.
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let n: usize = b.len();
    let mut row: Vec<usize> = vec![0; n+1];
    let mut prev_row: Vec<usize> = (0..n+1).collect();

    // go through each row
    for (i, ca) in a.iter().enumerate() {
        row[0] = i+1;
        for (j, cb) in b.iter().enumerate() {
            row[j+1] = min_edit_cost(prev_row[j+1], row[j], prev_row[j], ca == cb);
        }

        // swap the rows at the end of each iteration
        std::mem::swap(&mut row, &mut prev_row);
    }

    trace!("sequential edit distance {}x{} = {}", a.len(), n, prev_row[n]);
    prev_row[n]
}

/// Fills a complete cost matrix in row-major order.
/// The result is identical to `edit_distance` in the bottom-right cell, but every intermediate cell is retained.
/// This costs O(m*n) memory, so prefer `edit_distance` unless the cells are needed.
/// # Arguments
/// * `a` - the sequence on the rows
/// * `b` - the sequence on the columns
pub fn fill_cost_matrix<T: PartialEq>(a: &[T], b: &[T]) -> CostMatrix {
    let mut matrix = CostMatrix::new(a.len(), b.len());
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            let value = min_edit_cost(
                matrix.get(i, j+1),
                matrix.get(i+1, j),
                matrix.get(i, j),
                ca == cb
            );
            matrix.set(i+1, j+1, value);
        }
    }
    matrix
}
