/// Full (m+1) x (n+1) cost matrix stored as a flat buffer.
/// Cell `(i, j)` lives at `i * cols + j` and holds the edit distance between the first `i` symbols of `a` and the first `j` symbols of `b`.
/// Conceptually, `a` runs from top to bottom (rows) and `b` runs from left to right (columns).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CostMatrix {
    /// Number of rows, always `len(a) + 1`
    rows: usize,
    /// Number of columns, always `len(b) + 1`
    cols: usize,
    /// Row-major cell values
    cells: Vec<usize>
}

impl CostMatrix {
    /// Creates a new matrix for two sequences with the borders already initialized.
    /// Row 0 is `0..=len_b` and column 0 is `0..=len_a`, all interior cells start at 0.
    /// # Arguments
    /// * `len_a` - length of the sequence on the rows
    /// * `len_b` - length of the sequence on the columns
    pub fn new(len_a: usize, len_b: usize) -> Self {
        let rows = len_a + 1;
        let cols = len_b + 1;
        let mut cells = vec![0; rows * cols];
        for (j, cell) in cells[..cols].iter_mut().enumerate() {
            *cell = j;
        }
        for i in 1..rows {
            cells[i * cols] = i;
        }
        Self {
            rows, cols, cells
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat offset of cell `(i, j)`
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        i * self.cols + j
    }

    /// Returns the value of cell `(i, j)`.
    /// # Panics
    /// * if `(i, j)` is outside the matrix
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[self.index(i, j)]
    }

    /// Sets the value of cell `(i, j)`.
    /// # Panics
    /// * if `(i, j)` is outside the matrix
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: usize) {
        let offset = self.index(i, j);
        self.cells[offset] = value;
    }

    /// Read-only view of row `i`
    pub fn row(&self, i: usize) -> &[usize] {
        let start = self.index(i, 0);
        &self.cells[start..start + self.cols]
    }

    /// The edit distance between the two full sequences, i.e. the bottom-right cell
    pub fn distance(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }
}

/// The unit-cost recurrence shared by every engine.
/// Ties are irrelevant for the distance itself, the minimum is all that is kept.
/// # Arguments
/// * `top` - cell `(i-1, j)`, extended by deleting `a[i-1]`
/// * `left` - cell `(i, j-1)`, extended by inserting `b[j-1]`
/// * `diagonal` - cell `(i-1, j-1)`, extended by a match or substitution
/// * `is_match` - true if `a[i-1] == b[j-1]`
#[inline]
pub fn min_edit_cost(top: usize, left: usize, diagonal: usize, is_match: bool) -> usize {
    let substitution = diagonal + usize::from(!is_match);
    (top + 1).min(left + 1).min(substitution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_borders() {
        let matrix = CostMatrix::new(3, 4);
        assert_eq!(matrix.rows(), 4);
        assert_eq!(matrix.cols(), 5);
        assert_eq!(matrix.row(0), &[0, 1, 2, 3, 4]);
        for i in 0..matrix.rows() {
            assert_eq!(matrix.get(i, 0), i);
        }
        assert_eq!(matrix.row(2), &[2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = CostMatrix::new(0, 0);
        assert_eq!(matrix.rows(), 1);
        assert_eq!(matrix.cols(), 1);
        assert_eq!(matrix.distance(), 0);

        let matrix = CostMatrix::new(0, 5);
        assert_eq!(matrix.distance(), 5);
        let matrix = CostMatrix::new(7, 0);
        assert_eq!(matrix.distance(), 7);
    }

    #[test]
    fn test_flat_indexing() {
        let mut matrix = CostMatrix::new(2, 3);
        assert_eq!(matrix.index(0, 0), 0);
        assert_eq!(matrix.index(1, 0), 4);
        assert_eq!(matrix.index(2, 3), 11);

        matrix.set(1, 2, 9);
        assert_eq!(matrix.get(1, 2), 9);
        assert_eq!(matrix.row(1), &[1, 0, 9, 0]);

        matrix.set(2, 3, 5);
        assert_eq!(matrix.distance(), 5);
    }

    #[test]
    fn test_min_edit_cost() {
        // match along the diagonal is free
        assert_eq!(min_edit_cost(3, 3, 2, true), 2);
        // mismatch pays one
        assert_eq!(min_edit_cost(3, 3, 2, false), 3);
        // deletion wins
        assert_eq!(min_edit_cost(0, 4, 4, false), 1);
        // insertion wins
        assert_eq!(min_edit_cost(4, 0, 4, true), 1);
    }
}
