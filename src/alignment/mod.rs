/*!
# Alignment module
Contains the dynamic-programming engines that compute unit-cost edit distance (Needleman-Wunsch with a match cost of 0 and a cost of 1 for every insertion, deletion, or substitution).
There are two engines with identical results:
* `sequential` - the classic row-major fill with two rolling rows
* `parallel` - an anti-diagonal (wavefront) fill where every cell of one diagonal is computed concurrently on the rayon pool

## Example usage
```rust
use nwsim::alignment::{edit_distance, edit_distance_parallel};

let kitten: Vec<char> = "kitten".chars().collect();
let sitting: Vec<char> = "sitting".chars().collect();
assert_eq!(edit_distance(&kitten, &sitting), 3);
assert_eq!(edit_distance_parallel(&kitten, &sitting), 3);
```
*/
/// Flat cost matrix and the shared recurrence
pub mod matrix;
/// Anti-diagonal wavefront engine
pub mod parallel;
/// Row-major single threaded engine
pub mod sequential;

pub use matrix::CostMatrix;
pub use parallel::{
    edit_distance_parallel, edit_distance_parallel_with_chunk, fill_cost_matrix_parallel, fill_cost_matrix_parallel_with_chunk
};
pub use sequential::{edit_distance, fill_cost_matrix};
