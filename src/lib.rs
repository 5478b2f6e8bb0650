//! Mini-batch iteration over in-memory arrays.
//!
//! Given one or more array-like datasets sharing a common observation count
//! along their trailing axis, [`BatchIterator`] produces successive batches
//! of a configurable size, optionally reshuffling observation order at the
//! start of each full pass, optionally dropping a final undersized batch.
//! Nothing beyond the current batch is ever materialized, so training loops
//! can traverse large in-memory datasets repeatedly without copies.
//!
//! # Example
//!
//! ```
//! use minibatch::{BatchConfig, BatchIterator};
//! use ndarray::Array2;
//!
//! let x = Array2::<f32>::zeros((10, 100));
//! let mut loader = BatchIterator::new(x, BatchConfig::default().batch_size(20))?;
//! assert_eq!(loader.num_batches(), 5);
//!
//! for batch in &mut loader {
//!     assert_eq!(batch.shape(), &[10, 20]);
//! }
//! # Ok::<(), minibatch::BatchError>(())
//! ```
//!
//! Paired datasets (features and labels) are passed as a tuple; both are
//! projected with the same index set each batch, so pairs stay aligned even
//! when shuffling.

pub mod config;
pub mod loader;
pub mod source;

// Re-export commonly used items
pub use config::BatchConfig;
pub use loader::{BatchIterator, Batches};
pub use source::BatchSource;

/// Library error types
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {expected} observations, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, BatchError>;
