/// Mini-batch iteration - index bookkeeping, shuffling, pass management
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::BatchConfig;
use crate::source::BatchSource;
use crate::{BatchError, Result};

/// Restartable mini-batch iterator over an in-memory dataset.
///
/// Wraps a [`BatchSource`] together with a batch size, a shuffle flag, and a
/// partial-batch policy. Each call to [`iter`](Self::iter), or each
/// `for`-loop over `&mut self`, starts an independent pass; when shuffling
/// is enabled the observation order is re-drawn once at the start of every
/// pass, not per batch.
///
/// The wrapped data is never copied or mutated. The only mutable state is
/// the owned index permutation (reshuffled in place between passes) and the
/// RNG driving it, so starting a pass requires exclusive access.
#[derive(Debug)]
pub struct BatchIterator<D> {
    data: D,
    batch_size: usize,
    n: usize,
    partial: bool,
    shuffle: bool,
    index_bound: usize,
    indices: Vec<usize>,
    rng: StdRng,
}

impl<D: BatchSource> BatchIterator<D> {
    /// Create a new iterator over `data`.
    ///
    /// Fails when the configuration is invalid, when a grouped source
    /// disagrees on observation counts, or when the dataset holds no
    /// observations. A batch size exceeding the observation count is
    /// clamped down to it with a warning rather than an error.
    pub fn new(data: D, config: BatchConfig) -> Result<Self> {
        config.validate()?;

        let n = data.observations()?;
        if n == 0 {
            return Err(BatchError::InvalidArgument(
                "dataset has no observations".to_string(),
            ));
        }

        let mut batch_size = config.batch_size;
        if batch_size > n {
            log::warn!(
                "batch_size {} exceeds observation count {}; clamping",
                batch_size,
                n
            );
            batch_size = n;
        }

        // With batch_size clamped to at most n, the bound is always >= 1,
        // so every pass emits at least one batch.
        let index_bound = if config.partial {
            n
        } else {
            n - batch_size + 1
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            data,
            batch_size,
            n,
            partial: config.partial,
            shuffle: config.shuffle,
            index_bound,
            indices: (0..n).collect(),
            rng,
        })
    }

    /// Start a new pass over the dataset.
    ///
    /// When shuffling is enabled the index permutation is re-drawn in place,
    /// fixing the observation order for the entire upcoming pass.
    pub fn iter(&mut self) -> Batches<'_, D> {
        if self.shuffle {
            self.indices.shuffle(&mut self.rng);
        }
        log::trace!(
            "starting pass: {} batches of up to {} observations",
            self.num_batches(),
            self.batch_size
        );

        Batches {
            loader: self,
            cursor: 0,
        }
    }

    /// The number of batches one full pass will emit.
    pub fn num_batches(&self) -> usize {
        if self.partial {
            self.n.div_ceil(self.batch_size)
        } else {
            self.n / self.batch_size
        }
    }

    /// Total number of observations.
    pub fn num_observations(&self) -> usize {
        self.n
    }

    /// Observations per batch, after any clamping.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether passes reshuffle observation order.
    pub fn is_shuffling(&self) -> bool {
        self.shuffle
    }

    /// Whether a final short batch is emitted.
    pub fn emits_partial(&self) -> bool {
        self.partial
    }

    /// The wrapped dataset.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Consume the iterator and hand back the wrapped dataset.
    pub fn into_inner(self) -> D {
        self.data
    }
}

impl<'a, D: BatchSource> IntoIterator for &'a mut BatchIterator<D> {
    type Item = D::Batch;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Batches<'a, D> {
        self.iter()
    }
}

/// One pass over a [`BatchIterator`].
///
/// Yields batches until the cursor reaches the index bound; with the
/// partial policy disabled the trailing remainder of the permutation is
/// never started.
pub struct Batches<'a, D> {
    loader: &'a BatchIterator<D>,
    cursor: usize,
}

impl<D: BatchSource> Iterator for Batches<'_, D> {
    type Item = D::Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.loader.index_bound {
            return None;
        }

        let next = (self.cursor + self.loader.batch_size).min(self.loader.n);
        let batch = self
            .loader
            .data
            .project(&self.loader.indices[self.cursor..next]);
        self.cursor = next;

        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cursor >= self.loader.index_bound {
            0
        } else {
            (self.loader.index_bound - self.cursor).div_ceil(self.loader.batch_size)
        };
        (remaining, Some(remaining))
    }
}

impl<D: BatchSource> ExactSizeIterator for Batches<'_, D> {}

impl<D: BatchSource> std::iter::FusedIterator for Batches<'_, D> {}
