/// Batch sources - observation counting and index-set projection
use ndarray::{Array, ArrayBase, Axis, Data, RemoveAxis};

use crate::{BatchError, Result};

/// A dataset that can serve mini-batches.
///
/// A source reports how many observations it holds along its trailing axis
/// and can project an ordered set of observation indices into a batch,
/// leaving all other axes untouched. Grouped sources (tuples, vectors)
/// require every element to agree on the observation count and project all
/// elements with the same index set, so paired observations (features and
/// labels, say) stay aligned.
pub trait BatchSource {
    /// The container type produced for one batch.
    type Batch;

    /// Number of observations along the trailing axis.
    ///
    /// For grouped sources this validates agreement across elements.
    fn observations(&self) -> Result<usize>;

    /// Project the given observation indices into a fresh batch.
    ///
    /// Every index must be below [`observations`](Self::observations);
    /// callers are expected to hand in validated index sets.
    fn project(&self, indices: &[usize]) -> Self::Batch;
}

impl<A, S, D> BatchSource for ArrayBase<S, D>
where
    A: Clone,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    type Batch = Array<A, D>;

    fn observations(&self) -> Result<usize> {
        Ok(self.len_of(Axis(self.ndim() - 1)))
    }

    fn project(&self, indices: &[usize]) -> Self::Batch {
        self.select(Axis(self.ndim() - 1), indices)
    }
}

impl<'a, T: BatchSource> BatchSource for &'a T {
    type Batch = T::Batch;

    fn observations(&self) -> Result<usize> {
        (**self).observations()
    }

    fn project(&self, indices: &[usize]) -> Self::Batch {
        (**self).project(indices)
    }
}

/// A dynamically-sized group of sources; must contain at least one element.
impl<T: BatchSource> BatchSource for Vec<T> {
    type Batch = Vec<T::Batch>;

    fn observations(&self) -> Result<usize> {
        let first = match self.first() {
            Some(element) => element.observations()?,
            None => {
                return Err(BatchError::InvalidArgument(
                    "dataset group must contain at least one element".to_string(),
                ))
            }
        };

        for element in &self[1..] {
            let count = element.observations()?;
            if count != first {
                return Err(BatchError::DimensionMismatch {
                    expected: first,
                    got: count,
                });
            }
        }

        Ok(first)
    }

    fn project(&self, indices: &[usize]) -> Self::Batch {
        self.iter().map(|element| element.project(indices)).collect()
    }
}

macro_rules! impl_group_source {
    ($(($T:ident, $idx:tt)),+) => {
        impl<$($T: BatchSource),+> BatchSource for ($($T,)+) {
            type Batch = ($($T::Batch,)+);

            fn observations(&self) -> Result<usize> {
                let counts = [$(self.$idx.observations()?),+];
                for &count in &counts[1..] {
                    if count != counts[0] {
                        return Err(BatchError::DimensionMismatch {
                            expected: counts[0],
                            got: count,
                        });
                    }
                }
                Ok(counts[0])
            }

            fn project(&self, indices: &[usize]) -> Self::Batch {
                ($(self.$idx.project(indices),)+)
            }
        }
    };
}

impl_group_source!((A, 0));
impl_group_source!((A, 0), (B, 1));
impl_group_source!((A, 0), (B, 1), (C, 2));
impl_group_source!((A, 0), (B, 1), (C, 2), (D, 3));

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array1, Array2, Array3};

    #[test]
    fn test_trailing_axis_counts() {
        let v = arr1(&[1.0_f64, 2.0, 3.0]);
        assert_eq!(v.observations().unwrap(), 3);

        let m = Array2::<f32>::zeros((10, 100));
        assert_eq!(m.observations().unwrap(), 100);

        let t = Array3::<f32>::zeros((2, 3, 4));
        assert_eq!(t.observations().unwrap(), 4);
    }

    #[test]
    fn test_projection_preserves_leading_axes() {
        let m = Array2::from_shape_fn((3, 5), |(r, c)| (r * 10 + c) as i64);
        let batch = m.project(&[1, 3]);
        assert_eq!(batch.shape(), &[3, 2]);
        assert_eq!(batch[[0, 0]], 1);
        assert_eq!(batch[[0, 1]], 3);
        assert_eq!(batch[[2, 0]], 21);
        assert_eq!(batch[[2, 1]], 23);
    }

    #[test]
    fn test_projection_on_view() {
        let m = Array2::from_shape_fn((2, 6), |(_, c)| c as u32);
        let batch = m.view().project(&[5, 0]);
        assert_eq!(batch.shape(), &[2, 2]);
        assert_eq!(batch[[0, 0]], 5);
        assert_eq!(batch[[0, 1]], 0);
    }

    #[test]
    fn test_pair_counts_must_agree() {
        let x = Array2::<f32>::zeros((10, 100));
        let y = Array1::<f32>::zeros(100);
        assert_eq!((x.view(), y.view()).observations().unwrap(), 100);

        let y_short = Array1::<f32>::zeros(99);
        let err = (x, y_short).observations().unwrap_err();
        assert!(matches!(
            err,
            BatchError::DimensionMismatch {
                expected: 100,
                got: 99
            }
        ));
    }

    #[test]
    fn test_pair_projection_stays_aligned() {
        let x = Array2::from_shape_fn((4, 8), |(_, c)| c as f64);
        let y = Array1::from_shape_fn(8, |c| c as f64);
        let (xb, yb) = (&x, &y).project(&[6, 2]);
        assert_eq!(xb.shape(), &[4, 2]);
        assert_eq!(yb.shape(), &[2]);
        assert_eq!(xb[[0, 0]], yb[0]);
        assert_eq!(xb[[3, 1]], yb[1]);
    }

    #[test]
    fn test_empty_group_rejected() {
        let group: Vec<Array1<f32>> = Vec::new();
        assert!(matches!(
            group.observations(),
            Err(BatchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_group_of_three() {
        let a = Array1::<i32>::zeros(5);
        let b = Array2::<i32>::zeros((2, 5));
        let c = Array3::<i32>::zeros((2, 2, 5));
        let data = (a, b, c);
        assert_eq!(data.observations().unwrap(), 5);

        let (ab, bb, cb) = data.project(&[0, 4]);
        assert_eq!(ab.shape(), &[2]);
        assert_eq!(bb.shape(), &[2, 2]);
        assert_eq!(cb.shape(), &[2, 2, 2]);
    }
}
