use num_traits::{NumCast, Zero};

use super::{Array, ArrayError, OrPanic, element_count};

impl<T: Clone> Array<T> {
    /// Constructs an `Array` with axis extents `dims` and every element set
    /// to `fill`.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a = Array::from_elem([2, 3], 1.5);
    /// assert_eq!(a.dims(), [2, 3]);
    /// assert_eq!(a.as_ref(), [1.5; 6]);
    /// ```
    pub fn from_elem(dims: impl Into<Vec<usize>>, fill: T) -> Self {
        Self::try_from_elem(dims, fill).or_panic()
    }

    /// Like [`Self::from_elem()`] but fails if the element count overflows.
    pub fn try_from_elem(dims: impl Into<Vec<usize>>, fill: T) -> Result<Self, ArrayError> {
        let dims = dims.into();
        let count = element_count(&dims)?;
        Ok(Self::new_inner(dims, vec![fill; count].into()))
    }
}

impl<T: Clone + Zero> Array<T> {
    /// An `Array` full of zeros.
    pub fn zeros(dims: impl Into<Vec<usize>>) -> Self { Self::from_elem(dims, T::zero()) }
}

impl<T: NumCast> Array<T> {
    /// An `Array` whose elements count `0, 1, 2, ...` in row-major order.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a: Array<f32> = Array::indgen([3, 2]);
    /// assert_eq!(a.as_ref(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(a[[2, 1]], 5.0);
    /// ```
    pub fn indgen(dims: impl Into<Vec<usize>>) -> Self {
        Self::try_indgen(dims).or_panic()
    }

    /// Like [`Self::indgen()`] but fails if a count does not fit in `T`.
    pub fn try_indgen(dims: impl Into<Vec<usize>>) -> Result<Self, ArrayError> {
        let dims = dims.into();
        let items = (0..element_count(&dims)?)
            .map(num_traits::cast::<usize, T>)
            .collect::<Option<Vec<T>>>()
            .ok_or_else(|| ArrayError::Overflow {dims: dims.clone()})?;
        Ok(Self::new_inner(dims, items.into()))
    }
}

// ----------------------------------------------------------------------------

impl<T> Array<T> {
    /// A one-axis `Array`.
    pub fn from_vec(items: Vec<T>) -> Self {
        let dims = vec![items.len()];
        Self::new_inner(dims, items.into())
    }

    /// A two-axis `Array` with one row per element of `rows`.
    ///
    /// Panics if the rows do not all have the same length. See also the
    /// [`array!`] macro.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a = Array::from_rows(vec![vec![5, 8], vec![4, 5], vec![1, 2]]);
    /// assert_eq!(a.dims(), [3, 2]);
    /// assert_eq!(a.as_ref(), [5, 8, 4, 5, 1, 2]);
    /// ```
    ///
    /// [`array!`]: crate::array
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self { Self::try_from_rows(rows).or_panic() }

    pub fn try_from_rows(rows: Vec<Vec<T>>) -> Result<Self, ArrayError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut items = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(ArrayError::ShapeMismatch {expected: vec![width], found: vec![row.len()]});
            }
            items.extend(row);
        }
        Ok(Self::new_inner(vec![height, width], items.into()))
    }

    /// A three-axis `Array` with one `from_rows()` plane per element of
    /// `planes`.
    pub fn from_planes(planes: Vec<Vec<Vec<T>>>) -> Self { Self::try_from_planes(planes).or_panic() }

    pub fn try_from_planes(planes: Vec<Vec<Vec<T>>>) -> Result<Self, ArrayError> {
        let depth = planes.len();
        let mut plane_dims: Option<Vec<usize>> = None;
        let mut items = Vec::new();
        for plane in planes {
            let plane = Self::try_from_rows(plane)?;
            match &plane_dims {
                Some(dims) if dims[..] != *plane.dims() => {
                    return Err(ArrayError::ShapeMismatch {expected: dims.clone(), found: plane.dims().to_vec()});
                },
                Some(_) => {},
                None => { plane_dims = Some(plane.dims().to_vec()); },
            }
            items.extend(plane);
        }
        let mut dims = vec![depth];
        dims.extend(plane_dims.unwrap_or_else(|| vec![0, 0]));
        Ok(Self::new_inner(dims, items.into()))
    }
}

/// Constructs an [`Array`] from a nested literal. The number of axes (one to
/// three) is the nesting depth, and the extents are the lengths.
///
/// Panics if the literal is not rectangular.
///
/// ```
/// use skyarray::array;
/// let v = array![44, 55, 66, 77];
/// assert_eq!(v.dims(), [4]);
/// let m = array![[5, 8], [4, 5], [1, 2]];
/// assert_eq!(m.dims(), [3, 2]);
/// assert_eq!(m[[1, 1]], 5);
/// let c = array![[[1, 2]], [[3, 4]]];
/// assert_eq!(c.dims(), [2, 1, 2]);
/// ```
///
/// [`Array`]: crate::Array
#[macro_export]
macro_rules! array {
    ($([$([$($x:expr),* $(,)?]),+ $(,)?]),+ $(,)?) => {
        $crate::Array::from_planes(vec![$(vec![$(vec![$($x,)*],)*],)*])
    };
    ($([$($x:expr),* $(,)?]),+ $(,)?) => {
        $crate::Array::from_rows(vec![$(vec![$($x,)*],)*])
    };
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_vec(vec![$($x,)*])
    };
}

// ----------------------------------------------------------------------------
