use super::{Array, ArrayError, ArrayView, ArrayViewMut, OrPanic, Selection};

impl<T> Array<T> {
    /// Reverses the row-major order of the elements, keeping `dims()`.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a: Array<u8> = Array::indgen([5]);
    /// assert_eq!(a.reverse().as_ref(), [4, 3, 2, 1, 0]);
    /// ```
    pub fn reverse(mut self) -> Self {
        self.as_mut().reverse();
        self
    }

    fn diagonal_selection(&self) -> Result<Selection, ArrayError> {
        let n = match *self.dims() {
            [h, w] if h == w => h,
            [h, w] => return Err(ArrayError::ShapeMismatch {expected: vec![h, h], found: vec![h, w]}),
            ref dims => return Err(ArrayError::RankMismatch {expected: 2, found: dims.len()}),
        };
        Ok(Selection::from_parts(vec![n], (0..n).map(|i| i * (n + 1)).collect()))
    }

    /// A view of the leading diagonal of a square matrix.
    ///
    /// ```
    /// use skyarray::{Array, View};
    /// let m: Array<i32> = Array::indgen([3, 3]);
    /// assert_eq!(m.diagonal().to_vec(), [0, 4, 8]);
    /// ```
    #[track_caller]
    pub fn diagonal(&self) -> ArrayView<'_, T> { self.try_diagonal().or_panic() }

    pub fn try_diagonal(&self) -> Result<ArrayView<'_, T>, ArrayError> {
        let selection = self.diagonal_selection()?;
        Ok(ArrayView::new(self.as_ref(), selection))
    }

    #[track_caller]
    pub fn diagonal_mut(&mut self) -> ArrayViewMut<'_, T> { self.try_diagonal_mut().or_panic() }

    pub fn try_diagonal_mut(&mut self) -> Result<ArrayViewMut<'_, T>, ArrayError> {
        let selection = self.diagonal_selection()?;
        Ok(ArrayViewMut::new(self.as_mut(), selection))
    }
}

impl<T: Clone> Array<T> {
    /// Reverses the order of the axes. For a matrix this is the usual
    /// transpose.
    ///
    /// ```
    /// use skyarray::array;
    /// let m = array![[1, 2, 3], [4, 5, 6]];
    /// assert_eq!(m.transpose(), array![[1, 4], [2, 5], [3, 6]]);
    /// ```
    pub fn transpose(&self) -> Self {
        let strides = self.strides();
        let dims: Vec<usize> = self.dims().iter().rev().copied().collect();
        Self::from_fn(dims, |index| {
            let offset: usize = index.iter().rev().zip(&strides).map(|(i, s)| i * s).sum();
            self.as_ref()[offset].clone()
        })
    }

    /// Stacks `n` copies of `self` along a new outermost axis.
    ///
    /// ```
    /// use skyarray::Array;
    /// let r = Array::from_vec(vec![1, 2]).replicate(3);
    /// assert_eq!(r.dims(), [3, 2]);
    /// assert_eq!(r.as_ref(), [1, 2, 1, 2, 1, 2]);
    /// ```
    pub fn replicate(&self, n: usize) -> Self {
        let mut dims = vec![n];
        dims.extend_from_slice(self.dims());
        let items: Vec<T> = (0..n).flat_map(|_| self.iter().cloned()).collect();
        Self::new_inner(dims, items.into())
    }

    /// Concatenates `self` and `other` along `axis`. All other extents must
    /// agree.
    ///
    /// ```
    /// use skyarray::array;
    /// let a = array![[1, 2], [3, 4]];
    /// assert_eq!(a.append(&array![[5, 6]], 0), array![[1, 2], [3, 4], [5, 6]]);
    /// assert_eq!(a.append(&array![[5], [6]], 1), array![[1, 2, 5], [3, 4, 6]]);
    /// ```
    #[track_caller]
    pub fn append(&self, other: &Self, axis: usize) -> Self { self.try_append(other, axis).or_panic() }

    pub fn try_append(&self, other: &Self, axis: usize) -> Result<Self, ArrayError> {
        if other.ndim() != self.ndim() {
            return Err(ArrayError::RankMismatch {expected: self.ndim(), found: other.ndim()});
        }
        if axis >= self.ndim() {
            return Err(ArrayError::RankMismatch {expected: axis + 1, found: self.ndim()});
        }
        let split = self.dims()[axis];
        let mut expected = self.dims().to_vec();
        expected[axis] = other.dims()[axis];
        if expected != other.dims() {
            return Err(ArrayError::ShapeMismatch {expected, found: other.dims().to_vec()});
        }
        let mut dims = self.dims().to_vec();
        dims[axis] += other.dims()[axis];
        let mut inner = vec![0; dims.len()];
        Self::try_from_fn(dims, |index| {
            inner.copy_from_slice(index);
            if index[axis] < split {
                self[&inner[..]].clone()
            } else {
                inner[axis] -= split;
                other[&inner[..]].clone()
            }
        })
    }

    /// Like [`Self::append()`] but with `other` first.
    #[track_caller]
    pub fn prepend(&self, other: &Self, axis: usize) -> Self { other.append(self, axis) }
}

impl Array<bool> {
    /// The row-major positions of the `true` elements, in increasing order.
    /// The result can be used directly as an index.
    ///
    /// ```
    /// use skyarray::{Array, View};
    /// let v = Array::from_vec(vec![3, 8, 1, 9]);
    /// let big = (&v).map(|x| x > 2).collect().where_true();
    /// assert_eq!(big.as_ref(), [0, 1, 3]);
    /// assert_eq!(v.flat(big).to_vec(), [3, 8, 9]);
    /// ```
    pub fn where_true(&self) -> Array<usize> {
        let positions = self.iter().enumerate().filter(|&(_, &b)| b).map(|(p, _)| p).collect();
        Array::from_vec(positions)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Array, ArrayError, MemoryView, array};

    #[test]
    fn transpose_3d() {
        let a: Array<u32> = Array::indgen([2, 3, 4]);
        let t = a.transpose();
        assert_eq!(t.dims(), [4, 3, 2]);
        for i in 0..2 { for j in 0..3 { for k in 0..4 {
            assert_eq!(a[[i, j, k]], t[[k, j, i]]);
        } } }
    }

    #[test]
    fn reverse_twice() {
        let a: Array<i16> = Array::indgen([3, 2]);
        let r = a.clone().reverse();
        assert_eq!(r.dims(), [3, 2]);
        assert_eq!(r[[0, 0]], 5);
        assert_eq!(r.reverse(), a);
    }

    #[test]
    fn append_errors() {
        let a = array![[1, 2], [3, 4]];
        assert_eq!(
            a.try_append(&array![[5, 6, 7]], 0),
            Err(ArrayError::ShapeMismatch {expected: vec![1, 2], found: vec![1, 3]}),
        );
        assert_eq!(
            a.try_append(&array![5, 6], 0),
            Err(ArrayError::RankMismatch {expected: 2, found: 1}),
        );
        assert!(a.try_append(&a, 2).is_err());
    }

    #[test]
    fn prepend() {
        let v = array![3, 4];
        assert_eq!(v.prepend(&array![1, 2], 0), array![1, 2, 3, 4]);
    }

    #[test]
    fn where_true_selects_true() {
        let mask = array![[true, false], [false, true]];
        let w = mask.where_true();
        assert_eq!(w.as_ref(), [0, 3]);
        assert!(mask.flat(&w).iter().all(|&b| b));
        let none: Array<bool> = Array::from_elem([3], false);
        assert!(none.where_true().is_empty());
    }

    #[test]
    fn diagonal() {
        let mut m: Array<i32> = Array::zeros([3, 3]);
        m.diagonal_mut().fill(1);
        assert!(matches!(
            Array::<i32>::zeros([3]).try_diagonal_mut(),
            Err(ArrayError::RankMismatch {expected: 2, found: 1}),
        ));
        assert_eq!(m, array![[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        assert!(matches!(
            Array::<i32>::zeros([2, 3]).try_diagonal(),
            Err(ArrayError::ShapeMismatch {..}),
        ));
        assert!(matches!(
            Array::<i32>::zeros([2]).try_diagonal(),
            Err(ArrayError::RankMismatch {expected: 2, found: 1}),
        ));
    }

    proptest! {
        #[test]
        fn transpose_twice(dims in proptest::collection::vec(0usize..4, 0..4)) {
            let a: Array<u32> = Array::indgen(dims);
            prop_assert_eq!(a.transpose().transpose(), a);
        }
    }
}
