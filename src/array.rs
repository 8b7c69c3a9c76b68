use std::ops;

use super::{ArrayError, OrPanic, View, MemoryView};

/// Returns the row-major strides of an array with axis extents `dims`.
///
/// The last axis has stride `1`, and each other axis has the stride of the
/// next axis multiplied by the next axis's extent.
///
/// ```
/// use skyarray::row_major_strides;
/// assert_eq!(row_major_strides(&[3, 4, 5]), [20, 5, 1]);
/// assert!(row_major_strides(&[]).is_empty());
/// ```
pub fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for k in (1..dims.len()).rev() {
        strides[k - 1] = strides[k] * dims[k];
    }
    strides
}

/// Returns the position in a row-major buffer of the element at `index` of
/// an array with axis extents `dims`, i.e. the sum of `index[k]` times the
/// stride of axis `k`.
///
/// ```
/// use skyarray::flat_offset;
/// assert_eq!(flat_offset(&[3, 2], &[2, 1]), Ok(5));
/// assert!(flat_offset(&[3, 2], &[3, 0]).is_err());
/// ```
pub fn flat_offset(dims: &[usize], index: &[usize]) -> Result<usize, ArrayError> {
    if index.len() != dims.len() {
        return Err(ArrayError::RankMismatch {expected: dims.len(), found: index.len()});
    }
    let mut offset = 0;
    for (axis, (&i, &size)) in index.iter().zip(dims).enumerate() {
        if i >= size { return Err(ArrayError::IndexOutOfRange {index: i, axis, size}); }
        offset = offset * size + i;
    }
    Ok(offset)
}

/// Returns the number of elements of an array with axis extents `dims`.
///
/// Also fails if the strides would overflow, which can happen even when an
/// axis of extent zero makes the element count zero.
pub(crate) fn element_count(dims: &[usize]) -> Result<usize, ArrayError> {
    match dims.iter().try_fold(1usize, |n, &d| n.checked_mul(d.max(1))) {
        Some(_) => Ok(dims.iter().product()),
        None => Err(ArrayError::Overflow {dims: dims.to_vec()}),
    }
}

pub(crate) fn check_dims(expected: &[usize], found: &[usize]) -> Result<(), ArrayError> {
    if expected != found {
        return Err(ArrayError::ShapeMismatch {expected: expected.to_vec(), found: found.to_vec()});
    }
    Ok(())
}

/// Calls `f` with every multi-index of an array with axis extents `dims`, in
/// row-major order.
pub(crate) fn each_index(dims: &[usize], mut f: impl FnMut(&[usize])) {
    if dims.iter().any(|&d| d == 0) { return; }
    let mut index = vec![0; dims.len()];
    loop {
        f(&index);
        // Odometer increment, last axis fastest.
        let mut axis = dims.len();
        loop {
            if axis == 0 { return; }
            axis -= 1;
            index[axis] += 1;
            if index[axis] < dims[axis] { break; }
            index[axis] = 0;
        }
    }
}

// ----------------------------------------------------------------------------

/// A dense, row-major array of `T`s whose shape is known at run time.
///
/// `dims()` lists the axis extents, outermost first. The elements are stored
/// in a single `Box<[T]>` whose length is always the product of the extents.
/// An array with no axes holds exactly one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Array<T> {
    dims: Vec<usize>,
    items: Box<[T]>,
}

impl<T> Array<T> {
    pub(crate) fn new_inner(dims: Vec<usize>, items: Box<[T]>) -> Self {
        assert_eq!(dims.iter().product::<usize>(), items.len());
        Self {dims, items}
    }

    /// Constructs an `Array` with axis extents `dims` given its elements in
    /// row-major order.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a = Array::new([3, 2], [0, 1, 2, 3, 4, 5]);
    /// assert_eq!(a[[0, 1]], 1);
    /// assert_eq!(a[[2, 0]], 4);
    /// ```
    pub fn new(dims: impl Into<Vec<usize>>, items: impl Into<Box<[T]>>) -> Self {
        Self::try_new(dims, items).or_panic()
    }

    /// Like [`Self::new()`] but fails if the number of items is wrong.
    pub fn try_new(
        dims: impl Into<Vec<usize>>,
        items: impl Into<Box<[T]>>,
    ) -> Result<Self, ArrayError> {
        let dims = dims.into();
        let items = items.into();
        let count = element_count(&dims)?;
        if count != items.len() {
            return Err(ArrayError::ShapeMismatch {expected: vec![count], found: vec![items.len()]});
        }
        Ok(Self::new_inner(dims, items))
    }

    /// Constructs an `Array` with axis extents `dims` by calling `f` with
    /// each multi-index in row-major order.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a = Array::from_fn([2, 3], |i| 10 * i[0] + i[1]);
    /// assert_eq!(a.as_ref(), [0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn(dims: impl Into<Vec<usize>>, f: impl FnMut(&[usize]) -> T) -> Self {
        Self::try_from_fn(dims, f).or_panic()
    }

    pub fn try_from_fn(
        dims: impl Into<Vec<usize>>,
        mut f: impl FnMut(&[usize]) -> T,
    ) -> Result<Self, ArrayError> {
        let dims = dims.into();
        let mut items = Vec::with_capacity(element_count(&dims)?);
        each_index(&dims, |i| items.push(f(i)));
        Ok(Self::new_inner(dims, items.into()))
    }

    /// The axis extents, outermost first.
    pub fn dims(&self) -> &[usize] { &self.dims }

    /// The number of axes.
    pub fn ndim(&self) -> usize { self.dims.len() }

    /// The number of elements, i.e. the product of [`Self::dims()`].
    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn strides(&self) -> Vec<usize> { row_major_strides(&self.dims) }

    /// The position in [`Self::as_ref()`] of the element at `index`.
    ///
    /// Panics if `index` has the wrong length or is out of range.
    pub fn flat_offset(&self, index: &[usize]) -> usize {
        flat_offset(&self.dims, index).or_panic()
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        flat_offset(&self.dims, index).ok().map(|offset| &self.items[offset])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        flat_offset(&self.dims, index).ok().map(move |offset| &mut self.items[offset])
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.iter() }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> { self.items.iter_mut() }

    /// Returns the raw array elements.
    pub fn into_raw(self) -> Box<[T]> { self.items }

    /// Changes the axis extents without moving any of the items.
    ///
    /// ```
    /// use skyarray::Array;
    /// let a = Array::new([2, 3], [0, 1, 2, 3, 4, 5]).reshape([3, 2]);
    /// assert_eq!(a[[2, 0]], 4);
    /// ```
    pub fn reshape(self, dims: impl Into<Vec<usize>>) -> Self {
        self.try_reshape(dims).or_panic()
    }

    pub fn try_reshape(self, dims: impl Into<Vec<usize>>) -> Result<Self, ArrayError> {
        let dims = dims.into();
        if element_count(&dims)? != self.items.len() {
            return Err(ArrayError::ShapeMismatch {expected: self.dims, found: dims});
        }
        Ok(Self::new_inner(dims, self.items))
    }

    /// Reshapes into a single axis.
    pub fn flatten(self) -> Self {
        let dims = vec![self.items.len()];
        Self::new_inner(dims, self.items)
    }
}

impl<T> std::convert::AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] { &self.items }
}

impl<T> std::convert::AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.items }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter { self.items.into_vec().into_iter() }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<T, const N: usize> ops::Index<[usize; N]> for Array<T> {
    type Output = T;
    #[track_caller]
    fn index(&self, index: [usize; N]) -> &T { &self[&index[..]] }
}

impl<T, const N: usize> ops::IndexMut<[usize; N]> for Array<T> {
    #[track_caller]
    fn index_mut(&mut self, index: [usize; N]) -> &mut T { &mut self[&index[..]] }
}

impl<'a, T> ops::Index<&'a [usize]> for Array<T> {
    type Output = T;
    #[track_caller]
    fn index(&self, index: &'a [usize]) -> &T { &self.items[self.flat_offset(index)] }
}

impl<'a, T> ops::IndexMut<&'a [usize]> for Array<T> {
    #[track_caller]
    fn index_mut(&mut self, index: &'a [usize]) -> &mut T {
        let offset = self.flat_offset(index);
        &mut self.items[offset]
    }
}

impl<T: Clone> View for Array<T> {
    type T = T;
    #[inline(always)]
    fn dims(&self) -> &[usize] { &self.dims }
    #[inline(always)]
    fn len(&self) -> usize { self.items.len() }
    #[inline(always)]
    fn at_flat(&self, position: usize) -> T { self.items[position].clone() }
}

impl<T: Clone> MemoryView for Array<T> {
    #[inline(always)]
    fn at_ref(&self, position: usize) -> &T { &self.items[position] }
    #[inline(always)]
    fn at_mut(&mut self, position: usize) -> &mut T { &mut self.items[position] }
}

// ----------------------------------------------------------------------------
