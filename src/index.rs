//! Per-axis index specifications and their resolution into element offsets.
//!
//! An indexing expression supplies one [`AxisIndex`] per axis. Resolving it
//! against the axis extents of an array produces a [`Selection`]: the extents
//! of the result (one per non-[`Scalar`] axis) and the row-major offsets of
//! the selected elements, in the order in which the result visits them.
//!
//! [`Scalar`]: AxisIndex::Scalar

use std::ops::{RangeFull, RangeInclusive};

use super::{Array, ArrayError, element_count, row_major_strides};

/// Which positions of one axis to select.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisIndex {
    /// One position. The axis disappears from the result.
    Scalar(usize),

    /// The whole axis, unchanged.
    All,

    /// Every position from the first to the second inclusive, in steps of
    /// `1` if the first is smaller and `-1` if it is larger. `Range(5, 2)`
    /// selects `5, 4, 3, 2` and `Range(3, 3)` selects `3`.
    Range(usize, usize),

    /// The given positions, in the given order, possibly repeated.
    Indices(Vec<usize>),
}

impl AxisIndex {
    /// `len` ascending positions starting at `start`. Unlike `Range`, this can
    /// be empty.
    ///
    /// A span that runs past `usize::MAX` ends at `usize::MAX`, which no axis
    /// contains, so resolving it reports [`ArrayError::IndexOutOfRange`].
    pub fn span(start: usize, len: usize) -> Self {
        if len == 0 { Self::Indices(Vec::new()) } else { Self::Range(start, start.saturating_add(len - 1)) }
    }

    /// Whether the axis survives into the shape of the result.
    pub fn keeps_axis(&self) -> bool { !matches!(self, Self::Scalar(_)) }

    /// The selected positions of an axis of extent `size`, in order.
    ///
    /// - axis - the number of the axis, used only in error messages.
    pub fn positions(&self, axis: usize, size: usize) -> Result<Vec<usize>, ArrayError> {
        let check = |index: usize| {
            if index < size { Ok(index) } else { Err(ArrayError::IndexOutOfRange {index, axis, size}) }
        };
        match *self {
            Self::Scalar(i) => Ok(vec![check(i)?]),
            Self::All => Ok((0..size).collect()),
            Self::Range(lo, hi) => {
                check(lo)?;
                check(hi)?;
                Ok(if lo <= hi { (lo..=hi).collect() } else { (hi..=lo).rev().collect() })
            },
            Self::Indices(ref list) => list.iter().map(|&i| check(i)).collect(),
        }
    }
}

/// Constructs an [`AxisIndex::Range`].
///
/// ```
/// use skyarray::{Array, View, rx};
/// let v = Array::from_vec(vec![0, 10, 20, 30, 40, 50, 60]);
/// assert_eq!(v.flat(rx(5, 2)).to_vec(), [50, 40, 30, 20]);
/// ```
pub fn rx(lo: usize, hi: usize) -> AxisIndex { AxisIndex::Range(lo, hi) }

impl From<usize> for AxisIndex {
    fn from(i: usize) -> Self { Self::Scalar(i) }
}

impl From<RangeFull> for AxisIndex {
    fn from(_: RangeFull) -> Self { Self::All }
}

impl From<RangeInclusive<usize>> for AxisIndex {
    fn from(r: RangeInclusive<usize>) -> Self { Self::Range(*r.start(), *r.end()) }
}

impl From<Vec<usize>> for AxisIndex {
    fn from(list: Vec<usize>) -> Self { Self::Indices(list) }
}

impl From<&[usize]> for AxisIndex {
    fn from(list: &[usize]) -> Self { Self::Indices(list.to_vec()) }
}

impl<const N: usize> From<[usize; N]> for AxisIndex {
    fn from(list: [usize; N]) -> Self { Self::Indices(list.to_vec()) }
}

/// An index array, read in row-major order whatever its shape.
impl From<Array<usize>> for AxisIndex {
    fn from(list: Array<usize>) -> Self { Self::Indices(list.into_raw().into_vec()) }
}

impl From<&Array<usize>> for AxisIndex {
    fn from(list: &Array<usize>) -> Self { Self::Indices(list.as_ref().to_vec()) }
}

/// Builds an array of [`AxisIndex`]es, converting each argument with
/// `AxisIndex::from()`. Write `..` for a whole axis.
///
/// ```
/// use skyarray::{idx, rx, AxisIndex};
/// assert_eq!(idx![2, .., rx(1, 3), vec![4, 0]], [
///     AxisIndex::Scalar(2),
///     AxisIndex::All,
///     AxisIndex::Range(1, 3),
///     AxisIndex::Indices(vec![4, 0]),
/// ]);
/// ```
#[macro_export]
macro_rules! idx {
    ($($i:expr),* $(,)?) => { [$($crate::AxisIndex::from($i)),*] };
}

// ----------------------------------------------------------------------------

/// The result of resolving one [`AxisIndex`] per axis against some axis
/// extents.
///
/// The offsets are visited with the outermost axis varying slowest, and
/// within each axis in the order of [`AxisIndex::positions()`]. Every offset
/// is less than the product of the extents it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    dims: Vec<usize>,
    offsets: Vec<usize>,
    element: bool,
}

impl Selection {
    pub(crate) fn from_parts(dims: Vec<usize>, offsets: Vec<usize>) -> Self {
        assert_eq!(dims.iter().product::<usize>(), offsets.len());
        Self {dims, offsets, element: false}
    }

    /// Resolve `specs` against an array with axis extents `dims`.
    ///
    /// ```
    /// use skyarray::{idx, rx, Selection};
    /// let s = Selection::resolve(&[5, 4], &idx![rx(1, 2), ..]).unwrap();
    /// assert_eq!(s.dims(), [2, 4]);
    /// assert_eq!(s.offsets(), [4, 5, 6, 7, 8, 9, 10, 11]);
    /// let s = Selection::resolve(&[5, 4], &idx![vec![3, 0], 1]).unwrap();
    /// assert_eq!(s.dims(), [2]);
    /// assert_eq!(s.offsets(), [13, 1]);
    /// ```
    pub fn resolve(dims: &[usize], specs: &[AxisIndex]) -> Result<Self, ArrayError> {
        if specs.len() != dims.len() {
            return Err(ArrayError::RankMismatch {expected: dims.len(), found: specs.len()});
        }
        element_count(dims)?;
        let strides = row_major_strides(dims);
        let mut result_dims = Vec::new();
        let mut offsets = vec![0];
        for (axis, spec) in specs.iter().enumerate() {
            let positions = spec.positions(axis, dims[axis])?;
            if spec.keeps_axis() { result_dims.push(positions.len()); }
            let stride = strides[axis];
            offsets = offsets.iter().flat_map(|&base| {
                positions.iter().map(move |&p| base + p * stride)
            }).collect();
        }
        let element = !specs.iter().any(AxisIndex::keeps_axis);
        Ok(Self {dims: result_dims, offsets, element})
    }

    /// Resolve a single `spec` against a buffer of length `len`, ignoring
    /// the array's own axes.
    pub fn resolve_flat(len: usize, spec: &AxisIndex) -> Result<Self, ArrayError> {
        Self::resolve(&[len], std::slice::from_ref(spec))
    }

    /// Resolve `specs` against [`self.dims()`], and map the resulting offsets
    /// through [`self.offsets()`].
    ///
    /// [`self.dims()`]: Self::dims
    /// [`self.offsets()`]: Self::offsets
    pub fn select(&self, specs: &[AxisIndex]) -> Result<Self, ArrayError> {
        Ok(self.compose(Self::resolve(&self.dims, specs)?))
    }

    /// Like [`Self::select()`] but with [`Self::resolve_flat()`].
    pub fn select_flat(&self, spec: &AxisIndex) -> Result<Self, ArrayError> {
        Ok(self.compose(Self::resolve_flat(self.offsets.len(), spec)?))
    }

    fn compose(&self, inner: Self) -> Self {
        let offsets = inner.offsets.iter().map(|&o| self.offsets[o]).collect();
        Self {offsets, ..inner}
    }

    /// The axis extents of the result.
    pub fn dims(&self) -> &[usize] { &self.dims }

    /// The offsets of the selected elements, in row-major order of the
    /// result.
    pub fn offsets(&self) -> &[usize] { &self.offsets }

    pub fn len(&self) -> usize { self.offsets.len() }

    pub fn is_empty(&self) -> bool { self.offsets.is_empty() }

    /// Whether every axis was indexed by [`AxisIndex::Scalar`], so that
    /// the selection is a single element rather than a view.
    pub fn is_element(&self) -> bool { self.element }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) { (self.dims, self.offsets) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!(AxisIndex::Scalar(2).positions(0, 5), Ok(vec![2]));
        assert_eq!(AxisIndex::All.positions(0, 3), Ok(vec![0, 1, 2]));
        assert_eq!(rx(5, 2).positions(0, 7), Ok(vec![5, 4, 3, 2]));
        assert_eq!(rx(2, 5).positions(0, 7), Ok(vec![2, 3, 4, 5]));
        assert_eq!(rx(3, 3).positions(0, 7), Ok(vec![3]));
        assert_eq!(AxisIndex::from(vec![4, 1, 4]).positions(0, 5), Ok(vec![4, 1, 4]));
        assert_eq!(AxisIndex::span(2, 0).positions(0, 0), Ok(vec![]));
        assert_eq!(AxisIndex::span(2, 3), rx(2, 4));
    }

    #[test]
    fn out_of_range() {
        let e = ArrayError::IndexOutOfRange {index: 7, axis: 1, size: 7};
        assert_eq!(AxisIndex::Scalar(7).positions(1, 7), Err(e.clone()));
        assert_eq!(rx(7, 0).positions(1, 7), Err(e.clone()));
        assert_eq!(rx(0, 7).positions(1, 7), Err(e.clone()));
        assert_eq!(AxisIndex::from([0, 7]).positions(1, 7), Err(e));
    }

    #[test]
    fn result_shapes() {
        let dims = [5, 4];
        let shape = |specs: &[AxisIndex]| Selection::resolve(&dims, specs).unwrap().dims().to_vec();
        assert_eq!(shape(&idx![.., ..]), [5, 4]);
        assert_eq!(shape(&idx![.., 0]), [5]);
        assert_eq!(shape(&idx![0, ..]), [4]);
        assert_eq!(shape(&idx![rx(1, 2), rx(1, 3)]), [2, 3]);
        assert_eq!(shape(&idx![rx(1, 2), 0]), [2]);
        assert_eq!(shape(&idx![0, rx(1, 3)]), [3]);
        assert_eq!(shape(&idx![0, 3]), Vec::<usize>::new());
    }

    #[test]
    fn cartesian_order() {
        let s = Selection::resolve(&[3, 4], &idx![rx(2, 1), vec![3, 0, 3]]).unwrap();
        assert_eq!(s.dims(), [2, 3]);
        assert_eq!(s.offsets(), [11, 8, 11, 7, 4, 7]);
        assert!(!s.is_element());
    }

    #[test]
    fn element() {
        let s = Selection::resolve(&[3, 4, 2], &idx![2, 1, 1]).unwrap();
        assert!(s.is_element());
        assert_eq!(s.dims(), Vec::<usize>::new());
        assert_eq!(s.offsets(), [2 * 8 + 2 + 1]);
    }

    #[test]
    fn rank_mismatch() {
        assert_eq!(
            Selection::resolve(&[3, 4], &idx![1]),
            Err(ArrayError::RankMismatch {expected: 2, found: 1}),
        );
    }

    #[test]
    fn flat() {
        let s = Selection::resolve_flat(7, &rx(4, 6)).unwrap();
        assert_eq!(s.offsets(), [4, 5, 6]);
        assert!(Selection::resolve_flat(7, &AxisIndex::Scalar(7)).is_err());
    }

    #[test]
    fn chained() {
        let outer = Selection::resolve_flat(7, &rx(1, 4)).unwrap();
        let inner = outer.select_flat(&rx(1, 2)).unwrap();
        assert_eq!(inner.offsets(), [2, 3]);
        let outer = Selection::resolve(&[5, 4], &idx![.., rx(3, 1)]).unwrap();
        let inner = outer.select(&idx![vec![4, 0], 0]).unwrap();
        assert_eq!(inner.dims(), [2]);
        assert_eq!(inner.offsets(), [19, 3]);
        assert!(outer.select(&idx![5, 0]).is_err());
    }

    #[test]
    fn empty_axis() {
        let s = Selection::resolve(&[3, 0], &idx![.., ..]).unwrap();
        assert_eq!(s.dims(), [3, 0]);
        assert!(s.is_empty());
    }

    #[test]
    fn huge_dims() {
        let dims = [3, usize::MAX, 2];
        assert_eq!(
            Selection::resolve(&dims, &idx![0, 0, 0]),
            Err(ArrayError::Overflow {dims: dims.to_vec()}),
        );
    }

    #[test]
    fn span_past_end() {
        let s = AxisIndex::span(usize::MAX, 2);
        assert_eq!(s, rx(usize::MAX, usize::MAX));
        assert_eq!(
            s.positions(0, 4),
            Err(ArrayError::IndexOutOfRange {index: usize::MAX, axis: 0, size: 4}),
        );
    }

    #[test]
    #[should_panic]
    fn parts_length_checked() {
        Selection::from_parts(vec![2, 2], vec![0, 1, 2]);
    }
}
