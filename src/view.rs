use std::ops::{Deref, DerefMut, Index, IndexMut};

use super::{Array, ArrayError, AxisIndex, OrPanic, Selection, check_dims, flat_offset};

/// Implemented by types that behave like an array of `Self::T`s with axis
/// extents [`dims()`], but whose elements are computed on demand.
///
/// Elements are addressed by their position in row-major order, from `0` to
/// `len() - 1`. [`at()`] translates a multi-index into such a position.
///
/// ### Ownership
///
/// If `V` implements `View`, then so do `&V`, `Box<V>`, `Rc<V>` and all other
/// types that [`Deref`] to `V`.
///
/// ```
/// use skyarray::{Array, View};
/// let a: Array<u32> = Array::indgen([2, 3]);
/// let b = std::rc::Rc::new(a).map(|x| x * x).collect();
/// assert_eq!(b.dims(), [2, 3]);
/// assert_eq!(b.as_ref(), [0, 1, 4, 9, 16, 25]);
/// ```
///
/// [`dims()`]: Self::dims
/// [`at()`]: Self::at
pub trait View: Sized {
    /// The element type.
    type T: Clone;

    /// The axis extents, outermost first.
    fn dims(&self) -> &[usize];

    /// The number of elements.
    fn len(&self) -> usize { self.dims().iter().product() }

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn ndim(&self) -> usize { self.dims().len() }

    /// Compute the element at `position` in row-major order.
    fn at_flat(&self, position: usize) -> Self::T;

    /// Compute the element at `index`.
    ///
    /// Panics if `index` has the wrong length or is out of range.
    #[track_caller]
    fn at(&self, index: &[usize]) -> Self::T {
        self.at_flat(flat_offset(self.dims(), index).or_panic())
    }

    /// Apply `f` to every element in row-major order.
    fn each(&self, mut f: impl FnMut(Self::T)) {
        for position in 0..self.len() { f(self.at_flat(position)); }
    }

    /// The elements in row-major order.
    fn to_vec(&self) -> Vec<Self::T> {
        let mut items = Vec::with_capacity(self.len());
        self.each(|t| items.push(t));
        items
    }

    /// Materialises this `View` into an [`Array`] with the same `dims()`.
    ///
    /// This method guarantees to call [`Self::at_flat()`] exactly once for
    /// each position.
    fn collect(&self) -> Array<Self::T> {
        Array::new_inner(self.dims().to_vec(), self.to_vec().into())
    }

    /// Creates a `View` that applies `f` to the elements of `Self`.
    ///
    /// There is no guarantee that the elements will be passed to `f` in a
    /// particular order, only once, or at all.
    fn map<U: Clone, F>(self, f: F) -> Map<Self, F> where
        F: Fn(Self::T) -> U,
    {
        Map(self, f)
    }
}

impl<T: Deref> View for T where T::Target: View {
    type T = <T::Target as View>::T;
    #[inline(always)]
    fn dims(&self) -> &[usize] { (**self).dims() }
    #[inline(always)]
    fn len(&self) -> usize { (**self).len() }
    #[inline(always)]
    fn at_flat(&self, position: usize) -> Self::T { (**self).at_flat(position) }
}

// ----------------------------------------------------------------------------

/// A [`View`] that is backed by memory, and can therefore be written.
///
/// [`self.at_flat(position)`] must be equivalent to
/// `self.at_ref(position).clone()`. `self.at_ref(position)` must be
/// equivalent to `&*self.at_mut(position)`. Two positions may refer to the
/// same memory.
///
/// [`self.at_flat(position)`]: View::at_flat()
pub trait MemoryView: View {
    /// Borrow the element at `position`.
    fn at_ref(&self, position: usize) -> &Self::T;

    /// Mutably borrow the element at `position`.
    fn at_mut(&mut self, position: usize) -> &mut Self::T;

    /// Overwrite the elements of `self` with those of `src`, in row-major
    /// order. If two positions of `self` share memory, the later write wins.
    ///
    /// Panics if the `dims()` differ.
    #[track_caller]
    fn assign<V: View<T=Self::T>>(&mut self, src: &V) { self.try_assign(src).or_panic() }

    fn try_assign<V: View<T=Self::T>>(&mut self, src: &V) -> Result<(), ArrayError> {
        check_dims(self.dims(), src.dims())?;
        for position in 0..src.len() { *self.at_mut(position) = src.at_flat(position); }
        Ok(())
    }

    /// Overwrite every element with `value`.
    fn fill(&mut self, value: Self::T) {
        for position in 0..self.len() { *self.at_mut(position) = value.clone(); }
    }

    /// Call `f` on every element in row-major order, e.g. to implement `*=`.
    fn apply(&mut self, mut f: impl FnMut(&mut Self::T)) {
        for position in 0..self.len() { f(self.at_mut(position)); }
    }

    /// Call `f` on every element of `self` and the corresponding element of
    /// `other`, e.g. to implement `+=`.
    ///
    /// Panics if the `dims()` differ.
    #[track_caller]
    fn zip_apply<V: View>(&mut self, other: &V, f: impl FnMut(&mut Self::T, V::T)) {
        self.try_zip_apply(other, f).or_panic()
    }

    fn try_zip_apply<V: View>(
        &mut self,
        other: &V,
        mut f: impl FnMut(&mut Self::T, V::T),
    ) -> Result<(), ArrayError> {
        check_dims(self.dims(), other.dims())?;
        for position in 0..other.len() { f(self.at_mut(position), other.at_flat(position)); }
        Ok(())
    }

    /// Copy the elements selected by `src` to the elements selected by `dst`.
    /// Both selections index `self`. Every source element is read before any
    /// destination element is written, so the selections may overlap.
    ///
    /// ```
    /// use skyarray::{Array, MemoryView, idx, rx};
    /// let mut v = Array::from_vec(vec![0, 1, 2, 3, 4, 5, 6]);
    /// v.assign_within(&idx![rx(1, 6)], &idx![rx(0, 5)]);
    /// assert_eq!(v.as_ref(), [0, 0, 1, 2, 3, 4, 5]);
    /// ```
    #[track_caller]
    fn assign_within(&mut self, dst: &[AxisIndex], src: &[AxisIndex]) {
        self.try_assign_within(dst, src).or_panic()
    }

    fn try_assign_within(&mut self, dst: &[AxisIndex], src: &[AxisIndex]) -> Result<(), ArrayError> {
        let dst = Selection::resolve(self.dims(), dst)?;
        let src = Selection::resolve(self.dims(), src)?;
        copy_within(self, &dst, &src)
    }

    /// Like [`Self::assign_within()`] but each side is a single index into
    /// the row-major order of `self`.
    #[track_caller]
    fn assign_within_flat(&mut self, dst: impl Into<AxisIndex>, src: impl Into<AxisIndex>) {
        self.try_assign_within_flat(dst, src).or_panic()
    }

    fn try_assign_within_flat(
        &mut self,
        dst: impl Into<AxisIndex>,
        src: impl Into<AxisIndex>,
    ) -> Result<(), ArrayError> {
        let dst = Selection::resolve_flat(self.len(), &dst.into())?;
        let src = Selection::resolve_flat(self.len(), &src.into())?;
        copy_within(self, &dst, &src)
    }
}

fn copy_within<M: MemoryView>(m: &mut M, dst: &Selection, src: &Selection) -> Result<(), ArrayError> {
    check_dims(dst.dims(), src.dims())?;
    let values: Vec<M::T> = src.offsets().iter().map(|&p| m.at_flat(p)).collect();
    tracing::trace!("copied {} source elements before assigning within one array", values.len());
    for (&p, value) in dst.offsets().iter().zip(values) { *m.at_mut(p) = value; }
    Ok(())
}

impl<T: DerefMut> MemoryView for T where <T as Deref>::Target: MemoryView {
    #[inline(always)]
    fn at_ref(&self, position: usize) -> &Self::T { (**self).at_ref(position) }
    #[inline(always)]
    fn at_mut(&mut self, position: usize) -> &mut Self::T { (**self).at_mut(position) }
}

// ----------------------------------------------------------------------------

/// A read-only view of some elements of an [`Array`], selected by
/// [`Array::view()`] or similar. It borrows the `Array` and copies nothing.
#[derive(Debug, Clone)]
pub struct ArrayView<'a, T> {
    source: &'a [T],
    selection: Selection,
}

impl<'a, T> ArrayView<'a, T> {
    pub(crate) fn new(source: &'a [T], selection: Selection) -> Self {
        Self {source, selection}
    }

    pub fn dims(&self) -> &[usize] { self.selection.dims() }

    pub fn len(&self) -> usize { self.selection.len() }

    pub fn is_empty(&self) -> bool { self.selection.is_empty() }

    /// The positions in the underlying `Array` of the elements of `self`.
    pub fn offsets(&self) -> &[usize] { self.selection.offsets() }

    /// The element at `position` in row-major order.
    pub fn get(&self, position: usize) -> Option<&'a T> {
        let source = self.source;
        self.selection.offsets().get(position).map(|&offset| &source[offset])
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item=&'a T> + '_ {
        let source = self.source;
        self.selection.offsets().iter().map(move |&offset| &source[offset])
    }

    /// Select some elements of `self`. The result borrows the same `Array`.
    ///
    /// ```
    /// use skyarray::{Array, View, idx, rx};
    /// let v: Array<i32> = Array::indgen([7]);
    /// let outer = v.view(&idx![rx(1, 4)]);
    /// assert_eq!(outer.view(&idx![rx(1, 2)]).to_vec(), [2, 3]);
    /// ```
    #[track_caller]
    pub fn view(&self, specs: &[AxisIndex]) -> ArrayView<'a, T> { self.try_view(specs).or_panic() }

    pub fn try_view(&self, specs: &[AxisIndex]) -> Result<ArrayView<'a, T>, ArrayError> {
        Ok(ArrayView::new(self.source, self.selection.select(specs)?))
    }

    /// Select some elements of `self` by their row-major positions.
    #[track_caller]
    pub fn flat(&self, spec: impl Into<AxisIndex>) -> ArrayView<'a, T> { self.try_flat(spec).or_panic() }

    pub fn try_flat(&self, spec: impl Into<AxisIndex>) -> Result<ArrayView<'a, T>, ArrayError> {
        Ok(ArrayView::new(self.source, self.selection.select_flat(&spec.into())?))
    }

    /// Like [`Self::view()`] but returns an element if every spec is a
    /// `Scalar`.
    #[track_caller]
    pub fn select(&self, specs: &[AxisIndex]) -> Selected<'a, T> { self.try_select(specs).or_panic() }

    pub fn try_select(&self, specs: &[AxisIndex]) -> Result<Selected<'a, T>, ArrayError> {
        Ok(Selected::project(self.source, self.selection.select(specs)?))
    }
}

impl<'a, T: Clone> View for ArrayView<'a, T> {
    type T = T;
    #[inline(always)]
    fn dims(&self) -> &[usize] { self.selection.dims() }
    #[inline(always)]
    fn len(&self) -> usize { self.selection.len() }
    #[inline(always)]
    fn at_flat(&self, position: usize) -> T { self.source[self.selection.offsets()[position]].clone() }
}

impl<'a, T, const N: usize> Index<[usize; N]> for ArrayView<'a, T> {
    type Output = T;
    #[track_caller]
    fn index(&self, index: [usize; N]) -> &T {
        let position = flat_offset(self.dims(), &index).or_panic();
        &self.source[self.selection.offsets()[position]]
    }
}

// ----------------------------------------------------------------------------

/// A writable view of some elements of an [`Array`], selected by
/// [`Array::view_mut()`] or similar. Writes go straight to the `Array`.
///
/// ```
/// use skyarray::{MemoryView, idx, rx};
/// let mut tu = skyarray::array![[5, 8], [4, 5], [1, 2]];
/// tu.view_mut(&idx![rx(1, 2), rx(0, 1)]).assign(&skyarray::array![[1, 2], [3, 4]]);
/// assert_eq!(tu.as_ref(), [5, 8, 1, 2, 3, 4]);
/// ```
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    source: &'a mut [T],
    selection: Selection,
}

impl<'a, T> ArrayViewMut<'a, T> {
    pub(crate) fn new(source: &'a mut [T], selection: Selection) -> Self {
        Self {source, selection}
    }

    pub fn dims(&self) -> &[usize] { self.selection.dims() }

    pub fn len(&self) -> usize { self.selection.len() }

    pub fn is_empty(&self) -> bool { self.selection.is_empty() }

    pub fn offsets(&self) -> &[usize] { self.selection.offsets() }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.selection.offsets().get(position).map(|&offset| &self.source[offset])
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        let offset = *self.selection.offsets().get(position)?;
        Some(&mut self.source[offset])
    }

    pub fn iter(&self) -> impl Iterator<Item=&T> + '_ {
        self.selection.offsets().iter().map(move |&offset| &self.source[offset])
    }

    /// Downgrade to a read-only view of the same elements.
    pub fn into_view(self) -> ArrayView<'a, T> { ArrayView::new(self.source, self.selection) }

    #[track_caller]
    pub fn view(&self, specs: &[AxisIndex]) -> ArrayView<'_, T> { self.try_view(specs).or_panic() }

    pub fn try_view(&self, specs: &[AxisIndex]) -> Result<ArrayView<'_, T>, ArrayError> {
        Ok(ArrayView::new(&*self.source, self.selection.select(specs)?))
    }

    #[track_caller]
    pub fn view_mut(&mut self, specs: &[AxisIndex]) -> ArrayViewMut<'_, T> {
        self.try_view_mut(specs).or_panic()
    }

    pub fn try_view_mut(&mut self, specs: &[AxisIndex]) -> Result<ArrayViewMut<'_, T>, ArrayError> {
        let selection = self.selection.select(specs)?;
        Ok(ArrayViewMut::new(&mut *self.source, selection))
    }

    #[track_caller]
    pub fn flat(&self, spec: impl Into<AxisIndex>) -> ArrayView<'_, T> { self.try_flat(spec).or_panic() }

    pub fn try_flat(&self, spec: impl Into<AxisIndex>) -> Result<ArrayView<'_, T>, ArrayError> {
        Ok(ArrayView::new(&*self.source, self.selection.select_flat(&spec.into())?))
    }

    #[track_caller]
    pub fn flat_mut(&mut self, spec: impl Into<AxisIndex>) -> ArrayViewMut<'_, T> {
        self.try_flat_mut(spec).or_panic()
    }

    pub fn try_flat_mut(&mut self, spec: impl Into<AxisIndex>) -> Result<ArrayViewMut<'_, T>, ArrayError> {
        let selection = self.selection.select_flat(&spec.into())?;
        Ok(ArrayViewMut::new(&mut *self.source, selection))
    }
}

impl<'a, T: Clone> View for ArrayViewMut<'a, T> {
    type T = T;
    #[inline(always)]
    fn dims(&self) -> &[usize] { self.selection.dims() }
    #[inline(always)]
    fn len(&self) -> usize { self.selection.len() }
    #[inline(always)]
    fn at_flat(&self, position: usize) -> T { self.source[self.selection.offsets()[position]].clone() }
}

impl<'a, T: Clone> MemoryView for ArrayViewMut<'a, T> {
    #[inline(always)]
    fn at_ref(&self, position: usize) -> &T { &self.source[self.selection.offsets()[position]] }
    #[inline(always)]
    fn at_mut(&mut self, position: usize) -> &mut T { &mut self.source[self.selection.offsets()[position]] }
}

impl<'a, T, const N: usize> Index<[usize; N]> for ArrayViewMut<'a, T> {
    type Output = T;
    #[track_caller]
    fn index(&self, index: [usize; N]) -> &T {
        let position = flat_offset(self.dims(), &index).or_panic();
        &self.source[self.selection.offsets()[position]]
    }
}

impl<'a, T, const N: usize> IndexMut<[usize; N]> for ArrayViewMut<'a, T> {
    #[track_caller]
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        let position = flat_offset(self.dims(), &index).or_panic();
        &mut self.source[self.selection.offsets()[position]]
    }
}

// ----------------------------------------------------------------------------

/// The return type of [`Array::select()`]: a single element if every axis
/// was indexed by a `Scalar`, otherwise a view.
#[derive(Debug, Clone)]
pub enum Selected<'a, T> {
    Element(&'a T),
    View(ArrayView<'a, T>),
}

impl<'a, T> Selected<'a, T> {
    fn project(source: &'a [T], selection: Selection) -> Self {
        if selection.is_element() {
            Self::Element(&source[selection.offsets()[0]])
        } else {
            Self::View(ArrayView::new(source, selection))
        }
    }

    pub fn element(self) -> Option<&'a T> {
        match self { Self::Element(t) => Some(t), Self::View(_) => None }
    }

    pub fn into_view(self) -> Option<ArrayView<'a, T>> {
        match self { Self::Element(_) => None, Self::View(v) => Some(v) }
    }
}

/// The return type of [`Array::select_mut()`].
#[derive(Debug)]
pub enum SelectedMut<'a, T> {
    Element(&'a mut T),
    View(ArrayViewMut<'a, T>),
}

impl<'a, T> SelectedMut<'a, T> {
    fn project(source: &'a mut [T], selection: Selection) -> Self {
        if selection.is_element() {
            Self::Element(&mut source[selection.offsets()[0]])
        } else {
            Self::View(ArrayViewMut::new(source, selection))
        }
    }

    pub fn element(self) -> Option<&'a mut T> {
        match self { Self::Element(t) => Some(t), Self::View(_) => None }
    }

    pub fn into_view(self) -> Option<ArrayViewMut<'a, T>> {
        match self { Self::Element(_) => None, Self::View(v) => Some(v) }
    }
}

// ----------------------------------------------------------------------------

impl<T> Array<T> {
    /// Index `self` with one [`AxisIndex`] per axis.
    ///
    /// ```
    /// use skyarray::{Array, Selected, idx};
    /// let a: Array<i32> = Array::indgen([5, 4]);
    /// assert!(matches!(a.select(&idx![3, 2]), Selected::Element(&14)));
    /// let row = a.select(&idx![3, ..]).into_view().unwrap();
    /// assert_eq!(row.dims(), [4]);
    /// ```
    #[track_caller]
    pub fn select(&self, specs: &[AxisIndex]) -> Selected<'_, T> { self.try_select(specs).or_panic() }

    pub fn try_select(&self, specs: &[AxisIndex]) -> Result<Selected<'_, T>, ArrayError> {
        let selection = Selection::resolve(self.dims(), specs)?;
        Ok(Selected::project(self.as_ref(), selection))
    }

    #[track_caller]
    pub fn select_mut(&mut self, specs: &[AxisIndex]) -> SelectedMut<'_, T> {
        self.try_select_mut(specs).or_panic()
    }

    pub fn try_select_mut(&mut self, specs: &[AxisIndex]) -> Result<SelectedMut<'_, T>, ArrayError> {
        let selection = Selection::resolve(self.dims(), specs)?;
        Ok(SelectedMut::project(self.as_mut(), selection))
    }

    /// Like [`Self::select()`] but always returns a view, with no axes if
    /// every spec is a `Scalar`.
    ///
    /// ```
    /// use skyarray::{Array, View, idx, rx};
    /// let v = skyarray::array![[4, 5, 6, 7], [8, 9, 5, 2], [7, 8, 2, 0]];
    /// assert_eq!(v.view(&idx![.., 0]).to_vec(), [4, 8, 7]);
    /// assert_eq!(v.view(&idx![rx(1, 2), rx(1, 3)]).to_vec(), [9, 5, 2, 8, 2, 0]);
    /// assert!(v.view(&idx![1, 1]).dims().is_empty());
    /// ```
    #[track_caller]
    pub fn view(&self, specs: &[AxisIndex]) -> ArrayView<'_, T> { self.try_view(specs).or_panic() }

    pub fn try_view(&self, specs: &[AxisIndex]) -> Result<ArrayView<'_, T>, ArrayError> {
        let selection = Selection::resolve(self.dims(), specs)?;
        Ok(ArrayView::new(self.as_ref(), selection))
    }

    #[track_caller]
    pub fn view_mut(&mut self, specs: &[AxisIndex]) -> ArrayViewMut<'_, T> {
        self.try_view_mut(specs).or_panic()
    }

    pub fn try_view_mut(&mut self, specs: &[AxisIndex]) -> Result<ArrayViewMut<'_, T>, ArrayError> {
        let selection = Selection::resolve(self.dims(), specs)?;
        Ok(ArrayViewMut::new(self.as_mut(), selection))
    }

    /// Index the elements of `self` by their row-major positions, ignoring
    /// the axes.
    #[track_caller]
    pub fn flat(&self, spec: impl Into<AxisIndex>) -> ArrayView<'_, T> { self.try_flat(spec).or_panic() }

    pub fn try_flat(&self, spec: impl Into<AxisIndex>) -> Result<ArrayView<'_, T>, ArrayError> {
        let selection = Selection::resolve_flat(self.len(), &spec.into())?;
        Ok(ArrayView::new(self.as_ref(), selection))
    }

    #[track_caller]
    pub fn flat_mut(&mut self, spec: impl Into<AxisIndex>) -> ArrayViewMut<'_, T> {
        self.try_flat_mut(spec).or_panic()
    }

    pub fn try_flat_mut(&mut self, spec: impl Into<AxisIndex>) -> Result<ArrayViewMut<'_, T>, ArrayError> {
        let selection = Selection::resolve_flat(self.len(), &spec.into())?;
        Ok(ArrayViewMut::new(self.as_mut(), selection))
    }
}

// ----------------------------------------------------------------------------

/// The return type of [`View::map()`].
#[derive(Debug, Copy, Clone)]
pub struct Map<V, F>(V, F);

impl<V: View, U: Clone, F: Fn(V::T) -> U> View for Map<V, F> {
    type T = U;
    #[inline(always)]
    fn dims(&self) -> &[usize] { self.0.dims() }
    #[inline(always)]
    fn len(&self) -> usize { self.0.len() }
    #[inline(always)]
    fn at_flat(&self, position: usize) -> Self::T { (self.1)(self.0.at_flat(position)) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{array, idx, rx};

    fn seven() -> Array<i32> { Array::from_vec(vec![0, 1, 2, 3, 4, 5, 6]) }

    #[test]
    fn ordered_assignment() {
        let mut v = seven();
        v.flat_mut(vec![5, 4, 3, 2]).assign(&Array::from_vec(vec![0, 1, 2, 3]));
        assert_eq!(v.as_ref(), [0, 1, 3, 2, 1, 0, 6]);
        v.assign_within_flat(vec![4, 5, 6], vec![2, 1, 0]);
        assert_eq!(v.as_ref(), [0, 1, 3, 2, 3, 1, 0]);
    }

    #[test]
    fn compound_assignment() {
        let mut v = Array::from_vec(vec![0, 1, 3, 2, 3, 1, 0]);
        v.flat_mut(rx(2, 5)).apply(|x| *x *= 2);
        assert_eq!(v.as_ref(), [0, 1, 6, 4, 6, 2, 0]);
        v.flat_mut(rx(5, 2)).zip_apply(&Array::<i32>::indgen([4]), |x, y| *x += y);
        assert_eq!(v.as_ref(), [0, 1, 9, 6, 7, 2, 0]);
    }

    #[test]
    fn overlapping_shift() {
        let mut v = seven();
        v.assign_within_flat(rx(0, 5), rx(1, 6));
        assert_eq!(v.as_ref(), [1, 2, 3, 4, 5, 6, 6]);
        let mut m: Array<i32> = Array::indgen([3, 3]);
        m.assign_within(&idx![.., ..], &idx![.., rx(2, 0)]);
        assert_eq!(m.as_ref(), [2, 1, 0, 5, 4, 3, 8, 7, 6]);
    }

    #[test]
    fn repeated_destination() {
        let mut v = seven();
        v.flat_mut(vec![1, 1]).assign(&Array::from_vec(vec![7, 8]));
        assert_eq!(v[[1]], 8);
    }

    #[test]
    fn matrix_views() {
        let v = array![[4, 5, 6, 7], [8, 9, 5, 2], [7, 8, 2, 0], [-1, -5, -6, -7], [-4, 1, -2, 5]];
        assert_eq!(v.view(&idx![.., ..]).dims(), [5, 4]);
        assert_eq!(v.view(&idx![.., 0]).to_vec(), [4, 8, 7, -1, -4]);
        assert_eq!(v.view(&idx![0, ..]).to_vec(), [4, 5, 6, 7]);
        let w = v.view(&idx![rx(1, 2), rx(1, 3)]);
        assert_eq!(w.dims(), [2, 3]);
        assert_eq!(w[[1, 2]], 0);
        assert_eq!(w.at(&[0, 0]), 9);
        assert_eq!(v.view(&idx![rx(1, 2), 0]).to_vec(), [8, 7]);
        assert_eq!(v.view(&idx![0, rx(1, 3)]).to_vec(), [5, 6, 7]);
        assert_eq!(v.select(&idx![3, 2]).element(), Some(&-6));
    }

    #[test]
    fn chained_views_alias() {
        let mut v = seven();
        {
            let mut outer = v.flat_mut(rx(1, 4));
            let mut inner = outer.flat_mut(rx(1, 2));
            inner.fill(-1);
        }
        assert_eq!(v.as_ref(), [0, 1, -1, -1, 4, 5, 6]);
        let mut m: Array<i32> = Array::indgen([5, 4]);
        m.view_mut(&idx![.., rx(3, 1)]).view_mut(&idx![vec![4, 0], 0])[[1]] = 100;
        assert_eq!(m[[0, 3]], 100);
        let read = m.view(&idx![rx(0, 1), ..]).view(&idx![0, ..]);
        assert_eq!(read.to_vec(), [0, 1, 2, 100]);
    }

    #[test]
    fn bool_elements() {
        let mut mask = Array::from_elem([2, 3], false);
        if let SelectedMut::Element(b) = mask.select_mut(&idx![1, 2]) { *b = true; }
        *mask.flat_mut(0).get_mut(0).unwrap() = true;
        assert_eq!(mask.as_ref(), [true, false, false, false, false, true]);
        assert!(mask.select_mut(&idx![1, ..]).element().is_none());
    }

    #[test]
    fn shape_mismatch() {
        let mut v = seven();
        assert_eq!(
            v.flat_mut(rx(0, 2)).try_assign(&Array::from_vec(vec![1, 2])),
            Err(ArrayError::ShapeMismatch {expected: vec![3], found: vec![2]}),
        );
        assert!(v.try_view(&idx![7]).is_err());
        assert!(v.try_flat(vec![0, 9]).is_err());
        assert_eq!(
            v.try_assign_within_flat(rx(0, 1), rx(0, 2)),
            Err(ArrayError::ShapeMismatch {expected: vec![2], found: vec![3]}),
        );
        assert!(v.try_assign_within_flat(7, 0).is_err());
        assert_eq!(v.as_ref(), seven().as_ref());
        let mut outer = v.flat_mut(rx(1, 4));
        assert!(outer.try_flat(4).is_err());
        assert_eq!(
            outer.try_flat_mut(rx(0, 4)).err(),
            Some(ArrayError::IndexOutOfRange {index: 4, axis: 0, size: 4}),
        );
        assert_eq!(outer.try_flat(rx(3, 2)).map(|w| w.to_vec()), Ok(vec![4, 3]));
        outer.try_flat_mut(0).unwrap().fill(-1);
        assert_eq!(v[[1]], -1);
    }

    #[test]
    fn through_references() {
        fn total<V: View<T = i32>>(v: V) -> i32 { v.to_vec().iter().sum() }
        let v = seven();
        assert_eq!(total(&v), 21);
        assert_eq!(total(Box::new(v.flat(rx(1, 3)))), 6);
    }

    #[test]
    fn map_and_collect() {
        let v: Array<u8> = Array::indgen([2, 2]);
        let doubled = v.view(&idx![.., 1]).map(|x| u32::from(x) * 2).collect();
        assert_eq!(doubled.dims(), [2]);
        assert_eq!(doubled.as_ref(), [2, 6]);
        let mut total = 0;
        v.each(|x| total += x);
        assert_eq!(total, 6);
    }

    proptest! {
        #[test]
        fn writes_alias_source(
            len in 1usize..20,
            picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..10),
        ) {
            let list: Vec<usize> = picks.iter().map(|p| p.index(len)).collect();
            let mut a: Array<usize> = Array::zeros([len]);
            a.flat_mut(list.clone()).fill(1);
            for (p, &x) in a.iter().enumerate() {
                prop_assert_eq!(x == 1, list.contains(&p));
            }
        }

        #[test]
        fn view_reads_source(rows in 1usize..6, cols in 1usize..6, r in 0usize..6, c in 0usize..6) {
            let a: Array<usize> = Array::indgen([rows, cols]);
            let (r, c) = (r % rows, c % cols);
            let row = a.view(&idx![r, ..]);
            prop_assert_eq!(row.to_vec(), a.as_ref()[r * cols..(r + 1) * cols].to_vec());
            prop_assert_eq!(a.view(&idx![.., c]).at_flat(r), a[[r, c]]);
        }
    }
}
