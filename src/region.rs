//! Border and region manipulation of two-axis images.
//!
//! Images are [`Array`]s with axes `[y, x]`, i.e. `dims()` is
//! `[height, width]`. Region coordinates are signed and may lie partly or
//! wholly outside the image.

use super::{Array, ArrayError, AxisIndex, MemoryView, OrPanic, Selection, View};

fn image_dims(dims: &[usize]) -> Result<[usize; 2], ArrayError> {
    match *dims {
        [h, w] => Ok([h, w]),
        ref dims => Err(ArrayError::RankMismatch {expected: 2, found: dims.len()}),
    }
}

/// Adds a border of `pad` pixels set to `fill` on each of the four sides of
/// `image`. A negative `pad` removes `-pad` pixels from each side instead.
///
/// Panics if `image` does not have two axes, or if it would be cropped to
/// nothing. See [`try_enlarge()`].
///
/// ```
/// use skyarray::{Array, region::enlarge};
/// let v: Array<i32> = Array::indgen([2, 2]);
/// let e = enlarge(&v, 1, -1);
/// assert_eq!(e, skyarray::array![
///     [-1, -1, -1, -1],
///     [-1,  0,  1, -1],
///     [-1,  2,  3, -1],
///     [-1, -1, -1, -1],
/// ]);
/// assert_eq!(enlarge(&e, -1, 0), v);
/// ```
#[track_caller]
pub fn enlarge<T: Clone>(image: &Array<T>, pad: isize, fill: T) -> Array<T> {
    try_enlarge(image, pad, fill).or_panic()
}

pub fn try_enlarge<T: Clone>(image: &Array<T>, pad: isize, fill: T) -> Result<Array<T>, ArrayError> {
    let [h, w] = image_dims(image.dims())?;
    let p = pad.unsigned_abs();
    if pad >= 0 {
        let twice = p.checked_mul(2);
        let grown = twice.and_then(|t| h.checked_add(t).zip(w.checked_add(t)));
        let (gh, gw) = grown.ok_or_else(|| ArrayError::Overflow {dims: vec![h, w]})?;
        let mut result = Array::try_from_elem([gh, gw], fill)?;
        result.try_view_mut(&[AxisIndex::span(p, h), AxisIndex::span(p, w)])?.try_assign(image)?;
        Ok(result)
    } else {
        // Both sides must leave at least one pixel: `2 * p < extent`.
        if p >= h - h / 2 || p >= w - w / 2 {
            return Err(ArrayError::DegenerateCrop {pad: p, dims: vec![h, w]});
        }
        tracing::debug!("cropping {} pixels from each side of a {}x{} image", p, h, w);
        let inner = [AxisIndex::span(p, h - 2 * p), AxisIndex::span(p, w - 2 * p)];
        Ok(image.try_view(&inner)?.collect())
    }
}

// ----------------------------------------------------------------------------

/// Where the overlap of a region and an image lies in each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionIndices {
    /// The `[height, width]` of the whole region.
    pub dims: [usize; 2],

    /// Row-major positions of the overlap in the image.
    pub source: Vec<usize>,

    /// Row-major positions of the overlap in the region, in the same order
    /// as `source`.
    pub target: Vec<usize>,
}

/// The extent of the inclusive coordinate range `lo..=hi`.
fn region_len(lo: isize, hi: isize) -> Option<usize> {
    usize::try_from(hi as i128 - lo as i128 + 1).ok()
}

/// The overlap of `lo..=hi` with `0..extent`, as a span of the image axis
/// and a span of the region axis.
fn clip(lo: isize, hi: isize, extent: usize) -> (AxisIndex, AxisIndex) {
    let (lo, hi, extent) = (lo as i128, hi as i128, extent as i128);
    let start = lo.max(0);
    let end = hi.min(extent - 1);
    if start > end {
        return (AxisIndex::span(0, 0), AxisIndex::span(0, 0));
    }
    let len = (end - start + 1) as usize;
    (AxisIndex::span(start as usize, len), AxisIndex::span((start - lo) as usize, len))
}

/// Locates `region = [x0, y0, x1, y1]` (inclusive corners) relative to an
/// image with `dims`. Returns `None` if the region is degenerate, i.e.
/// `x0 > x1`, `y0 > y1`, or it starts beyond the right or bottom edge.
///
/// ```
/// use skyarray::region::subregion_indices;
/// let r = subregion_indices(&[5, 5], [-1, 1, 5, 3]).unwrap();
/// assert_eq!(r.dims, [3, 7]);
/// assert_eq!(r.source[..5], [5, 6, 7, 8, 9]);
/// assert_eq!(r.target[..5], [1, 2, 3, 4, 5]);
/// assert!(subregion_indices(&[5, 5], [5, 0, 6, 1]).is_none());
/// ```
#[track_caller]
pub fn subregion_indices(dims: &[usize], region: [isize; 4]) -> Option<RegionIndices> {
    try_subregion_indices(dims, region).or_panic()
}

pub fn try_subregion_indices(
    dims: &[usize],
    region: [isize; 4],
) -> Result<Option<RegionIndices>, ArrayError> {
    let [h, w] = image_dims(dims)?;
    let [x0, y0, x1, y1] = region;
    if x0 > x1 || y0 > y1 || x0 as i128 >= w as i128 || y0 as i128 >= h as i128 {
        return Ok(None);
    }
    let region_dims = region_len(y0, y1).zip(region_len(x0, x1));
    let (ny, nx) = region_dims.ok_or_else(|| ArrayError::Overflow {dims: vec![h, w]})?;
    let (source_y, target_y) = clip(y0, y1, h);
    let (source_x, target_x) = clip(x0, x1, w);
    let (_, source) = Selection::resolve(&[h, w], &[source_y, source_x])?.into_parts();
    let (_, target) = Selection::resolve(&[ny, nx], &[target_y, target_x])?.into_parts();
    Ok(Some(RegionIndices {dims: [ny, nx], source, target}))
}

/// Extracts `region = [x0, y0, x1, y1]` (inclusive corners) of `image`.
/// Pixels of the region that lie outside the image are set to `fill`.
///
/// A degenerate region (see [`subregion_indices()`]) gives an array of
/// dims `[0, 0]`.
///
/// Panics only if `image` does not have two axes.
///
/// ```
/// use skyarray::{Array, array, region::subregion};
/// let v: Array<i32> = Array::indgen([5, 5]);
/// assert_eq!(subregion(&v, [-1, 1, 5, 3], 0), array![
///     [0,  5,  6,  7,  8,  9, 0],
///     [0, 10, 11, 12, 13, 14, 0],
///     [0, 15, 16, 17, 18, 19, 0],
/// ]);
/// ```
#[track_caller]
pub fn subregion<T: Clone>(image: &Array<T>, region: [isize; 4], fill: T) -> Array<T> {
    try_subregion(image, region, fill).or_panic()
}

pub fn try_subregion<T: Clone>(
    image: &Array<T>,
    region: [isize; 4],
    fill: T,
) -> Result<Array<T>, ArrayError> {
    let Some(indices) = try_subregion_indices(image.dims(), region)? else {
        tracing::debug!("degenerate region {:?}, returning an empty image", region);
        return Array::try_from_elem([0, 0], fill);
    };
    if indices.source.is_empty() {
        tracing::debug!("region {:?} does not overlap the image", region);
    }
    let mut result = Array::try_from_elem(indices.dims, fill)?;
    result.try_flat_mut(indices.target)?.try_assign(&image.try_flat(indices.source)?)?;
    Ok(result)
}

// ----------------------------------------------------------------------------

/// A `[height, width]` image whose pixels give the fraction of their four
/// corners that lie within `radius` of `center = [cy, cx]`. Pixel `[y, x]`
/// has corners `(x ± 0.5, y ± 0.5)`.
///
/// `dims` may be empty (both axes `radius` pixels long), a single extent
/// (a square), or `[height, width]`.
///
/// ```
/// use skyarray::region::circular_mask;
/// let m = circular_mask(&[51, 51], [25.0, 25.0], 8.0);
/// assert_eq!(m[[25, 25]], 1.0);
/// assert_eq!(m[[25, 33]], 0.5);
/// assert_eq!(m[[0, 0]], 0.0);
/// ```
#[track_caller]
pub fn circular_mask(dims: &[usize], center: [f64; 2], radius: f64) -> Array<f64> {
    try_circular_mask(dims, center, radius).or_panic()
}

pub fn try_circular_mask(dims: &[usize], center: [f64; 2], radius: f64) -> Result<Array<f64>, ArrayError> {
    let dims = match *dims {
        [] => [radius as usize; 2],
        [n] => [n, n],
        [h, w] => [h, w],
        ref dims => return Err(ArrayError::RankMismatch {expected: 2, found: dims.len()}),
    };
    let [cy, cx] = center;
    let r2 = radius * radius;
    let inside = |x: f64, y: f64| (x - cx).powi(2) + (y - cy).powi(2) <= r2;
    Array::try_from_fn(dims, |index| {
        let (y, x) = (index[0] as f64, index[1] as f64);
        let corners = [(x - 0.5, y - 0.5), (x + 0.5, y - 0.5), (x + 0.5, y + 0.5), (x - 0.5, y + 0.5)];
        corners.iter().filter(|&&(x, y)| inside(x, y)).count() as f64 / 4.0
    })
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::array;

    fn grid() -> Array<i32> { Array::indgen([5, 5]) }

    #[test]
    fn enlarge_border() {
        let v = Array::from_elem([5, 5], 2.5);
        let e = enlarge(&v, 5, 1.0);
        assert_eq!(e.dims(), [15, 15]);
        assert_eq!(e[[0, 0]], 1.0);
        assert_eq!(e[[5, 5]], 2.5);
        assert_eq!(e[[9, 9]], 2.5);
        assert_eq!(e[[10, 9]], 1.0);
        assert_eq!(e.iter().filter(|&&x| x == 2.5).count(), 25);
    }

    #[test]
    fn enlarge_crop() {
        assert_eq!(enlarge(&grid(), -1, 0), array![[6, 7, 8], [11, 12, 13], [16, 17, 18]]);
        let tall: Array<u8> = Array::zeros([4, 5]);
        assert_eq!(
            try_enlarge(&tall, -2, 0),
            Err(ArrayError::DegenerateCrop {pad: 2, dims: vec![4, 5]}),
        );
        assert_eq!(try_enlarge(&tall, -1, 0).map(|a| a.dims().to_vec()), Ok(vec![2, 3]));
        let square: Array<u8> = Array::zeros([4, 4]);
        assert_eq!(
            try_enlarge(&square, isize::MIN, 0),
            Err(ArrayError::DegenerateCrop {pad: isize::MIN.unsigned_abs(), dims: vec![4, 4]}),
        );
        let odd: Array<u8> = Array::zeros([5, 3]);
        assert_eq!(try_enlarge(&odd, -1, 0).map(|a| a.dims().to_vec()), Ok(vec![3, 1]));
        assert_eq!(
            try_enlarge(&Array::from_vec(vec![1, 2]), 1, 0),
            Err(ArrayError::RankMismatch {expected: 2, found: 1}),
        );
    }

    #[test]
    fn subregion_whole_and_inner() {
        assert_eq!(subregion(&grid(), [0, 0, 4, 4], 0), grid());
        assert_eq!(subregion(&grid(), [1, 0, 3, 4], 0), array![
            [1, 2, 3], [6, 7, 8], [11, 12, 13], [16, 17, 18], [21, 22, 23],
        ]);
    }

    #[test]
    fn subregion_degenerate() {
        for region in [[5, 0, 6, 1], [0, 5, 1, 6], [3, 0, 2, 1], [0, 3, 1, 2]] {
            assert_eq!(subregion(&grid(), region, 0).dims(), [0, 0]);
        }
    }

    #[test]
    fn subregion_outside() {
        let s = subregion(&grid(), [-3, 0, -1, 1], 7);
        assert_eq!(s, Array::from_elem([2, 3], 7));
        let s = subregion(&grid(), [1, -4, 2, -2], 7);
        assert_eq!(s, Array::from_elem([3, 2], 7));
    }

    #[test]
    fn subregion_clips_each_axis() {
        let wide: Array<i32> = Array::indgen([2, 5]);
        assert_eq!(subregion(&wide, [3, 0, 5, 3], -1), array![
            [3, 4, -1], [8, 9, -1], [-1, -1, -1], [-1, -1, -1],
        ]);
        let tall: Array<i32> = Array::indgen([5, 2]);
        assert_eq!(subregion(&tall, [1, 3, 2, 4], -1), array![[7, -1], [9, -1]]);
    }

    #[test]
    fn mask_values() {
        let m = circular_mask(&[51, 51], [25.0, 25.0], 8.0);
        assert_eq!(m.dims(), [51, 51]);
        assert!(m.iter().all(|&x| [0.0, 0.25, 0.5, 0.75, 1.0].contains(&x)));
        assert_eq!(m[[17, 25]], 0.5);
        assert_eq!(m[[25, 17]], 0.5);
        assert_eq!(circular_mask(&[], [0.0, 0.0], 3.0).dims(), [3, 3]);
        assert_eq!(circular_mask(&[4], [0.0, 0.0], 3.0).dims(), [4, 4]);
        assert_eq!(circular_mask(&[4, 6], [0.0, 0.0], 3.0).dims(), [4, 6]);
        assert!(try_circular_mask(&[1, 2, 3], [0.0, 0.0], 1.0).is_err());
    }

    #[test]
    fn mask_boundary_band() {
        let m = circular_mask(&[21], [10.0, 10.0], 8.0);
        for y in 0..21 { for x in 0..21 {
            let d = ((y as f64 - 10.0).powi(2) + (x as f64 - 10.0).powi(2)).sqrt();
            if d + 0.75 < 8.0 { assert_eq!(m[[y, x]], 1.0); }
            if d - 0.75 > 8.0 { assert_eq!(m[[y, x]], 0.0); }
        } }
    }

    proptest! {
        #[test]
        fn enlarge_round_trip(h in 1usize..8, w in 1usize..8, pad in 0isize..4) {
            let v: Array<u32> = Array::indgen([h, w]);
            prop_assert_eq!(enlarge(&v, 0, 99), v.clone());
            let e = enlarge(&v, pad, 99);
            prop_assert_eq!(e.dims(), [h + 2 * pad as usize, w + 2 * pad as usize]);
            prop_assert_eq!(enlarge(&e, -pad, 99), v);
        }

        #[test]
        fn subregion_identity(h in 1usize..8, w in 1usize..8) {
            let v: Array<u32> = Array::indgen([h, w]);
            prop_assert_eq!(subregion(&v, [0, 0, w as isize - 1, h as isize - 1], 0), v);
        }

        #[test]
        fn subregion_matches_pixels(
            x0 in -4isize..6, y0 in -4isize..6, nx in 1isize..6, ny in 1isize..6,
        ) {
            let v: Array<i32> = Array::indgen([4, 5]);
            let s = subregion(&v, [x0, y0, x0 + nx - 1, y0 + ny - 1], -1);
            if x0 >= 5 || y0 >= 4 {
                prop_assert_eq!(s.dims(), [0, 0]);
            } else {
                prop_assert_eq!(s.dims(), [ny as usize, nx as usize]);
                for y in 0..ny { for x in 0..nx {
                    let (iy, ix) = (y0 + y, x0 + x);
                    let expected = if (0..4).contains(&iy) && (0..5).contains(&ix) {
                        v[[iy as usize, ix as usize]]
                    } else {
                        -1
                    };
                    prop_assert_eq!(s[[y as usize, x as usize]], expected);
                } }
            }
        }
    }
}
