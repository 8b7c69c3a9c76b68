//! N-dimensional arrays whose shape is known at run time, with views that
//! alias their source, and a few utilities for two-axis images.
//!
//! [`Array<T>`] stores its elements in a single dense [`Box<[T]>`] in
//! row-major order, together with its axis extents [`Array::dims()`].
//!
//! Indexing takes one [`AxisIndex`] per axis: a single position, the whole
//! axis, an inclusive ascending or descending range (see [`rx()`]), or an
//! explicit list of positions. [`Array::view()`] and [`Array::view_mut()`]
//! resolve such an expression into a [`Selection`] of element offsets, and
//! return an [`ArrayView`] or [`ArrayViewMut`] that reads and writes the
//! original storage. Views can be indexed again, and the result still
//! aliases the original `Array`.
//!
//! ```
//! use skyarray::{Array, MemoryView, View, idx, rx};
//! let mut m: Array<i32> = Array::indgen([3, 4]);
//! m.view_mut(&idx![rx(2, 1), vec![3, 0]]).fill(-1);
//! assert_eq!(m.view(&idx![.., 0]).to_vec(), [0, -1, -1]);
//! assert_eq!(m.view(&idx![1, ..]).to_vec(), [-1, 5, 6, -1]);
//! ```
//!
//! Trait [`View`] is the read-only interface shared by `Array`, the view
//! types and [`View::map()`]. Trait [`MemoryView`] adds writing, including
//! [`MemoryView::assign_within()`] for copies whose source and destination
//! overlap.
//!
//! Module [`region`] treats two-axis arrays as images: borders, clipped
//! sub-regions and circular masks.
//!
//! With the `serde` feature, `Array<T>` and `AxisIndex` implement
//! `Serialize` and `Deserialize`.

mod error;
pub use error::{ArrayError};
use error::{OrPanic};

mod array;
pub use array::{Array, flat_offset, row_major_strides};
use array::{check_dims, element_count};

mod new;

pub mod index;
pub use index::{AxisIndex, Selection, rx};

pub mod view;
pub use view::{View, MemoryView, ArrayView, ArrayViewMut, Selected, SelectedMut, Map};

mod manip;

pub mod region;

#[cfg(feature = "serde")]
mod serialize;
