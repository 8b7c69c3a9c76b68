/// Everything that can go wrong when building, indexing or reshaping an
/// [`Array`].
///
/// Most methods in this crate come in two flavours. The plain one (e.g.
/// [`Array::view()`]) panics with the message of the `ArrayError`, like
/// indexing a slice out of bounds. The `try_` one (e.g.
/// [`Array::try_view()`]) returns it instead.
///
/// [`Array`]: super::Array
/// [`Array::view()`]: super::Array::view
/// [`Array::try_view()`]: super::Array::try_view
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// An operand does not have the shape the operation needs. Also reported
    /// for ragged nested literals, where `expected` is the width of the
    /// first row.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    /// The wrong number of axes, or of per-axis indices.
    #[error("rank mismatch: expected {expected} axes, found {found}")]
    RankMismatch { expected: usize, found: usize },

    #[error("index {index} out of range for axis {axis} of size {size}")]
    IndexOutOfRange { index: usize, axis: usize, size: usize },

    /// `enlarge()` was asked to crop at least half of an axis.
    #[error("cannot crop {pad} from each border of an image of dims {dims:?}")]
    DegenerateCrop { pad: usize, dims: Vec<usize> },

    #[error("the element count of dims {dims:?} overflows usize")]
    Overflow { dims: Vec<usize> },
}

/// Unwraps the `Ok` value, or panics with the error's message.
pub(crate) trait OrPanic<T> {
    fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T, ArrayError> {
    #[track_caller]
    #[inline(always)]
    fn or_panic(self) -> T {
        match self {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}
