//! Crate error type.

use core::alloc::Layout;
use log::error;
use thiserror::Error;

/// Errors surfaced by the fallible (`try_*` and checked) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The allocator could not provide storage for `requested` elements.
    ///
    /// `layout` is `None` when the request does not fit in a valid layout
    /// at all (element count times element size overflows `isize::MAX`).
    #[error("failed to allocate storage for {requested} elements")]
    AllocationFailure {
        requested: usize,
        layout: Option<Layout>,
    },
    /// A checked access asked for a position outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Escalates an error from an infallible entry point the way std
    /// collections do: allocator failures go through `handle_alloc_error`,
    /// impossible layouts panic with "capacity overflow".
    #[cold]
    #[inline(never)]
    pub(crate) fn raise(self) -> ! {
        error!("{self}");
        match self {
            Error::AllocationFailure {
                layout: Some(layout),
                ..
            } => std::alloc::handle_alloc_error(layout),
            Error::AllocationFailure { layout: None, .. } => panic!("capacity overflow"),
            Error::OutOfRange { index, len } => {
                panic!("index out of bounds: the len is {len} but the index is {index}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = Error::OutOfRange { index: 3, len: 2 };
        assert_eq!(e.to_string(), "index 3 out of range for length 2");

        let e = Error::AllocationFailure {
            requested: 7,
            layout: None,
        };
        assert_eq!(e.to_string(), "failed to allocate storage for 7 elements");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn raise_without_layout_panics() {
        Error::AllocationFailure {
            requested: usize::MAX,
            layout: None,
        }
        .raise();
    }
}
