//! OwningBuffer: single-owner heap region of initialized elements.

use crate::error::{Error, Result};
use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc;

/// Exclusive owner of a contiguous heap run of `len` initialized `T`s.
///
/// The buffer has no notion of a logical size: every slot is always
/// initialized and dropped together with the buffer. A length of zero never
/// allocates, so `len() == 0` and `!is_allocated()` are the same state.
///
/// Copying is deliberately unsupported (`Clone` is not implemented).
/// Ownership moves with the value; `take` and `release` move it out while
/// leaving the source empty, and `exchange` swaps regions between two
/// buffers.
pub struct OwningBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    _owns: PhantomData<T>,
}

// Same rules as `Box<[T]>`: the buffer is a unique owner.
unsafe impl<T: Send> Send for OwningBuffer<T> {}
unsafe impl<T: Sync> Sync for OwningBuffer<T> {}

fn layout_for<T>(len: usize) -> Result<Layout> {
    Layout::array::<T>(len).map_err(|_| Error::AllocationFailure {
        requested: len,
        layout: None,
    })
}

// Holds a fresh region while its slots are being written. If an initializer
// panics, the written prefix is dropped and the region freed.
struct PartialInit<T> {
    ptr: NonNull<T>,
    layout: Layout,
    initialized: usize,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr(),
                self.initialized,
            ));
            if self.layout.size() != 0 {
                alloc::dealloc(self.ptr.as_ptr().cast(), self.layout);
            }
        }
    }
}

impl<T> OwningBuffer<T> {
    /// Empty buffer; performs no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Allocates `len` slots and initializes slot `i` with `f(i)`, in order.
    ///
    /// On `Err`, `f` has not been called.
    pub fn try_from_fn<F>(len: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize) -> T,
    {
        if len == 0 {
            return Ok(Self::new());
        }
        let layout = layout_for::<T>(len)?;
        let ptr: NonNull<T> = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(unsafe { alloc::alloc(layout) })
                .ok_or(Error::AllocationFailure {
                    requested: len,
                    layout: Some(layout),
                })?
                .cast()
        };

        let mut init = PartialInit {
            ptr,
            layout,
            initialized: 0,
        };
        while init.initialized < len {
            let value = f(init.initialized);
            // SAFETY: `initialized < len` and the region holds `len` slots.
            unsafe { init.ptr.as_ptr().add(init.initialized).write(value) };
            init.initialized += 1;
        }
        mem::forget(init);

        Ok(Self {
            ptr,
            len,
            _owns: PhantomData,
        })
    }

    /// `len` default-initialized slots.
    pub fn try_with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::try_from_fn(len, |_| T::default())
    }

    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::try_with_len(len).unwrap_or_else(|e| e.raise())
    }

    /// `len` clones of `value`.
    pub fn try_from_elem(len: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::try_from_fn(len, |_| value.clone())
    }

    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::try_from_elem(len, value).unwrap_or_else(|e| e.raise())
    }

    /// Element-wise clone of `src`, in order.
    pub fn try_from_slice(src: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::try_from_fn(src.len(), |i| src[i].clone())
    }

    pub fn from_slice(src: &[T]) -> Self
    where
        T: Clone,
    {
        Self::try_from_slice(src).unwrap_or_else(|e| e.raise())
    }

    /// Moves the elements of `items` into a new buffer, in order.
    pub fn try_from_array<const N: usize>(items: [T; N]) -> Result<Self> {
        let mut items = items.into_iter();
        Self::try_from_fn(N, |_| match items.next() {
            Some(item) => item,
            None => unreachable!("array yields exactly N items"),
        })
    }

    pub fn from_array<const N: usize>(items: [T; N]) -> Self {
        Self::try_from_array(items).unwrap_or_else(|e| e.raise())
    }

    /// Adopts storage previously handed out by [`OwningBuffer::release`].
    ///
    /// # Safety
    /// Either `len == 0`, or `ptr` points to a region obtained from the global
    /// allocator with `Layout::array::<T>(len)` holding `len` initialized
    /// values, and no one else owns that region. When that layout has zero
    /// size, `ptr` only needs to be non-null and aligned.
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize) -> Self {
        if len == 0 {
            return Self::new();
        }
        Self {
            ptr,
            len,
            _owns: PhantomData,
        }
    }

    /// Gives up ownership of the region and returns it as raw parts; the
    /// buffer is empty afterwards. Calling it again returns empty parts
    /// (a dangling pointer and a length of zero).
    ///
    /// The caller becomes responsible for the region, typically by handing it
    /// back to [`OwningBuffer::from_raw_parts`]. Dropping the parts leaks it.
    #[must_use = "dropping the released parts leaks the region"]
    pub fn release(&mut self) -> (NonNull<T>, usize) {
        let parts = (self.ptr, self.len);
        self.ptr = NonNull::dangling();
        self.len = 0;
        parts
    }

    /// Moves the region out into a new buffer, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Swaps owned regions with `other`. No allocation, no element moves.
    #[inline]
    pub fn exchange(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Number of slots owned.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True iff the buffer currently owns a non-empty region.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.len != 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is valid for `len` initialized values (dangling only when len == 0).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// # Safety
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "OwningBuffer index out of range");
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// # Safety
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "OwningBuffer index out of range");
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }
}

impl<T> Default for OwningBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OwningBuffer<T> {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) };
        if let Ok(layout) = layout_for::<T>(self.len) {
            if layout.size() != 0 {
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
            }
        }
    }
}

// Positional access. Callers (GrowableArray) are responsible for the logical
// range; the allocation bound is still enforced by slice indexing.
impl<T> Index<usize> for OwningBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for OwningBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for OwningBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
