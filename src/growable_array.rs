//! GrowableArray: logical size layered over an OwningBuffer.

use crate::error::{Error, Result};
use crate::owning_buffer::OwningBuffer;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Index, IndexMut};
use core::slice;
use log::trace;

/// A growable array over a single [`OwningBuffer`].
///
/// `capacity()` is the length of the owned buffer and `len()` the number of
/// live elements at its front. Slots in `[len, capacity)` stay initialized
/// but are logically dead; they are overwritten by later pushes, inserts and
/// resizes and dropped with the buffer.
///
/// Growth allocates a fresh default-filled buffer, moves the live elements
/// over and only then exchanges it in, so a failed `try_*` call leaves the
/// array exactly as it was.
///
/// Positions returned by [`insert`](Self::insert) and
/// [`erase`](Self::erase) are plain indices; they stop referring to the same
/// element after any later mutation that shifts or reallocates.
pub struct GrowableArray<T> {
    buffer: OwningBuffer<T>,
    size: usize,
}

/// Capacity request that converts into an empty array with that capacity.
///
/// ```
/// use growable_array::{reserve, GrowableArray};
///
/// let v: GrowableArray<u32> = reserve(16).into();
/// assert_eq!((v.len(), v.capacity()), (0, 16));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveRequest {
    capacity: usize,
}

impl ReserveRequest {
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

pub fn reserve(capacity: usize) -> ReserveRequest {
    ReserveRequest { capacity }
}

fn doubled(n: usize) -> Result<usize> {
    n.checked_mul(2).ok_or(Error::AllocationFailure {
        requested: n,
        layout: None,
    })
}

impl<T> GrowableArray<T> {
    /// Empty array; performs no allocation.
    pub const fn new() -> Self {
        Self {
            buffer: OwningBuffer::new(),
            size: 0,
        }
    }

    /// The backing buffer, including the dead slots past `len()`.
    pub fn buffer(&self) -> &OwningBuffer<T> {
        &self.buffer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checked access: `Err(OutOfRange)` iff `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.size {
            return Err(Error::OutOfRange {
                index,
                len: self.size,
            });
        }
        Ok(&self.buffer[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.size {
            return Err(Error::OutOfRange {
                index,
                len: self.size,
            });
        }
        Ok(&mut self.buffer[index])
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// # Safety
    /// `index < self.len()`. Only checked in debug builds.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.size, "GrowableArray index out of range");
        unsafe { self.buffer.get_unchecked(index) }
    }

    /// # Safety
    /// `index < self.len()`. Only checked in debug builds.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.size, "GrowableArray index out of range");
        unsafe { self.buffer.get_unchecked_mut(index) }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.as_slice()[..self.size]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer.as_mut_slice()[..self.size]
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Forgets every element logically. Capacity is kept and nothing is
    /// dropped until the slots are reused or the array goes away.
    #[inline]
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Drops the last element logically. The array must not be empty.
    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(self.size > 0, "pop on an empty GrowableArray");
        self.size = self.size.saturating_sub(1);
    }

    /// Removes the element at `index` by shifting its followers one slot to
    /// the left. Returns the index now holding the follower, which equals
    /// `len()` when the last element was removed.
    ///
    /// `index` must be in `[0, len())`.
    pub fn erase(&mut self, index: usize) -> usize {
        debug_assert!(
            index < self.size,
            "erase position {index} out of range for length {}",
            self.size
        );
        let size = self.size;
        // The removed element rotates into the now-dead slot at `size - 1`.
        self.buffer.as_mut_slice()[index..size].rotate_left(1);
        self.size -= 1;
        index
    }

    /// Exchanges contents with `other`. O(1), no allocation.
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.exchange(&mut other.buffer);
        mem::swap(&mut self.size, &mut other.size);
    }

    /// Moves the contents out, leaving `self` with no elements and no
    /// allocation.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Move-assignment: takes `other`'s buffer, size and capacity. The
    /// previous contents of `self` are dropped and `other` is left empty
    /// with zero capacity.
    pub fn assign_from(&mut self, other: &mut Self) {
        *self = other.take();
    }
}

impl<T: Default> GrowableArray<T> {
    /// `len` default values; `len() == capacity() == len`.
    pub fn try_with_len(len: usize) -> Result<Self> {
        Ok(Self {
            buffer: OwningBuffer::try_with_len(len)?,
            size: len,
        })
    }

    pub fn with_len(len: usize) -> Self {
        Self::try_with_len(len).unwrap_or_else(|e| e.raise())
    }

    /// No live elements; `capacity` default slots allocated up front.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: OwningBuffer::try_with_len(capacity)?,
            size: 0,
        })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.raise())
    }

    // Capacity after an overflowing push or insert.
    fn grown_capacity(&self) -> Result<usize> {
        match self.capacity() {
            0 => Ok(1),
            cap => doubled(cap),
        }
    }

    /// Builds a default-filled buffer of `new_capacity` slots, moves the live
    /// elements into it (leaving one empty slot at `gap` if given) and
    /// exchanges it in. On error `self` is untouched.
    fn relocate(&mut self, new_capacity: usize, gap: Option<usize>) -> Result<()> {
        let mut fresh = OwningBuffer::try_with_len(new_capacity)?;
        let size = self.size;
        let live = &mut self.buffer.as_mut_slice()[..size];
        let dst = fresh.as_mut_slice();
        match gap {
            None => live.swap_with_slice(&mut dst[..size]),
            Some(at) => {
                let (front, back) = live.split_at_mut(at);
                front.swap_with_slice(&mut dst[..at]);
                back.swap_with_slice(&mut dst[at + 1..size + 1]);
            }
        }
        trace!(
            "relocating {} elements: capacity {} -> {}",
            size,
            self.capacity(),
            new_capacity
        );
        self.buffer.exchange(&mut fresh);
        Ok(())
    }

    /// Appends `value`, doubling the capacity (or going from 0 to 1) when
    /// the array is full.
    pub fn try_push(&mut self, value: T) -> Result<()> {
        if self.size == self.capacity() {
            self.relocate(self.grown_capacity()?, None)?;
        }
        self.buffer[self.size] = value;
        self.size += 1;
        Ok(())
    }

    pub fn push(&mut self, value: T) {
        if let Err(e) = self.try_push(value) {
            e.raise()
        }
    }

    /// Inserts `value` at `index`, shifting `[index, len())` one slot to the
    /// right. `index == len()` appends. Grows like [`push`](Self::push).
    ///
    /// Returns the index of the inserted element. `index` must be in
    /// `[0, len()]`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize> {
        debug_assert!(
            index <= self.size,
            "insert position {index} out of range for length {}",
            self.size
        );
        if self.size < self.capacity() {
            let size = self.size;
            self.buffer[size] = value;
            self.buffer.as_mut_slice()[index..=size].rotate_right(1);
        } else {
            self.relocate(self.grown_capacity()?, Some(index))?;
            self.buffer[index] = value;
        }
        self.size += 1;
        Ok(index)
    }

    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.try_insert(index, value).unwrap_or_else(|e| e.raise())
    }

    /// Makes sure at least `new_capacity` slots exist. Reallocates to exactly
    /// `new_capacity` when growing; otherwise does nothing.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity() {
            self.relocate(new_capacity, None)?;
        }
        Ok(())
    }

    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(e) = self.try_reserve(new_capacity) {
            e.raise()
        }
    }

    /// Sets the logical size to `new_size`.
    ///
    /// Shrinking only moves the end marker. Growing within capacity resets
    /// the newly exposed slots to `T::default()`, whatever they held before.
    /// Growing past capacity reallocates to `new_size * 2` slots.
    pub fn try_resize(&mut self, new_size: usize) -> Result<()> {
        if new_size <= self.size {
            self.size = new_size;
        } else if new_size <= self.capacity() {
            self.buffer.as_mut_slice()[self.size..new_size].fill_with(T::default);
            self.size = new_size;
        } else {
            self.relocate(doubled(new_size)?, None)?;
            self.size = new_size;
        }
        Ok(())
    }

    pub fn resize(&mut self, new_size: usize) {
        if let Err(e) = self.try_resize(new_size) {
            e.raise()
        }
    }
}

impl<T: Clone> GrowableArray<T> {
    /// `len` clones of `value`; `len() == capacity() == len`.
    pub fn try_from_elem(len: usize, value: T) -> Result<Self> {
        Ok(Self {
            buffer: OwningBuffer::try_from_elem(len, value)?,
            size: len,
        })
    }

    pub fn from_elem(len: usize, value: T) -> Self {
        Self::try_from_elem(len, value).unwrap_or_else(|e| e.raise())
    }

    pub fn try_from_slice(src: &[T]) -> Result<Self> {
        Ok(Self {
            buffer: OwningBuffer::try_from_slice(src)?,
            size: src.len(),
        })
    }

    pub fn from_slice(src: &[T]) -> Self {
        Self::try_from_slice(src).unwrap_or_else(|e| e.raise())
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Copies only the live range: the clone's capacity equals the source's size.
impl<T: Clone> Clone for GrowableArray<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = Self::from_slice(source.as_slice());
        self.swap(&mut copy);
    }
}

impl<T> Index<usize> for GrowableArray<T> {
    type Output = T;

    /// Unchecked against `len()` outside debug builds; the allocation bound
    /// is still enforced.
    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(
            index < self.size,
            "index {index} out of range for length {}",
            self.size
        );
        &self.buffer[index]
    }
}

impl<T> IndexMut<usize> for GrowableArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.size,
            "index {index} out of range for length {}",
            self.size
        );
        &mut self.buffer[index]
    }
}

impl<T: PartialEq> PartialEq for GrowableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

/// Shorter arrays order first regardless of contents; only arrays of equal
/// length are compared element by element. `[9] < [1, 2]` holds.
impl<T: PartialOrd> PartialOrd for GrowableArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.size.cmp(&other.size) {
            Ordering::Equal => self.as_slice().partial_cmp(other.as_slice()),
            unequal => Some(unequal),
        }
    }
}

impl<T: Ord> Ord for GrowableArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| self.as_slice().cmp(other.as_slice()))
    }
}

impl<T: Hash> Hash for GrowableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for GrowableArray<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            buffer: OwningBuffer::from_array(items),
            size: N,
        }
    }
}

// Adopts every slot of the buffer as a live element.
impl<T> From<OwningBuffer<T>> for GrowableArray<T> {
    fn from(buffer: OwningBuffer<T>) -> Self {
        let size = buffer.len();
        Self { buffer, size }
    }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T: Default> From<ReserveRequest> for GrowableArray<T> {
    fn from(request: ReserveRequest) -> Self {
        Self::with_capacity(request.capacity)
    }
}

impl<T: Default> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.size.saturating_add(lower));
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Default> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
