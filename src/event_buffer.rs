//! Fixed-capacity SPSC hand-off queue between interrupt handlers and the main loop.
//!
//! # Overview
//! - Single producer (interrupt context), single consumer (polling loop).
//! - Neither side ever blocks; a write onto an occupied slot fails with
//!   [`Error::BufferFull`] and a read of an unoccupied slot fails with
//!   [`Error::BufferEmpty`]. Nothing is overwritten.
//! - Storage is an inline array of `N` slots; `initialize` may shrink the active
//!   capacity to any `1..=N` without touching the footprint.
//!
//! # Occupancy protocol
//! Each slot carries an atomic state that is the only record of whether it holds
//! unread data:
//!
//! ```text
//! EMPTY --(writer CAS)--> WRITING --> FULL --(reader CAS)--> READING --> EMPTY
//! ```
//!
//! The writer publishes the value with a `Release` store of `FULL`; the reader
//! claims it with an `Acquire` compare-exchange. A slot is therefore owned by at
//! most one side at any instant, even if two callers of the same side race. Such
//! misuse breaks FIFO ordering but not memory safety.
//!
//! # Notes
//! - `T` is `Copy`; values are returned by copy and never dropped in place.
//! - Indices advance modulo the active capacity and are only stored by their
//!   own side, so `Relaxed` is enough for them.

use core::cell::UnsafeCell;
use core::fmt;
use core::mem::MaybeUninit;

#[cfg(not(feature = "portable-atomic"))]
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
#[cfg(feature = "portable-atomic")]
use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::error::{Error, Result};

const EMPTY: u8 = 0;
const WRITING: u8 = 1;
const FULL: u8 = 2;
const READING: u8 = 3;

struct Slot<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    #[inline]
    fn is_occupied(&self) -> bool {
        self.state.load(Ordering::Acquire) == FULL
    }
}

/// Circular drop-on-full queue of `Copy` values backed by `N` inline slots.
pub struct EventBuffer<T: Copy, const N: usize> {
    capacity: usize,
    write_index: AtomicUsize,
    read_index: AtomicUsize,
    slots: [Slot<T>; N],
}

// Slot contents are only touched by whichever side won the state CAS.
unsafe impl<T: Copy + Send, const N: usize> Sync for EventBuffer<T, N> {}

impl<T: Copy, const N: usize> EventBuffer<T, N> {
    /// An initialized, empty buffer using all `N` slots.
    pub const fn new() -> Self {
        assert!(N > 0);
        Self {
            capacity: N,
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
            slots: [const { Slot::new() }; N],
        }
    }

    /// Clear every slot, reset both indices and set the active capacity.
    ///
    /// Any queued but unread values are discarded. Fails with
    /// [`Error::InvalidCapacity`] and leaves the buffer untouched unless
    /// `1 <= capacity <= N`.
    pub fn initialize(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 || capacity > N {
            log::warn!("event buffer: rejected capacity {capacity} (max {N})");
            return Err(Error::InvalidCapacity {
                requested: capacity,
                max: N,
            });
        }

        for slot in self.slots.iter_mut() {
            *slot.state.get_mut() = EMPTY;
            *slot.value.get_mut() = MaybeUninit::uninit();
        }
        *self.write_index.get_mut() = 0;
        *self.read_index.get_mut() = 0;
        self.capacity = capacity;
        Ok(())
    }

    #[inline(always)]
    const fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.capacity { 0 } else { next }
    }

    /// Queue `value` at the write position.
    ///
    /// Returns the slot position written on success. On [`Error::BufferFull`]
    /// no state changes.
    #[inline]
    pub fn try_write(&self, value: T) -> Result<usize> {
        let pos = self.write_index.load(Ordering::Relaxed);
        let slot = &self.slots[pos];

        if slot
            .state
            .compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(Error::BufferFull);
        }

        unsafe { (*slot.value.get()).write(value) };
        slot.state.store(FULL, Ordering::Release);
        self.write_index.store(self.advance(pos), Ordering::Relaxed);
        Ok(pos)
    }

    /// Take the oldest value, together with the slot position it came from.
    ///
    /// On [`Error::BufferEmpty`] no state changes.
    #[inline]
    pub fn try_read(&self) -> Result<(T, usize)> {
        let pos = self.read_index.load(Ordering::Relaxed);
        let slot = &self.slots[pos];

        if slot
            .state
            .compare_exchange(FULL, READING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(Error::BufferEmpty);
        }

        let value = unsafe { (*slot.value.get()).assume_init_read() };
        slot.state.store(EMPTY, Ordering::Release);
        self.read_index.store(self.advance(pos), Ordering::Relaxed);
        Ok((value, pos))
    }

    /// Read until empty, handing each value and its position to `hook`.
    /// Returns how many values were delivered.
    pub fn drain(&self, mut hook: impl FnMut(usize, T)) -> usize {
        let mut read = 0usize;
        while let Ok((value, pos)) = self.try_read() {
            hook(pos, value);
            read += 1;
        }
        read
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn read_index(&self) -> usize {
        self.read_index.load(Ordering::Relaxed)
    }

    /// Occupied slots right now. A snapshot only while the other side is running.
    pub fn len(&self) -> usize {
        self.slots[..self.capacity]
            .iter()
            .filter(|slot| slot.is_occupied())
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.slots[self.read_index()].is_occupied()
    }

    /// True when the next write would fail.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots[self.write_index()].state.load(Ordering::Acquire) != EMPTY
    }
}

impl<T: Copy, const N: usize> Default for EventBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> fmt::Debug for EventBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBuffer")
            .field("capacity", &self.capacity)
            .field("write_index", &self.write_index())
            .field("read_index", &self.read_index())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBuffer;
    use crate::error::Error;
    use std::vec::Vec;

    #[test]
    fn read_on_fresh_buffer_is_empty() {
        let buf = EventBuffer::<u8, 4>::new();
        assert_eq!(buf.try_read(), Err(Error::BufferEmpty));
        assert_eq!(buf.read_index(), 0);
        assert_eq!(buf.write_index(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn four_in_four_out() {
        let mut buf = EventBuffer::<char, 8>::new();
        buf.initialize(4).unwrap();

        for (expected, c) in ['A', 'B', 'C', 'D'].into_iter().enumerate() {
            assert_eq!(buf.try_write(c), Ok(expected));
        }
        assert!(buf.is_full());
        assert_eq!(buf.try_write('E'), Err(Error::BufferFull));

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(buf.try_read().unwrap());
        }
        assert_eq!(&seen[..], &[('A', 0), ('B', 1), ('C', 2), ('D', 3)]);
        assert_eq!(buf.try_read(), Err(Error::BufferEmpty));
    }

    #[test]
    fn full_write_leaves_state_unchanged() {
        let buf = EventBuffer::<u32, 3>::new();
        buf.try_read().unwrap_err();
        buf.try_write(1).unwrap();
        buf.try_read().unwrap();
        for v in 10..13 {
            buf.try_write(v).unwrap();
        }

        let (w, r, len) = (buf.write_index(), buf.read_index(), buf.len());
        assert_eq!(buf.try_write(99), Err(Error::BufferFull));
        assert_eq!((buf.write_index(), buf.read_index(), buf.len()), (w, r, len));

        let mut seen = Vec::new();
        assert_eq!(buf.drain(|_, v| seen.push(v)), 3);
        assert_eq!(&seen[..], &[10, 11, 12]);
    }

    #[test]
    fn fifo_for_every_capacity_and_fill() {
        let mut buf = EventBuffer::<u16, 16>::new();
        for cap in 1..=16 {
            for n in 0..=cap {
                buf.initialize(cap).unwrap();
                // Offset the indices so the fill wraps around the end.
                for _ in 0..(cap / 2) {
                    buf.try_write(0).unwrap();
                    buf.try_read().unwrap();
                }
                for v in 0..n as u16 {
                    buf.try_write(v).unwrap();
                }
                assert_eq!(buf.len(), n);
                let mut seen = Vec::new();
                buf.drain(|_, v| seen.push(v));
                let expected: Vec<u16> = (0..n as u16).collect();
                assert_eq!(seen, expected, "cap {cap} n {n}");
            }
        }
    }

    #[test]
    fn initialize_discards_queued_values() {
        let mut buf = EventBuffer::<u8, 4>::new();
        buf.try_write(7).unwrap();
        buf.try_write(8).unwrap();
        buf.initialize(4).unwrap();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.try_read(), Err(Error::BufferEmpty));
        assert_eq!(buf.try_write(9), Ok(0));
    }

    #[test]
    fn initialize_rejects_bad_capacity() {
        let mut buf = EventBuffer::<u8, 4>::new();
        buf.try_write(1).unwrap();
        assert_eq!(
            buf.initialize(0),
            Err(Error::InvalidCapacity {
                requested: 0,
                max: 4
            })
        );
        assert!(buf.initialize(5).is_err());
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.try_read(), Ok((1, 0)));
    }

    #[test]
    fn capacity_one_alternates() {
        let mut buf = EventBuffer::<u8, 2>::new();
        buf.initialize(1).unwrap();
        for v in 0..5 {
            assert_eq!(buf.try_write(v), Ok(0));
            assert_eq!(buf.try_write(v), Err(Error::BufferFull));
            assert_eq!(buf.try_read(), Ok((v, 0)));
        }
    }
}
