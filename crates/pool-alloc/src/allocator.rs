//! First-fit allocation with splitting, deallocation with coalescing, and
//! in-place resize over a single fixed-size pool.
use std::fmt;
use std::ptr::NonNull;

use crate::block::{Block, RecordId, Slab};
use crate::pool::Pool;

/// Internal failure classification, used only to shape diagnostic log
/// messages (§6.3). Never surfaces to a caller: every public operation
/// still reports failure as a plain `None`, matching §7's "no structured
/// error codes are returned."
#[derive(Debug, Clone, Copy)]
enum AllocFailure {
    CapacityExhausted,
    InvalidAddress,
    HostAllocFailed,
    DegenerateInitSize,
}

impl fmt::Display for AllocFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::CapacityExhausted => "would exceed pool capacity",
            Self::InvalidAddress => "address does not match any record's payload start",
            Self::HostAllocFailed => "host allocation failed",
            Self::DegenerateInitSize => "degenerate or unhost-allocatable size",
        };
        f.write_str(msg)
    }
}

/// A fixed-pool heap allocator.
///
/// An `Allocator` owns one contiguous byte region (acquired from the host
/// exactly once, at construction) and an out-of-band slab of block records
/// describing how that region is currently divided between free and in-use
/// spans. [`crate::global`] provides free-function wrappers for callers that
/// want a single process-wide pool.
pub struct Allocator {
    pool: Pool,
    slab: Slab,
    head: Option<RecordId>,
    used: usize,
}

// Safety: every block record's `addr` is logically owned by this
// `Allocator`'s `pool`, there is no interior mutability reachable from an
// `&Allocator`, and nothing here relies on thread-local state. `NonNull`
// opts out of both auto traits by default, so they need a manual impl.
unsafe impl Send for Allocator {}
unsafe impl Sync for Allocator {}

impl Allocator {
    /// Acquires a pool of `size` bytes from the host and installs a single
    /// free record covering it.
    ///
    /// Returns `None` (after logging a diagnostic) if `size` is zero or the
    /// host allocation fails. A degenerate size is never "too small to be
    /// useful" in the out-of-band representation — there is no per-record
    /// pool overhead to reserve against — so the only failure mode here is
    /// `size == 0` or outright host exhaustion.
    pub fn init(size: usize) -> Option<Self> {
        let pool = match Pool::new(size) {
            Some(pool) => pool,
            None => {
                log::warn!("pool_alloc: init({size}) failed: {}", AllocFailure::DegenerateInitSize);
                return None;
            }
        };

        let mut slab = Slab::new();
        let head = slab.insert(Block {
            addr: pool.base(),
            size: pool.len(),
            is_free: true,
            next: None,
        });

        Some(Self {
            pool,
            slab,
            head: Some(head),
            used: 0,
        })
    }

    /// Total pool capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Bytes currently handed out to callers.
    pub fn used(&self) -> usize {
        self.used
    }

    /// First-fit allocation. `size == 0` is permitted and returns a
    /// distinct (though possibly address-sharing) address, never `None`,
    /// as long as at least one free record exists.
    pub fn alloc(&mut self, size: usize) -> Option<NonNull<u8>> {
        if self.used.checked_add(size)? > self.pool.len() {
            log::debug!("pool_alloc: alloc({size}) rejected: {}", AllocFailure::CapacityExhausted);
            return None;
        }

        let mut cursor = self.head;
        while let Some(id) = cursor {
            let next = self.slab.get(id).next;
            if self.slab.get(id).is_free && self.slab.get(id).size >= size {
                return Some(self.take_record(id, size));
            }
            cursor = next;
        }
        None
    }

    /// Marks `id`'s record in-use for `size` bytes, splitting off the
    /// residue as a new free record when there is any residue at all (the
    /// out-of-band layout has no per-record pool overhead to weigh against
    /// a split, unlike an in-band design).
    fn take_record(&mut self, id: RecordId, size: usize) -> NonNull<u8> {
        let block = self.slab.get(id);
        let addr = block.addr;
        let old_size = block.size;
        let next = block.next;

        if old_size > size {
            let residue_addr = unsafe {
                self.pool
                    .addr_at(self.pool.offset_of(addr).unwrap() + size)
            };
            let residue = self.slab.insert(Block {
                addr: residue_addr,
                size: old_size - size,
                is_free: true,
                next,
            });
            log::debug!("pool_alloc: split {old_size}-byte free record into {size} + residue");
            let block = self.slab.get_mut(id);
            block.size = size;
            block.is_free = false;
            block.next = Some(residue);
        } else {
            let block = self.slab.get_mut(id);
            block.is_free = false;
        }

        self.used += size;
        addr
    }

    /// Resolves `addr` to the record whose payload starts there, or `None`
    /// if no record matches (including `addr` not belonging to this pool at
    /// all).
    fn find(&self, addr: NonNull<u8>) -> Option<RecordId> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let block = self.slab.get(id);
            if block.addr == addr {
                return Some(id);
            }
            cursor = block.next;
        }
        None
    }

    fn predecessor_of(&self, id: RecordId) -> Option<RecordId> {
        let mut cursor = self.head;
        while let Some(cur) = cursor {
            let next = self.slab.get(cur).next;
            if next == Some(id) {
                return Some(cur);
            }
            cursor = next;
        }
        None
    }

    /// Marks the record at `addr` free and coalesces it with its immediate
    /// neighbors. Silently ignores addresses that do not match any record's
    /// payload start, including an address that was already freed.
    pub fn free(&mut self, addr: NonNull<u8>) {
        let Some(id) = self.find(addr) else {
            log::warn!("pool_alloc: free() rejected: {}", AllocFailure::InvalidAddress);
            return;
        };

        if self.slab.get(id).is_free {
            // Already free: tolerate silently rather than panic or corrupt state.
            return;
        }

        self.used -= self.slab.get(id).size;
        self.slab.get_mut(id).is_free = true;
        self.merge_with_successor(id);
        if let Some(pred) = self.predecessor_of(id) {
            if self.slab.get(pred).is_free {
                self.merge_into(pred, id);
            }
        }
    }

    /// If `id`'s successor exists and is free, folds it into `id`,
    /// destroying the successor's record. Must run before any
    /// predecessor-merge so the predecessor step only ever has to deal with
    /// a single (possibly already-grown) current record.
    fn merge_with_successor(&mut self, id: RecordId) {
        let Some(succ_id) = self.slab.get(id).next else {
            return;
        };
        if !self.slab.get(succ_id).is_free {
            return;
        }
        let succ = self.slab.remove(succ_id);
        let block = self.slab.get_mut(id);
        block.size += succ.size;
        block.next = succ.next;
    }

    /// Folds `child` (now free, with no free successor of its own) into its
    /// free predecessor `pred`, destroying `child`'s record.
    fn merge_into(&mut self, pred: RecordId, child: RecordId) {
        let child = self.slab.remove(child);
        let block = self.slab.get_mut(pred);
        block.size += child.size;
        block.next = child.next;
    }

    /// Resizes the block at `addr` to `size` bytes, preserving content up to
    /// `min(old_size, size)`. Grows in place when the immediate successor is
    /// free and large enough; otherwise falls back to allocate+copy+free.
    /// Never moves the block when in-place growth or any shrink suffices.
    pub fn resize(&mut self, addr: NonNull<u8>, size: usize) -> Option<NonNull<u8>> {
        let id = match self.find(addr) {
            Some(id) => id,
            None => {
                log::warn!("pool_alloc: resize() rejected: {}", AllocFailure::InvalidAddress);
                return None;
            }
        };

        let old_size = self.slab.get(id).size;

        if old_size == size {
            return Some(addr);
        }

        if old_size > size {
            return Some(self.shrink(id, size));
        }

        if let Some(grown) = self.try_grow_in_place(id, size) {
            return Some(grown);
        }

        let new_addr = self.alloc(size)?;
        unsafe {
            std::ptr::copy_nonoverlapping(addr.as_ptr(), new_addr.as_ptr(), old_size.min(size));
        }
        self.free(addr);
        Some(new_addr)
    }

    fn shrink(&mut self, id: RecordId, size: usize) -> NonNull<u8> {
        let block = self.slab.get(id);
        let addr = block.addr;
        let old_size = block.size;
        let next = block.next;

        let tail_addr = unsafe { self.pool.addr_at(self.pool.offset_of(addr).unwrap() + size) };
        let tail = self.slab.insert(Block {
            addr: tail_addr,
            size: old_size - size,
            is_free: true,
            next,
        });

        let block = self.slab.get_mut(id);
        block.size = size;
        block.next = Some(tail);

        self.used -= old_size - size;
        self.merge_with_successor(tail);
        addr
    }

    fn try_grow_in_place(&mut self, id: RecordId, size: usize) -> Option<NonNull<u8>> {
        let block = self.slab.get(id);
        let addr = block.addr;
        let old_size = block.size;
        let succ_id = block.next?;
        let succ = self.slab.get(succ_id);
        if !succ.is_free {
            return None;
        }
        let combined = old_size + succ.size;
        if combined < size {
            return None;
        }

        let succ = self.slab.remove(succ_id);
        let block = self.slab.get_mut(id);
        block.size = size;
        block.next = succ.next;

        let residual = combined - size;
        if residual > 0 {
            let tail_addr =
                unsafe { self.pool.addr_at(self.pool.offset_of(addr).unwrap() + size) };
            let tail = self.slab.insert(Block {
                addr: tail_addr,
                size: residual,
                is_free: true,
                next: succ.next,
            });
            self.slab.get_mut(id).next = Some(tail);
        }

        self.used += size - old_size;
        Some(addr)
    }
}

#[cfg(test)]
impl Allocator {
    /// Walks the record chain in address order, returning each record's
    /// `(is_free, size)`. Test-only: lets property tests assert directly on
    /// the allocator's actual chain (e.g. the no-adjacent-free-pair
    /// invariant) instead of re-deriving it from a shadow model.
    pub(crate) fn chain(&self) -> Vec<(bool, usize)> {
        let mut out = Vec::new();
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let block = self.slab.get(id);
            out.push((block.is_free, block.size));
            cursor = block.next;
        }
        out
    }
}

impl Drop for Allocator {
    /// Releases the pool and destroys every record. Iterative (the slab is
    /// a flat `Vec`), never recursive along the `next` chain.
    fn drop(&mut self) {
        self.slab.clear();
    }
}
