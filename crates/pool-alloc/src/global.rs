//! A thin wrapper around a single process-wide [`Allocator`].
//!
//! The pool is process-wide mutable state — there is exactly one active
//! pool at a time. `std::sync::Mutex` is used only so the backing `static`
//! can exist at all (Rust statics must be `Sync`); this does not change the
//! contract that exactly one logical thread drives the pool between
//! `mem_init` and `mem_deinit`.
use std::ptr::NonNull;
use std::sync::Mutex;

use crate::allocator::Allocator;

static POOL: Mutex<Option<Allocator>> = Mutex::new(None);

/// Acquires a pool of `size` bytes and installs it as the active pool.
///
/// If a pool is already active, this call is rejected (logged, the
/// existing pool is left untouched) rather than leaking the previous pool.
pub fn mem_init(size: usize) {
    let mut guard = POOL.lock().unwrap();
    if guard.is_some() {
        log::warn!("pool_alloc::global: mem_init called while a pool is already active; ignoring");
        return;
    }
    *guard = Allocator::init(size);
}

/// Allocates `size` bytes from the active pool, or returns a null pointer
/// if there is no active pool or no record can satisfy the request.
pub fn mem_alloc(size: usize) -> *mut u8 {
    let mut guard = POOL.lock().unwrap();
    match guard.as_mut() {
        Some(alloc) => alloc
            .alloc(size)
            .map(NonNull::as_ptr)
            .unwrap_or(std::ptr::null_mut()),
        None => {
            log::warn!("pool_alloc::global: mem_alloc called with no active pool");
            std::ptr::null_mut()
        }
    }
}

/// Frees `block`. A null pointer, an address not owned by the active pool,
/// or a double-free are all tolerated no-ops.
pub fn mem_free(block: *mut u8) {
    let Some(block) = NonNull::new(block) else {
        log::warn!("pool_alloc::global: mem_free called with a null pointer");
        return;
    };
    let mut guard = POOL.lock().unwrap();
    match guard.as_mut() {
        Some(alloc) => alloc.free(block),
        None => log::warn!("pool_alloc::global: mem_free called with no active pool"),
    }
}

/// Resizes `block` to `size` bytes, returning a null pointer on failure.
pub fn mem_resize(block: *mut u8, size: usize) -> *mut u8 {
    let Some(block) = NonNull::new(block) else {
        log::warn!("pool_alloc::global: mem_resize called with a null pointer");
        return std::ptr::null_mut();
    };
    let mut guard = POOL.lock().unwrap();
    match guard.as_mut() {
        Some(alloc) => alloc
            .resize(block, size)
            .map(NonNull::as_ptr)
            .unwrap_or(std::ptr::null_mut()),
        None => {
            log::warn!("pool_alloc::global: mem_resize called with no active pool");
            std::ptr::null_mut()
        }
    }
}

/// Releases the active pool, resetting the singleton to its pristine,
/// pre-`mem_init` state.
pub fn mem_deinit() {
    let mut guard = POOL.lock().unwrap();
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    // The global singleton is process-wide, so these tests must not run
    // concurrently with each other.
    static TEST_LOCK: StdMutex<()> = StdMutex::new(());

    #[test]
    fn init_alloc_free_deinit() {
        let _guard = TEST_LOCK.lock().unwrap();
        mem_deinit();
        mem_init(1024);
        let p = mem_alloc(100);
        assert!(!p.is_null());
        mem_free(p);
        mem_deinit();
    }

    #[test]
    fn double_init_is_rejected() {
        let _guard = TEST_LOCK.lock().unwrap();
        mem_deinit();
        mem_init(1024);
        let first = mem_alloc(100);
        mem_init(2048); // should be ignored
        let second = mem_alloc(100);
        assert!(!first.is_null());
        assert!(!second.is_null());
        mem_deinit();
    }
}
