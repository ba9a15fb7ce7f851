//! A fixed-pool heap allocator.
//!
//! This crate implements a user-space memory manager that owns a single
//! contiguous byte region acquired from the host at initialization, and
//! services allocation, deallocation, and in-place resize requests against
//! that region using an out-of-band free list of block metadata.
//!
//!  - **First-fit allocation with splitting.** [`Allocator::alloc`] walks the
//!    record chain in address order and splits the first free record large
//!    enough to satisfy the request.
//!
//!  - **Local coalescing on free.** [`Allocator::free`] merges a freed
//!    record with an immediately adjacent free neighbor on either side, so
//!    no two adjacent records are ever both free.
//!
//!  - **In-place resize when possible.** [`Allocator::resize`] never moves a
//!    block if shrinking or absorbing a free successor in place can satisfy
//!    the new size.
//!
//! This is not a general-purpose allocator: it manages exactly one pool at a
//! time, is not thread-safe in its own right (see [`global`] for the
//! process-wide wrapper), and makes no alignment guarantees beyond what the
//! host allocator gives the backing region.
//!
//! # Example
//!
//! ```
//! use pool_alloc::Allocator;
//!
//! let mut pool = Allocator::init(1024).unwrap();
//! let a = pool.alloc(100).unwrap();
//! let b = pool.alloc(200).unwrap();
//! pool.free(a);
//! let c = pool.resize(b, 300).unwrap();
//! pool.free(c);
//! ```
mod allocator;
mod block;
pub mod global;
mod pool;

pub use allocator::Allocator;
