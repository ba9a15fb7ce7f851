//! A singly-linked list of 16-bit unsigned values whose node storage comes
//! from a [`pool_alloc::Allocator`].
//!
//! This crate exists only to demonstrate that the allocator can satisfy a
//! typical heterogeneous allocation/free pattern; it is not part of the
//! allocator's own contract. The caller owns the pool's lifecycle — there
//! is deliberately no `list_init` that reaches back into the allocator on
//! the list's behalf; construct the pool yourself and pass it in.
use std::fmt::Write as _;
use std::ptr::NonNull;

use pool_alloc::Allocator;

#[repr(C)]
struct Node {
    data: u16,
    next: Option<NodeHandle>,
}

/// A handle to one list node living inside a pool.
///
/// Node storage is not guaranteed to be aligned for `Node` (the pool makes
/// no alignment promises beyond the host's), so every field access goes
/// through `read_unaligned`/`write_unaligned` rather than an ordinary
/// reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeHandle(NonNull<u8>);

impl NodeHandle {
    fn ptr(self) -> *mut Node {
        self.0.as_ptr().cast()
    }

    fn read(self) -> Node {
        unsafe { self.ptr().read_unaligned() }
    }

    fn write(self, node: Node) {
        unsafe { self.ptr().write_unaligned(node) }
    }

    fn data(self) -> u16 {
        self.read().data
    }

    fn next(self) -> Option<NodeHandle> {
        self.read().next
    }

    fn set_next(self, next: Option<NodeHandle>) {
        let mut node = self.read();
        node.next = next;
        self.write(node);
    }

    /// The raw address backing this node, for comparison against an
    /// allocator-returned address or for freeing.
    pub fn addr(self) -> NonNull<u8> {
        self.0
    }
}

fn new_node(alloc: &mut Allocator, data: u16) -> Option<NodeHandle> {
    let addr = alloc.alloc(std::mem::size_of::<Node>())?;
    let handle = NodeHandle(addr);
    handle.write(Node { data, next: None });
    Some(handle)
}

/// Appends `value` at the tail of the list, becoming the head if the list
/// was empty. Logs and leaves the list unchanged if the pool is exhausted.
pub fn insert(alloc: &mut Allocator, head: &mut Option<NodeHandle>, value: u16) {
    let Some(new) = new_node(alloc, value) else {
        log::warn!("pool_list: insert({value}) failed: pool exhausted");
        return;
    };

    match head {
        None => *head = Some(new),
        Some(h) => {
            let mut current = *h;
            while let Some(next) = current.next() {
                current = next;
            }
            current.set_next(Some(new));
        }
    }
}

/// Splices a new node containing `value` immediately after `node`.
pub fn insert_after(alloc: &mut Allocator, node: NodeHandle, value: u16) {
    let Some(new) = new_node(alloc, value) else {
        log::warn!("pool_list: insert_after({value}) failed: pool exhausted");
        return;
    };
    new.set_next(node.next());
    node.set_next(Some(new));
}

/// Splices a new node containing `value` immediately before `succ`,
/// updating `head` if `succ` was the head. If `succ` is not reachable from
/// `head`, the newly allocated node is released and the list is left
/// unchanged.
pub fn insert_before(
    alloc: &mut Allocator,
    head: &mut Option<NodeHandle>,
    succ: NodeHandle,
    value: u16,
) {
    let Some(new) = new_node(alloc, value) else {
        log::warn!("pool_list: insert_before({value}) failed: pool exhausted");
        return;
    };

    if *head == Some(succ) {
        new.set_next(Some(succ));
        *head = Some(new);
        return;
    }

    let mut current = *head;
    while let Some(cur) = current {
        if cur.next() == Some(succ) {
            new.set_next(Some(succ));
            cur.set_next(Some(new));
            return;
        }
        current = cur.next();
    }

    // `succ` is not reachable from `head`: release the orphaned node.
    log::warn!("pool_list: insert_before: successor not found in list");
    alloc.free(new.addr());
}

/// Removes the first node whose payload equals `value` and frees its
/// storage. A no-op if no such node exists.
pub fn delete(alloc: &mut Allocator, head: &mut Option<NodeHandle>, value: u16) {
    let Some(h) = *head else { return };

    if h.data() == value {
        *head = h.next();
        alloc.free(h.addr());
        return;
    }

    let mut prev = h;
    let mut current = h.next();
    while let Some(cur) = current {
        if cur.data() == value {
            prev.set_next(cur.next());
            alloc.free(cur.addr());
            return;
        }
        prev = cur;
        current = cur.next();
    }
}

/// Returns the first node whose payload equals `value`, if any.
pub fn search(head: Option<NodeHandle>, value: u16) -> Option<NodeHandle> {
    let mut current = head;
    while let Some(cur) = current {
        if cur.data() == value {
            return Some(cur);
        }
        current = cur.next();
    }
    None
}

/// Prints every payload in order, delimited as `[v1 , v2 , ... , vk , ]`.
/// Prints a sentinel message if the list is empty.
pub fn display(head: Option<NodeHandle>) {
    display_range(head, None, None);
}

/// Like [`display`], but only from `start` (or the head, if `None`) through
/// `end` (or the tail, if `None`), inclusive.
pub fn display_range(head: Option<NodeHandle>, start: Option<NodeHandle>, end: Option<NodeHandle>) {
    if head.is_none() {
        println!("The list is empty.");
        return;
    }

    let mut current = start.or(head);
    let mut out = String::from("[");
    while let Some(cur) = current {
        let _ = write!(out, "{} , ", cur.data());
        if Some(cur) == end {
            break;
        }
        current = cur.next();
    }
    out.push(']');
    println!("{out}");
}

/// The number of nodes reachable from `head`.
pub fn count(head: Option<NodeHandle>) -> usize {
    let mut n = 0;
    let mut current = head;
    while let Some(cur) = current {
        n += 1;
        current = cur.next();
    }
    n
}

/// Frees every node and resets `head` to empty.
pub fn cleanup(alloc: &mut Allocator, head: &mut Option<NodeHandle>) {
    let mut current = head.take();
    while let Some(cur) = current {
        let next = cur.next();
        alloc.free(cur.addr());
        current = next;
    }
}

#[cfg(test)]
mod tests;
