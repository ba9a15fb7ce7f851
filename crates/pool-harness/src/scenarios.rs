//! The 21 named scenarios driven by [`crate::main`]: allocator lifecycle,
//! fragmentation, and coalescing scenarios (1-18), plus three scenarios
//! exercising `pool-list` (19-21).
use pool_alloc::Allocator;
use pool_list as list;

/// One named, runnable scenario.
pub struct Scenario {
    pub name: &'static str,
    pub run: fn() -> Result<(), String>,
}

macro_rules! check {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($msg.to_string());
        }
    };
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "mem_init",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init(1024) failed")?;
            let block = pool.alloc(100);
            check!(block.is_some(), "alloc(100) returned null after init");
            pool.free(block.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "alloc_and_free",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(100);
            check!(a.is_some(), "alloc(100) returned null");
            let b = pool.alloc(200);
            check!(b.is_some(), "alloc(200) returned null");
            pool.free(a.unwrap());
            pool.free(b.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "zero_alloc_and_free",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(0);
            check!(a.is_some(), "alloc(0) returned null");
            let b = pool.alloc(200);
            check!(b.is_some(), "alloc(200) returned null");
            check!(a == b, "two back-to-back zero/non-zero allocs did not alias");
            pool.free(a.unwrap());
            pool.free(b.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "random_blocks",
        run: || {
            let pool_size = 64 * 1024;
            let mut pool = Allocator::init(pool_size).ok_or("init failed")?;
            let mut blocks = Vec::new();
            let mut size = 37usize;
            for _ in 0..200 {
                size = (size * 7 + 11) % 512;
                if let Some(b) = pool.alloc(size) {
                    blocks.push(b);
                }
            }
            for b in blocks {
                pool.free(b);
            }
            Ok(())
        },
    },
    Scenario {
        name: "resize",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let block = pool.alloc(100).ok_or("alloc(100) failed")?;
            let block = pool.resize(block, 200);
            check!(block.is_some(), "resize(.., 200) returned null");
            pool.free(block.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "exceed_single_allocation",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            check!(pool.alloc(2048).is_none(), "alloc(2048) on a 1024-byte pool should fail");
            Ok(())
        },
    },
    Scenario {
        name: "exceed_cumulative_allocation",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(512).ok_or("alloc(512) failed")?;
            let b = pool.alloc(512).ok_or("alloc(512) failed")?;
            check!(pool.alloc(100).is_none(), "third alloc should fail: no space left");
            pool.free(a);
            pool.free(b);
            Ok(())
        },
    },
    Scenario {
        name: "memory_overcommit",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(1020).ok_or("alloc(1020) failed")?;
            check!(pool.alloc(10).is_none(), "alloc(10) should fail: exceeds remaining 4 bytes");
            pool.free(a);
            Ok(())
        },
    },
    Scenario {
        name: "boundary_condition",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(1024);
            check!(a.is_some(), "alloc(1024) on a fresh 1024-byte pool should succeed");
            check!(pool.alloc(1).is_none(), "no space left for a 1-byte alloc");
            pool.free(a.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "exact_fit_reuse",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(500).ok_or("alloc(500) failed")?;
            pool.free(a);
            let b = pool.alloc(500).ok_or("alloc(500) failed")?;
            check!(a == b, "exact-fit free space was not reused at the same address");
            pool.free(b);
            Ok(())
        },
    },
    Scenario {
        name: "frequent_small_allocations",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let mut blocks = Vec::with_capacity(50);
            for _ in 0..50 {
                let b = pool.alloc(10);
                check!(b.is_some(), "small alloc(10) returned null");
                blocks.push(b.unwrap());
            }
            for b in blocks {
                pool.free(b);
            }
            Ok(())
        },
    },
    Scenario {
        name: "memory_reuse",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(256).ok_or("alloc(256) failed")?;
            let b = pool.alloc(256).ok_or("alloc(256) failed")?;
            pool.free(a);
            let c = pool.alloc(128).ok_or("alloc(128) failed")?;
            check!(a == c, "freed block1's space was not reused by the smaller alloc");
            pool.free(b);
            pool.free(c);
            Ok(())
        },
    },
    Scenario {
        name: "block_merging",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(200).ok_or("alloc failed")?;
            let b = pool.alloc(200).ok_or("alloc failed")?;
            let c = pool.alloc(200).ok_or("alloc failed")?;
            pool.free(a);
            pool.free(c);
            pool.free(b);
            let d = pool.alloc(600);
            check!(d.is_some(), "merged free space should satisfy a 600-byte request");
            pool.free(d.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "non_contiguous_allocation_failure",
        run: || {
            let mut pool = Allocator::init(800).ok_or("init failed")?;
            let a = pool.alloc(250).ok_or("alloc failed")?;
            let b = pool.alloc(250).ok_or("alloc failed")?;
            let c = pool.alloc(250).ok_or("alloc failed")?;
            pool.free(a);
            pool.free(c);
            check!(
                pool.alloc(500).is_none(),
                "non-contiguous free space must not satisfy a 500-byte request"
            );
            pool.free(b);
            Ok(())
        },
    },
    Scenario {
        name: "contiguous_allocation_success",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(256).ok_or("alloc failed")?;
            let b = pool.alloc(256).ok_or("alloc failed")?;
            let c = pool.alloc(512).ok_or("alloc failed")?;
            pool.free(a);
            pool.free(b);
            let d = pool.alloc(500);
            check!(d.is_some(), "coalesced free space should satisfy a 500-byte request");
            pool.free(c);
            pool.free(d.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "double_free",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let block = pool.alloc(100).ok_or("alloc(100) failed")?;
            pool.free(block);
            pool.free(block); // must be tolerated, not corrupt the pool
            Ok(())
        },
    },
    Scenario {
        name: "memory_fragmentation",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let a = pool.alloc(200).ok_or("alloc failed")?;
            let b = pool.alloc(300).ok_or("alloc failed")?;
            let c = pool.alloc(500).ok_or("alloc failed")?;
            pool.free(a);
            pool.free(c);
            let d = pool.alloc(500);
            check!(d.is_some(), "fragmented-but-coalesced space should fit a 500-byte request");
            pool.free(b);
            pool.free(d.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "edge_case_allocations",
        run: || {
            let mut pool = Allocator::init(1024).ok_or("init failed")?;
            let zero = pool.alloc(0);
            let full = pool.alloc(1024);
            check!(full.is_some(), "alloc(1024) on an otherwise-fresh pool should succeed");
            check!(pool.alloc(1).is_none(), "no space left for a 1-byte alloc");
            if let Some(zero) = zero {
                pool.free(zero);
            }
            pool.free(full.unwrap());
            Ok(())
        },
    },
    Scenario {
        name: "list_basic_operations",
        run: || {
            let mut pool = Allocator::init(4096).ok_or("init failed")?;
            let mut head = None;
            list::insert(&mut pool, &mut head, 10);
            list::insert(&mut pool, &mut head, 20);
            list::insert(&mut pool, &mut head, 30);
            check!(list::count(head) == 3, "expected 3 nodes after three inserts");
            check!(list::search(head, 20).is_some(), "search(20) should find the middle node");
            list::delete(&mut pool, &mut head, 20);
            check!(list::count(head) == 2, "expected 2 nodes after deleting the middle one");
            list::cleanup(&mut pool, &mut head);
            check!(head.is_none(), "cleanup should reset head to empty");
            Ok(())
        },
    },
    Scenario {
        name: "list_insert_before_and_after",
        run: || {
            let mut pool = Allocator::init(4096).ok_or("init failed")?;
            let mut head = None;
            list::insert(&mut pool, &mut head, 1);
            list::insert(&mut pool, &mut head, 3);
            let one = list::search(head, 1).ok_or("node 1 not found")?;
            list::insert_after(&mut pool, one, 2);
            let new_head = head.ok_or("head missing")?;
            list::insert_before(&mut pool, &mut head, new_head, 0);
            check!(list::count(head) == 4, "expected 4 nodes after insert_before/insert_after");
            list::cleanup(&mut pool, &mut head);
            Ok(())
        },
    },
    Scenario {
        name: "list_cleanup_returns_full_capacity",
        run: || {
            let mut pool = Allocator::init(4096).ok_or("init failed")?;
            let mut head = None;
            for v in 0..20u16 {
                list::insert(&mut pool, &mut head, v);
            }
            list::cleanup(&mut pool, &mut head);
            check!(
                pool.alloc(4096).is_some(),
                "a fully cleaned-up list should return the pool to full capacity"
            );
            Ok(())
        },
    },
];
