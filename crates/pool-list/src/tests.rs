use super::*;

fn pool(size: usize) -> Allocator {
    Allocator::init(size).unwrap()
}

fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn insert_builds_list_in_order() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);
    insert(&mut alloc, &mut head, 2);
    insert(&mut alloc, &mut head, 3);

    let values: Vec<u16> = {
        let mut out = Vec::new();
        let mut current = head;
        while let Some(cur) = current {
            out.push(cur.data());
            current = cur.next();
        }
        out
    };
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(count(head), 3);
}

#[test]
fn insert_after_splices_in_place() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);
    insert(&mut alloc, &mut head, 3);
    let one = search(head, 1).unwrap();
    insert_after(&mut alloc, one, 2);

    let values: Vec<u16> = (0..count(head))
        .scan(head, |cur, _| {
            let node = cur.unwrap();
            *cur = node.next();
            Some(node.data())
        })
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn insert_before_updates_head() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 2);
    let two = head.unwrap();
    insert_before(&mut alloc, &mut head, two, 1);

    assert_eq!(head.unwrap().data(), 1);
    assert_eq!(count(head), 2);
}

#[test]
fn insert_before_unreachable_successor_is_noop() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);

    // A node allocated in a different pool can never be reached by walking
    // `head`'s chain.
    let mut other_alloc = pool(4096);
    let mut other_head = None;
    insert(&mut other_alloc, &mut other_head, 99);
    let foreign = other_head.unwrap();

    insert_before(&mut alloc, &mut head, foreign, 42);
    assert_eq!(count(head), 1);
}

#[test]
fn delete_removes_matching_node_and_frees_it() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);
    insert(&mut alloc, &mut head, 2);
    insert(&mut alloc, &mut head, 3);

    delete(&mut alloc, &mut head, 2);
    assert_eq!(count(head), 2);
    assert!(search(head, 2).is_none());
    assert!(search(head, 1).is_some());
    assert!(search(head, 3).is_some());
}

#[test]
fn delete_head_updates_head_pointer() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);
    insert(&mut alloc, &mut head, 2);

    delete(&mut alloc, &mut head, 1);
    assert_eq!(head.unwrap().data(), 2);
}

#[test]
fn search_returns_none_when_absent() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    insert(&mut alloc, &mut head, 1);
    assert!(search(head, 42).is_none());
}

#[test]
fn count_of_empty_list_is_zero() {
    assert_eq!(count(None), 0);
}

#[test]
fn cleanup_frees_every_node_and_resets_head() {
    init_test_logger();
    let mut alloc = pool(4096);
    let mut head = None;
    for v in 0..10u16 {
        insert(&mut alloc, &mut head, v);
    }
    cleanup(&mut alloc, &mut head);
    assert!(head.is_none());
    assert_eq!(count(head), 0);

    // Every node's storage must have been returned to the pool.
    assert!(alloc.alloc(4096).is_some());
}
