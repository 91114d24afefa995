//! Integration tests for the shared (lock-wrapped) tree.

use std::thread;

use rowindex::SharedBTree;

/// Several writers insert disjoint ranges while readers probe.
#[test]
fn test_concurrent_writers_and_readers() {
    let tree = SharedBTree::new(3).unwrap();

    let writers: Vec<_> = (0..4u32)
        .map(|w| {
            let tree = tree.clone();
            thread::spawn(move || {
                for key in (w * 1000)..(w * 1000 + 500) {
                    tree.insert(key);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let tree = tree.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    // Never inserted by any writer.
                    assert!(!tree.contains(&999));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(tree.len(), 2000);
    for w in 0..4u32 {
        assert!(tree.contains(&(w * 1000)));
        assert!(tree.contains(&(w * 1000 + 499)));
        assert!(!tree.contains(&(w * 1000 + 500)));
    }
    tree.validate().unwrap();
}

/// Handles from a search stay usable under a later read lock.
#[test]
fn test_search_handle_outlives_lock() {
    let tree = SharedBTree::new(2).unwrap();
    for key in 0..100 {
        tree.insert(key);
    }

    let hit = tree.search(&42);
    tree.insert(1000);

    let guard = tree.read();
    let node = guard.node(hit.node().unwrap());
    assert!(node.keys().contains(&42));
}
