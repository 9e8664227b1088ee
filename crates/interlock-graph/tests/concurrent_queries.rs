//! Concurrent query integration tests.
//!
//! A built graph is read-only, so any number of threads can query one
//! instance at the same time without locks and see identical results.

use interlock_core::{Category, EdgeRecord, EntityId};
use interlock_graph::RelationshipsGraph;
use std::sync::{Arc, Barrier};
use std::thread;

/// Board-style network: 10 organizations, 40 people, each person sits on
/// the boards of a few organizations.
fn board_network() -> RelationshipsGraph {
    let mut records = Vec::new();
    let mut id = 0u64;
    for person in 100..140u64 {
        for offset in 0..3u64 {
            let org = (person * 7 + offset * 3) % 10;
            id += 1;
            records.push(EdgeRecord::new(id, person, org, Category::Position));
        }
    }
    RelationshipsGraph::build(records).expect("Failed to build graph")
}

#[test]
fn test_graph_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RelationshipsGraph>();
}

/// Test that multiple readers get the same answers as a single reader.
#[test]
fn test_concurrent_readers() {
    let graph = Arc::new(board_network());
    let roots = [EntityId(0), EntityId(100)];

    let expected_interlocks = graph.sorted_interlocks(roots);
    let expected_levels = graph.connected_nodes(roots, 3).expect("valid depth");
    assert!(!expected_interlocks.is_empty());

    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                // Wait for all threads to be ready
                barrier.wait();

                let interlocks = graph.sorted_interlocks(roots);
                let levels = graph.connected_nodes(roots, 3).expect("valid depth");
                (interlocks, levels)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (interlocks, levels) = handle
            .join()
            .unwrap_or_else(|_| panic!("Reader thread {} panicked", i));
        assert_eq!(interlocks, expected_interlocks, "Reader {} interlocks differ", i);
        assert_eq!(levels, expected_levels, "Reader {} levels differ", i);
    }
}

/// Scoped threads can borrow the graph directly.
#[test]
fn test_scoped_readers_borrow_graph() {
    let graph = board_network();

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..10u64)
            .map(|org| {
                let graph = &graph;
                scope.spawn(move || graph.sorted_interlocks([EntityId(org)]).len())
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("Reader thread panicked"))
            .collect()
    });

    for (org, count) in counts.into_iter().enumerate() {
        assert_eq!(count, graph.sorted_interlocks([EntityId(org as u64)]).len());
    }
}
