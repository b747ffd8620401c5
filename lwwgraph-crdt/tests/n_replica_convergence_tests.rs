//! N-replica convergence tests.
//!
//! These tests simulate several replicas editing one graph offline and
//! exchanging state in different topologies:
//! 1. Gossip between fixed neighbour pairs (ring), not full mesh
//! 2. Chain/transitive convergence (A→B→C achieves global convergence)
//! 3. Out-of-order delivery of causally related operations
//! 4. Tombstone churn (many add/remove cycles on the same vertex)

use lwwgraph_crdt::{Edge, LwwDiGraph, LwwSet, Timestamp};
use pretty_assertions::assert_eq;

fn ts(t: i64) -> Timestamp {
    Timestamp::new(t)
}

fn edge(src: u64, target: u64) -> Edge<u64> {
    Edge::new(src, target).unwrap()
}

fn assert_all_converged(replicas: &[LwwDiGraph]) {
    for (i, replica) in replicas.iter().enumerate().skip(1) {
        assert_eq!(replica, &replicas[0], "replica {i} diverged");
        assert_eq!(replica.vertices(), replicas[0].vertices());
        assert_eq!(replica.edges(), replicas[0].edges());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 1. GOSSIP RING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ring_gossip_converges() {
    let n = 6u64;
    let mut replicas: Vec<LwwDiGraph> = (0..n).map(|_| LwwDiGraph::new()).collect();

    // Replica i owns vertex i and links it to its successor.
    for (i, replica) in replicas.iter_mut().enumerate() {
        let i = i as u64;
        replica.add_vertex(i, ts(i as i64));
        replica
            .add_edge(i, (i + 1) % n, ts(100 + i as i64))
            .unwrap();
    }

    // Each round every replica pulls from its left neighbour only.
    for _ in 0..n {
        let snapshot = replicas.clone();
        for (i, replica) in replicas.iter_mut().enumerate() {
            let left = (i + n as usize - 1) % n as usize;
            replica.merge(&snapshot[left]);
        }
    }

    assert_all_converged(&replicas);
    assert_eq!(replicas[0].vertex_count(), n as usize);
    assert_eq!(replicas[0].edge_count(), n as usize);
    assert_eq!(replicas[0].list_all_path(&0, &(n - 1)).len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// 2. CHAIN CONVERGENCE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chain_merge_is_transitive() {
    let mut a = LwwDiGraph::new();
    a.add_vertex(1, ts(1));
    let mut b = LwwDiGraph::new();
    b.add_vertex(2, ts(2));
    let mut c = LwwDiGraph::new();
    c.add_edge(1, 2, ts(3)).unwrap();

    b.merge(&a);
    c.merge(&b);
    a.merge(&c);
    b.merge(&c);

    assert_all_converged(&[a, b, c]);
}

// ═══════════════════════════════════════════════════════════════════════════
// 3. OUT-OF-ORDER DELIVERY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn edge_delivered_before_its_vertices() {
    // Author creates vertices then the edge; a reader receives the edge first.
    let mut author = LwwDiGraph::new();
    author.add_vertex(10, ts(1)).add_vertex(20, ts(2));
    author.add_edge(10, 20, ts(3)).unwrap();

    let mut edge_only = LwwDiGraph::new();
    edge_only.add_edge(10, 20, ts(3)).unwrap();
    let mut vertex_10 = LwwDiGraph::new();
    vertex_10.add_vertex(10, ts(1));
    let mut vertex_20 = LwwDiGraph::new();
    vertex_20.add_vertex(20, ts(2));

    let mut reader = LwwDiGraph::new();
    reader.merge(&edge_only);
    assert_eq!(reader.edge_count(), 0);
    reader.merge(&vertex_20);
    assert_eq!(reader.edge_count(), 0);
    reader.merge(&vertex_10);
    assert_eq!(reader.edges(), vec![edge(10, 20)]);

    assert_all_converged(&[author, reader]);
}

#[test]
fn vertex_removal_delivered_before_its_add() {
    let mut reader = LwwDiGraph::new();
    reader.remove_vertex(5, ts(9));

    let mut author = LwwDiGraph::new();
    author.add_vertex(5, ts(4));
    reader.merge(&author);

    assert!(!reader.vertex_exist(&5));
    let mut full = author.clone();
    full.remove_vertex(5, ts(9));
    assert_all_converged(&[full, reader]);
}

#[test]
fn every_delivery_order_converges() {
    let mut deltas: Vec<LwwDiGraph> = Vec::new();
    let mut d = LwwDiGraph::new();
    d.add_vertex(1, ts(1)).add_vertex(2, ts(1)).add_vertex(3, ts(1));
    deltas.push(d);
    let mut d = LwwDiGraph::new();
    d.add_edge(1, 2, ts(2)).unwrap();
    d.add_edge(2, 3, ts(2)).unwrap();
    deltas.push(d);
    let mut d = LwwDiGraph::new();
    d.remove_vertex(3, ts(3));
    deltas.push(d);
    let mut d = LwwDiGraph::new();
    d.remove_edge(edge(2, 3), ts(3));
    d.add_edge(1, 3, ts(5)).unwrap();
    deltas.push(d);

    let orders: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [3, 2, 1, 0],
        [1, 3, 0, 2],
        [2, 0, 3, 1],
        [3, 1, 2, 0],
        [2, 3, 1, 0],
    ];
    let replicas: Vec<LwwDiGraph> = orders
        .iter()
        .map(|order| {
            let mut replica = LwwDiGraph::new();
            for &i in order {
                replica.merge(&deltas[i]);
            }
            replica
        })
        .collect();

    assert_all_converged(&replicas);
    assert_eq!(replicas[0].vertices(), vec![1, 2]);
    assert_eq!(replicas[0].edges(), vec![edge(1, 2)]);
}

// ═══════════════════════════════════════════════════════════════════════════
// 4. TOMBSTONE CHURN
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn churned_vertex_converges_to_latest_operation() {
    let mut a = LwwSet::new();
    let mut b = LwwSet::new();
    for round in 0..1000i64 {
        let target = if round % 2 == 0 { &mut a } else { &mut b };
        target.add(7u64, ts(round * 2));
        target.remove(7u64, ts(round * 2 + 1));
    }
    // The final remove (t = 1999) wins on both sides.
    assert_eq!(a.merged(&b), b.merged(&a));
    assert!(!a.merged(&b).exists(&7));

    b.add(7, ts(2000));
    assert!(a.merged(&b).exists(&7));
    assert_eq!(a.merged(&b).added_marks().len(), 1);
}
