//! Exact edge-crossing counts of a tree in a linear arrangement.
//!
//! Two edges cross when their position intervals interleave. This module
//! provides four interchangeable algorithms computing the same number `C`:
//!
//! | Algorithm | Time | Space | Use Case |
//! |-----------|------|-------|----------|
//! | [`Ladder`][CrossingsAlgorithm::Ladder] | O(n^2) | O(n) | Default; lowest constant for typical n |
//! | [`StackBased`][CrossingsAlgorithm::StackBased] | O(m log n) | O(n) | Large sparse instances |
//! | [`DynamicProgramming`][CrossingsAlgorithm::DynamicProgramming] | O(n^2) | O(n^2) | Reference table formulation |
//! | [`BruteForce`][CrossingsAlgorithm::BruteForce] | O(m^2) | O(1) | Oracle for the other three |
//!
//! All four require a normalized tree (edges are enumerated canonically) and
//! agree on every input; that agreement is exercised by the tests below.
//!
//! `C` fits in a `u64` structurally: it is bounded by the number of edge
//! pairs, below n^4 for any feasible tree.

use log::trace;

use crate::arrangement::{self, LinearArrangement};
use crate::error::{LinarrError, Result};
use crate::tree::FreeTree;

/// Algorithm selector for [`num_crossings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingsAlgorithm {
    /// Every pair of independent edges, O(m^2).
    BruteForce,
    /// O(n^2) table of suffix neighbor counts.
    DynamicProgramming,
    /// O(n^2) time, O(n) space rolling accumulator.
    #[default]
    Ladder,
    /// O(m log n) sweep over edges sorted by (left endpoint, length),
    /// counted through a Fenwick tree.
    StackBased,
}

/// Computes the number of edge crossings of `tree` under `arr`.
///
/// `None` means the identity arrangement. Fails with
/// [`LinarrError::NotNormalized`] on a non-normalized tree and with
/// [`LinarrError::PreconditionViolation`] when the arrangement size does not
/// match, before any counting work.
pub fn num_crossings(
    tree: &FreeTree,
    arr: Option<&LinearArrangement>,
    algorithm: CrossingsAlgorithm,
) -> Result<u64> {
    if !tree.is_normalized() {
        return Err(LinarrError::NotNormalized);
    }
    let n = tree.num_nodes();
    let mut slot = None;
    let arr = arrangement::resolve(n, arr, &mut slot)?;
    // A crossing needs two vertex-disjoint edges.
    if n < 4 {
        return Ok(0);
    }
    let edges = tree.edges()?;
    let c = match algorithm {
        CrossingsAlgorithm::BruteForce => brute_force(&edges, arr),
        CrossingsAlgorithm::DynamicProgramming => dynamic_programming(tree, &edges, arr),
        CrossingsAlgorithm::Ladder => ladder(tree, arr),
        CrossingsAlgorithm::StackBased => stack_based(&edges, arr),
    };
    trace!("num_crossings({:?}) = {}", algorithm, c);
    Ok(c)
}

/// Position interval of an edge, smaller endpoint first.
fn edge_interval(arr: &LinearArrangement, u: usize, v: usize) -> (usize, usize) {
    let pu = arr.position(u);
    let pv = arr.position(v);
    if pu < pv {
        (pu, pv)
    } else {
        (pv, pu)
    }
}

fn brute_force(edges: &[(usize, usize)], arr: &LinearArrangement) -> u64 {
    let intervals: Vec<(usize, usize)> = edges.iter().map(|&(u, v)| edge_interval(arr, u, v)).collect();
    let mut c = 0u64;
    for i in 0..intervals.len() {
        let (a1, b1) = intervals[i];
        for &(a2, b2) in &intervals[i + 1..] {
            // Positions are bijective, so sharing a position is sharing a vertex.
            if a1 == a2 || a1 == b2 || b1 == a2 || b1 == b2 {
                continue;
            }
            if (a1 < a2 && a2 < b1 && b1 < b2) || (a2 < a1 && a1 < b2 && b2 < b1) {
                c += 1;
            }
        }
    }
    c
}

/// Table formulation. Row `p` of the table holds, after the prefix pass,
/// `P[p][q]` = number of edges with one endpoint at a position `<= p` and the
/// other strictly right of `q`. For an edge spanning positions `(pu, pv)`,
/// the edges crossing it from inside are exactly those counted by
/// `P[pv-1][pv] - P[pu][pv]`; summing over edges counts each crossing once.
fn dynamic_programming(tree: &FreeTree, edges: &[(usize, usize)], arr: &LinearArrangement) -> u64 {
    let n = tree.num_nodes();
    let seq = arr.sequence();
    let mut table = vec![vec![0u64; n + 1]; n];
    for (p, row) in table.iter_mut().enumerate() {
        for &v in tree.neighbors(seq[p]) {
            row[arr.position(v)] = 1;
        }
        // Suffix sums: row[q] = number of neighbors at positions >= q.
        for q in (0..n).rev() {
            row[q] += row[q + 1];
        }
    }
    // Prefix over rows.
    for p in 1..n {
        for q in 0..=n {
            let prev = table[p - 1][q];
            table[p][q] += prev;
        }
    }
    let mut c = 0u64;
    for &(u, v) in edges {
        let (pu, pv) = edge_interval(arr, u, v);
        if pv - pu < 2 {
            continue;
        }
        // Neighbors "at positions >= pv + 1" is row index pv + 1.
        c += table[pv - 1][pv + 1] - table[pu][pv + 1];
    }
    c
}

fn ladder(tree: &FreeTree, arr: &LinearArrangement) -> u64 {
    let n = tree.num_nodes();
    let seq = arr.sequence();
    let mut c = 0u64;
    // l1[p] = number of edge "rungs" seen so far that end at position p.
    let mut l1 = vec![0u64; n];
    let mut is_neighbor = vec![false; n];
    for pu in 0..n - 1 {
        let u = seq[pu];
        let mut s = 0u64;
        for &v in tree.neighbors(u) {
            is_neighbor[v] = true;
        }
        // Stale marks sit at positions < pu and are never read again.
        for pv in pu + 1..n {
            let v = seq[pv];
            s += l1[pv];
            if is_neighbor[v] {
                c += s - l1[pv];
                l1[pv] += 1;
                is_neighbor[v] = false;
            }
        }
        l1[pu] = 0;
    }
    c
}

fn stack_based(edges: &[(usize, usize)], arr: &LinearArrangement) -> u64 {
    let n = arr.len();
    let m = edges.len();
    // Edges as position intervals, ordered by (left asc, length desc); the
    // rank in this order is the edge's Fenwick index.
    let mut intervals: Vec<(usize, usize)> = edges.iter().map(|&(u, v)| edge_interval(arr, u, v)).collect();
    intervals.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut opens_at: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut closes_at: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, &(l, r)) in intervals.iter().enumerate() {
        opens_at[l].push(idx);
        closes_at[r].push(idx);
    }

    let mut fen = Fenwick::new(m);
    let mut open_total = 0u64;
    let mut c = 0u64;
    for p in 0..n {
        // Close before open: an edge starting at p cannot cross one ending
        // at p (they would share the vertex at p).
        for &idx in closes_at[p].iter().rev() {
            // Open edges with a larger index start strictly inside this edge
            // and end strictly right of p: exactly the crossings.
            c += open_total - fen.prefix(idx);
            fen.remove(idx);
            open_total -= 1;
        }
        for &idx in &opens_at[p] {
            fen.insert(idx);
            open_total += 1;
        }
    }
    c
}

/// Fenwick tree over edge indices, counting which edges are currently open.
struct Fenwick {
    t: Vec<u64>,
}

impl Fenwick {
    fn new(len: usize) -> Self {
        Fenwick { t: vec![0; len + 1] }
    }

    fn insert(&mut self, i: usize) {
        let mut pos = i + 1;
        while pos < self.t.len() {
            self.t[pos] += 1;
            pos += pos & pos.wrapping_neg();
        }
    }

    fn remove(&mut self, i: usize) {
        let mut pos = i + 1;
        while pos < self.t.len() {
            self.t[pos] -= 1;
            pos += pos & pos.wrapping_neg();
        }
    }

    /// Number of open edges with index `<= i`.
    fn prefix(&self, i: usize) -> u64 {
        let mut pos = i + 1;
        let mut sum = 0;
        while pos > 0 {
            sum += self.t[pos];
            pos &= pos - 1;
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const ALL: [CrossingsAlgorithm; 4] = [
        CrossingsAlgorithm::BruteForce,
        CrossingsAlgorithm::DynamicProgramming,
        CrossingsAlgorithm::Ladder,
        CrossingsAlgorithm::StackBased,
    ];

    fn path(n: usize) -> FreeTree {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        FreeTree::from_edges(n, &edges).unwrap()
    }

    fn star(n: usize) -> FreeTree {
        let edges: Vec<_> = (1..n).map(|i| (0, i)).collect();
        FreeTree::from_edges(n, &edges).unwrap()
    }

    /// All permutations of 0..n in a deterministic order (Heap's algorithm).
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        let mut items: Vec<usize> = (0..n).collect();
        let mut out = vec![items.clone()];
        let mut counters = vec![0usize; n];
        let mut i = 0;
        while i < n {
            if counters[i] < i {
                if i % 2 == 0 {
                    items.swap(0, i);
                } else {
                    items.swap(counters[i], i);
                }
                out.push(items.clone());
                counters[i] += 1;
                i = 0;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        out
    }

    #[test]
    fn test_path_identity_has_no_crossings() {
        let t = path(4);
        for algo in ALL {
            assert_eq!(num_crossings(&t, None, algo).unwrap(), 0);
        }
    }

    #[test]
    fn test_path_interleaved() {
        // Sequence 0, 2, 1, 3: edges (0,1) and (2,3) interleave once.
        let t = path(4);
        let arr = LinearArrangement::from_inverse(vec![0, 2, 1, 3]).unwrap();
        for algo in ALL {
            assert_eq!(num_crossings(&t, Some(&arr), algo).unwrap(), 1, "{:?}", algo);
        }
    }

    #[test]
    fn test_path6_shuffled() {
        // Sequence 0, 2, 4, 1, 3, 5: every disjoint edge pair interleaves.
        let t = path(6);
        let arr = LinearArrangement::from_inverse(vec![0, 2, 4, 1, 3, 5]).unwrap();
        for algo in ALL {
            assert_eq!(num_crossings(&t, Some(&arr), algo).unwrap(), 6, "{:?}", algo);
        }
    }

    #[test]
    fn test_star_never_crosses() {
        // Every edge pair of a star shares the center.
        for n in [4, 5] {
            let t = star(n);
            for seq in permutations(n) {
                let arr = LinearArrangement::from_inverse(seq).unwrap();
                for algo in ALL {
                    assert_eq!(num_crossings(&t, Some(&arr), algo).unwrap(), 0);
                }
            }
        }
    }

    #[test]
    fn test_claw_sequence() {
        // Star centered at 1 under the sequence 1, 0, 2, 3.
        let t = FreeTree::from_edges(4, &[(0, 1), (1, 2), (1, 3)]).unwrap();
        let arr = LinearArrangement::from_inverse(vec![1, 0, 2, 3]).unwrap();
        for algo in ALL {
            assert_eq!(num_crossings(&t, Some(&arr), algo).unwrap(), 0);
        }
    }

    #[test]
    fn test_all_algorithms_agree_exhaustively() {
        let trees = [
            path(5),
            star(5),
            // Spider: center 0 with a path 0-1-2 and leaves 3, 4.
            FreeTree::from_edges(5, &[(0, 1), (1, 2), (0, 3), (0, 4)]).unwrap(),
            // Caterpillar: path 0-1-2 with legs 3 at 1, 4 at 2.
            FreeTree::from_edges(5, &[(0, 1), (1, 2), (1, 3), (2, 4)]).unwrap(),
        ];
        for t in &trees {
            for seq in permutations(5) {
                let arr = LinearArrangement::from_inverse(seq).unwrap();
                let oracle = num_crossings(t, Some(&arr), CrossingsAlgorithm::BruteForce).unwrap();
                for algo in ALL {
                    assert_eq!(
                        num_crossings(t, Some(&arr), algo).unwrap(),
                        oracle,
                        "{:?} disagrees on {}",
                        algo,
                        arr
                    );
                }
            }
        }
    }

    #[test]
    fn test_small_trees_have_no_crossings() {
        for n in 1..4 {
            let t = if n == 1 { FreeTree::from_edges(1, &[]).unwrap() } else { path(n) };
            for algo in ALL {
                assert_eq!(num_crossings(&t, None, algo).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_identity_default_equivalence() {
        let t = path(6);
        let id = LinearArrangement::identity(6);
        for algo in ALL {
            assert_eq!(
                num_crossings(&t, None, algo).unwrap(),
                num_crossings(&t, Some(&id), algo).unwrap()
            );
        }
    }

    #[test]
    fn test_requires_normalized() {
        let t = FreeTree::from_adjacency(vec![vec![2, 1], vec![0], vec![0]]).unwrap();
        for algo in ALL {
            assert_eq!(num_crossings(&t, None, algo), Err(LinarrError::NotNormalized));
        }
    }

    #[test]
    fn test_rejects_wrong_arrangement_size() {
        let t = path(4);
        let arr = LinearArrangement::identity(5);
        for algo in ALL {
            assert!(num_crossings(&t, Some(&arr), algo).is_err());
        }
    }
}
