use crate::error::{LinarrError, Result};
use crate::numeric::{Integer, Rational};
use crate::tree::{FreeTree, RootedTree};

/// The centroid of a free tree: the vertex minimizing the largest component
/// left after its removal.
///
/// Returns the centroidal vertex of smallest label, plus the second one when
/// the tree has an even split. A tree never has more than two.
pub fn centroid(tree: &FreeTree) -> (usize, Option<usize>) {
    let n = tree.num_nodes();
    if n == 1 {
        return (0, None);
    }
    let (size, parent) = tree.rooted_subtree_sizes(0);
    let mut best = usize::MAX;
    let mut found: Vec<usize> = Vec::new();
    for v in 0..n {
        let mut largest = 0;
        for &u in tree.neighbors(v) {
            let comp = if u == parent[v] { n - size[v] } else { size[u] };
            largest = largest.max(comp);
        }
        if largest < best {
            best = largest;
            found.clear();
            found.push(v);
        } else if largest == best {
            found.push(v);
        }
    }
    assert!(found.len() <= 2, "a tree has at most two centroidal vertices");
    (found[0], found.get(1).copied())
}

/// The p-th moment of the degree distribution, `(1/n) * sum deg(v)^p`, exactly.
pub fn moment_degree(tree: &FreeTree, p: u32) -> Rational {
    let mut sum = Integer::new(0);
    for v in 0..tree.num_nodes() {
        sum = sum + Integer::from(tree.degree(v)).pow(p);
    }
    // n >= 1, so the denominator is never zero.
    Rational::from_integer(sum) / Rational::from_integer(Integer::from(tree.num_nodes()))
}

/// Floating companion of [`moment_degree`].
pub fn moment_degree_f64(tree: &FreeTree, p: u32) -> f64 {
    moment_degree(tree, p).to_f64()
}

/// The number of pairs of independent (vertex-disjoint) edges,
/// `|Q| = (m(m+1) - sum deg(v)^2) / 2`.
pub fn num_pairs_independent_edges(tree: &FreeTree) -> u64 {
    let m = tree.num_edges() as u64;
    let sum_sq_deg: u64 = (0..tree.num_nodes()).map(|v| (tree.degree(v) as u64).pow(2)).sum();
    (m * (m + 1) - sum_sq_deg) / 2
}

/// The sum of vertex depths of a rooted tree (root depth 0).
pub fn sum_hierarchical_distance(rooted: &RootedTree) -> u64 {
    let (order, parent) = rooted.tree().bfs_from(rooted.root());
    let mut depth = vec![0u64; rooted.num_nodes()];
    let mut sum = 0u64;
    // BFS order visits parents before children.
    for &v in order.iter().skip(1) {
        depth[v] = depth[parent[v]] + 1;
        sum += depth[v];
    }
    sum
}

/// The mean vertex depth `sum_hierarchical_distance / m`, exactly.
///
/// Fails with [`LinarrError::DivisionByZero`] on a single-vertex tree.
pub fn mean_hierarchical_distance(rooted: &RootedTree) -> Result<Rational> {
    let m = rooted.num_edges();
    if m == 0 {
        return Err(LinarrError::DivisionByZero);
    }
    Rational::new(
        Integer::from(sum_hierarchical_distance(rooted)),
        Integer::from(m),
    )
}
