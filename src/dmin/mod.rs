//! Minimum sum of edge lengths (Dmin) solvers.
//!
//! This module provides exact solvers for three variants of the problem:
//!
//! | Function | Constraint on the arrangement | Algorithms |
//! |----------|-------------------------------|------------|
//! | [`min_sum_edge_lengths`] | none | [`UnconstrainedAlgorithm::Shiloach`], [`UnconstrainedAlgorithm::Chung`] |
//! | [`min_sum_edge_lengths_planar`] | no edge crossings | [`PlanarAlgorithm::AlemanyEstebanFerrer`], [`PlanarAlgorithm::HochbergStallmann`] |
//! | [`min_sum_edge_lengths_projective`] | no crossings, root not covered | [`ProjectiveAlgorithm::AlemanyEstebanFerrer`], [`ProjectiveAlgorithm::HochbergStallmann`] |
//!
//! # Choosing an Algorithm
//!
//! Every solver is exact, so the choice only affects running time and which
//! of the optimal arrangements is returned:
//!
//! - **Unconstrained:** [`UnconstrainedAlgorithm::Shiloach`] (default) keeps
//!   at most two candidate layouts per component;
//!   [`UnconstrainedAlgorithm::Chung`] tries a placement vector per candidate
//!   subtree and is the simpler reference to compare against.
//! - **Planar and projective:** the interval-based
//!   `AlemanyEstebanFerrer` variant (default) and the displacement-based
//!   `HochbergStallmann` variant produce equally good layouts.
//!
//! # Verification
//!
//! Every solver reports its cost incrementally while it builds the
//! arrangement. The dispatch functions recompute the cost of the returned
//! arrangement from scratch and fail with
//! [`LinarrError::AlgorithmMismatch`](crate::error::LinarrError::AlgorithmMismatch)
//! if the two disagree, so a bookkeeping bug can never silently report a
//! wrong optimum.
//!
//! # Example
//!
//! ```
//! use linarr_rs::dmin::{min_sum_edge_lengths, UnconstrainedAlgorithm};
//! use linarr_rs::tree::FreeTree;
//!
//! let tree = FreeTree::from_edges(4, &[(0, 1), (1, 2), (2, 3)])?;
//! let result = min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::default())?;
//! assert_eq!(result.cost, 3);
//! # Ok::<(), linarr_rs::error::LinarrError>(())
//! ```

mod common;
mod planar;
mod projective;
mod unconstrained;

pub use planar::PlanarAlgorithm;
pub use projective::ProjectiveAlgorithm;
pub use unconstrained::UnconstrainedAlgorithm;

use crate::arrangement::LinearArrangement;
use crate::error::{LinarrError, Result};
use crate::tree::{FreeTree, RootedTree};

/// Outcome of a Dmin solver: the minimum cost and an arrangement attaining it.
#[derive(Debug, Clone)]
pub struct DminResult {
    pub cost: u64,
    pub arrangement: LinearArrangement,
}

/// Minimum sum of edge lengths of `tree` over all arrangements.
pub fn min_sum_edge_lengths(
    tree: &FreeTree,
    algorithm: UnconstrainedAlgorithm,
) -> Result<DminResult> {
    let (cost, pos) = unconstrained::solve(tree, algorithm);
    verified(tree, &format!("{:?}", algorithm), cost, pos)
}

/// Minimum sum of edge lengths of `tree` over arrangements without edge
/// crossings.
pub fn min_sum_edge_lengths_planar(
    tree: &FreeTree,
    algorithm: PlanarAlgorithm,
) -> Result<DminResult> {
    let (cost, pos) = planar::solve(tree, algorithm);
    verified(tree, &format!("{:?}", algorithm), cost, pos)
}

/// Minimum sum of edge lengths of `rooted` over projective arrangements,
/// those without crossings where no edge covers the root.
///
/// Requires valid cached subtree sizes; call
/// [`RootedTree::compute_subtree_sizes`] first.
pub fn min_sum_edge_lengths_projective(
    rooted: &RootedTree,
    algorithm: ProjectiveAlgorithm,
) -> Result<DminResult> {
    let (cost, pos) = projective::solve(rooted, algorithm)?;
    verified(rooted.tree(), &format!("{:?}", algorithm), cost, pos)
}

/// Recomputes the cost of `pos` with a plain adjacency scan and cross-checks
/// the solver's accumulated cost before handing the result out.
fn verified(tree: &FreeTree, algorithm: &str, cost: u64, pos: Vec<usize>) -> Result<DminResult> {
    let mut check = 0u64;
    for u in 0..tree.num_nodes() {
        for &v in tree.neighbors(u) {
            if u < v {
                check += pos[u].abs_diff(pos[v]) as u64;
            }
        }
    }
    if check != cost {
        return Err(LinarrError::AlgorithmMismatch(format!(
            "{}: solver reported cost {} but its arrangement costs {}",
            algorithm, cost, check
        )));
    }
    Ok(DminResult {
        cost,
        arrangement: LinearArrangement::from_direct_positions(pos),
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::crossings::{num_crossings, CrossingsAlgorithm};
    use crate::linarr::{is_projective, sum_edge_lengths};

    const UNCONSTRAINED: [UnconstrainedAlgorithm; 2] =
        [UnconstrainedAlgorithm::Shiloach, UnconstrainedAlgorithm::Chung];
    const PLANAR: [PlanarAlgorithm; 2] = [
        PlanarAlgorithm::AlemanyEstebanFerrer,
        PlanarAlgorithm::HochbergStallmann,
    ];
    const PROJECTIVE: [ProjectiveAlgorithm; 2] = [
        ProjectiveAlgorithm::AlemanyEstebanFerrer,
        ProjectiveAlgorithm::HochbergStallmann,
    ];

    /// Decodes a Pruefer sequence into the labeled tree it encodes.
    fn tree_from_pruefer(seq: &[usize], n: usize) -> FreeTree {
        let mut degree = vec![1usize; n];
        for &v in seq {
            degree[v] += 1;
        }
        let mut edges = Vec::with_capacity(n - 1);
        for &v in seq {
            let leaf = (0..n).find(|&u| degree[u] == 1).unwrap();
            edges.push((leaf, v));
            degree[leaf] = 0;
            degree[v] -= 1;
        }
        let mut ends = (0..n).filter(|&u| degree[u] == 1);
        let a = ends.next().unwrap();
        let b = ends.next().unwrap();
        edges.push((a, b));
        FreeTree::from_edges(n, &edges).unwrap()
    }

    /// All n^(n-2) labeled trees on n vertices.
    fn all_labeled_trees(n: usize) -> Vec<FreeTree> {
        if n == 2 {
            return vec![FreeTree::from_edges(2, &[(0, 1)]).unwrap()];
        }
        let count = n.pow((n - 2) as u32);
        let mut trees = Vec::with_capacity(count);
        for code in 0..count {
            let mut seq = vec![0usize; n - 2];
            let mut c = code;
            for s in seq.iter_mut() {
                *s = c % n;
                c /= n;
            }
            trees.push(tree_from_pruefer(&seq, n));
        }
        trees
    }

    fn permutations(n: usize) -> Vec<Vec<usize>> {
        let mut all = Vec::new();
        let mut items: Vec<usize> = (0..n).collect();
        heap_permutations(&mut items, n, &mut all);
        all
    }

    fn heap_permutations(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
        if k == 1 {
            out.push(items.clone());
            return;
        }
        for i in 0..k {
            heap_permutations(items, k - 1, out);
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
    }

    /// Minimum cost over all arrangements satisfying `accept`.
    fn exhaustive_min<F>(tree: &FreeTree, accept: F) -> u64
    where
        F: Fn(&LinearArrangement) -> bool,
    {
        let mut best = u64::MAX;
        for perm in permutations(tree.num_nodes()) {
            let arr = LinearArrangement::from_inverse(perm).unwrap();
            if accept(&arr) {
                best = best.min(sum_edge_lengths(tree, Some(&arr)).unwrap());
            }
        }
        best
    }

    fn family_trees() -> Vec<FreeTree> {
        vec![
            // path
            FreeTree::from_edges(7, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]).unwrap(),
            // star
            FreeTree::from_edges(7, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]).unwrap(),
            // spider with three legs of length two
            FreeTree::from_edges(7, &[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)]).unwrap(),
            // complete binary tree
            FreeTree::from_edges(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]).unwrap(),
            // caterpillar: spine 0-1-2-3 with leaves on 1 and 2
            FreeTree::from_edges(6, &[(0, 1), (1, 2), (2, 3), (1, 4), (2, 5)]).unwrap(),
        ]
    }

    #[test]
    fn test_unconstrained_exhaustive_all_small_trees() {
        for n in 2..=6 {
            for tree in all_labeled_trees(n) {
                let best = exhaustive_min(&tree, |_| true);
                for algorithm in UNCONSTRAINED {
                    let result = min_sum_edge_lengths(&tree, algorithm).unwrap();
                    assert_eq!(result.cost, best, "{:?} on n = {}", algorithm, n);
                }
            }
        }
    }

    #[test]
    fn test_unconstrained_agreement_all_seven_vertex_trees() {
        // Exhaustive search over 7! arrangements per tree is too slow here;
        // the two independent algorithms must still agree on every tree.
        for (code, tree) in all_labeled_trees(7).into_iter().enumerate() {
            let a = min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::Shiloach).unwrap();
            let b = min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::Chung).unwrap();
            assert_eq!(a.cost, b.cost, "tree code {}", code);
        }
    }

    #[test]
    fn test_unconstrained_exhaustive_families() {
        for tree in family_trees() {
            let best = exhaustive_min(&tree, |_| true);
            for algorithm in UNCONSTRAINED {
                let result = min_sum_edge_lengths(&tree, algorithm).unwrap();
                assert_eq!(result.cost, best, "{:?}", algorithm);
            }
        }
    }

    #[test]
    fn test_planar_exhaustive_all_small_trees() {
        for n in 2..=5 {
            for tree in all_labeled_trees(n) {
                let best = exhaustive_min(&tree, |arr| {
                    num_crossings(&tree, Some(arr), CrossingsAlgorithm::BruteForce).unwrap() == 0
                });
                for algorithm in PLANAR {
                    let result = min_sum_edge_lengths_planar(&tree, algorithm).unwrap();
                    assert_eq!(result.cost, best, "{:?} on n = {}", algorithm, n);
                    assert_eq!(
                        num_crossings(
                            &tree,
                            Some(&result.arrangement),
                            CrossingsAlgorithm::default()
                        )
                        .unwrap(),
                        0
                    );
                }
            }
        }
    }

    #[test]
    fn test_planar_exhaustive_families() {
        for tree in family_trees() {
            let best = exhaustive_min(&tree, |arr| {
                num_crossings(&tree, Some(arr), CrossingsAlgorithm::BruteForce).unwrap() == 0
            });
            for algorithm in PLANAR {
                let result = min_sum_edge_lengths_planar(&tree, algorithm).unwrap();
                assert_eq!(result.cost, best, "{:?}", algorithm);
            }
        }
    }

    #[test]
    fn test_projective_exhaustive_all_small_trees() {
        for n in 2..=5 {
            for tree in all_labeled_trees(n) {
                for root in [0, n - 1] {
                    let mut rooted = RootedTree::new(tree.clone(), root).unwrap();
                    rooted.compute_subtree_sizes();
                    let best = exhaustive_min(&tree, |arr| {
                        is_projective(&rooted, Some(arr)).unwrap()
                    });
                    for algorithm in PROJECTIVE {
                        let result =
                            min_sum_edge_lengths_projective(&rooted, algorithm).unwrap();
                        assert_eq!(result.cost, best, "{:?}, root {}", algorithm, root);
                        assert!(is_projective(&rooted, Some(&result.arrangement)).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn test_constraint_hierarchy() {
        // More constrained optima can only get worse.
        for tree in family_trees() {
            let free = min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::default())
                .unwrap()
                .cost;
            let planar = min_sum_edge_lengths_planar(&tree, PlanarAlgorithm::default())
                .unwrap()
                .cost;
            assert!(free <= planar);
            for root in 0..tree.num_nodes() {
                let mut rooted = RootedTree::new(tree.clone(), root).unwrap();
                rooted.compute_subtree_sizes();
                let projective =
                    min_sum_edge_lengths_projective(&rooted, ProjectiveAlgorithm::default())
                        .unwrap()
                        .cost;
                assert!(planar <= projective, "root {}", root);
            }
        }
    }

    #[test]
    fn test_path4_all_levels() {
        let tree = FreeTree::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut rooted = RootedTree::new(tree.clone(), 0).unwrap();
        rooted.compute_subtree_sizes();
        for algorithm in UNCONSTRAINED {
            assert_eq!(min_sum_edge_lengths(&tree, algorithm).unwrap().cost, 3);
        }
        for algorithm in PLANAR {
            assert_eq!(
                min_sum_edge_lengths_planar(&tree, algorithm).unwrap().cost,
                3
            );
        }
        for algorithm in PROJECTIVE {
            assert_eq!(
                min_sum_edge_lengths_projective(&rooted, algorithm)
                    .unwrap()
                    .cost,
                3
            );
        }
    }

    #[test]
    fn test_singleton_all_levels() {
        let tree = FreeTree::from_edges(1, &[]).unwrap();
        let mut rooted = RootedTree::new(tree.clone(), 0).unwrap();
        rooted.compute_subtree_sizes();
        assert_eq!(
            min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::default())
                .unwrap()
                .cost,
            0
        );
        assert_eq!(
            min_sum_edge_lengths_planar(&tree, PlanarAlgorithm::default())
                .unwrap()
                .cost,
            0
        );
        assert_eq!(
            min_sum_edge_lengths_projective(&rooted, ProjectiveAlgorithm::default())
                .unwrap()
                .cost,
            0
        );
    }

    #[test]
    fn test_projective_requires_sizes() {
        let rooted = RootedTree::from_edges(3, 0, &[(0, 1), (1, 2)]).unwrap();
        let err =
            min_sum_edge_lengths_projective(&rooted, ProjectiveAlgorithm::default()).unwrap_err();
        assert_eq!(err, LinarrError::StaleOrMissingSubtreeSizes);
    }

    #[test]
    fn test_accepts_non_normalized_tree() {
        // Adjacency lists out of order; the solvers never rely on edges().
        let tree =
            FreeTree::from_adjacency(vec![vec![1], vec![2, 0], vec![1]]).unwrap();
        assert!(!tree.is_normalized());
        for algorithm in UNCONSTRAINED {
            assert_eq!(min_sum_edge_lengths(&tree, algorithm).unwrap().cost, 2);
        }
        for algorithm in PLANAR {
            assert_eq!(
                min_sum_edge_lengths_planar(&tree, algorithm).unwrap().cost,
                2
            );
        }
    }
}
