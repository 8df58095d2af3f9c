//! Planar minimum arrangement solvers.

use log::debug;

use crate::properties;
use crate::tree::FreeTree;

use super::common::{arrange_interval, embed_displacement, sorted_children_lists};

/// Algorithm choice for the planar solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanarAlgorithm {
    /// Interval-based embedding rooted at a centroidal vertex.
    #[default]
    AlemanyEstebanFerrer,
    /// Displacement-based embedding rooted at a centroidal vertex.
    HochbergStallmann,
}

/// An optimal planar arrangement of a free tree is an optimal projective
/// arrangement of the same tree rooted at a centroidal vertex, so both
/// variants root at the centroid and run an embedding kernel.
pub(crate) fn solve(tree: &FreeTree, algorithm: PlanarAlgorithm) -> (u64, Vec<usize>) {
    let n = tree.num_nodes();
    if n == 1 {
        return (0, vec![0]);
    }
    let (c, _) = properties::centroid(tree);
    debug!("planar solver: n = {}, rooting at centroid {}", n, c);
    let (sizes, parent) = tree.rooted_subtree_sizes(c);
    let children = sorted_children_lists(tree, c, &parent, &sizes);
    match algorithm {
        PlanarAlgorithm::AlemanyEstebanFerrer => arrange_interval(&children, c, n),
        PlanarAlgorithm::HochbergStallmann => embed_displacement(&children, c, n),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::arrangement::LinearArrangement;
    use crate::crossings::{num_crossings, CrossingsAlgorithm};
    use crate::linarr::sum_edge_lengths;

    const BOTH: [PlanarAlgorithm; 2] = [
        PlanarAlgorithm::AlemanyEstebanFerrer,
        PlanarAlgorithm::HochbergStallmann,
    ];

    fn check(tree: &FreeTree, expected: u64) {
        for algorithm in BOTH {
            let (cost, pos) = solve(tree, algorithm);
            let arr = LinearArrangement::from_direct(pos).unwrap();
            assert_eq!(cost, expected, "{:?}", algorithm);
            assert_eq!(sum_edge_lengths(tree, Some(&arr)).unwrap(), cost);
            assert_eq!(
                num_crossings(tree, Some(&arr), CrossingsAlgorithm::BruteForce).unwrap(),
                0,
                "{:?} produced a non-planar arrangement",
                algorithm
            );
        }
    }

    #[test]
    fn test_singleton() {
        let tree = FreeTree::from_edges(1, &[]).unwrap();
        check(&tree, 0);
    }

    #[test]
    fn test_path() {
        for n in 2..=9 {
            let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
            let tree = FreeTree::from_edges(n, &edges).unwrap();
            check(&tree, (n - 1) as u64);
        }
    }

    #[test]
    fn test_star() {
        // k leaves around the center cost 1, 1, 2, 2, 3, 3, ...
        for k in 1..=6 {
            let edges: Vec<_> = (1..=k).map(|v| (0, v)).collect();
            let tree = FreeTree::from_edges(k + 1, &edges).unwrap();
            let expected: u64 = (1..=k as u64).map(|i| i.div_ceil(2)).sum();
            check(&tree, expected);
        }
    }

    #[test]
    fn test_spider() {
        // Three legs of length two joined at vertex 0. Two legs sit next to
        // the center (1 + 1 each) and the third goes outside one of them
        // (3 + 1).
        let tree =
            FreeTree::from_edges(7, &[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)]).unwrap();
        check(&tree, 8);
    }
}
