//! Projective minimum arrangement solvers.

use log::debug;

use crate::error::Result;
use crate::tree::RootedTree;

use super::common::{arrange_interval, embed_displacement, sorted_children_lists};

/// Algorithm choice for the projective solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectiveAlgorithm {
    /// Interval-based embedding.
    #[default]
    AlemanyEstebanFerrer,
    /// Displacement-based embedding.
    HochbergStallmann,
}

/// Runs an embedding kernel on the tree rooted at its own root.
///
/// Fails with `StaleOrMissingSubtreeSizes` unless the rooted tree carries
/// valid cached subtree sizes.
pub(crate) fn solve(
    rooted: &RootedTree,
    algorithm: ProjectiveAlgorithm,
) -> Result<(u64, Vec<usize>)> {
    let sizes = rooted.subtree_sizes()?;
    let n = rooted.num_nodes();
    if n == 1 {
        return Ok((0, vec![0]));
    }
    let root = rooted.root();
    debug!("projective solver: n = {}, root = {}", n, root);
    let (_, parent) = rooted.tree().bfs_from(root);
    let children = sorted_children_lists(rooted.tree(), root, &parent, sizes);
    Ok(match algorithm {
        ProjectiveAlgorithm::AlemanyEstebanFerrer => arrange_interval(&children, root, n),
        ProjectiveAlgorithm::HochbergStallmann => embed_displacement(&children, root, n),
    })
}
