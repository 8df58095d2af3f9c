//! Metrics of a single `(tree, arrangement)` pair.
//!
//! Every function here accepts `None` for the arrangement, meaning the
//! identity arrangement, and requires a normalized tree because edges are
//! enumerated canonically.

use crate::arrangement::{self, LinearArrangement};
use crate::crossings::{num_crossings, CrossingsAlgorithm};
use crate::error::{LinarrError, Result};
use crate::numeric::{Integer, Rational};
use crate::tree::{FreeTree, RootedTree};

/// The sum of edge lengths `D = sum |pos(u) - pos(v)|` over all edges.
pub fn sum_edge_lengths(tree: &FreeTree, arr: Option<&LinearArrangement>) -> Result<u64> {
    let mut slot = None;
    let arr = arrangement::resolve(tree.num_nodes(), arr, &mut slot)?;
    let mut d = 0u64;
    for (u, v) in tree.edges()? {
        d += tree_edge_length(arr, u, v);
    }
    Ok(d)
}

/// The mean dependency distance `D / m`, exactly.
///
/// Fails with [`LinarrError::DivisionByZero`] on a single-vertex tree.
pub fn mean_dependency_distance(tree: &FreeTree, arr: Option<&LinearArrangement>) -> Result<Rational> {
    let m = tree.num_edges();
    if m == 0 {
        return Err(LinarrError::DivisionByZero);
    }
    let d = sum_edge_lengths(tree, arr)?;
    Rational::new(Integer::from(d), Integer::from(m))
}

/// True iff the arrangement has no edge crossings.
pub fn is_planar(tree: &FreeTree, arr: Option<&LinearArrangement>) -> Result<bool> {
    Ok(num_crossings(tree, arr, CrossingsAlgorithm::default())? == 0)
}

/// True iff the arrangement is planar and no edge's position interval
/// strictly contains the root's position.
///
/// Edges incident to the root never cover it, so they need no special case.
pub fn is_projective(rooted: &RootedTree, arr: Option<&LinearArrangement>) -> Result<bool> {
    let tree = rooted.tree();
    let mut slot = None;
    let arr = arrangement::resolve(tree.num_nodes(), arr, &mut slot)?;
    if !is_planar(tree, Some(arr))? {
        return Ok(false);
    }
    let root_pos = arr.position(rooted.root());
    for (u, v) in tree.edges()? {
        let (lo, hi) = ordered_positions(arr, u, v);
        if lo < root_pos && root_pos < hi {
            return Ok(false);
        }
    }
    Ok(true)
}

fn ordered_positions(arr: &LinearArrangement, u: usize, v: usize) -> (usize, usize) {
    let pu = arr.position(u);
    let pv = arr.position(v);
    if pu < pv {
        (pu, pv)
    } else {
        (pv, pu)
    }
}

fn tree_edge_length(arr: &LinearArrangement, u: usize, v: usize) -> u64 {
    let (lo, hi) = ordered_positions(arr, u, v);
    (hi - lo) as u64
}
