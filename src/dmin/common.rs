//! Embedding kernels shared by the planar and projective solvers.
//!
//! Both solvers reduce to the same subproblem: lay a rooted tree out so that
//! the root is not covered by any of its edges and every subtree occupies a
//! contiguous block of positions. The kernels below solve that subproblem in
//! two different ways over the same input, a rooted adjacency list whose
//! children lists are sorted by subtree size.

use crate::tree::FreeTree;

/// Side of its parent's interval on which a subtree is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Place {
    LeftOf,
    RightOf,
    NoneOf,
}

/// Children lists of `tree` rooted at `root`, sorted by subtree size with the
/// largest subtree first. Children of equal size keep ascending label order.
///
/// `parent` and `sizes` must come from rooting the tree at `root`. One bucket
/// pass per size replaces a comparison sort, so all lists cost O(n) to build.
pub(crate) fn sorted_children_lists(
    tree: &FreeTree,
    root: usize,
    parent: &[usize],
    sizes: &[usize],
) -> Vec<Vec<(usize, usize)>> {
    let n = tree.num_nodes();
    let mut buckets: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for v in 0..n {
        if v != root {
            buckets[sizes[v]].push((parent[v], v));
        }
    }
    let mut children: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for size in (1..n).rev() {
        for &(p, v) in &buckets[size] {
            children[p].push((v, size));
        }
    }
    children
}

/// Interval-based embedding.
///
/// Each subtree is assigned a contiguous interval of positions inside its
/// parent's interval. The children of a vertex alternate sides around it,
/// largest outermost, and the vertex itself lands on the single position left
/// over. Returns the total edge length and the position of every vertex.
pub(crate) fn arrange_interval(
    children: &[Vec<(usize, usize)>],
    root: usize,
    n: usize,
) -> (u64, Vec<usize>) {
    let mut pos = vec![0usize; n];
    let mut cost = 0u64;
    let mut tasks: Vec<(usize, Place, usize, usize)> = vec![(root, Place::NoneOf, 0, n - 1)];
    while let Some((r, place, mut ini, mut fin)) = tasks.pop() {
        // The first and largest subtree goes to the side the parent is NOT on.
        let mut left_side = place != Place::RightOf;
        let mut acc_size_left = 0u64;
        let mut acc_size_right = 0u64;
        let mut intervals_left = 0u64;
        let mut intervals_right = 0u64;
        let mut d = 0u64;
        for &(vi, ni) in &children[r] {
            if left_side {
                tasks.push((vi, Place::LeftOf, ini, ini + ni - 1));
                d += (ni as u64) * intervals_left + 1;
                intervals_left += 1;
                acc_size_left += ni as u64;
                ini += ni;
            } else {
                tasks.push((vi, Place::RightOf, fin - ni + 1, fin));
                d += (ni as u64) * intervals_right + 1;
                intervals_right += 1;
                acc_size_right += ni as u64;
                fin -= ni;
            }
            left_side = !left_side;
        }
        assert_eq!(ini, fin, "children intervals must leave one slot for the root");
        pos[r] = ini;
        // Edge to the parent spans everything on the far side of `r`.
        let anchor = match place {
            Place::NoneOf => 0,
            Place::LeftOf => acc_size_right,
            Place::RightOf => acc_size_left,
        };
        cost += d + anchor;
    }
    (cost, pos)
}

/// Displacement-based embedding (Hochberg-Stallmann `embed`, with the
/// correction of the even/odd assignment at non-root vertices).
///
/// Instead of intervals, every vertex carries a signed displacement from the
/// root; subtrees of a vertex alternate sides, smallest nearest. Returns the
/// total edge length and the position of every vertex.
pub(crate) fn embed_displacement(
    children: &[Vec<(usize, usize)>],
    root: usize,
    n: usize,
) -> (u64, Vec<usize>) {
    let mut rel_pos = vec![0i64; n];
    let mut cost = 0u64;
    let mut tasks: Vec<(usize, i64, i64)> = Vec::new();

    // Root level: alternate children around the root, smallest innermost.
    let mut left_sum = 0u64;
    let mut right_sum = 0u64;
    let len = children[root].len();
    for (k, &(vi, ni)) in children[root].iter().rev().enumerate() {
        let rank = len - k;
        if rank % 2 == 0 {
            tasks.push((vi, right_sum as i64, 1));
            cost += right_sum;
            right_sum += ni as u64;
        } else {
            tasks.push((vi, -(left_sum as i64), -1));
            cost += left_sum;
            left_sum += ni as u64;
        }
        cost += 1;
    }

    while let Some((v, mut base, dir)) = tasks.pop() {
        let cv = &children[v];
        // Subtrees at even rank end up between `v` and its parent.
        let under_anchor: u64 = cv.iter().skip(1).step_by(2).map(|&(_, ni)| ni as u64).sum();
        base += dir * (under_anchor as i64 + 1);
        cost += under_anchor;
        let mut before = 0u64;
        let mut after = 0u64;
        let len = cv.len();
        for (k, &(vi, ni)) in cv.iter().rev().enumerate() {
            let rank = len - k;
            if rank % 2 == 0 {
                tasks.push((vi, base - dir * before as i64, -dir));
                cost += before;
                before += ni as u64;
            } else {
                tasks.push((vi, base + dir * after as i64, dir));
                cost += after;
                after += ni as u64;
            }
            cost += 1;
        }
        rel_pos[v] = base;
    }

    let root_pos = left_sum as i64;
    let mut pos = vec![0usize; n];
    for v in 0..n {
        let p = root_pos + rel_pos[v];
        assert!(0 <= p && p < n as i64, "displacement landed outside the arrangement");
        pos[v] = p as usize;
    }
    (cost, pos)
}
