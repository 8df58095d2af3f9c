//! Free and rooted trees over vertex labels `0..n`.
//!
//! Trees are validated once at construction and are read-only inputs to every
//! solver. Rooted trees additionally carry cached subtree sizes guarded by a
//! validity flag, so stale data is rejected instead of silently reused.

use crate::error::{LinarrError, Result};

/// An unrooted (free) tree on vertices `0..n`.
///
/// # Invariants
///
/// - `n >= 1`, exactly `n - 1` edges, connected and acyclic.
/// - The adjacency structure is symmetric and free of self-loops.
/// - `normalized` is true iff every adjacency list is sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeTree {
    adj: Vec<Vec<usize>>,
    normalized: bool,
}

impl FreeTree {
    /// Builds a tree on `n` vertices from an edge list.
    ///
    /// The edge list must contain exactly `n - 1` edges connecting all `n`
    /// vertices. Adjacency lists are sorted, so the result is normalized.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if n == 0 {
            return Err(LinarrError::PreconditionViolation(
                "tree must have at least one vertex".to_string(),
            ));
        }
        if edges.len() != n - 1 {
            return Err(LinarrError::PreconditionViolation(format!(
                "tree on {} vertices needs {} edges, got {}",
                n,
                n - 1,
                edges.len()
            )));
        }
        let mut adj = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(LinarrError::PreconditionViolation(format!(
                    "edge ({}, {}) out of range for {} vertices",
                    u, v, n
                )));
            }
            if u == v {
                return Err(LinarrError::PreconditionViolation(format!("self-loop at vertex {}", u)));
            }
            adj[u].push(v);
            adj[v].push(u);
        }
        let mut tree = FreeTree { adj, normalized: false };
        tree.check_connected()?;
        tree.normalize();
        Ok(tree)
    }

    /// Builds a tree from explicit adjacency lists, preserving their order.
    ///
    /// The lists must be symmetric and describe a connected tree. Whether the
    /// result is normalized depends on the order the caller handed in; see
    /// [`FreeTree::is_normalized`].
    pub fn from_adjacency(adj: Vec<Vec<usize>>) -> Result<Self> {
        let n = adj.len();
        if n == 0 {
            return Err(LinarrError::PreconditionViolation(
                "tree must have at least one vertex".to_string(),
            ));
        }
        let total_degree: usize = adj.iter().map(|l| l.len()).sum();
        if total_degree != 2 * (n - 1) {
            return Err(LinarrError::PreconditionViolation(format!(
                "adjacency lists describe {} edge endpoints, expected {}",
                total_degree,
                2 * (n - 1)
            )));
        }
        for (u, list) in adj.iter().enumerate() {
            for &v in list {
                if v >= n {
                    return Err(LinarrError::PreconditionViolation(format!(
                        "neighbor {} of vertex {} out of range",
                        v, u
                    )));
                }
                if v == u {
                    return Err(LinarrError::PreconditionViolation(format!("self-loop at vertex {}", u)));
                }
                if !adj[v].contains(&u) {
                    return Err(LinarrError::PreconditionViolation(format!(
                        "asymmetric adjacency: {} lists {} but not vice versa",
                        u, v
                    )));
                }
            }
        }
        let normalized = adj.iter().all(|list| list.windows(2).all(|w| w[0] < w[1]));
        let tree = FreeTree { adj, normalized };
        tree.check_connected()?;
        Ok(tree)
    }

    fn check_connected(&self) -> Result<()> {
        let (order, _) = self.bfs_from(0);
        if order.len() != self.num_nodes() {
            return Err(LinarrError::PreconditionViolation(
                "edges do not form a connected tree".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges, always `n - 1`.
    pub fn num_edges(&self) -> usize {
        self.num_nodes() - 1
    }

    /// Degree of vertex `u`.
    pub fn degree(&self, u: usize) -> usize {
        self.adj[u].len()
    }

    /// Neighbors of `u` in the tree's current adjacency order.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adj[u]
    }

    /// True iff every adjacency list is sorted ascending.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Sorts every adjacency list ascending.
    pub fn normalize(&mut self) {
        for list in &mut self.adj {
            list.sort_unstable();
        }
        self.normalized = true;
    }

    /// True iff `u` and `v` are adjacent.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        if self.normalized {
            self.adj[u].binary_search(&v).is_ok()
        } else {
            self.adj[u].contains(&v)
        }
    }

    /// Canonical edge enumeration: each edge once as `(u, v)` with `u < v`,
    /// sorted ascending.
    ///
    /// Defined only on normalized trees; fails with
    /// [`LinarrError::NotNormalized`] otherwise.
    pub fn edges(&self) -> Result<Vec<(usize, usize)>> {
        if !self.normalized {
            return Err(LinarrError::NotNormalized);
        }
        let mut edges = Vec::with_capacity(self.num_edges());
        for (u, list) in self.adj.iter().enumerate() {
            for &v in list {
                if u < v {
                    edges.push((u, v));
                }
            }
        }
        Ok(edges)
    }

    /// BFS from `root`: visit order and parent map, with `parent[root] == root`.
    ///
    /// Unreached vertices keep parent `usize::MAX`; the visit order then
    /// covers only the component of `root`.
    pub(crate) fn bfs_from(&self, root: usize) -> (Vec<usize>, Vec<usize>) {
        let n = self.num_nodes();
        let mut parent = vec![usize::MAX; n];
        let mut order = Vec::with_capacity(n);
        parent[root] = root;
        order.push(root);
        let mut head = 0;
        while head < order.len() {
            let u = order[head];
            head += 1;
            for &v in &self.adj[u] {
                if parent[v] == usize::MAX {
                    parent[v] = u;
                    order.push(v);
                }
            }
        }
        (order, parent)
    }

    /// Subtree sizes and parent map of the tree rooted at `root`.
    pub(crate) fn rooted_subtree_sizes(&self, root: usize) -> (Vec<usize>, Vec<usize>) {
        let (order, parent) = self.bfs_from(root);
        let mut size = vec![1usize; self.num_nodes()];
        // Children are finished before their parent in reverse BFS order.
        for &v in order.iter().rev() {
            if v != root {
                size[parent[v]] += size[v];
            }
        }
        (size, parent)
    }
}

/// A rooted tree: a free tree, a distinguished root, and cached subtree sizes.
///
/// Subtree sizes are a derived field behind a validity flag. They are set
/// only by [`RootedTree::compute_subtree_sizes`] and cleared by
/// [`RootedTree::invalidate_subtree_sizes`]; consumers that need them fail
/// fast instead of recomputing implicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootedTree {
    tree: FreeTree,
    root: usize,
    subtree_sizes: Vec<usize>,
    sizes_valid: bool,
}

impl RootedTree {
    /// Roots a free tree at `root`.
    pub fn new(tree: FreeTree, root: usize) -> Result<Self> {
        if root >= tree.num_nodes() {
            return Err(LinarrError::PreconditionViolation(format!(
                "root {} out of range for {} vertices",
                root,
                tree.num_nodes()
            )));
        }
        Ok(RootedTree {
            tree,
            root,
            subtree_sizes: Vec::new(),
            sizes_valid: false,
        })
    }

    /// Builds a rooted tree on `n` vertices from an edge list.
    pub fn from_edges(n: usize, root: usize, edges: &[(usize, usize)]) -> Result<Self> {
        RootedTree::new(FreeTree::from_edges(n, edges)?, root)
    }

    /// The underlying free tree.
    pub fn tree(&self) -> &FreeTree {
        &self.tree
    }

    /// The root vertex.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.tree.num_nodes()
    }

    /// Number of edges, always `n - 1`.
    pub fn num_edges(&self) -> usize {
        self.tree.num_edges()
    }

    /// True iff the underlying free tree is normalized.
    pub fn is_normalized(&self) -> bool {
        self.tree.is_normalized()
    }

    /// Sorts adjacency lists ascending.
    ///
    /// Subtree sizes stay valid: normalization reorders lists without
    /// changing the tree.
    pub fn normalize(&mut self) {
        self.tree.normalize();
    }

    /// Computes and caches the size of the subtree hanging from every vertex.
    ///
    /// After this call `subtree_sizes()[root] == n` and every vertex `v`
    /// satisfies `size[v] = 1 + sum of its children's sizes`.
    pub fn compute_subtree_sizes(&mut self) {
        let (size, _) = self.tree.rooted_subtree_sizes(self.root);
        self.subtree_sizes = size;
        self.sizes_valid = true;
    }

    /// Drops the cached subtree sizes.
    ///
    /// This is the hook a mutating collaborator must call; afterwards every
    /// consumer of the sizes fails until they are recomputed.
    pub fn invalidate_subtree_sizes(&mut self) {
        self.sizes_valid = false;
    }

    /// True iff the cached subtree sizes are usable.
    pub fn has_valid_subtree_sizes(&self) -> bool {
        self.sizes_valid
    }

    /// The cached subtree sizes, indexed by vertex.
    ///
    /// Fails with [`LinarrError::StaleOrMissingSubtreeSizes`] if they were
    /// never computed or were invalidated.
    pub fn subtree_sizes(&self) -> Result<&[usize]> {
        if !self.sizes_valid {
            return Err(LinarrError::StaleOrMissingSubtreeSizes);
        }
        Ok(&self.subtree_sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_edges() {
        let t = FreeTree::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(t.num_nodes(), 4);
        assert_eq!(t.num_edges(), 3);
        assert_eq!(t.degree(0), 1);
        assert_eq!(t.degree(1), 2);
        assert!(t.is_normalized());
        assert_eq!(t.edges().unwrap(), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(t.has_edge(2, 1));
        assert!(!t.has_edge(0, 3));
    }

    #[test]
    fn test_single_vertex() {
        let t = FreeTree::from_edges(1, &[]).unwrap();
        assert_eq!(t.num_nodes(), 1);
        assert_eq!(t.num_edges(), 0);
        assert!(t.edges().unwrap().is_empty());
    }

    #[test]
    fn test_from_edges_rejects_bad_input() {
        assert!(FreeTree::from_edges(0, &[]).is_err());
        // Wrong edge count.
        assert!(FreeTree::from_edges(3, &[(0, 1)]).is_err());
        // Out of range.
        assert!(FreeTree::from_edges(2, &[(0, 2)]).is_err());
        // Self-loop.
        assert!(FreeTree::from_edges(2, &[(1, 1)]).is_err());
        // Cycle plus isolated vertex: right edge count, not connected.
        assert!(FreeTree::from_edges(4, &[(0, 1), (1, 2), (2, 0)]).is_err());
    }

    #[test]
    fn test_from_adjacency_preserves_order() {
        let t = FreeTree::from_adjacency(vec![vec![2, 1], vec![0], vec![0]]).unwrap();
        assert!(!t.is_normalized());
        assert_eq!(t.neighbors(0), &[2, 1]);
        assert_eq!(t.edges(), Err(LinarrError::NotNormalized));

        let mut t = t;
        t.normalize();
        assert!(t.is_normalized());
        assert_eq!(t.neighbors(0), &[1, 2]);
        assert_eq!(t.edges().unwrap(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_from_adjacency_rejects_asymmetry() {
        let err = FreeTree::from_adjacency(vec![vec![1], vec![0], vec![0, 1]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_subtree_sizes() {
        // 0 is the root of a star with leaves 1, 2, 3 and a path 3-4.
        let mut t = RootedTree::from_edges(5, 0, &[(0, 1), (0, 2), (0, 3), (3, 4)]).unwrap();
        assert_eq!(t.subtree_sizes(), Err(LinarrError::StaleOrMissingSubtreeSizes));

        t.compute_subtree_sizes();
        let sizes = t.subtree_sizes().unwrap();
        println!("sizes = {:?}", sizes);
        assert_eq!(sizes, &[5, 1, 1, 2, 1]);

        t.invalidate_subtree_sizes();
        assert_eq!(t.subtree_sizes(), Err(LinarrError::StaleOrMissingSubtreeSizes));
    }

    #[test]
    fn test_root_out_of_range() {
        let t = FreeTree::from_edges(2, &[(0, 1)]).unwrap();
        assert!(RootedTree::new(t, 2).is_err());
    }

    #[test]
    fn test_bfs_from_covers_component() {
        let t = FreeTree::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let (order, parent) = t.bfs_from(2);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], 2);
        assert_eq!(parent[2], 2);
        assert_eq!(parent[3], 2);
        assert_eq!(parent[0], 1);
    }
}
