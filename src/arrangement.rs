use std::fmt::{Display, Formatter};

use crate::error::{LinarrError, Result};

/// A linear arrangement of `n` vertices: a bijection between vertices and
/// positions `0..n`, kept in both directions.
///
/// # Invariants
///
/// - `direct[v]` is the position of vertex `v`; `inverse[p]` is the vertex at
///   position `p`; the two are mutual inverses at all times.
///
/// Arrangements are values: constructed, validated once, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearArrangement {
    direct: Vec<usize>,
    inverse: Vec<usize>,
}

impl LinearArrangement {
    /// The identity arrangement: vertex `v` at position `v`.
    pub fn identity(n: usize) -> Self {
        let id: Vec<usize> = (0..n).collect();
        LinearArrangement { direct: id.clone(), inverse: id }
    }

    /// Builds an arrangement from a position map (`direct[v]` = position of
    /// `v`), validating that it is a permutation.
    pub fn from_direct(direct: Vec<usize>) -> Result<Self> {
        let inverse = invert_permutation(&direct)?;
        Ok(LinearArrangement { direct, inverse })
    }

    /// Builds an arrangement from a vertex sequence (`inverse[p]` = vertex at
    /// position `p`), validating that it is a permutation.
    pub fn from_inverse(inverse: Vec<usize>) -> Result<Self> {
        let direct = invert_permutation(&inverse)?;
        Ok(LinearArrangement { direct, inverse })
    }

    /// Builds an arrangement from a position map produced by a solver.
    ///
    /// # Panics
    ///
    /// Panics if `direct` is not a permutation. Solvers construct position
    /// maps by exhaustive placement, so a violation here is a defect, not
    /// bad input.
    pub(crate) fn from_direct_positions(direct: Vec<usize>) -> Self {
        let n = direct.len();
        let mut inverse = vec![usize::MAX; n];
        for (v, &p) in direct.iter().enumerate() {
            assert!(p < n, "position {} of vertex {} out of range", p, v);
            assert!(inverse[p] == usize::MAX, "position {} assigned twice", p);
            inverse[p] = v;
        }
        LinearArrangement { direct, inverse }
    }

    /// Number of arranged vertices.
    pub fn len(&self) -> usize {
        self.direct.len()
    }

    /// True iff the arrangement is empty.
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }

    /// Position of vertex `v`.
    pub fn position(&self, v: usize) -> usize {
        self.direct[v]
    }

    /// Vertex at position `p`.
    pub fn vertex_at(&self, p: usize) -> usize {
        self.inverse[p]
    }

    /// The full position map, indexed by vertex.
    pub fn positions(&self) -> &[usize] {
        &self.direct
    }

    /// The full vertex sequence, indexed by position.
    pub fn sequence(&self) -> &[usize] {
        &self.inverse
    }
}

impl Display for LinearArrangement {
    /// Prints the vertex sequence, leftmost position first.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (p, v) in self.inverse.iter().enumerate() {
            if p > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Resolves an optional arrangement against a tree of `n` vertices.
///
/// `None` means the identity arrangement; it is materialized into `slot` so
/// the caller can borrow it uniformly. An explicit arrangement of the wrong
/// size is rejected before any work.
pub(crate) fn resolve<'a>(
    n: usize,
    arr: Option<&'a LinearArrangement>,
    slot: &'a mut Option<LinearArrangement>,
) -> Result<&'a LinearArrangement> {
    match arr {
        Some(a) => {
            if a.len() != n {
                return Err(LinarrError::PreconditionViolation(format!(
                    "arrangement of {} vertices does not fit a tree on {}",
                    a.len(),
                    n
                )));
            }
            Ok(a)
        }
        None => Ok(&*slot.insert(LinearArrangement::identity(n))),
    }
}

fn invert_permutation(perm: &[usize]) -> Result<Vec<usize>> {
    let n = perm.len();
    let mut inv = vec![usize::MAX; n];
    for (i, &x) in perm.iter().enumerate() {
        if x >= n {
            return Err(LinarrError::PreconditionViolation(format!(
                "value {} at index {} out of range for a permutation of 0..{}",
                x, i, n
            )));
        }
        if inv[x] != usize::MAX {
            return Err(LinarrError::PreconditionViolation(format!(
                "value {} appears twice; not a permutation",
                x
            )));
        }
        inv[x] = i;
    }
    Ok(inv)
}
