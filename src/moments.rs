//! Expectation and variance of C and D under random arrangement models.
//!
//! All statistics are closed-form functions of degree and subtree-size
//! aggregates, evaluated exactly over [`Rational`]. Floating results are
//! provided by explicit `_f64` companions, never inferred.
//!
//! Models:
//! - uniform over all n! arrangements: `expected_crossings`,
//!   `variance_crossings`, `expected_sum_edge_lengths`,
//!   `variance_sum_edge_lengths`;
//! - uniform over projective arrangements of a rooted tree:
//!   `expected_sum_edge_lengths_projective`;
//! - uniform over planar arrangements of a free tree:
//!   `expected_sum_edge_lengths_planar`.

use crate::error::Result;
use crate::numeric::{Integer, Rational};
use crate::properties::num_pairs_independent_edges;
use crate::tree::{FreeTree, RootedTree};

/// E[C] = |Q| / 3 under the uniform random arrangement model.
pub fn expected_crossings(tree: &FreeTree) -> Rational {
    let q = num_pairs_independent_edges(tree);
    Rational::from_integer(Integer::from(q)) * Rational::from_frac(1, 3)
}

/// Floating companion of [`expected_crossings`].
pub fn expected_crossings_f64(tree: &FreeTree) -> f64 {
    expected_crossings(tree).to_f64()
}

/// V[C] under the uniform random arrangement model, specialized to trees.
///
/// Evaluates the closed form over the degree aggregates Q_s, paths of 4 and
/// 5 vertices, K_G, Phi_1, Phi_2, Lambda_1, Lambda_2:
///
/// ```text
/// V[C] = 2/45 (m+2) Qs - 1/180 (2m+7) paths4 - 1/180 paths5
///      + 1/90 KG - 1/60 Lambda1 + 1/180 Lambda2 + 1/180 Phi2 - 1/90 Phi1
/// ```
///
/// Requires a normalized tree (edges are enumerated canonically).
pub fn variance_crossings(tree: &FreeTree) -> Result<Rational> {
    let n = tree.num_nodes();
    let m = tree.num_edges();
    let deg = |v: usize| Integer::from(tree.degree(v));

    // Sum of neighbor degrees per vertex.
    let mut nds = vec![Integer::new(0); n];
    for (s, slot) in nds.iter_mut().enumerate() {
        for &t in tree.neighbors(s) {
            *slot = slot.clone() + deg(t);
        }
    }

    let mut nk2 = Integer::new(0);
    let mut nk3 = Integer::new(0);
    for v in 0..n {
        nk2 = nk2 + deg(v).pow(2);
        nk3 = nk3 + deg(v).pow(3);
    }

    let one = Integer::new(1);
    let mut lg = Integer::new(0);
    let mut phi_1_sub = Integer::new(0);
    let mut phi_2 = Integer::new(0);
    let mut paths_4 = Integer::new(0);
    let mut paths_5_twice = Integer::new(0);
    let mut lambda_1 = Integer::new(0);
    let mut lambda_2_extra = Integer::new(0);
    for (s, t) in tree.edges()? {
        let ks = deg(s);
        let kt = deg(t);
        let ks1 = ks.clone() - one.clone();
        let kt1 = kt.clone() - one.clone();

        lg = lg + ks.clone() * kt.clone();
        phi_1_sub = phi_1_sub + ks.clone() * kt.clone() * (ks.clone() + kt.clone());
        paths_4 = paths_4 + ks1.clone() * kt1.clone();
        // Paths of 5 vertices through the edge st; each path is seen from
        // both of its end edges, hence accumulated twice.
        paths_5_twice = paths_5_twice
            + kt1.clone() * (nds[s].clone() - kt.clone() - ks.clone() + one.clone())
            + ks1.clone() * (nds[t].clone() - kt.clone() - ks.clone() + one.clone());
        let eps1 = nds[s].clone() - kt.clone();
        let eps2 = nds[t].clone() - ks.clone();
        lambda_1 = lambda_1 + ks1.clone() * eps2 + kt1.clone() * eps1;
        lambda_2_extra = lambda_2_extra + ks1.clone() * kt1.clone() * (ks.clone() + kt.clone());
        phi_2 = phi_2
            + (ks.clone() + kt.clone())
                * (nk2.clone()
                    - nds[s].clone()
                    - nds[t].clone()
                    - kt.clone() * kt1.clone()
                    - ks.clone() * ks1.clone());
    }
    let two = Integer::new(2);
    let paths_5 = paths_5_twice / two.clone();
    let phi_2 = phi_2 / two.clone();
    let lambda_2 = lambda_1.clone() + lambda_2_extra;

    let m_i = Integer::from(m);
    let qs = Integer::from(num_pairs_independent_edges(tree));
    let kg = (m_i.clone() + one.clone()) * nk2.clone() - nk3 - two.clone() * lg.clone();
    let phi_1 = (m_i.clone() + one.clone()) * lg - phi_1_sub;

    let term = |num: i64, den: i64, v: Integer| Rational::from_frac(num, den) * Rational::from_integer(v);
    let vc = term(2, 45, (m_i.clone() + two.clone()) * qs)
        - term(1, 180, (two.clone() * m_i + Integer::new(7)) * paths_4)
        - term(1, 180, paths_5)
        + term(1, 90, kg)
        - term(1, 60, lambda_1)
        + term(1, 180, lambda_2)
        + term(1, 180, phi_2)
        - term(1, 90, phi_1);
    Ok(vc)
}

/// Floating companion of [`variance_crossings`].
pub fn variance_crossings_f64(tree: &FreeTree) -> Result<f64> {
    Ok(variance_crossings(tree)?.to_f64())
}

/// E[D] = m (n + 1) / 3 under the uniform random arrangement model.
pub fn expected_sum_edge_lengths(tree: &FreeTree) -> Rational {
    let n = tree.num_nodes();
    let m = tree.num_edges();
    Rational::from_integer(Integer::from(m) * Integer::from(n + 1)) * Rational::from_frac(1, 3)
}

/// Floating companion of [`expected_sum_edge_lengths`].
pub fn expected_sum_edge_lengths_f64(tree: &FreeTree) -> f64 {
    expected_sum_edge_lengths(tree).to_f64()
}

/// V[D] = (n+1) [ m(n-2)/18 + S(n-8)/90 - 2|Q|/45 ] where
/// S = sum over vertices of C(deg, 2).
pub fn variance_sum_edge_lengths(tree: &FreeTree) -> Rational {
    let n = tree.num_nodes() as i64;
    let m = tree.num_edges() as i64;
    let s_pairs: u64 = (0..tree.num_nodes())
        .map(|v| {
            let d = tree.degree(v) as u64;
            d * (d.saturating_sub(1)) / 2
        })
        .sum();
    let q = num_pairs_independent_edges(tree);
    // n - 2 and n - 8 are negative for small trees; keep everything signed.
    let inner = Rational::from_integer(Integer::new(m) * Integer::new(n - 2)) * Rational::from_frac(1, 18)
        + Rational::from_integer(Integer::from(s_pairs) * Integer::new(n - 8)) * Rational::from_frac(1, 90)
        - Rational::from_integer(Integer::from(q)) * Rational::from_frac(2, 45);
    Rational::from_integer(Integer::new(n + 1)) * inner
}

/// Floating companion of [`variance_sum_edge_lengths`].
pub fn variance_sum_edge_lengths_f64(tree: &FreeTree) -> f64 {
    variance_sum_edge_lengths(tree).to_f64()
}

/// E[D] under the uniform model over projective arrangements of a rooted
/// tree:
///
/// ```text
/// E_pr[D] = (n-1) + 1/3 sum_v (c_v - 1)(s_v - 1) + 1/2 sum_{v != root} (s_v - 1)
/// ```
///
/// with `c_v` the number of children and `s_v` the subtree size of `v`.
/// Requires valid precomputed subtree sizes.
pub fn expected_sum_edge_lengths_projective(rooted: &RootedTree) -> Result<Rational> {
    let sizes = rooted.subtree_sizes()?;
    let n = rooted.num_nodes();
    let root = rooted.root();

    // sum_v (c_v - 1)(s_v - 1): leaves have s_v = 1 and contribute nothing,
    // so c_v - 1 never goes negative in what remains.
    let mut anchored = Integer::new(0);
    let mut descent = Integer::new(0);
    for v in 0..n {
        let s_v = sizes[v];
        let c_v = if v == root { rooted.tree().degree(v) } else { rooted.tree().degree(v) - 1 };
        if s_v > 1 {
            anchored = anchored + Integer::new(c_v as i64 - 1) * Integer::from(s_v - 1);
        }
        if v != root {
            descent = descent + Integer::from(s_v - 1);
        }
    }
    Ok(Rational::from_integer(Integer::from(n - 1))
        + Rational::from_integer(anchored) * Rational::from_frac(1, 3)
        + Rational::from_integer(descent) * Rational::from_frac(1, 2))
}

/// Floating companion of [`expected_sum_edge_lengths_projective`].
pub fn expected_sum_edge_lengths_projective_f64(rooted: &RootedTree) -> Result<f64> {
    Ok(expected_sum_edge_lengths_projective(rooted)?.to_f64())
}

/// E[D] under the uniform model over planar arrangements of a free tree.
///
/// Averages, over the n choices of the leftmost vertex u, the projective
/// expectation of the tree rooted at u conditioned on u leftmost:
///
/// ```text
/// E_u = deg(u) n / 2 + sum over non-root parent/child pairs (v, c)
///           of ( 1 + (s_v - 1 - s_c)/3 + (s_c - 1)/2 )
/// E_pl[D] = 1/n sum_u E_u
/// ```
pub fn expected_sum_edge_lengths_planar(tree: &FreeTree) -> Rational {
    let n = tree.num_nodes();
    let mut total_six = Integer::new(0);
    for u in 0..n {
        let (size, parent) = tree.rooted_subtree_sizes(u);
        // Accumulate 6 E_u to stay in integers.
        let mut six_e_u = 3 * (tree.degree(u) as u64) * (n as u64);
        for v in 0..n {
            if v == u {
                continue;
            }
            for &c in tree.neighbors(v) {
                if c == parent[v] {
                    continue;
                }
                six_e_u += (6 + 2 * (size[v] - 1 - size[c]) + 3 * (size[c] - 1)) as u64;
            }
        }
        total_six = total_six + Integer::from(six_e_u);
    }
    // n >= 1, so the denominator is never zero.
    Rational::from_integer(total_six) / Rational::from_integer(Integer::from(6 * n))
}

/// Floating companion of [`expected_sum_edge_lengths_planar`].
pub fn expected_sum_edge_lengths_planar_f64(tree: &FreeTree) -> f64 {
    expected_sum_edge_lengths_planar(tree).to_f64()
}
