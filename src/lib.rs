//! # linarr-rs: Linear Arrangements of Trees in Rust
//!
//! **`linarr-rs`** computes metrics and exact optima of linear arrangements of trees.
//! It is designed for research in quantitative syntax, network science, and combinatorics of trees.
//!
//! ## What is a linear arrangement?
//!
//! A linear arrangement places the n vertices of a graph on n consecutive integer positions,
//! one vertex per position. Drawing every edge as a semicircle above the positions gives the
//! two classic quality measures of an arrangement: the **sum of edge lengths** D and the
//! **number of edge crossings** C. Both are heavily studied over trees, where exact
//! polynomial-time minimization of D is possible.
//!
//! ## Key Features
//!
//! - **Exact arithmetic**: statistics that are rational numbers are returned as exact
//!   [`Rational`][crate::numeric::Rational] values backed by big integers, with `_f64`
//!   companions for convenience.
//! - **Four crossing counters**: from a quadratic brute-force check to a stack-based
//!   sweep, all returning identical counts ([`crossings`]).
//! - **Exact Dmin solvers**: minimum sum of edge lengths without constraints, over planar
//!   arrangements, and over projective arrangements, each with two published algorithms
//!   to choose from ([`dmin`]).
//! - **Moments without enumeration**: closed-form expectation and variance of C and D
//!   under uniformly random arrangements ([`moments`]).
//! - **Checked inputs**: malformed edge lists, disconnected graphs, and stale caches are
//!   reported as [`LinarrError`][crate::error::LinarrError] values instead of panics.
//!
//! ## Quick Start
//!
//! Add `linarr-rs` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! linarr-rs = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use linarr_rs::crossings::{num_crossings, CrossingsAlgorithm};
//! use linarr_rs::dmin::{min_sum_edge_lengths, UnconstrainedAlgorithm};
//! use linarr_rs::linarr::sum_edge_lengths;
//! use linarr_rs::moments::expected_crossings;
//! use linarr_rs::tree::FreeTree;
//!
//! // 1. Build a small caterpillar tree
//! let tree = FreeTree::from_edges(5, &[(0, 1), (1, 2), (1, 3), (3, 4)])?;
//!
//! // 2. Measure the identity arrangement (vertex v at position v)
//! assert_eq!(sum_edge_lengths(&tree, None)?, 5);
//! assert_eq!(num_crossings(&tree, None, CrossingsAlgorithm::default())?, 0);
//!
//! // 3. The tree is not a path, so D = n - 1 = 4 is impossible and 5 is optimal
//! let best = min_sum_edge_lengths(&tree, UnconstrainedAlgorithm::default())?;
//! assert_eq!(best.cost, 5);
//!
//! // 4. Expected crossings over all 5! arrangements, exactly
//! assert_eq!(expected_crossings(&tree).to_string(), "2/3");
//! # Ok::<(), linarr_rs::error::LinarrError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`tree`]**: free and rooted trees with validated construction.
//! - **[`arrangement`]**: the [`LinearArrangement`][crate::arrangement::LinearArrangement]
//!   permutation type.
//! - **[`linarr`]**: metrics of a tree under one arrangement (D, mean dependency
//!   distance, planarity, projectivity).
//! - **[`crossings`]**: the four crossing-counting algorithms.
//! - **[`dmin`]**: exact minimum-D solvers for the three constraint levels.
//! - **[`moments`]**: exact first and second moments of C and D under random
//!   arrangements.
//! - **[`properties`]**: arrangement-free tree properties (centroid, degree moments,
//!   hierarchical distance).
//! - **[`numeric`]**: exact [`Integer`][crate::numeric::Integer] and
//!   [`Rational`][crate::numeric::Rational] scalars.
//!
//! For the problem variants and algorithm selection, start with the [`dmin`] module
//! documentation.

pub mod arrangement;
pub mod crossings;
pub mod dmin;
pub mod error;
pub mod linarr;
pub mod moments;
pub mod numeric;
pub mod properties;
pub mod tree;
