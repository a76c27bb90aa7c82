//! Similarity between token embeddings and a support vector.
//!
//! A "support vector" here is an exemplar embedding standing in for a
//! target entity type — not an SVM support vector. Each token embedding
//! is scored against it under three metrics at once, and the resulting
//! [`Similarity`] records feed both the heatmap rendering and the
//! threshold tagging in [`crate::infer`].
//!
//! # Metrics
//!
//! | Metric | Definition | Range |
//! |--------|------------|-------|
//! | `euc_dist` | `exp(-‖t − s‖₂)` | (0, 1] |
//! | `dot_prod` | `t · s` | unbounded |
//! | `cosine` | `t · s / (‖t‖ ‖s‖)` | [-1, 1] |
//!
//! # Example
//!
//! ```rust
//! use fewviz::similarity;
//! use ndarray::arr1;
//!
//! let token = arr1(&[3.0, 4.0]);
//! let sim = similarity(token.view(), token.view()).unwrap();
//! assert!((sim.cosine - 1.0).abs() < 1e-12);
//! assert!((sim.euc_dist - 1.0).abs() < 1e-12);
//! assert!((sim.dot_prod - 25.0).abs() < 1e-12);
//! ```

use crate::tokens::TokenInput;
use crate::{Error, Result};
use ndarray::{s, Array2, ArrayView1, ArrayView3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Metric Selection
// =============================================================================

/// Which similarity metric to read out of a [`Similarity`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimMetric {
    /// Negative-exponential Euclidean distance, in (0, 1].
    EucDist,
    /// Plain inner product, unbounded.
    DotProd,
    /// Cosine similarity, in [-1, 1].
    Cosine,
}

impl SimMetric {
    /// All metrics, in record-field order.
    pub const ALL: [SimMetric; 3] = [SimMetric::EucDist, SimMetric::DotProd, SimMetric::Cosine];
}

impl fmt::Display for SimMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimMetric::EucDist => write!(f, "euc_dist"),
            SimMetric::DotProd => write!(f, "dot_prod"),
            SimMetric::Cosine => write!(f, "cosine"),
        }
    }
}

impl FromStr for SimMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euc_dist" => Ok(SimMetric::EucDist),
            "dot_prod" => Ok(SimMetric::DotProd),
            "cosine" => Ok(SimMetric::Cosine),
            other => Err(Error::invalid_input(format!(
                "unknown similarity metric: {other:?} (expected euc_dist, dot_prod, or cosine)"
            ))),
        }
    }
}

// =============================================================================
// Similarity Records
// =============================================================================

/// Similarity scores for one token embedding against the support vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Similarity {
    /// `exp(-‖t − s‖₂)`: 1.0 at distance zero, decaying toward 0.
    pub euc_dist: f64,
    /// Inner product of token and support vectors.
    pub dot_prod: f64,
    /// Cosine similarity; exactly `0.0` when the support vector has zero
    /// norm.
    pub cosine: f64,
}

impl Similarity {
    /// Read one metric's value out of the record.
    #[must_use]
    pub fn metric(&self, metric: SimMetric) -> f64 {
        match metric {
            SimMetric::EucDist => self.euc_dist,
            SimMetric::DotProd => self.dot_prod,
            SimMetric::Cosine => self.cosine,
        }
    }
}

/// Score one token embedding against the support vector.
///
/// Only the support side of the cosine denominator is guarded: a
/// zero-norm support vector yields a cosine of exactly `0.0`, while the
/// token vector's norm is taken as-is.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when the two vectors disagree on
/// feature count.
pub fn similarity(
    token_vec: ArrayView1<'_, f64>,
    support_vec: ArrayView1<'_, f64>,
) -> Result<Similarity> {
    if token_vec.len() != support_vec.len() {
        return Err(Error::shape_mismatch(format!(
            "token vector has {} features but support vector has {}",
            token_vec.len(),
            support_vec.len()
        )));
    }

    let dot_prod = token_vec.dot(&support_vec);
    let dist = token_vec
        .iter()
        .zip(support_vec.iter())
        .map(|(t, s)| (t - s) * (t - s))
        .sum::<f64>()
        .sqrt();
    let support_norm = support_vec.dot(&support_vec).sqrt();
    let cosine = if support_norm == 0.0 {
        0.0
    } else {
        let token_norm = token_vec.dot(&token_vec).sqrt();
        dot_prod / (token_norm * support_norm)
    };

    Ok(Similarity {
        euc_dist: (-dist).exp(),
        dot_prod,
        cosine,
    })
}

/// Score every real token position of a batch against the support vector.
///
/// Token counts come from `tokens`; positions beyond a sequence's true
/// length (padding) are skipped, so the result is ragged with one record
/// per real token, in sequence-then-position order.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when the embedding tensor is too
/// small for the batch (fewer sequences or positions than the tokens
/// require) or its feature dimension disagrees with the support vector.
pub fn similarity_batch(
    tokens: &TokenInput,
    embeddings: ArrayView3<'_, f64>,
    support_vec: ArrayView1<'_, f64>,
) -> Result<Vec<Vec<Similarity>>> {
    let lengths = tokens.lengths();
    let (n_seqs, n_positions, n_features) = embeddings.dim();

    if lengths.len() > n_seqs {
        return Err(Error::shape_mismatch(format!(
            "batch has {} sequences but embedding tensor holds {n_seqs}",
            lengths.len()
        )));
    }
    if support_vec.len() != n_features {
        return Err(Error::shape_mismatch(format!(
            "support vector has {} features but embeddings have {n_features}",
            support_vec.len()
        )));
    }

    log::debug!(
        "scoring {} tokens across {} sequences against a {n_features}-feature support vector",
        tokens.token_count(),
        lengths.len()
    );

    let mut sim_list = Vec::with_capacity(lengths.len());
    for (i, &len) in lengths.iter().enumerate() {
        if len > n_positions {
            return Err(Error::shape_mismatch(format!(
                "sequence {i} has {len} tokens but embedding tensor holds {n_positions} positions"
            )));
        }
        let mut row = Vec::with_capacity(len);
        for j in 0..len {
            row.push(similarity(embeddings.slice(s![i, j, ..]), support_vec)?);
        }
        sim_list.push(row);
    }
    Ok(sim_list)
}

/// Flatten the real token positions of an embedding tensor into a
/// `[total tokens, features]` matrix, sequence-then-position order.
///
/// Used to feed the whole batch into dimensionality reduction for the
/// scatter view.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when `tokens_length` asks for more
/// sequences or positions than the tensor holds.
pub fn to_feature_matrix(
    embeddings: ArrayView3<'_, f64>,
    tokens_length: &[usize],
) -> Result<Array2<f64>> {
    let (n_seqs, n_positions, n_features) = embeddings.dim();
    if tokens_length.len() > n_seqs {
        return Err(Error::shape_mismatch(format!(
            "{} sequence lengths but embedding tensor holds {n_seqs} sequences",
            tokens_length.len()
        )));
    }

    let n_tokens: usize = tokens_length.iter().sum();
    let mut feat_mat = Array2::zeros((n_tokens, n_features));
    let mut k = 0;
    for (i, &len) in tokens_length.iter().enumerate() {
        if len > n_positions {
            return Err(Error::shape_mismatch(format!(
                "sequence {i} has {len} tokens but embedding tensor holds {n_positions} positions"
            )));
        }
        for j in 0..len {
            feat_mat.row_mut(k).assign(&embeddings.slice(s![i, j, ..]));
            k += 1;
        }
    }
    Ok(feat_mat)
}

// =============================================================================
// Flattening and Ranges
// =============================================================================

/// Per-metric columns flattened out of a ragged similarity batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatSimilarities {
    /// All `euc_dist` values, sequence-then-position order.
    pub euc_dist: Vec<f64>,
    /// All `dot_prod` values, same order.
    pub dot_prod: Vec<f64>,
    /// All `cosine` values, same order.
    pub cosine: Vec<f64>,
}

impl FlatSimilarities {
    /// Flatten a ragged batch into per-metric columns.
    ///
    /// Every record contributes to every column; a zero-valued score is a
    /// legitimate similarity and is kept.
    #[must_use]
    pub fn from_batch(sim_list: &[Vec<Similarity>]) -> Self {
        let mut flat = FlatSimilarities::default();
        for row in sim_list {
            for sim in row {
                flat.euc_dist.push(sim.euc_dist);
                flat.dot_prod.push(sim.dot_prod);
                flat.cosine.push(sim.cosine);
            }
        }
        flat
    }

    /// One metric's column.
    #[must_use]
    pub fn metric(&self, metric: SimMetric) -> &[f64] {
        match metric {
            SimMetric::EucDist => &self.euc_dist,
            SimMetric::DotProd => &self.dot_prod,
            SimMetric::Cosine => &self.cosine,
        }
    }
}

/// Min and max over a ragged batch of plain similarity values.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when the batch holds no values at all.
pub fn value_range(values: &[Vec<f64>]) -> Result<(f64, f64)> {
    min_max(&crate::tokens::flatten(values))
}

/// Min and max over the cosine column of a similarity batch.
///
/// This is the range [`crate::infer::infer_tags`] normalizes against.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when the batch holds no records.
pub fn cosine_range(sim_list: &[Vec<Similarity>]) -> Result<(f64, f64)> {
    min_max(&FlatSimilarities::from_batch(sim_list).cosine)
}

fn min_max(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(Error::empty_input("no similarity values to take min/max over"));
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((min, max))
}

// =============================================================================
// Tests
// =============================================================================
