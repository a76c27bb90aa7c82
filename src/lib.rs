//! # fewviz
//!
//! Helpers behind an interactive few-shot NER visualization.
//!
//! Given pre-computed token embeddings and a small set of "support"
//! (exemplar) vectors for a target entity type, this crate scores every
//! token against the support vector, converts the scores into binary
//! entity/non-entity tags, and summarizes labeled datasets for display.
//! It is glue for a front-end, not a model: embeddings arrive already
//! computed, and nothing here is trained or persisted.
//!
//! ## Pipeline
//!
//! ```text
//! tokens + embeddings ──▶ similarity_batch ──▶ infer_tags ──▶ T/O tags
//!                                │
//!                                └─▶ FlatSimilarities ──▶ heatmap / scatter
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fewviz::{similarity, SimMetric};
//! use ndarray::arr1;
//!
//! let token = arr1(&[1.0, 0.0]);
//! let support = arr1(&[1.0, 0.0]);
//!
//! let sim = similarity(token.view(), support.view()).unwrap();
//! assert!((sim.metric(SimMetric::Cosine) - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Dataset profiling
//!
//! ```rust
//! use fewviz::dataset_props;
//!
//! let tokens = vec![vec!["John".to_string(), "slept".to_string()]];
//! let tags = vec![vec!["B-PER".to_string(), "O".to_string()]];
//!
//! let props = dataset_props(&tokens, &tags).unwrap();
//! assert_eq!(props.to_string(), "#sentences = 1, #tokens = 2, #ne = 1, #ne / #tokens = 0.500");
//! ```
//!
//! ## Tag vocabularies
//!
//! Two tag alphabets coexist on purpose: inferred tags use the
//! single-character [`TARGET_TAG`]/[`OUTSIDE_TAG`] sentinels, while gold
//! datasets use BIO `<prefix><type>` labels with `"O"` for outside. Each
//! function documents which alphabet it reads.

#![warn(missing_docs)]

mod error;
pub mod infer;
pub mod similarity;
pub mod stats;
pub mod tokens;

pub use error::{Error, Result};
pub use infer::{
    infer_tags, sim_transform, tag_main_part, tags_to_binary, InferConfig, OUTSIDE_TAG, TARGET_TAG,
};
pub use similarity::{
    cosine_range, similarity, similarity_batch, to_feature_matrix, value_range, FlatSimilarities,
    SimMetric, Similarity,
};
pub use stats::{dataset_props, softmax, split_tokens_tags, DatasetProps};
pub use tokens::{flatten, to_lower_case, token_count, TokenInput};
