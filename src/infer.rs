//! Turning similarity scores into entity / non-entity tags.
//!
//! Scores are first normalized to [0, 1] with a temperature-scaled
//! min-max transform, then thresholded into [`TARGET_TAG`] /
//! [`OUTSIDE_TAG`]. The transform exists for perceptual contrast in the
//! heatmap, not for calibrated probabilities.

use crate::similarity::{cosine_range, SimMetric, Similarity};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tag emitted for a token judged to belong to the target entity type.
pub const TARGET_TAG: &str = "T";
/// Tag emitted for a token outside any entity.
pub const OUTSIDE_TAG: &str = "O";

/// Knobs for similarity-to-tag inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferConfig {
    /// Temperature of the exponential rescale; lower sharpens contrast.
    pub temperature: f64,
    /// Tokens become [`TARGET_TAG`] when the transformed score exceeds
    /// this.
    pub threshold: f64,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            threshold: 0.5,
        }
    }
}

/// Temperature-scaled min-max normalization in exponential space.
///
/// `(exp(sim/T) − exp(min/T)) / (exp(max/T) − exp(min/T))`: maps
/// `sim_min` to 0.0 and `sim_max` to 1.0, monotonically increasing in
/// `sim` for `temperature > 0`.
///
/// Callers must ensure `sim_min < sim_max`; the result degenerates to
/// 0/0 when the range collapses. [`infer_tags`] checks this before
/// transforming a batch.
#[must_use]
pub fn sim_transform(sim: f64, sim_min: f64, sim_max: f64, temperature: f64) -> f64 {
    let lo = (sim_min / temperature).exp();
    let hi = (sim_max / temperature).exp();
    ((sim / temperature).exp() - lo) / (hi - lo)
}

/// Threshold a similarity batch into `T`/`O` tags mirroring its shape.
///
/// The normalization range is always taken over the **cosine** column,
/// matching the original visualization's behavior even when `metric`
/// selects a different score to threshold. The mismatch is preserved
/// deliberately; a warning is logged when it applies.
///
/// # Errors
///
/// - [`Error::EmptyInput`] when the batch holds no records.
/// - [`Error::DegenerateRange`] when all cosine scores are equal, since
///   min-max normalization is then undefined.
///
/// # Example
///
/// ```rust
/// use fewviz::{infer_tags, InferConfig, SimMetric, Similarity};
///
/// let sims = vec![vec![
///     Similarity { euc_dist: 0.9, dot_prod: 2.0, cosine: 0.9 },
///     Similarity { euc_dist: 0.1, dot_prod: 0.1, cosine: -0.2 },
/// ]];
/// let tags = infer_tags(&sims, SimMetric::Cosine, &InferConfig::default()).unwrap();
/// assert_eq!(tags, vec![vec!["T".to_string(), "O".to_string()]]);
/// ```
pub fn infer_tags(
    sim_list: &[Vec<Similarity>],
    metric: SimMetric,
    config: &InferConfig,
) -> Result<Vec<Vec<String>>> {
    let (sim_min, sim_max) = cosine_range(sim_list)?;
    if sim_min == sim_max {
        return Err(Error::DegenerateRange(sim_min));
    }
    if metric != SimMetric::Cosine {
        log::warn!(
            "thresholding {metric} scores against the cosine range [{sim_min:.4}, {sim_max:.4}]; \
             transformed values may leave [0, 1]"
        );
    }

    let tags = sim_list
        .iter()
        .map(|row| {
            row.iter()
                .map(|sim| {
                    let scaled =
                        sim_transform(sim.metric(metric), sim_min, sim_max, config.temperature);
                    if scaled > config.threshold {
                        TARGET_TAG.to_string()
                    } else {
                        OUTSIDE_TAG.to_string()
                    }
                })
                .collect()
        })
        .collect();
    Ok(tags)
}

/// Flatten inferred tags into 1/0 flags, `1` iff a tag is exactly
/// [`TARGET_TAG`].
///
/// This consumes the inferred `T`/`O` vocabulary. BIO-tagged gold data
/// uses [`crate::stats::dataset_props`] instead; the two vocabularies
/// are intentionally distinct.
#[must_use]
pub fn tags_to_binary<S: AsRef<str>>(tags: &[Vec<S>]) -> Vec<u8> {
    tags.iter()
        .flat_map(|seq| seq.iter())
        .map(|tag| u8::from(tag.as_ref() == TARGET_TAG))
        .collect()
}

/// Strip the two-character BIO prefix from a tag, yielding the entity
/// type name.
///
/// `"O"` passes through unchanged; a non-`O` tag shorter than its prefix
/// yields an empty type.
#[must_use]
pub fn tag_main_part(tag: &str) -> &str {
    if tag == "O" {
        tag
    } else {
        tag.get(2..).unwrap_or("")
    }
}
