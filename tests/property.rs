//! Property tests for padding, normalization, and scoring invariants.

use fewviz::{sim_transform, similarity, softmax, TokenInput};
use ndarray::arr1;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_pad_uniform_and_reversible(
        seqs in prop::collection::vec(
            prop::collection::vec("[a-z]{1,6}", 1..6),
            1..6,
        )
    ) {
        let input = TokenInput::Nested(seqs.clone());
        let padded = input.pad().unwrap();

        let max_len = seqs.iter().map(Vec::len).max().unwrap_or(0);
        let TokenInput::Nested(padded_seqs) = padded else {
            panic!("padding must not change the variant");
        };

        for (original, padded_seq) in seqs.iter().zip(&padded_seqs) {
            // Uniform inner length equal to the batch maximum.
            prop_assert_eq!(padded_seq.len(), max_len);
            // Stripping trailing empty padding reproduces the input.
            let stripped: Vec<String> = padded_seq
                .iter()
                .take(original.len())
                .cloned()
                .collect();
            prop_assert_eq!(&stripped, original);
            for pad in &padded_seq[original.len()..] {
                prop_assert_eq!(pad.as_str(), "");
            }
        }
    }

    #[test]
    fn test_softmax_sums_to_one(
        values in prop::collection::vec(-100.0f64..100.0, 1..50)
    ) {
        let weights = softmax(&values, true);
        prop_assert_eq!(weights.len(), values.len());
        let sum: f64 = weights.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "weights summed to {}", sum);
        prop_assert!(weights.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn test_sim_transform_endpoints_and_bounds(
        sim_min in -1.0f64..1.0,
        spread in 0.01f64..2.0,
        temperature in 0.05f64..3.0,
        frac in 0.0f64..1.0,
    ) {
        let sim_max = sim_min + spread;

        let lo = sim_transform(sim_min, sim_min, sim_max, temperature);
        let hi = sim_transform(sim_max, sim_min, sim_max, temperature);
        prop_assert!(lo.abs() < 1e-9, "min mapped to {}", lo);
        prop_assert!((hi - 1.0).abs() < 1e-9, "max mapped to {}", hi);

        // Values inside the range stay inside [0, 1].
        let mid = sim_transform(sim_min + frac * spread, sim_min, sim_max, temperature);
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&mid));
    }

    #[test]
    fn test_similarity_self_score(
        features in prop::collection::vec(-100.0f64..100.0, 1..16)
    ) {
        let norm_sq: f64 = features.iter().map(|x| x * x).sum();
        prop_assume!(norm_sq > 1e-6);

        let v = arr1(&features);
        let sim = similarity(v.view(), v.view()).unwrap();

        prop_assert!((sim.cosine - 1.0).abs() < 1e-9);
        prop_assert!((sim.euc_dist - 1.0).abs() < 1e-12);
        prop_assert!((sim.dot_prod - norm_sq).abs() < 1e-6 * norm_sq.max(1.0));
    }

    #[test]
    fn test_similarity_cosine_bounded(
        token in prop::collection::vec(-100.0f64..100.0, 4),
        support in prop::collection::vec(-100.0f64..100.0, 4),
    ) {
        let token_norm_sq: f64 = token.iter().map(|x| x * x).sum();
        prop_assume!(token_norm_sq > 1e-6);

        let t = arr1(&token);
        let s = arr1(&support);
        let sim = similarity(t.view(), s.view()).unwrap();

        prop_assert!(sim.cosine >= -1.0 - 1e-9 && sim.cosine <= 1.0 + 1e-9);
        prop_assert!(sim.euc_dist > 0.0 && sim.euc_dist <= 1.0);
    }
}
