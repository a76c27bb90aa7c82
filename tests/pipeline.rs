//! End-to-end pipeline tests: tokens and embeddings in, tags and
//! statistics out.

use fewviz::{
    cosine_range, dataset_props, infer_tags, similarity_batch, split_tokens_tags, tags_to_binary,
    to_feature_matrix, to_lower_case, value_range, FlatSimilarities, InferConfig, SimMetric,
    TokenInput,
};
use ndarray::{arr1, Array3};

/// Two sequences, padded to three positions; sequence 1 only uses
/// position 0. Feature dimension 3, support aligned with feature 0.
fn fixture() -> (TokenInput, Array3<f64>, ndarray::Array1<f64>) {
    let tokens = TokenInput::Nested(vec![
        vec!["Paris".into(), "is".into(), "nice".into()],
        vec!["Berlin".into()],
    ]);
    let mut embeddings = Array3::zeros((2, 3, 3));
    embeddings[[0, 0, 0]] = 5.0; // "Paris": aligned with support
    embeddings[[0, 1, 1]] = 1.0; // "is": orthogonal
    embeddings[[0, 2, 1]] = 0.5; // "nice": orthogonal
    embeddings[[0, 2, 2]] = 0.5;
    embeddings[[1, 0, 0]] = 2.0; // "Berlin": mostly aligned
    embeddings[[1, 0, 1]] = 0.5;
    let support = arr1(&[1.0, 0.0, 0.0]);
    (tokens, embeddings, support)
}

#[test]
fn similarity_to_tags_pipeline() {
    let (tokens, embeddings, support) = fixture();

    let sims = similarity_batch(&tokens, embeddings.view(), support.view()).unwrap();
    assert_eq!(sims.len(), 2);
    assert_eq!(sims[0].len(), 3);
    assert_eq!(sims[1].len(), 1);

    let (min, max) = cosine_range(&sims).unwrap();
    assert!((min - 0.0).abs() < 1e-12);
    assert!((max - 1.0).abs() < 1e-12);

    let tags = infer_tags(&sims, SimMetric::Cosine, &InferConfig::default()).unwrap();
    assert_eq!(tags[0], vec!["T", "O", "O"]);
    assert_eq!(tags[1], vec!["T"]);

    assert_eq!(tags_to_binary(&tags), vec![1, 0, 0, 1]);
}

#[test]
fn flat_columns_match_batch_order() {
    let (tokens, embeddings, support) = fixture();
    let sims = similarity_batch(&tokens, embeddings.view(), support.view()).unwrap();

    let flat = FlatSimilarities::from_batch(&sims);
    assert_eq!(flat.cosine.len(), 4);
    assert_eq!(flat.metric(SimMetric::EucDist).len(), 4);
    // Last column entry is sequence 1, position 0.
    assert!((flat.dot_prod[3] - 2.0).abs() < 1e-12);

    // The ragged euc_dist rows feed value_range directly.
    let ragged: Vec<Vec<f64>> = sims
        .iter()
        .map(|row| row.iter().map(|s| s.euc_dist).collect())
        .collect();
    let (lo, hi) = value_range(&ragged).unwrap();
    assert!(lo <= hi);
    assert!(hi <= 1.0);
}

#[test]
fn padding_then_feature_matrix() {
    let (tokens, embeddings, _) = fixture();

    let padded = tokens.pad().unwrap();
    assert_eq!(padded.lengths(), vec![3, 3]);

    // The feature matrix uses the true lengths, not the padded ones.
    let feat_mat = to_feature_matrix(embeddings.view(), &tokens.lengths()).unwrap();
    assert_eq!(feat_mat.dim(), (4, 3));
    assert!((feat_mat[[0, 0]] - 5.0).abs() < 1e-12);
    assert!((feat_mat[[3, 0]] - 2.0).abs() < 1e-12);
}

#[test]
fn dataset_split_and_profile() {
    let dataset = vec![
        (
            vec!["John".to_string(), "visited".to_string(), "Paris".to_string()],
            vec!["B-PER".to_string(), "O".to_string(), "B-LOC".to_string()],
        ),
        (
            vec!["He".to_string(), "slept".to_string()],
            vec!["O".to_string(), "O".to_string()],
        ),
    ];

    let (tokens, tags) = split_tokens_tags(dataset);
    let lowered = to_lower_case(&tokens);
    assert_eq!(lowered[0][2], "paris");

    let props = dataset_props(&tokens, &tags).unwrap();
    assert_eq!(props.sent_count, 2);
    assert_eq!(props.tokens_count, 5);
    assert_eq!(props.ne_count, 2);
    assert!((props.ne_ratio - 0.4).abs() < 1e-12);
    assert!((props.ne_types["PER"] - 0.5).abs() < 1e-12);
    assert!((props.ne_types["LOC"] - 0.5).abs() < 1e-12);
    assert_eq!(
        props.to_string(),
        "#sentences = 2, #tokens = 5, #ne = 2, #ne / #tokens = 0.400"
    );
}

#[test]
fn flat_input_is_a_one_sequence_batch() {
    let tokens = TokenInput::Flat(vec!["Paris".into(), "is".into()]);
    let mut embeddings = Array3::zeros((1, 2, 2));
    embeddings[[0, 0, 0]] = 1.0;
    embeddings[[0, 1, 1]] = 1.0;
    let support = arr1(&[1.0, 0.0]);

    let sims = similarity_batch(&tokens, embeddings.view(), support.view()).unwrap();
    assert_eq!(sims.len(), 1);
    assert_eq!(sims[0].len(), 2);
    assert!((sims[0][0].cosine - 1.0).abs() < 1e-12);
}
