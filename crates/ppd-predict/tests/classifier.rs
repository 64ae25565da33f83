//! Adapter behavior with stub predictors and small model files.

use std::io::Write;

use ppd_model::{FeatureError, FeatureMatrix, FeatureRow, RiskLabel};
use ppd_predict::{
    DenseNetwork, LightGbmModel, ModelKind, PredictError, Predictor, PredictorSlot, RawScores,
    Result, RiskClassifier,
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

/// Returns the same raw output whatever the input.
struct FixedScores(RawScores);

impl Predictor for FixedScores {
    fn predict(&self, _rows: &FeatureMatrix) -> Result<RawScores> {
        Ok(self.0.clone())
    }
}

fn stub(kind: ModelKind, scores: RawScores) -> PredictorSlot {
    PredictorSlot::ready(kind, Box::new(FixedScores(scores)))
}

fn classifier_with(tree: RawScores, network: RawScores) -> RiskClassifier {
    RiskClassifier::new(
        stub(ModelKind::TreeEnsemble, tree),
        stub(ModelKind::NeuralNetwork, network),
    )
}

fn row(depression_frequency: f64, age: f64, depression_after_birth: f64) -> FeatureRow {
    FeatureRow::new([
        depression_frequency,
        13.0,
        2.0,
        age,
        5.0,
        5.0,
        1.0,
        depression_after_birth,
    ])
}

fn matrix(rows: usize) -> FeatureMatrix {
    (0..rows).map(|_| row(5.0, 30.0, 1.0)).collect()
}

const TREE_MODEL: &str = "\
tree
version=v4
num_class=1
num_tree_per_iteration=1
label_index=0
max_feature_idx=7
objective=binary sigmoid:1
feature_names=MH_PPDPR INCOME8 MAT_RACE_PU MAT_AGE_PU PAT_ED MAT_ED STATE MH_PPDX
feature_infos=[0:5] [0:13] [0:23] [17:45] [0:5] [0:5] [0:15] [0:2]
tree_sizes=400 300

Tree=0
num_leaves=3
num_cat=0
split_feature=3 0
split_gain=10.5 4.25
threshold=30.500000000000004 2.5000000000000004
decision_type=2 2
left_child=1 -2
right_child=-1 -3
leaf_value=0.40000000000000002 1.2 -1.5
leaf_weight=10 20 30
leaf_count=10 20 30
internal_value=0 0
internal_weight=0 0
internal_count=60 50
is_linear=0
shrinkage=1


Tree=1
num_leaves=2
num_cat=0
split_feature=7
split_gain=3.5
threshold=1.5000000000000002
decision_type=2
left_child=-1
right_child=-2
leaf_value=-0.29999999999999999 0.59999999999999998
leaf_weight=40 20
leaf_count=40 20
internal_value=0
internal_weight=0
internal_count=60
is_linear=0
shrinkage=0.1


end of trees

feature_importances:
MH_PPDX=1
MAT_AGE_PU=1
MH_PPDPR=1

parameters:
[boosting: gbdt]
[objective: binary]
end of parameters

pandas_categorical:null
";

/// Two-class softmax driven by `MH_PPDX` alone.
const SOFTMAX_NETWORK: &str = r#"{
  "feature_names": ["MH_PPDPR", "INCOME8", "MAT_RACE_PU", "MAT_AGE_PU", "PAT_ED", "MAT_ED", "STATE", "MH_PPDX"],
  "layers": [
    {
      "weights": [[0, 0], [0, 0], [0, 0], [0, 0], [0, 0], [0, 0], [0, 0], [-1, 1]],
      "bias": [1.5, -1.5],
      "activation": "softmax"
    }
  ]
}"#;

/// Relu hidden unit on age feeding a sigmoid output.
const SIGMOID_NETWORK: &str = r#"{
  "layers": [
    {
      "weights": [[0], [0], [0], [0.1], [0], [0], [0], [0]],
      "bias": [-2],
      "activation": "relu"
    },
    { "weights": [[2]], "bias": [-1], "activation": "sigmoid" }
  ]
}"#;

fn temp_model(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn single_uses_tree_score() {
    let classifier = classifier_with(RawScores::Column(vec![0.73]), RawScores::Column(vec![]));
    let prediction = classifier.classify_single(&row(5.0, 30.0, 1.0)).unwrap();
    assert_eq!(prediction.label, RiskLabel::HighRisk);
    assert_eq!(prediction.score, 0.73);
}

#[test]
fn single_with_extra_scores_is_a_shape_mismatch() {
    let classifier = classifier_with(RawScores::Column(vec![0.1, 0.9]), RawScores::Column(vec![]));
    let err = classifier.classify_single(&row(5.0, 30.0, 1.0)).unwrap_err();
    let feature = err.as_feature().unwrap();
    assert_eq!(
        feature,
        &FeatureError::ScoreShapeMismatch {
            expected: 1,
            actual: 2
        }
    );
    assert!(feature.is_integrity_fault());
}

#[test]
fn batch_two_class_output_uses_positive_column() {
    let classifier = classifier_with(
        RawScores::Column(vec![]),
        RawScores::Matrix {
            values: vec![0.9, 0.1, 0.2, 0.8, 0.5, 0.5],
            n_cols: 2,
        },
    );
    let labels: Vec<RiskLabel> = classifier
        .classify_batch(&matrix(3))
        .unwrap()
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(
        labels,
        vec![RiskLabel::LowRisk, RiskLabel::HighRisk, RiskLabel::LowRisk]
    );
}

#[test]
fn batch_short_output_is_a_shape_mismatch() {
    let classifier = classifier_with(RawScores::Column(vec![]), RawScores::Column(vec![0.2, 0.7]));
    let err = classifier.classify_batch(&matrix(3)).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Feature(FeatureError::ScoreShapeMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn unavailable_model_is_reported_on_every_request() {
    let classifier = RiskClassifier::new(
        PredictorSlot::unavailable(ModelKind::TreeEnsemble, "file missing"),
        stub(ModelKind::NeuralNetwork, RawScores::Column(vec![0.9])),
    );
    for _ in 0..2 {
        let err = classifier.classify_single(&row(5.0, 30.0, 1.0)).unwrap_err();
        assert!(matches!(
            err.as_feature(),
            Some(FeatureError::ModelUnavailable { model, .. }) if model == "tree-ensemble"
        ));
    }
    // The other model is unaffected.
    assert_eq!(classifier.classify_batch(&matrix(1)).unwrap().len(), 1);
}

#[test]
fn failed_load_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lightgbm_model.txt");
    let slot = PredictorSlot::lazy(ModelKind::TreeEnsemble, &path);
    assert!(!slot.is_available());

    std::fs::write(&path, TREE_MODEL).unwrap();
    assert!(!slot.is_available());
}

#[test]
fn tree_model_scores_rows() {
    let model = LightGbmModel::parse(TREE_MODEL).unwrap();
    assert_eq!(model.tree_count(), 2);

    // age <= 30.5, MH_PPDPR > 2.5, MH_PPDX <= 1.5: -1.5 - 0.3
    let low = model.score_row(&row(5.0, 30.0, 1.0));
    assert!((low - 1.0 / (1.0 + 1.8f64.exp())).abs() < 1e-9, "{low}");

    // age <= 30.5, MH_PPDPR <= 2.5, MH_PPDX > 1.5: 1.2 + 0.6
    let high = model.score_row(&row(1.0, 25.0, 2.0));
    assert!((high - 1.0 / (1.0 + (-1.8f64).exp())).abs() < 1e-9, "{high}");

    // age > 30.5 takes the first leaf
    let older = model.score_row(&row(1.0, 40.0, 1.0));
    assert!((older - 1.0 / (1.0 + (-0.1f64).exp())).abs() < 1e-9, "{older}");
}

#[test]
fn tree_model_from_file_classifies_single() {
    let file = temp_model(TREE_MODEL);
    let classifier = RiskClassifier::new(
        PredictorSlot::lazy(ModelKind::TreeEnsemble, file.path()),
        PredictorSlot::unavailable(ModelKind::NeuralNetwork, "unused"),
    );
    let prediction = classifier.classify_single(&row(5.0, 30.0, 1.0)).unwrap();
    assert_eq!(prediction.label, RiskLabel::LowRisk);

    let status = classifier.tree().status();
    assert!(status.available);
    assert_eq!(status.fingerprint.as_deref().map(str::len), Some(64));
}

#[test]
fn softmax_network_classifies_batch() {
    let network = DenseNetwork::from_json(SOFTMAX_NETWORK).unwrap();
    assert_eq!(network.output_width(), 2);

    let classifier = RiskClassifier::new(
        PredictorSlot::unavailable(ModelKind::TreeEnsemble, "unused"),
        PredictorSlot::ready(ModelKind::NeuralNetwork, Box::new(network)),
    );
    let rows: FeatureMatrix = [0.0, 1.0, 2.0]
        .into_iter()
        .map(|after_birth| row(5.0, 30.0, after_birth))
        .collect();
    let labels: Vec<RiskLabel> = classifier
        .classify_batch(&rows)
        .unwrap()
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(
        labels,
        vec![RiskLabel::LowRisk, RiskLabel::LowRisk, RiskLabel::HighRisk]
    );
}

#[test]
fn sigmoid_network_from_file() {
    let file = temp_model(SIGMOID_NETWORK);
    let network = DenseNetwork::from_path(file.path()).unwrap();
    let RawScores::Column(scores) = network
        .predict(&FeatureMatrix::new(vec![row(5.0, 30.0, 1.0), row(5.0, 17.0, 1.0)]))
        .unwrap()
    else {
        panic!("single-unit output should be a column");
    };
    assert!((scores[0] - 1.0 / (1.0 + (-1.0f64).exp())).abs() < 1e-9);
    assert!((scores[1] - 1.0 / (1.0 + 1.0f64.exp())).abs() < 1e-9);
}

#[test]
fn network_with_wrong_feature_names_is_rejected() {
    let text = SOFTMAX_NETWORK.replace("\"STATE\"", "\"REGION\"");
    assert!(matches!(
        DenseNetwork::from_json(&text),
        Err(PredictError::FeatureNames { .. })
    ));
}

proptest! {
    #[test]
    fn label_follows_strict_threshold(score in 0.0f64..=1.0) {
        let classifier = classifier_with(RawScores::Column(vec![score]), RawScores::Column(vec![score]));
        let single = classifier.classify_single(&row(5.0, 30.0, 1.0)).unwrap();
        let batch = classifier.classify_batch(&matrix(1)).unwrap();
        prop_assert_eq!(single.label.is_high(), score > 0.5);
        prop_assert_eq!(batch[0].label, single.label);
    }
}
