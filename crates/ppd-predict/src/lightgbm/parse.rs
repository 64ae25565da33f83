//! LightGBM text model parsing.
//!
//! The file is a header of `key=value` lines followed by `Tree=N` blocks and
//! an `end of trees` marker. Everything after the marker (importances,
//! training parameters) is ignored.

use std::collections::HashMap;
use std::str::FromStr;

use ppd_model::{FEATURE_COUNT, Feature};

use super::{Child, LightGbmModel, MissingType, Objective, Split, Tree};
use crate::error::{PredictError, Result};
use crate::slot::ModelKind;

const KIND: ModelKind = ModelKind::TreeEnsemble;

const CATEGORICAL_MASK: u8 = 1;
const DEFAULT_LEFT_MASK: u8 = 2;

type Fields<'a> = HashMap<&'a str, &'a str>;

pub(super) fn parse_model(text: &str) -> Result<LightGbmModel> {
    let mut header: Fields<'_> = HashMap::new();
    let mut blocks: Vec<(&str, Fields<'_>)> = Vec::new();
    let mut average_output = false;

    for line in text.lines().map(str::trim) {
        if line == "end of trees" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(id) = line.strip_prefix("Tree=") {
            blocks.push((id, HashMap::new()));
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            if blocks.is_empty() && line == "average_output" {
                average_output = true;
            }
            continue;
        };
        match blocks.last_mut() {
            Some((_, fields)) => fields.insert(key, value),
            None => header.insert(key, value),
        };
    }

    if let Some(classes) = header.get("num_class")
        && classes.trim() != "1"
    {
        return Err(PredictError::invalid(
            KIND,
            format!("expected a single-output model, found num_class={classes}"),
        ));
    }

    let objective = header
        .get("objective")
        .ok_or_else(|| PredictError::invalid(KIND, "header has no objective"))
        .and_then(|value| parse_objective(value))?;

    let feature_names = header
        .get("feature_names")
        .ok_or_else(|| PredictError::invalid(KIND, "header has no feature_names"))?;
    check_feature_names(feature_names)?;

    if blocks.is_empty() {
        return Err(PredictError::invalid(KIND, "model contains no trees"));
    }
    let trees = blocks
        .iter()
        .map(|(id, fields)| parse_tree(id, fields))
        .collect::<Result<Vec<_>>>()?;

    Ok(LightGbmModel {
        objective,
        trees,
        average_output,
    })
}

fn parse_objective(value: &str) -> Result<Objective> {
    let mut tokens = value.split_whitespace();
    match tokens.next().unwrap_or_default() {
        "binary" | "cross_entropy" | "xentropy" => {
            let scale = tokens
                .find_map(|token| token.strip_prefix("sigmoid:"))
                .map(str::parse::<f64>)
                .transpose()
                .map_err(|e| PredictError::invalid(KIND, format!("bad sigmoid scale: {e}")))?
                .unwrap_or(1.0);
            Ok(Objective::Sigmoid { scale })
        }
        "regression" | "regression_l2" | "regression_l1" | "huber" | "fair" | "quantile"
        | "mape" => Ok(Objective::Identity),
        other => Err(PredictError::invalid(
            KIND,
            format!("unsupported objective '{other}'"),
        )),
    }
}

fn check_feature_names(value: &str) -> Result<()> {
    let found: Vec<&str> = value.split_whitespace().collect();
    let expected = Feature::column_names();
    if found.as_slice() == expected.as_slice() {
        return Ok(());
    }
    Err(PredictError::FeatureNames {
        kind: KIND,
        expected: expected.iter().map(ToString::to_string).collect(),
        found: found.iter().map(ToString::to_string).collect(),
    })
}

fn parse_tree(id: &str, fields: &Fields<'_>) -> Result<Tree> {
    let num_leaves: usize = scalar(id, fields, "num_leaves")?;
    if num_leaves == 0 {
        return Err(tree_error(id, "num_leaves must be positive"));
    }
    if fields.get("num_cat").is_some_and(|n| n.trim() != "0") {
        return Err(tree_error(id, "categorical splits are not supported"));
    }
    if fields.get("is_linear").is_some_and(|n| n.trim() != "0") {
        return Err(tree_error(id, "linear trees are not supported"));
    }

    let leaf_values: Vec<f64> = list(id, fields, "leaf_value")?;
    expect_len(id, "leaf_value", &leaf_values, num_leaves)?;
    if num_leaves == 1 {
        return Ok(Tree {
            splits: Vec::new(),
            leaf_values,
        });
    }

    let node_count = num_leaves - 1;
    let features: Vec<usize> = list(id, fields, "split_feature")?;
    let thresholds: Vec<f64> = list(id, fields, "threshold")?;
    let decisions: Vec<u8> = list(id, fields, "decision_type")?;
    let lefts: Vec<i64> = list(id, fields, "left_child")?;
    let rights: Vec<i64> = list(id, fields, "right_child")?;
    expect_len(id, "split_feature", &features, node_count)?;
    expect_len(id, "threshold", &thresholds, node_count)?;
    expect_len(id, "decision_type", &decisions, node_count)?;
    expect_len(id, "left_child", &lefts, node_count)?;
    expect_len(id, "right_child", &rights, node_count)?;

    let splits = (0..node_count)
        .map(|node| {
            let feature = features[node];
            if feature >= FEATURE_COUNT {
                return Err(tree_error(
                    id,
                    format!("split on feature {feature}, model has {FEATURE_COUNT}"),
                ));
            }
            let decision = decisions[node];
            if decision & CATEGORICAL_MASK != 0 {
                return Err(tree_error(id, "categorical splits are not supported"));
            }
            let missing = match (decision >> 2) & 3 {
                0 => MissingType::None,
                1 => MissingType::Zero,
                2 => MissingType::NaN,
                other => {
                    return Err(tree_error(id, format!("unknown missing type {other}")));
                }
            };
            Ok(Split {
                feature,
                threshold: thresholds[node],
                default_left: decision & DEFAULT_LEFT_MASK != 0,
                missing,
                left: child(id, node, lefts[node], node_count, num_leaves)?,
                right: child(id, node, rights[node], node_count, num_leaves)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Tree {
        splits,
        leaf_values,
    })
}

/// Non-negative indices are internal nodes, negative ones encode leaf `!raw`.
fn child(id: &str, parent: usize, raw: i64, node_count: usize, num_leaves: usize) -> Result<Child> {
    if raw >= 0 {
        let node = usize::try_from(raw).unwrap_or(usize::MAX);
        if node <= parent || node >= node_count {
            return Err(tree_error(
                id,
                format!("node {parent} has invalid child node {raw}"),
            ));
        }
        Ok(Child::Node(node))
    } else {
        let leaf = usize::try_from(!raw).unwrap_or(usize::MAX);
        if leaf >= num_leaves {
            return Err(tree_error(
                id,
                format!("node {parent} has invalid leaf {raw}"),
            ));
        }
        Ok(Child::Leaf(leaf))
    }
}

fn scalar<T: FromStr>(id: &str, fields: &Fields<'_>, key: &str) -> Result<T> {
    let value = fields
        .get(key)
        .ok_or_else(|| tree_error(id, format!("missing {key}")))?;
    value
        .trim()
        .parse()
        .map_err(|_| tree_error(id, format!("bad {key} '{value}'")))
}

fn list<T: FromStr>(id: &str, fields: &Fields<'_>, key: &str) -> Result<Vec<T>> {
    let value = fields
        .get(key)
        .ok_or_else(|| tree_error(id, format!("missing {key}")))?;
    value
        .split_whitespace()
        .map(|item| {
            item.parse()
                .map_err(|_| tree_error(id, format!("bad {key} value '{item}'")))
        })
        .collect()
}

fn expect_len<T>(id: &str, key: &str, values: &[T], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(tree_error(
            id,
            format!("{key} has {} values, expected {expected}", values.len()),
        ))
    }
}

fn tree_error(id: &str, message: impl std::fmt::Display) -> PredictError {
    PredictError::invalid(KIND, format!("Tree={id}: {message}"))
}
