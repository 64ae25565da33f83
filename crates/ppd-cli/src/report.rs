//! Terminal rendering: tables and user-facing failure text.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use ppd_model::{BatchSummary, CategoryRegistry, Feature, FeatureError, FeatureRow, Prediction};
use ppd_predict::ModelStatus;

/// Issues listed before the rest are summarized as a count.
pub const MAX_LISTED_ISSUES: usize = 20;

/// Text shown to the user for a feature failure.
///
/// Integrity faults get a generic message; itemized rejections list their
/// issues, capped at [`MAX_LISTED_ISSUES`].
pub fn render_failure(err: &FeatureError) -> String {
    let FeatureError::Rejected(outcome) = err else {
        return err.user_message();
    };
    let mut text = format!("{} validation issues:", outcome.len());
    for issue in outcome.issues().iter().take(MAX_LISTED_ISSUES) {
        text.push_str("\n  - ");
        text.push_str(&issue.user_message());
    }
    if outcome.len() > MAX_LISTED_ISSUES {
        text.push_str(&format!("\n  ... and {} more", outcome.len() - MAX_LISTED_ISSUES));
    }
    text
}

/// One registry entry, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub field: &'static str,
    pub option: String,
    pub code: i32,
}

/// Every field's options in canonical field order, options in display order.
pub fn category_rows(registry: &CategoryRegistry) -> Vec<CategoryRow> {
    registry
        .fields()
        .flat_map(|field| {
            field.options().iter().map(move |option| CategoryRow {
                field: field.name(),
                option: option.label.clone(),
                code: option.code,
            })
        })
        .collect()
}

pub fn categories_table(registry: &CategoryRegistry) -> Table {
    let mut table = styled_table(vec!["Field", "Option", "Code"]);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in category_rows(registry) {
        table.add_row(vec![Cell::new(row.field), Cell::new(row.option), Cell::new(row.code)]);
    }
    table
}

pub fn feature_table(row: &FeatureRow) -> Table {
    let mut table = styled_table(vec!["Column", "Question", "Value"]);
    align_column(&mut table, 2, CellAlignment::Right);
    for feature in Feature::CANONICAL_ORDER {
        table.add_row(vec![
            Cell::new(feature.column_name()).add_attribute(Attribute::Bold),
            Cell::new(feature.question()),
            Cell::new(row.get(feature)),
        ]);
    }
    table
}

pub fn prediction_table(prediction: &Prediction) -> Table {
    let color = if prediction.label.is_high() {
        Color::Red
    } else {
        Color::Green
    };
    let mut table = styled_table(vec!["Prediction", "Score"]);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(prediction.label.description())
            .fg(color)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", prediction.score)),
    ]);
    table
}

pub fn batch_summary_table(summary: &BatchSummary) -> Table {
    let mut table = styled_table(vec!["Total", "Low Risk", "High Risk"]);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        Cell::new(summary.low_risk).fg(Color::Green),
        Cell::new(summary.high_risk).fg(Color::Red),
    ]);
    table
}

pub fn models_table(statuses: &[ModelStatus]) -> Table {
    let mut table = styled_table(vec!["Model", "Status", "Path", "SHA-256", "Detail"]);
    align_column(&mut table, 1, CellAlignment::Center);
    for status in statuses {
        let state = if status.available {
            Cell::new("ready").fg(Color::Green)
        } else {
            Cell::new("unavailable").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(status.kind.name()).add_attribute(Attribute::Bold),
            state,
            Cell::new(
                status
                    .path
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |path| path.display().to_string()),
            ),
            status
                .fingerprint
                .as_deref()
                .map_or_else(|| dim_cell("-"), |hash| Cell::new(&hash[..hash.len().min(16)])),
            Cell::new(&status.detail),
        ]);
    }
    table
}

fn styled_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120)
        .set_header(headers.into_iter().map(header_cell));
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppd_model::ValidationOutcome;

    #[test]
    fn long_issue_lists_are_capped() {
        let outcome: ValidationOutcome = (0..25)
            .map(|row| FeatureError::OutOfRange {
                column: "MAT_AGE_PU".to_string(),
                value: 50.0,
                min: 17.0,
                max: 45.0,
                row: Some(row),
            })
            .collect();
        let text = render_failure(&FeatureError::Rejected(outcome));
        assert!(text.starts_with("25 validation issues:"));
        assert_eq!(text.matches("\n  - ").count(), MAX_LISTED_ISSUES);
        assert!(text.ends_with("\n  ... and 5 more"));
    }

    #[test]
    fn integrity_faults_are_generic() {
        let text = render_failure(&FeatureError::RowCountMismatch {
            expected: 3,
            actual: 2,
        });
        assert!(!text.contains('3'), "{text}");
    }
}
