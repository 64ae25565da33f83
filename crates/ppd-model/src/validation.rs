//! Itemized validation results.

use std::fmt;

use crate::error::FeatureError;

/// Outcome of validating one record or one batch table.
///
/// An empty outcome means the input passed every check. Otherwise it lists
/// every issue found by the stage that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    issues: Vec<FeatureError>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: FeatureError) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = FeatureError>) {
        self.issues.extend(issues);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FeatureError] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Converts the outcome into a result.
    ///
    /// A single issue is returned as itself so callers can match on the
    /// specific kind; several issues are wrapped in [`FeatureError::Rejected`].
    pub fn into_result(mut self) -> Result<(), FeatureError> {
        match self.issues.len() {
            0 => Ok(()),
            1 => Err(self.issues.remove(0)),
            _ => Err(FeatureError::Rejected(self)),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("no validation issues");
        }
        write!(f, "{} validation issues:", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl FromIterator<FeatureError> for ValidationOutcome {
    fn from_iter<I: IntoIterator<Item = FeatureError>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;

    fn unknown(value: &str, row: usize) -> FeatureError {
        FeatureError::UnknownOption {
            field: Feature::State,
            value: value.to_string(),
            row: Some(row),
        }
    }

    #[test]
    fn empty_outcome_is_ok() {
        assert!(ValidationOutcome::new().into_result().is_ok());
    }

    #[test]
    fn single_issue_is_unwrapped() {
        let outcome: ValidationOutcome = [unknown("Atlantis", 0)].into_iter().collect();
        assert_eq!(outcome.into_result(), Err(unknown("Atlantis", 0)));
    }

    #[test]
    fn several_issues_are_wrapped() {
        let outcome: ValidationOutcome = [unknown("Atlantis", 0), unknown("Narnia", 2)]
            .into_iter()
            .collect();
        let err = outcome.into_result().unwrap_err();
        let FeatureError::Rejected(inner) = &err else {
            panic!("expected rejected outcome, got {err:?}");
        };
        assert_eq!(inner.len(), 2);
        assert_eq!(
            err.to_string(),
            "2 validation issues:\n  - unknown option 'Atlantis' for STATE (row 1)\n  - unknown option 'Narnia' for STATE (row 3)"
        );
    }
}
