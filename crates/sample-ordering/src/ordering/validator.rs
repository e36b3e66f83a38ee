use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionId, CriterionKind, OrderingConfiguration};

pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 100;
pub const RECOMMENDED_WEIGHT_TOTAL: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Problems the validator can report about a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    NoActiveCriteria,
    WeightOutOfRange { weight: u32 },
    MissingEnumOptions,
    EmptyDataPath,
    DuplicateCriterionId,
    InvalidNumericRange { min: f64, max: f64 },
    InvalidDateWindow { max: f64 },
    DefaultOutOfRange { value: f64 },
    BlankConfigurationName,
    WeightSumDeviation { total: u64 },
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::WeightSumDeviation { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this problem leaves scoring undefined, as opposed to one that
    /// only matters when saving or presenting a configuration.
    pub fn blocks_ranking(&self) -> bool {
        !matches!(
            self,
            IssueKind::BlankConfigurationName
                | IssueKind::DefaultOutOfRange { .. }
                | IssueKind::WeightSumDeviation { .. }
        )
    }

    pub fn summary(&self) -> String {
        match self {
            IssueKind::NoActiveCriteria => "at least one criterion must be active".to_string(),
            IssueKind::WeightOutOfRange { weight } => {
                format!("weight {weight} outside allowed range {MIN_WEIGHT}-{MAX_WEIGHT}")
            }
            IssueKind::MissingEnumOptions => "enum criterion has no options".to_string(),
            IssueKind::EmptyDataPath => "active criterion has an empty data path".to_string(),
            IssueKind::DuplicateCriterionId => "criterion identifier is not unique".to_string(),
            IssueKind::InvalidNumericRange { min, max } => {
                format!("numeric range is inverted or too wide (min {min}, max {max})")
            }
            IssueKind::InvalidDateWindow { max } => {
                format!("date window must be a positive number of days (found {max})")
            }
            IssueKind::DefaultOutOfRange { value } => {
                format!("enum default {value} outside percentile range 0-100")
            }
            IssueKind::BlankConfigurationName => "configuration name is required".to_string(),
            IssueKind::WeightSumDeviation { total } => format!(
                "active weights sum to {total}; {RECOMMENDED_WEIGHT_TOTAL} is recommended"
            ),
        }
    }
}

/// A single validator finding, optionally tied to the offending criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion_id: Option<CriterionId>,
    #[serde(flatten)]
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn new(criterion_id: Option<&CriterionId>, kind: IssueKind) -> Self {
        Self {
            severity: kind.severity(),
            criterion_id: criterion_id.cloned(),
            message: kind.summary(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.criterion_id {
            Some(id) => write!(f, "criterion '{id}': {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Report every problem with `config`; checks are independent and never short-circuit.
pub fn validate(config: &OrderingConfiguration) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.name.trim().is_empty() {
        issues.push(ValidationIssue::new(None, IssueKind::BlankConfigurationName));
    }

    if config.active_criteria().next().is_none() {
        issues.push(ValidationIssue::new(None, IssueKind::NoActiveCriteria));
    }

    for criterion in &config.criteria {
        check_criterion(criterion, &mut issues);
    }

    let mut occurrences: BTreeMap<&CriterionId, usize> = BTreeMap::new();
    for criterion in &config.criteria {
        *occurrences.entry(&criterion.id).or_default() += 1;
    }
    for (id, count) in occurrences {
        if count > 1 {
            issues.push(ValidationIssue::new(Some(id), IssueKind::DuplicateCriterionId));
        }
    }

    let total = config.active_weight_total();
    if total > 0 && total != RECOMMENDED_WEIGHT_TOTAL {
        issues.push(ValidationIssue::new(
            None,
            IssueKind::WeightSumDeviation { total },
        ));
    }

    issues
}

fn check_criterion(criterion: &Criterion, issues: &mut Vec<ValidationIssue>) {
    let id = Some(&criterion.id);

    if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&criterion.weight) {
        issues.push(ValidationIssue::new(
            id,
            IssueKind::WeightOutOfRange {
                weight: criterion.weight,
            },
        ));
    }

    if criterion.is_active && criterion.data_path.trim().is_empty() {
        issues.push(ValidationIssue::new(id, IssueKind::EmptyDataPath));
    }

    match &criterion.kind {
        CriterionKind::Numeric { normalization } => {
            let span = normalization.max - normalization.min;
            if normalization.min > normalization.max || !span.is_finite() {
                issues.push(ValidationIssue::new(
                    id,
                    IssueKind::InvalidNumericRange {
                        min: normalization.min,
                        max: normalization.max,
                    },
                ));
            }
        }
        CriterionKind::Date { normalization } => {
            if normalization.max <= 0.0 {
                issues.push(ValidationIssue::new(
                    id,
                    IssueKind::InvalidDateWindow {
                        max: normalization.max,
                    },
                ));
            }
        }
        CriterionKind::Enum {
            options,
            normalization,
        } => {
            if options.is_empty() {
                issues.push(ValidationIssue::new(id, IssueKind::MissingEnumOptions));
            }
            if !(0.0..=100.0).contains(&normalization.default_value) {
                issues.push(ValidationIssue::new(
                    id,
                    IssueKind::DefaultOutOfRange {
                        value: normalization.default_value,
                    },
                ));
            }
        }
        CriterionKind::Boolean { .. } => {}
    }
}

/// Issues that make `rank` refuse to run.
///
/// Per-criterion defects only block when the criterion is active; an inactive
/// criterion takes no part in scoring.
pub fn blocking_issues(config: &OrderingConfiguration) -> Vec<ValidationIssue> {
    validate(config)
        .into_iter()
        .filter(|issue| issue.is_error() && issue.kind.blocks_ranking())
        .filter(|issue| match (&issue.kind, &issue.criterion_id) {
            (IssueKind::DuplicateCriterionId, _) | (_, None) => true,
            (_, Some(id)) => config
                .criteria
                .iter()
                .any(|criterion| &criterion.id == id && criterion.is_active),
        })
        .collect()
}
