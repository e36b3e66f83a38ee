use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for ordering configurations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(pub String);

/// Identifier wrapper for a single criterion inside a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(pub String);

impl std::fmt::Display for CriterionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a larger raw magnitude pushes an entity up (`Desc`) or down (`Asc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Kind of tasting session a configuration can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Routine,
    Extra,
}

/// Optional scope filter carried by a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionScope {
    #[default]
    All,
    Routine,
    Extra,
}

impl SessionScope {
    pub fn covers(self, kind: SessionKind) -> bool {
        match self {
            SessionScope::All => true,
            SessionScope::Routine => kind == SessionKind::Routine,
            SessionScope::Extra => kind == SessionKind::Extra,
        }
    }

    /// True when the scope names exactly this session kind (not `All`).
    pub fn is_exactly(self, kind: SessionKind) -> bool {
        self != SessionScope::All && self.covers(kind)
    }
}

/// Clamp bounds and fallback for numeric criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericNormalization {
    pub min: f64,
    pub max: f64,
    pub default_value: f64,
}

/// Recency window, in days, for date criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateNormalization {
    pub max: f64,
}

/// Fallback percentile used when an enum value is absent or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumNormalization {
    pub default_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanNormalization {
    pub default_value: bool,
}

/// Closed set of criterion types, each carrying the parameters its normalization needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CriterionKind {
    Numeric {
        #[serde(rename = "normalizationConfig")]
        normalization: NumericNormalization,
    },
    Date {
        #[serde(rename = "normalizationConfig")]
        normalization: DateNormalization,
    },
    Enum {
        /// Ranked from lowest to highest.
        options: Vec<String>,
        #[serde(rename = "normalizationConfig")]
        normalization: EnumNormalization,
    },
    Boolean {
        #[serde(rename = "normalizationConfig")]
        normalization: BooleanNormalization,
    },
}

impl CriterionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            CriterionKind::Numeric { .. } => "numeric",
            CriterionKind::Date { .. } => "date",
            CriterionKind::Enum { .. } => "enum",
            CriterionKind::Boolean { .. } => "boolean",
        }
    }
}

/// A single configurable ranking dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: CriterionKind,
    pub weight: u32,
    pub direction: Direction,
    pub is_active: bool,
    #[serde(default)]
    pub data_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// User-authored set of criteria used to order the samples of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingConfiguration {
    pub id: ConfigurationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        rename = "sessionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub scope: Option<SessionScope>,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderingConfiguration {
    pub fn scope(&self) -> SessionScope {
        self.scope.unwrap_or_default()
    }

    pub fn active_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|criterion| criterion.is_active)
    }

    pub fn active_weight_total(&self) -> u64 {
        self.active_criteria()
            .map(|criterion| u64::from(criterion.weight))
            .sum()
    }

    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.id == id)
    }
}

/// Explainable share of one criterion in an entity's aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionContribution {
    pub criterion_id: CriterionId,
    /// `None` when the data path did not resolve.
    pub raw_value: Option<Value>,
    pub normalized_score: f64,
    pub oriented_score: f64,
    pub weight: u32,
    pub weighted_contribution: f64,
    /// Set when the raw value was absent or unusable and the criterion's fallback applied.
    pub used_default: bool,
}

/// Ranked output row for a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// 1-based position in the ranked output.
    pub position: usize,
    /// 0-based index of the entity in the input sequence.
    pub input_index: usize,
    pub entity: Value,
    pub aggregate_score: f64,
    pub breakdown: Vec<CriterionContribution>,
}
