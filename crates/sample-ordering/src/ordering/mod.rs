//! Weighted, explainable ordering of tasting samples.
//!
//! A configuration lists criteria (numeric, date, enum, boolean), each with a
//! weight, a direction, and a dotted data path into the sample record. Ranking
//! resolves every active criterion per sample, normalizes the raw value onto a
//! 0-100 scale, orients it by direction, and averages the weighted results.
//! Samples are then sorted by that aggregate, best first, with ties kept in
//! input order.
//!
//! The core (`path`, `normalizer`, `scorer`, `engine`, `validator`) performs no
//! I/O and holds no state between calls; `service` and `router` expose it over HTTP.

mod defaults;
pub mod domain;
mod engine;
mod normalizer;
pub mod path;
pub mod router;
pub mod scorer;
mod selection;
pub mod service;
mod validator;

#[cfg(test)]
mod tests;

pub use defaults::standard_criteria;
pub use domain::{
    BooleanNormalization, ConfigurationId, Criterion, CriterionContribution, CriterionId,
    CriterionKind, DateNormalization, Direction, EnumNormalization, NumericNormalization,
    OrderingConfiguration, RankedResult, SessionKind, SessionScope,
};
pub use engine::{IncrementalRanking, RankingEngine, RankingError};
pub use normalizer::{normalize, NormalizedValue};
pub use router::ordering_router;
pub use selection::{apply_order, select_configuration, ORDER_FIELD};
pub use service::{OrderingService, OrderingServiceError};
pub use validator::{
    blocking_issues, validate, IssueKind, Severity, ValidationIssue, MAX_WEIGHT, MIN_WEIGHT,
    RECOMMENDED_WEIGHT_TOTAL,
};
