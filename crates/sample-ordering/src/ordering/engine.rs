use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::domain::{Criterion, CriterionContribution, OrderingConfiguration, RankedResult};
use super::normalizer::normalize;
use super::path::resolve;
use super::scorer::{aggregate, contribute, Contribution};
use super::validator::{blocking_issues, IssueKind, ValidationIssue};

/// Reasons a ranking run refuses to execute.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("no active criteria: at least one criterion must be active to rank samples")]
    NoActiveCriteria,
    #[error("configuration cannot be used for ranking: {}", describe(.issues))]
    InvalidConfiguration { issues: Vec<ValidationIssue> },
}

impl RankingError {
    /// Validator findings behind the refusal, for callers that surface them.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            RankingError::NoActiveCriteria => &[],
            RankingError::InvalidConfiguration { issues } => issues,
        }
    }
}

fn describe(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Stateless ranking engine.
///
/// Every run is a pure function of the entities, the configuration, and the
/// reference instant that date criteria measure age against.
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine {
    reference: DateTime<Utc>,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingEngine {
    /// Engine measuring date ages against the instant it was built.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(reference: DateTime<Utc>) -> Self {
        Self { reference }
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Rank every entity, best first. Equal scores keep their input order.
    pub fn rank(
        &self,
        entities: &[Value],
        config: &OrderingConfiguration,
    ) -> Result<Vec<RankedResult>, RankingError> {
        let mut run = self.incremental(config)?;
        run.push_batch(entities);
        Ok(run.finish())
    }

    /// Same computation as [`rank`](Self::rank), restricted to the first `limit` entities.
    pub fn preview_subset(
        &self,
        entities: &[Value],
        config: &OrderingConfiguration,
        limit: usize,
    ) -> Result<Vec<RankedResult>, RankingError> {
        let subset = &entities[..limit.min(entities.len())];
        self.rank(subset, config)
    }

    /// Start a run that accepts entities in batches.
    pub fn incremental<'c>(
        &self,
        config: &'c OrderingConfiguration,
    ) -> Result<IncrementalRanking<'c>, RankingError> {
        let issues = blocking_issues(config);
        if issues
            .iter()
            .any(|issue| issue.kind == IssueKind::NoActiveCriteria)
        {
            return Err(RankingError::NoActiveCriteria);
        }
        if !issues.is_empty() {
            return Err(RankingError::InvalidConfiguration { issues });
        }

        let criteria: Vec<&Criterion> = config.active_criteria().collect();
        debug!(
            configuration = %config.id.0,
            active_criteria = criteria.len(),
            "starting ranking run"
        );

        Ok(IncrementalRanking {
            reference: self.reference,
            criteria,
            scored: Vec::new(),
        })
    }
}

/// Accumulates scored entities across batches; [`finish`](Self::finish) sorts them.
#[derive(Debug)]
pub struct IncrementalRanking<'c> {
    reference: DateTime<Utc>,
    criteria: Vec<&'c Criterion>,
    scored: Vec<RankedResult>,
}

impl<'c> IncrementalRanking<'c> {
    pub fn push_batch(&mut self, batch: &[Value]) {
        self.scored.reserve(batch.len());
        for entity in batch {
            let input_index = self.scored.len();
            let scored = self.score_entity(input_index, entity);
            self.scored.push(scored);
        }
    }

    pub fn len(&self) -> usize {
        self.scored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scored.is_empty()
    }

    pub fn finish(self) -> Vec<RankedResult> {
        let mut ranked = self.scored;
        // `sort_by` is stable: equal aggregates keep input order.
        ranked.sort_by(|a, b| b.aggregate_score.total_cmp(&a.aggregate_score));
        for (offset, result) in ranked.iter_mut().enumerate() {
            result.position = offset + 1;
        }

        debug!(entities = ranked.len(), "ranking run finished");
        ranked
    }

    fn score_entity(&self, input_index: usize, entity: &Value) -> RankedResult {
        let breakdown: Vec<CriterionContribution> = self
            .criteria
            .iter()
            .map(|criterion| {
                let raw = resolve(entity, &criterion.data_path);
                let normalized = normalize(raw, &criterion.kind, self.reference);
                if normalized.used_default {
                    debug!(
                        entity = input_index,
                        criterion = %criterion.id,
                        data_path = %criterion.data_path,
                        "raw value absent or unusable, applying default"
                    );
                }

                let Contribution {
                    oriented_score,
                    weighted,
                } = contribute(normalized.score, criterion.direction, criterion.weight);

                CriterionContribution {
                    criterion_id: criterion.id.clone(),
                    raw_value: raw.cloned(),
                    normalized_score: normalized.score,
                    oriented_score,
                    weight: criterion.weight,
                    weighted_contribution: weighted,
                    used_default: normalized.used_default,
                }
            })
            .collect();

        // Validation guarantees at least one active criterion with weight >= 1.
        let aggregate_score = aggregate(&breakdown).unwrap_or(0.0);

        RankedResult {
            position: 0,
            input_index,
            entity: entity.clone(),
            aggregate_score,
            breakdown,
        }
    }
}
