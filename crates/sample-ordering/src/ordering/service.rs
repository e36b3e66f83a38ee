use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::OrderingSettings;

use super::domain::{OrderingConfiguration, RankedResult};
use super::engine::{RankingEngine, RankingError};
use super::validator::{validate, ValidationIssue};

/// Service applying request limits around the ranking engine and validator.
#[derive(Debug, Clone)]
pub struct OrderingService {
    settings: OrderingSettings,
}

impl OrderingService {
    pub fn new(settings: OrderingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &OrderingSettings {
        &self.settings
    }

    pub fn validate(&self, config: &OrderingConfiguration) -> Vec<ValidationIssue> {
        let issues = validate(config);
        debug!(
            configuration = %config.id.0,
            issues = issues.len(),
            "validated ordering configuration"
        );
        issues
    }

    /// Rank a full batch. `reference` defaults to the current instant.
    pub fn rank(
        &self,
        entities: &[Value],
        config: &OrderingConfiguration,
        reference: Option<DateTime<Utc>>,
    ) -> Result<Vec<RankedResult>, OrderingServiceError> {
        self.ensure_within_limit(entities.len())?;
        let engine = engine_for(reference);
        engine.rank(entities, config).map_err(|err| {
            info!(configuration = %config.id.0, error = %err, "ranking refused");
            OrderingServiceError::from(err)
        })
    }

    /// Rank only the first `limit` entities (configured preview size when `None`).
    pub fn preview(
        &self,
        entities: &[Value],
        config: &OrderingConfiguration,
        limit: Option<usize>,
        reference: Option<DateTime<Utc>>,
    ) -> Result<Vec<RankedResult>, OrderingServiceError> {
        let limit = limit.unwrap_or(self.settings.preview_limit);
        self.ensure_within_limit(limit.min(entities.len()))?;
        let engine = engine_for(reference);
        engine
            .preview_subset(entities, config, limit)
            .map_err(|err| {
                info!(configuration = %config.id.0, error = %err, "preview refused");
                OrderingServiceError::from(err)
            })
    }

    fn ensure_within_limit(&self, count: usize) -> Result<(), OrderingServiceError> {
        if count > self.settings.max_entities {
            return Err(OrderingServiceError::TooManyEntities {
                count,
                limit: self.settings.max_entities,
            });
        }
        Ok(())
    }
}

fn engine_for(reference: Option<DateTime<Utc>>) -> RankingEngine {
    reference.map(RankingEngine::at).unwrap_or_default()
}

/// Error raised by the ordering service.
#[derive(Debug, thiserror::Error)]
pub enum OrderingServiceError {
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error("{count} samples submitted; at most {limit} can be ranked per request")]
    TooManyEntities { count: usize, limit: usize },
}
