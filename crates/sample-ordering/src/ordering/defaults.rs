use chrono::{DateTime, Utc};

use super::domain::{
    ConfigurationId, Criterion, CriterionId, CriterionKind, DateNormalization, Direction,
    EnumNormalization, NumericNormalization, OrderingConfiguration,
};

impl OrderingConfiguration {
    /// Stock configuration offered to users before they author their own.
    pub fn standard(now: DateTime<Utc>) -> Self {
        Self {
            id: ConfigurationId("standard".to_string()),
            name: "Standard ordering".to_string(),
            description: "Fresh, high-quality, high-priority samples first.".to_string(),
            scope: None,
            criteria: standard_criteria(now),
            is_default: true,
            created_by: "system".to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replace the criteria with the stock set, keeping identity, name, and scope.
    pub fn restore_defaults(&mut self, now: DateTime<Utc>) {
        self.criteria = standard_criteria(now);
        self.updated_at = Some(now);
    }
}

pub fn standard_criteria(now: DateTime<Utc>) -> Vec<Criterion> {
    vec![
        criterion(
            "production-date",
            "Production date",
            "Prioritizes the most recently produced samples",
            CriterionKind::Date {
                normalization: DateNormalization { max: 30.0 },
            },
            (30, Direction::Desc, true),
            "productionDate",
            now,
        ),
        criterion(
            "quality-score",
            "Quality score",
            "Based on previous evaluations",
            CriterionKind::Numeric {
                normalization: NumericNormalization {
                    min: 0.0,
                    max: 100.0,
                    default_value: 50.0,
                },
            },
            (25, Direction::Desc, true),
            "quality.score",
            now,
        ),
        criterion(
            "priority",
            "Priority",
            "Priority level assigned to the sample",
            CriterionKind::Enum {
                options: vec!["baixa".to_string(), "media".to_string(), "alta".to_string()],
                normalization: EnumNormalization {
                    default_value: 50.0,
                },
            },
            (20, Direction::Desc, true),
            "priority",
            now,
        ),
        criterion(
            "test-frequency",
            "Test frequency",
            "Days between evaluations; frequently tested samples come first",
            CriterionKind::Numeric {
                normalization: NumericNormalization {
                    min: 1.0,
                    max: 30.0,
                    default_value: 7.0,
                },
            },
            (15, Direction::Asc, true),
            "testFrequency",
            now,
        ),
        criterion(
            "risk-level",
            "Risk level",
            "Risk associated with the sample",
            CriterionKind::Enum {
                options: vec!["baixo".to_string(), "medio".to_string(), "alto".to_string()],
                normalization: EnumNormalization {
                    default_value: 33.0,
                },
            },
            (10, Direction::Desc, false),
            "riskLevel",
            now,
        ),
    ]
}

fn criterion(
    id: &str,
    name: &str,
    description: &str,
    kind: CriterionKind,
    (weight, direction, is_active): (u32, Direction, bool),
    data_path: &str,
    now: DateTime<Utc>,
) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        weight,
        direction,
        is_active,
        data_path: data_path.to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    }
}
