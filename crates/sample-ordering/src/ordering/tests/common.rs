use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use crate::config::OrderingSettings;
use crate::ordering::domain::{
    BooleanNormalization, ConfigurationId, Criterion, CriterionId, CriterionKind,
    DateNormalization, Direction, EnumNormalization, NumericNormalization, OrderingConfiguration,
};
use crate::ordering::{ordering_router, OrderingService, RankingEngine};

pub(super) fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid reference time")
}

pub(super) fn engine() -> RankingEngine {
    RankingEngine::at(reference_time())
}

pub(super) fn days_ago(days: i64) -> String {
    (reference_time() - Duration::days(days)).to_rfc3339()
}

fn criterion(id: &str, kind: CriterionKind, weight: u32, direction: Direction) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: id.replace('-', " "),
        description: String::new(),
        kind,
        weight,
        direction,
        is_active: true,
        data_path: id.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub(super) fn numeric_criterion(
    id: &str,
    data_path: &str,
    (min, max, default_value): (f64, f64, f64),
    weight: u32,
    direction: Direction,
) -> Criterion {
    let mut criterion = criterion(
        id,
        CriterionKind::Numeric {
            normalization: NumericNormalization {
                min,
                max,
                default_value,
            },
        },
        weight,
        direction,
    );
    criterion.data_path = data_path.to_string();
    criterion
}

pub(super) fn date_criterion(id: &str, data_path: &str, window_days: f64, weight: u32) -> Criterion {
    let mut criterion = criterion(
        id,
        CriterionKind::Date {
            normalization: DateNormalization { max: window_days },
        },
        weight,
        Direction::Desc,
    );
    criterion.data_path = data_path.to_string();
    criterion
}

pub(super) fn enum_criterion(
    id: &str,
    data_path: &str,
    options: &[&str],
    default_value: f64,
    weight: u32,
    direction: Direction,
) -> Criterion {
    let mut criterion = criterion(
        id,
        CriterionKind::Enum {
            options: options.iter().map(|option| option.to_string()).collect(),
            normalization: EnumNormalization { default_value },
        },
        weight,
        direction,
    );
    criterion.data_path = data_path.to_string();
    criterion
}

pub(super) fn boolean_criterion(
    id: &str,
    data_path: &str,
    default_value: bool,
    weight: u32,
) -> Criterion {
    let mut criterion = criterion(
        id,
        CriterionKind::Boolean {
            normalization: BooleanNormalization { default_value },
        },
        weight,
        Direction::Desc,
    );
    criterion.data_path = data_path.to_string();
    criterion
}

pub(super) fn configuration(criteria: Vec<Criterion>) -> OrderingConfiguration {
    OrderingConfiguration {
        id: ConfigurationId("routine-tasting".to_string()),
        name: "Routine tasting".to_string(),
        description: String::new(),
        scope: None,
        criteria,
        is_default: false,
        created_by: "qa-lead".to_string(),
        created_at: Some(reference_time()),
        updated_at: Some(reference_time()),
    }
}

/// Single numeric criterion over `quality.score`, 0-100, default 50.
pub(super) fn quality_configuration(direction: Direction) -> OrderingConfiguration {
    configuration(vec![numeric_criterion(
        "quality-score",
        "quality.score",
        (0.0, 100.0, 50.0),
        100,
        direction,
    )])
}

pub(super) fn sample(code: &str, quality: Value) -> Value {
    json!({
        "id": code.to_lowercase(),
        "code": code,
        "description": format!("Pilsner batch {code}"),
        "quality": { "score": quality },
    })
}

pub(super) fn codes(results: &[crate::ordering::RankedResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| {
            result.entity["code"]
                .as_str()
                .expect("sample code present")
                .to_string()
        })
        .collect()
}

pub(super) fn service(settings: OrderingSettings) -> Arc<OrderingService> {
    Arc::new(OrderingService::new(settings))
}

pub(super) fn router(settings: OrderingSettings) -> axum::Router {
    ordering_router(service(settings))
}
