use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::domain::{
    BooleanNormalization, CriterionKind, DateNormalization, EnumNormalization,
    NumericNormalization,
};

const MAX_SCORE: f64 = 100.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Magnitude of a raw value on the shared 0..=100 scale.
///
/// Higher always means larger, more recent, higher-ranked option, or `true`;
/// direction is applied later by the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedValue {
    pub score: f64,
    pub used_default: bool,
}

impl NormalizedValue {
    fn observed(score: f64) -> Self {
        Self {
            score,
            used_default: false,
        }
    }

    fn fallback(score: f64) -> Self {
        Self {
            score,
            used_default: true,
        }
    }
}

/// Map a resolved raw value (or its absence) onto the 0..=100 scale.
///
/// `reference` is the instant date ages are measured against.
pub fn normalize(
    raw: Option<&Value>,
    kind: &CriterionKind,
    reference: DateTime<Utc>,
) -> NormalizedValue {
    match kind {
        CriterionKind::Numeric { normalization } => normalize_numeric(raw, normalization),
        CriterionKind::Date { normalization } => normalize_date(raw, normalization, reference),
        CriterionKind::Enum {
            options,
            normalization,
        } => normalize_enum(raw, options, normalization),
        CriterionKind::Boolean { normalization } => normalize_boolean(raw, normalization),
    }
}

fn normalize_numeric(raw: Option<&Value>, config: &NumericNormalization) -> NormalizedValue {
    let (value, used_default) = match raw.and_then(numeric_value) {
        Some(value) => (value, false),
        None => (config.default_value, true),
    };

    let span = config.max - config.min;
    let score = if span == 0.0 {
        MAX_SCORE
    } else {
        // Inverted bounds are rejected by validation; `f64::clamp` would panic on them.
        let clamped = value.max(config.min).min(config.max);
        // Divide before scaling so bounds near f64::MAX stay finite.
        (clamped - config.min) / span * MAX_SCORE
    };

    NormalizedValue {
        score,
        used_default,
    }
}

fn normalize_date(
    raw: Option<&Value>,
    config: &DateNormalization,
    reference: DateTime<Utc>,
) -> NormalizedValue {
    let Some(timestamp) = raw.and_then(date_value) else {
        return NormalizedValue::fallback(0.0);
    };

    let age_days = (reference - timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if config.max <= 0.0 {
        return NormalizedValue::observed(if age_days <= 0.0 { MAX_SCORE } else { 0.0 });
    }
    let score = (MAX_SCORE - age_days / config.max * MAX_SCORE).clamp(0.0, MAX_SCORE);
    NormalizedValue::observed(score)
}

fn normalize_enum(
    raw: Option<&Value>,
    options: &[String],
    config: &EnumNormalization,
) -> NormalizedValue {
    let position = raw
        .and_then(enum_label)
        .and_then(|label| options.iter().position(|option| *option == label));

    match position {
        Some(_) if options.len() == 1 => NormalizedValue::observed(MAX_SCORE),
        Some(index) => {
            NormalizedValue::observed(index as f64 * MAX_SCORE / (options.len() - 1) as f64)
        }
        None => NormalizedValue::fallback(config.default_value.clamp(0.0, MAX_SCORE)),
    }
}

fn normalize_boolean(raw: Option<&Value>, config: &BooleanNormalization) -> NormalizedValue {
    let (flag, used_default) = match raw.and_then(boolean_value) {
        Some(flag) => (flag, false),
        None => (config.default_value, true),
    };

    NormalizedValue {
        score: if flag { MAX_SCORE } else { 0.0 },
        used_default,
    }
}

fn numeric_value(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates, naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps (read as UTC), and integer epoch milliseconds.
pub(crate) fn date_value(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(text) => parse_date_text(text.trim()),
        Value::Number(number) => Utc.timestamp_millis_opt(number.as_i64()?).single(),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn enum_label(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn boolean_value(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(number) => number.as_f64().map(|value| value != 0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
            .single()
            .expect("valid reference")
    }

    #[test]
    fn numeric_strings_are_parsed_and_garbage_falls_back() {
        let normalization = NumericNormalization {
            min: 0.0,
            max: 10.0,
            default_value: 5.0,
        };

        assert_eq!(normalize_numeric(Some(&json!(" 2.5 ")), &normalization).score, 25.0);

        let fallback = normalize_numeric(Some(&json!("n/a")), &normalization);
        assert_eq!(fallback.score, 50.0);
        assert!(fallback.used_default);

        let fallback = normalize_numeric(Some(&json!({ "value": 3 })), &normalization);
        assert!(fallback.used_default);
    }

    #[test]
    fn date_formats_are_accepted() {
        let expected = Utc
            .with_ymd_and_hms(2025, 9, 24, 0, 0, 0)
            .single()
            .expect("valid date");

        assert_eq!(date_value(&json!("2025-09-24")), Some(expected));
        assert_eq!(date_value(&json!("2025-09-24T00:00:00Z")), Some(expected));
        assert_eq!(date_value(&json!("2025-09-24T00:00:00")), Some(expected));
        assert_eq!(
            date_value(&json!(expected.timestamp_millis())),
            Some(expected)
        );
        assert_eq!(date_value(&json!("24/09/2025")), None);
        assert_eq!(date_value(&json!(true)), None);
    }

    #[test]
    fn date_recency_decays_linearly_over_window() {
        let normalization = DateNormalization { max: 30.0 };
        let fifteen_days_ago = (reference() - Duration::days(15)).to_rfc3339();

        let score = normalize_date(Some(&json!(fifteen_days_ago)), &normalization, reference());
        assert!((score.score - 50.0).abs() < 1e-9);
        assert!(!score.used_default);
    }

    #[test]
    fn future_dates_clamp_to_full_score() {
        let normalization = DateNormalization { max: 30.0 };
        let tomorrow = (reference() + Duration::days(1)).to_rfc3339();

        let score = normalize_date(Some(&json!(tomorrow)), &normalization, reference());
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn enum_matches_numbers_by_text() {
        let options = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let normalization = EnumNormalization {
            default_value: 10.0,
        };

        assert_eq!(normalize_enum(Some(&json!(2)), &options, &normalization).score, 50.0);
        assert_eq!(normalize_enum(Some(&json!(9)), &options, &normalization).score, 10.0);
    }

    #[test]
    fn boolean_accepts_textual_and_numeric_flags() {
        let normalization = BooleanNormalization {
            default_value: false,
        };

        assert_eq!(normalize_boolean(Some(&json!("TRUE")), &normalization).score, 100.0);
        assert_eq!(normalize_boolean(Some(&json!(0)), &normalization).score, 0.0);
        assert_eq!(normalize_boolean(Some(&json!(1)), &normalization).score, 100.0);

        let fallback = normalize_boolean(Some(&json!("maybe")), &normalization);
        assert_eq!(fallback.score, 0.0);
        assert!(fallback.used_default);
    }
}
