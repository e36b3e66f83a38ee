use crate::infra::{parse_reference_time, read_json_file};
use chrono::{DateTime, Utc};
use clap::Args;
use sample_ordering::config::AppConfig;
use sample_ordering::error::AppError;
use sample_ordering::ordering::{
    apply_order, OrderingConfiguration, OrderingService, RankedResult, Severity, ValidationIssue,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Ordering configuration file (JSON)
    #[arg(long)]
    pub(crate) config: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Ordering configuration file (JSON)
    #[arg(long)]
    pub(crate) config: PathBuf,
    /// JSON array of sample records to rank
    #[arg(long)]
    pub(crate) entities: PathBuf,
    /// Rank only the first N samples, as the preview endpoint does
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Instant date criteria measure age against (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_reference_time)]
    pub(crate) reference_time: Option<DateTime<Utc>>,
    /// Print the ordered samples as JSON instead of a score table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config: OrderingConfiguration = read_json_file(&args.config)?;
    let service = OrderingService::new(AppConfig::load()?.ordering);
    let issues = service.validate(&config);

    println!("{}", render_validation(&config, &issues));

    let errors: Vec<ValidationIssue> = issues
        .into_iter()
        .filter(ValidationIssue::is_error)
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidConfiguration(errors))
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        config,
        entities,
        limit,
        reference_time,
        json,
    } = args;

    let config: OrderingConfiguration = read_json_file(&config)?;
    let entities: Vec<Value> = read_json_file(&entities)?;
    let service = OrderingService::new(AppConfig::load()?.ordering);

    let results = match limit {
        Some(limit) => service.preview(&entities, &config, Some(limit), reference_time)?,
        None => service.rank(&entities, &config, reference_time)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&apply_order(&results))?);
    } else {
        println!("{}", render_ranking(&config, &results));
    }
    Ok(())
}

pub(crate) fn run_defaults() -> Result<(), AppError> {
    let standard = OrderingConfiguration::standard(Utc::now());
    println!("{}", serde_json::to_string_pretty(&standard)?);
    Ok(())
}

fn render_validation(config: &OrderingConfiguration, issues: &[ValidationIssue]) -> String {
    let mut lines = vec![format!(
        "Configuration '{}' ({} criteria, {} active, active weight {})",
        config.name,
        config.criteria.len(),
        config.active_criteria().count(),
        config.active_weight_total()
    )];

    if issues.is_empty() {
        lines.push("No issues found".to_string());
        return lines.join("\n");
    }

    for issue in issues {
        let severity = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let subject = match &issue.criterion_id {
            Some(id) => format!("criterion '{id}'"),
            None => "configuration".to_string(),
        };
        lines.push(format!("- [{severity}] {subject}: {}", issue.message));
    }
    lines.join("\n")
}

fn render_ranking(config: &OrderingConfiguration, results: &[RankedResult]) -> String {
    let mut lines = vec![format!(
        "Ordering '{}' applied to {} sample(s)",
        config.name,
        results.len()
    )];

    for result in results {
        lines.push(format!(
            "{:>3}. {} score {:.2}",
            result.position,
            sample_label(result),
            result.aggregate_score
        ));
        for contribution in &result.breakdown {
            let fallback = if contribution.used_default {
                " (default)"
            } else {
                ""
            };
            lines.push(format!(
                "       {}: {:.1} x {} = {:.1}{}",
                contribution.criterion_id,
                contribution.oriented_score,
                contribution.weight,
                contribution.weighted_contribution,
                fallback
            ));
        }
    }
    lines.join("\n")
}

fn sample_label(result: &RankedResult) -> String {
    ["code", "name", "id"]
        .iter()
        .find_map(|key| match result.entity.get(*key) {
            Some(Value::String(label)) => Some(label.clone()),
            Some(Value::Number(label)) => Some(label.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| format!("sample #{}", result.input_index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sample_ordering::ordering::RankingEngine;
    use serde_json::json;

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
            .single()
            .expect("valid time")
    }

    #[test]
    fn validation_output_lists_each_issue() {
        let mut config = OrderingConfiguration::standard(reference_time());
        config.criteria[0].weight = 0;

        let issues = sample_ordering::ordering::validate(&config);
        let rendered = render_validation(&config, &issues);

        assert!(rendered.contains("[error] criterion 'production-date'"));
        assert!(rendered.contains("[warning] configuration"));
    }

    #[test]
    fn ranking_output_labels_samples() {
        let config = OrderingConfiguration::standard(reference_time());
        let samples = vec![
            json!({ "code": "AM-001", "quality": { "score": 20 } }),
            json!({ "quality": { "score": 90 } }),
        ];
        let results = RankingEngine::at(reference_time())
            .rank(&samples, &config)
            .expect("ranks");

        let rendered = render_ranking(&config, &results);
        let first = rendered.lines().nth(1).expect("first row");
        assert!(first.contains("sample #2"));
        assert!(rendered.contains("AM-001"));
        assert!(rendered.contains("(default)"));
    }
}
