use serde_json::{Map, Value};

use super::domain::{OrderingConfiguration, RankedResult, SessionKind, SessionScope};

/// Field written onto sample records by [`apply_order`].
pub const ORDER_FIELD: &str = "order";

/// Pick the configuration a session of `kind` should be ordered with.
///
/// Preference: a default scoped exactly to `kind`, then a default scoped to
/// all sessions, then the first configuration whose scope covers `kind`.
pub fn select_configuration(
    configs: &[OrderingConfiguration],
    kind: SessionKind,
) -> Option<&OrderingConfiguration> {
    configs
        .iter()
        .find(|config| config.is_default && config.scope().is_exactly(kind))
        .or_else(|| {
            configs
                .iter()
                .find(|config| config.is_default && config.scope() == SessionScope::All)
        })
        .or_else(|| configs.iter().find(|config| config.scope().covers(kind)))
}

/// Re-sequence entities by ranked position, stamping the 1-based position
/// into each object's `order` field. Non-object entities pass through as-is.
pub fn apply_order(results: &[RankedResult]) -> Vec<Value> {
    results
        .iter()
        .map(|result| match &result.entity {
            Value::Object(fields) => {
                let mut fields: Map<String, Value> = fields.clone();
                fields.insert(ORDER_FIELD.to_string(), Value::from(result.position));
                Value::Object(fields)
            }
            other => other.clone(),
        })
        .collect()
}
