use serde_json::Value;

/// Walk `entity` along the dotted `data_path`.
///
/// Returns `None` when a segment is missing, the value at that point cannot be
/// traversed, or the resolved value is `null`. Array elements are addressed by
/// numeric segments (`specifications.readings.0`).
pub fn resolve<'a>(entity: &'a Value, data_path: &str) -> Option<&'a Value> {
    let data_path = data_path.trim();
    if data_path.is_empty() {
        return None;
    }

    let mut current = entity;
    for segment in data_path.split('.') {
        current = match current {
            Value::Object(fields) => fields.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        value => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "code": "AM-001",
            "priority": "alta",
            "quality": { "score": 82, "conformity": null },
            "readings": [4.1, 4.3],
        })
    }

    #[test]
    fn resolves_top_level_and_nested_fields() {
        let entity = sample();
        assert_eq!(resolve(&entity, "priority"), Some(&json!("alta")));
        assert_eq!(resolve(&entity, "quality.score"), Some(&json!(82)));
        assert_eq!(resolve(&entity, "readings.1"), Some(&json!(4.3)));
    }

    #[test]
    fn missing_segments_resolve_to_absent() {
        let entity = sample();
        assert_eq!(resolve(&entity, "quality.missing"), None);
        assert_eq!(resolve(&entity, "unknown.score"), None);
        assert_eq!(resolve(&entity, "readings.7"), None);
        assert_eq!(resolve(&entity, "readings.first"), None);
    }

    #[test]
    fn scalars_are_not_traversable() {
        let entity = sample();
        assert_eq!(resolve(&entity, "priority.level"), None);
        assert_eq!(resolve(&json!(42), "anything"), None);
    }

    #[test]
    fn null_and_empty_paths_are_absent() {
        let entity = sample();
        assert_eq!(resolve(&entity, "quality.conformity"), None);
        assert_eq!(resolve(&entity, ""), None);
        assert_eq!(resolve(&entity, "   "), None);
        assert_eq!(resolve(&entity, "quality..score"), None);
    }
}
