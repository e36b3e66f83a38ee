//! Property checks for the ranking engine over generated sample batches.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use sample_ordering::ordering::{OrderingConfiguration, RankingEngine};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid reference time")
}

fn sample_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(-20.0f64..140.0),
        proptest::option::of(0i64..60),
        proptest::option::of(prop_oneof![
            Just("baixa"),
            Just("media"),
            Just("alta"),
            Just("urgente"),
        ]),
        proptest::option::of(0.0f64..40.0),
    )
        .prop_map(|(quality, age_days, priority, frequency)| {
            let mut sample = json!({});
            if let Some(score) = quality {
                sample["quality"] = json!({ "score": score });
            }
            if let Some(days) = age_days {
                sample["productionDate"] = json!((reference_time() - Duration::days(days)).to_rfc3339());
            }
            if let Some(level) = priority {
                sample["priority"] = json!(level);
            }
            if let Some(days) = frequency {
                sample["testFrequency"] = json!(days);
            }
            sample
        })
}

fn batch_strategy() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(sample_strategy(), 0..40).prop_map(|samples| {
        samples
            .into_iter()
            .enumerate()
            .map(|(index, mut sample)| {
                sample["code"] = json!(format!("AM-{index:03}"));
                sample
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_sample_is_ranked_exactly_once(samples in batch_strategy()) {
        let config = OrderingConfiguration::standard(reference_time());
        let results = RankingEngine::at(reference_time())
            .rank(&samples, &config)
            .expect("standard configuration ranks");

        prop_assert_eq!(results.len(), samples.len());
        let mut indices: Vec<usize> = results.iter().map(|result| result.input_index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..samples.len()).collect::<Vec<_>>());
        for (offset, result) in results.iter().enumerate() {
            prop_assert_eq!(result.position, offset + 1);
            prop_assert_eq!(&result.entity, &samples[result.input_index]);
        }
    }

    #[test]
    fn scores_stay_on_scale_and_descend(samples in batch_strategy()) {
        let config = OrderingConfiguration::standard(reference_time());
        let results = RankingEngine::at(reference_time())
            .rank(&samples, &config)
            .expect("standard configuration ranks");

        for result in &results {
            prop_assert!((0.0..=100.0).contains(&result.aggregate_score));
            for contribution in &result.breakdown {
                prop_assert!((0.0..=100.0).contains(&contribution.normalized_score));
                prop_assert!((0.0..=100.0).contains(&contribution.oriented_score));
            }
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].aggregate_score >= pair[1].aggregate_score);
            if pair[0].aggregate_score == pair[1].aggregate_score {
                prop_assert!(pair[0].input_index < pair[1].input_index);
            }
        }
    }

    #[test]
    fn ranking_is_deterministic(samples in batch_strategy()) {
        let config = OrderingConfiguration::standard(reference_time());
        let engine = RankingEngine::at(reference_time());

        let first = engine.rank(&samples, &config).expect("ranks");
        let second = engine.rank(&samples, &config).expect("ranks");

        prop_assert_eq!(
            serde_json::to_vec(&first).expect("serializes"),
            serde_json::to_vec(&second).expect("serializes")
        );
    }

    #[test]
    fn split_batches_match_single_run(samples in batch_strategy(), split in 0usize..40) {
        let config = OrderingConfiguration::standard(reference_time());
        let engine = RankingEngine::at(reference_time());
        let split = split.min(samples.len());

        let mut incremental = engine.incremental(&config).expect("configuration accepted");
        incremental.push_batch(&samples[..split]);
        incremental.push_batch(&samples[split..]);

        prop_assert_eq!(incremental.finish(), engine.rank(&samples, &config).expect("ranks"));
    }
}
