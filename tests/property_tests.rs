//! Property-based tests for rastro
//!
//! Invariants under test:
//! - params logged into a run mirror come back unchanged
//! - signature inference follows the sample's columns exactly
//! - link formatting embeds the identifiers it is given

use std::collections::BTreeMap;

use proptest::prelude::*;
use rastro::data::{Column, ColumnData, Dataset};
use rastro::experiment::{MetricRecord, RunRecord};
use rastro::logger::{experiment_link, run_link};
use rastro::signature::infer_signature;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a params map with printable keys and values
fn arb_params(max_entries: usize) -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-z_]{1,12}", "[a-zA-Z0-9._-]{1,16}", 0..max_entries)
}

/// Generate one typed column of the given length
fn arb_column(name: String, rows: usize) -> impl Strategy<Value = Column> {
    prop_oneof![
        proptest::collection::vec(any::<bool>(), rows).prop_map(ColumnData::Boolean),
        proptest::collection::vec(-1000i64..1000, rows).prop_map(ColumnData::Long),
        proptest::collection::vec(-1000.0f64..1000.0, rows).prop_map(ColumnData::Double),
        proptest::collection::vec("[a-z]{1,8}", rows).prop_map(ColumnData::String),
    ]
    .prop_map(move |data| Column::new(name.clone(), data))
}

/// Generate a dataset with 1..=4 uniquely named columns of equal length
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (1usize..=4, 1usize..=8).prop_flat_map(|(cols, rows)| {
        let columns: Vec<_> = (0..cols)
            .map(|i| arb_column(format!("col_{i}"), rows))
            .collect();
        columns.prop_map(|columns| Dataset::from_columns(columns).unwrap())
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Run Record Properties
    // ========================================================================

    /// Property: every logged param is retrievable unchanged
    #[test]
    fn prop_params_round_trip(params in arb_params(8)) {
        let mut run = RunRecord::new("r1", "42");
        for (key, value) in &params {
            run.insert_param(key.clone(), value.clone());
        }

        prop_assert_eq!(run.params().len(), params.len());
        for (key, value) in &params {
            prop_assert_eq!(run.param(key), Some(value.as_str()));
        }
    }

    /// Property: the latest metric point wins on the read path
    #[test]
    fn prop_metric_latest_wins(values in proptest::collection::vec(-100.0f64..100.0, 1..10)) {
        let mut run = RunRecord::new("r1", "42");
        for (step, value) in values.iter().enumerate() {
            run.push_metric(MetricRecord::new("metric", *value, step as u64));
        }

        let latest = run.metric("metric").unwrap();
        prop_assert_eq!(latest.value(), *values.last().unwrap());
        prop_assert_eq!(run.metrics().len(), values.len());
    }

    // ========================================================================
    // Signature Inference Properties
    // ========================================================================

    /// Property: inferred inputs mirror the sample's columns in order
    #[test]
    fn prop_signature_follows_columns(dataset in arb_dataset()) {
        let output = ColumnData::Double(vec![0.0; dataset.num_rows()]);
        let signature = infer_signature(&dataset, &output);

        prop_assert_eq!(signature.inputs().len(), dataset.num_columns());
        for (field, column) in signature.inputs().iter().zip(dataset.columns()) {
            prop_assert_eq!(field.name(), Some(column.name()));
            prop_assert_eq!(field.dtype(), column.column_type());
        }
    }

    /// Property: the output field is single, unnamed, and typed after the prediction
    #[test]
    fn prop_signature_output_field(dataset in arb_dataset(), flag in any::<bool>()) {
        let output = if flag {
            ColumnData::Long(vec![0; dataset.num_rows()])
        } else {
            ColumnData::String(vec![String::new(); dataset.num_rows()])
        };
        let signature = infer_signature(&dataset, &output);

        prop_assert_eq!(signature.outputs().len(), 1);
        prop_assert_eq!(signature.outputs()[0].name(), None);
        prop_assert_eq!(signature.outputs()[0].dtype(), output.column_type());
    }

    /// Property: split orientation always has one JSON row per dataset row
    #[test]
    fn prop_split_json_row_count(dataset in arb_dataset()) {
        let json = dataset.to_split_json();
        let rows = json["data"].as_array().unwrap();
        let columns = json["columns"].as_array().unwrap();

        prop_assert_eq!(rows.len(), dataset.num_rows());
        prop_assert_eq!(columns.len(), dataset.num_columns());
    }

    // ========================================================================
    // Link Formatting Properties
    // ========================================================================

    /// Property: links embed the URI and identifiers verbatim
    #[test]
    fn prop_links_embed_identifiers(
        experiment_id in "[0-9]{1,6}",
        run_id in "[a-f0-9]{8,32}",
    ) {
        let uri = "http://tracking.internal:5000";
        let run = run_link(uri, &experiment_id, &run_id);
        let experiment = experiment_link(uri, &experiment_id);

        prop_assert!(run.starts_with(uri));
        prop_assert!(run.contains(&experiment_id));
        prop_assert!(run.ends_with(&run_id));
        prop_assert!(experiment.ends_with(&experiment_id));
        prop_assert!(run.starts_with(&experiment));
    }
}
