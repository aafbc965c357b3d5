//! Property tests over randomly generated placement records

use crate::{
    derive_case_key, AggregationEngine, AggregationKind, CaseGroups, FeatureDescriptor,
    DESIRABILITY_SPELL, UNIQUE_ID,
};
use case_table::{Dataset, Table, Value};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

type RawRow = (i64, i64, i64, &'static str, Option<i64>, bool);

fn raw_rows() -> impl Strategy<Value = Vec<RawRow>> {
    prop::collection::vec(
        (
            0i64..3,
            0i64..3,
            0i64..3,
            prop::sample::select(vec!["M", "F", "U"]),
            prop::option::of(0i64..50),
            any::<bool>(),
        ),
        0..40,
    )
}

fn build(rows: &[RawRow]) -> Dataset {
    let mut table = Table::new([
        "FACILITY_ID",
        "CLIENT_ID",
        "HOME_RMVL_KEY",
        "GENDER",
        "RMVL_AGE",
        DESIRABILITY_SPELL,
    ])
    .unwrap();
    for &(f, c, h, gender, age, good) in rows {
        table
            .push_row(vec![
                Value::Integer(f),
                Value::Integer(c),
                Value::Integer(h),
                Value::from(gender),
                Value::from(age),
                Value::from(if good { "Good" } else { "Poor" }),
            ])
            .unwrap();
    }
    table
}

fn group_sizes(rows: &[RawRow]) -> HashMap<String, i64> {
    let mut sizes = HashMap::new();
    for &(f, c, h, ..) in rows {
        *sizes.entry(format!("{}_{}_{}", f, c, h)).or_insert(0) += 1;
    }
    sizes
}

proptest! {
    #[test]
    fn prop_case_key_deterministic(rows in raw_rows()) {
        let doubled: Vec<RawRow> = rows.iter().chain(rows.iter()).copied().collect();
        let table = build(&doubled);
        let n = rows.len();
        for i in 0..n {
            let a = derive_case_key(&table.record(i).unwrap()).unwrap();
            let b = derive_case_key(&table.record(i + n).unwrap()).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_one_row_per_case(rows in raw_rows()) {
        let engine = AggregationEngine::new(build(&rows), vec![
            FeatureDescriptor::with_kind("GENDER", AggregationKind::Dummy),
            FeatureDescriptor::with_kind("RMVL_AGE", AggregationKind::Total),
        ]);
        let table = engine.finalize().unwrap();
        let sizes = group_sizes(&rows);
        prop_assert_eq!(table.len(), sizes.len());

        // Every base key appears exactly once
        let keys: Vec<String> = table
            .column(UNIQUE_ID)
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        let distinct: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(distinct.len(), keys.len());
        let base = engine.build_base_table().unwrap();
        for key in base.column(UNIQUE_ID).unwrap() {
            prop_assert!(keys.contains(&key.to_string()));
        }
    }

    #[test]
    fn prop_total_bounded_by_group_size(rows in raw_rows()) {
        let table = build(&rows);
        let groups = CaseGroups::build(&table).unwrap();
        let engine = AggregationEngine::new(table, Vec::new());
        let feature = engine
            .aggregate(&FeatureDescriptor::with_kind("RMVL_AGE", AggregationKind::Total))
            .unwrap();
        for (key, members) in groups.iter() {
            let count = feature.value(key, "RMVL_AGE_count").and_then(Value::as_i64).unwrap();
            prop_assert!(count <= members.len() as i64);
        }
    }

    #[test]
    fn prop_dummy_sums_to_group_size(rows in raw_rows()) {
        let engine = AggregationEngine::new(build(&rows), Vec::new());
        let feature = engine
            .aggregate(&FeatureDescriptor::with_kind("GENDER", AggregationKind::Dummy))
            .unwrap();
        for (key, size) in group_sizes(&rows) {
            let total: i64 = feature
                .row(&key)
                .unwrap()
                .iter()
                .filter_map(Value::as_i64)
                .sum();
            prop_assert_eq!(total, size);
        }
    }
}
