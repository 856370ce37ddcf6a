use pivot_frame::frame::{AggregationKind, Row};
use pivot_frame::output::{read_batch, write_results, RecordBatch};
use pivot_frame::service::{AggResultRow, DataFrameHeader};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_batch_file_with_schema() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.json");
    std::fs::write(
        &path,
        r#"{
            "schema": {"pivots": ["A", "B"], "vals": ["V1"]},
            "rows": [
                {"pivots": ["a", "b"], "vals": [10]},
                {"pivots": ["x", "y"], "vals": [20]}
            ]
        }"#,
    )
    .unwrap();

    let batch = read_batch(&path).unwrap();
    assert_eq!(
        batch,
        RecordBatch {
            schema: Some(DataFrameHeader {
                pivots: vec!["A".into(), "B".into()],
                vals: vec!["V1".into()],
            }),
            rows: vec![Row::new(["a", "b"], [10]), Row::new(["x", "y"], [20])],
        }
    );
}

#[test]
fn test_schema_only_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.json");
    std::fs::write(&path, r#"{"schema": {"pivots": ["A"], "vals": ["V1", "V2"]}}"#).unwrap();

    let batch = read_batch(&path).unwrap();
    assert!(batch.rows.is_empty());
    assert_eq!(batch.schema.unwrap().vals, vec!["V1", "V2"]);
}

#[test]
fn test_results_written_to_nested_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("sum.json");
    let results = vec![AggResultRow {
        kind: AggregationKind::Sum,
        pivots: vec!["a".into(), "d".into()],
        value: 4,
    }];

    write_results(&results, &path).unwrap();

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written,
        serde_json::json!([{"type": "sum", "pivots": ["a", "d"], "value": 4}])
    );
}

#[test]
fn test_missing_batch_file() {
    assert!(read_batch("/no/such/rows.json").is_err());
}
