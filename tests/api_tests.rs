mod common;

use common::spawn_server;
use pivot_frame::frame::{AggregationKind, Row};
use pivot_frame::remote::FrameClient;
use pivot_frame::service::{AggRequest, DataFrameHeader};
use pivot_frame::utils::error::ClientError;
use pretty_assertions::assert_eq;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn create_abc(http: &Client, base: &str) {
    let status = http
        .post(format!("{}/frame", base))
        .json(&json!({"pivots": ["A", "B", "C"], "vals": ["V1", "V2"]}))
        .send()
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::CREATED);
}

fn error_message(response: reqwest::blocking::Response) -> String {
    let body: Value = response.json().unwrap();
    body["ErrorMsg"].as_str().unwrap().to_string()
}

#[test]
fn test_end_to_end_sum_and_count() {
    let base = spawn_server();
    let http = Client::new();
    create_abc(&http, &base);

    for _ in 0..2 {
        let status = http
            .post(format!("{}/frame/row", base))
            .json(&json!({"pivots": ["a", "d", "c"], "vals": [2, 2]}))
            .send()
            .unwrap()
            .status();
        assert_eq!(status, StatusCode::CREATED);
    }

    let request = json!({"pivots": ["A", "B"], "aggColumn": 1});
    let sum: Value = http
        .get(format!("{}/frame/agg/sum", base))
        .json(&request)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(sum, json!([{"type": "sum", "pivots": ["a", "d"], "value": 4}]));

    let count: Value = http
        .get(format!("{}/frame/agg/count", base))
        .json(&request)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(count, json!([{"type": "count", "pivots": ["a", "d"], "value": 2}]));

    let both: Value = http
        .get(format!("{}/frame/agg", base))
        .json(&request)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(both, json!([sum, count]));
}

#[test]
fn test_rows_and_indices() {
    let base = spawn_server();
    let http = Client::new();
    create_abc(&http, &base);

    http.post(format!("{}/frame/row", base))
        .json(&json!({"pivots": ["a", "b", "c"], "vals": [1, 10]}))
        .send()
        .unwrap();

    let all: Vec<Row> = http
        .get(format!("{}/frame/row/all", base))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(all, vec![Row::new(["a", "b", "c"], [1, 10])]);

    let first: Row = http
        .get(format!("{}/frame/row/0", base))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(first, all[0]);

    let missing = http.get(format!("{}/frame/row/5", base)).send().unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(missing), "Could not find index 5");

    let invalid = http.get(format!("{}/frame/row/abc", base)).send().unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(invalid), "Invalid row index abc");
}

#[test]
fn test_schema_violation_and_bad_json() {
    let base = spawn_server();
    let http = Client::new();
    create_abc(&http, &base);

    let wide = http
        .post(format!("{}/frame/row", base))
        .json(&json!({"pivots": ["a", "b", "c", "d"], "vals": []}))
        .send()
        .unwrap();
    assert_eq!(wide.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(wide), "pivot length 4 exceed the frame pivot size 3");

    let garbage = http
        .post(format!("{}/frame/row", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unknown = http
        .get(format!("{}/frame/agg/sum", base))
        .json(&json!({"pivots": ["Z"], "aggColumn": 0}))
        .send()
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(unknown), "Not found pivot Z");
}

#[test]
fn test_clean_requires_new_frame() {
    let base = spawn_server();
    let http = Client::new();

    let before = http.get(format!("{}/frame/row/all", base)).send().unwrap();
    assert_eq!(before.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(before), "No instance of dataframe created");

    create_abc(&http, &base);
    let cleaned = http.put(format!("{}/frame/clean", base)).send().unwrap();
    assert_eq!(cleaned.status(), StatusCode::OK);

    let after = http.get(format!("{}/frame/agg/count", base))
        .json(&json!({"pivots": ["A"]}))
        .send()
        .unwrap();
    assert_eq!(error_message(after), "No instance of dataframe created");
}

#[test]
fn test_metrics_skip_metrics_paths() {
    let base = spawn_server();
    let http = Client::new();
    create_abc(&http, &base);
    http.get(format!("{}/frame/row/all", base)).send().unwrap();
    http.get(format!("{}/frame", base)).send().unwrap();
    http.put(format!("{}/frame/clean", base)).send().unwrap();

    let total: u64 = http.get(format!("{}/metrics/total", base)).send().unwrap().json().unwrap();
    let gets: u64 = http.get(format!("{}/metrics/total/get", base)).send().unwrap().json().unwrap();
    let posts: u64 = http.get(format!("{}/metrics/total/post", base)).send().unwrap().json().unwrap();

    assert_eq!((total, gets, posts), (4, 2, 1));
}

#[test]
fn test_frame_client() {
    let base = spawn_server();
    let client = FrameClient::new(&base).unwrap();

    let header = DataFrameHeader {
        pivots: vec!["A".into(), "B".into()],
        vals: vec!["V1".into()],
    };
    client.create_frame(&header).unwrap();
    client
        .create_frame(&DataFrameHeader {
            pivots: vec!["Other".into()],
            vals: vec![],
        })
        .unwrap();
    assert_eq!(client.schema().unwrap(), header);

    client
        .add_records(&[
            Row::new(["i", "j"], [30]),
            Row::new(["i", "j"], [40]),
            Row::new(["x", "y"], [40]),
        ])
        .unwrap();

    let rejected = client.add_records(&[Row::new(["m"], [1]), Row::new(["m"], [1, 2])]);
    assert!(matches!(rejected, Err(ClientError::Server { status: 400, .. })));
    assert_eq!(client.get_all_records().unwrap().len(), 3);

    let request = AggRequest {
        pivots: vec!["A".into(), "B".into()],
        agg_column: 0,
    };
    let max = client.aggregate(AggregationKind::Max, &request).unwrap();
    let winners: Vec<_> = max.iter().map(|r| (r.pivots.join(","), r.value)).collect();
    assert_eq!(winners, vec![("i,j".to_string(), 40), ("x,y".to_string(), 40)]);

    let avg = client.aggregate(AggregationKind::Avg, &request).unwrap();
    assert_eq!(avg[0].value, 35);
    assert_eq!(client.distinct(&request).unwrap(), 2);

    let out_of_range = client.aggregate(
        AggregationKind::Sum,
        &AggRequest {
            pivots: vec!["A".into()],
            agg_column: 1,
        },
    );
    match out_of_range {
        Err(ClientError::Server { message, .. }) => assert_eq!(message, "index 1 out of bounds [0:1)"),
        other => panic!("expected server error, got {:?}", other),
    }

    client.clean().unwrap();
    assert!(client.get_record(0).is_err());
}
