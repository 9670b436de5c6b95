//! HTTP tests for both request bindings.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`,
//! no socket is opened.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use algoviz::app::build_router;
use algoviz::config::ServerConfig;

fn test_app() -> Router {
    build_router(&ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(path).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json(&test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// Catalog binding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_catalog() {
    let (status, body) = get_json(&test_app(), "/api/algorithms").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["name"], "Bubble Sort");
    assert_eq!(list[2]["category"], "Searching");
    assert_eq!(list[0]["exampleInputs"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn fetches_one_algorithm_or_404() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/algorithms/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Selection Sort");

    let (status, body) = get_json(&app, "/api/algorithms/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn bubble_trace_from_array_input() {
    let (status, body) = post_json(
        &test_app(),
        "/api/algorithms/1/trace",
        json!({ "input": [5, 2, 8, 1] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let steps = body.as_array().unwrap();
    assert_eq!(steps[0]["stepNumber"], 1);
    assert_eq!(steps[0]["action"], "start");
    let last = steps.last().unwrap();
    assert_eq!(last["action"], "complete");
    assert_eq!(last["state"]["array"], json!([1, 2, 5, 8]));
    assert_eq!(last["stepNumber"], steps.len());
}

#[tokio::test]
async fn bubble_trace_from_malformed_text_uses_default_array() {
    let (status, body) = post_json(
        &test_app(),
        "/api/algorithms/1/trace",
        json!({ "input": "1,banana,3" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let last = body.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["state"]["array"], json!([11, 12, 22, 25, 34, 64, 90]));
}

#[tokio::test]
async fn trace_for_unwired_algorithm_is_not_implemented() {
    let (status, body) = post_json(
        &test_app(),
        "/api/algorithms/3/trace",
        json!({ "input": "1,2,3" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("Binary Search"));
}

#[tokio::test]
async fn trace_generation_failure_is_wrapped() {
    let input: Vec<i32> = (0..25).collect();
    let (status, body) = post_json(
        &test_app(),
        "/api/algorithms/1/trace",
        json!({ "input": input }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error generating trace:")
    );
}

// ---------------------------------------------------------------------------
// Direct binding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quick_sort_steps() {
    let (status, body) = post_json(
        &test_app(),
        "/api/sorting/steps",
        json!({ "algorithm": "quick", "array": [3, 1] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Quick Sort");

    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps[0]["action"], "pivot");
    assert_eq!(steps[0]["indices"], json!([1]));
    assert_eq!(steps[0]["id"], 0);
    let last = steps.last().unwrap();
    assert_eq!(last["array"], json!([1, 3]));
    assert_eq!(last["isCompleted"], true);
}

#[tokio::test]
async fn empty_array_still_completes() {
    let (status, body) = post_json(
        &test_app(),
        "/api/sorting/steps",
        json!({ "algorithm": "selection", "array": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["action"], "complete");
    assert_eq!(steps[0]["array"], json!([]));
}

#[tokio::test]
async fn unsupported_algorithm_is_named() {
    let (status, body) = post_json(
        &test_app(),
        "/api/sorting/steps",
        json!({ "algorithm": "bogo", "array": [2, 1] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("bogo"));
}

#[tokio::test]
async fn too_many_elements_are_rejected() {
    let array: Vec<i32> = (0..21).rev().collect();
    let (status, body) = post_json(
        &test_app(),
        "/api/sorting/steps",
        json!({ "algorithm": "bubble", "array": array }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn verbose_bubble_is_configurable() {
    let config = ServerConfig {
        verbose_bubble: true,
        ..ServerConfig::default()
    };
    let (status, body) = post_json(
        &build_router(&config),
        "/api/sorting/steps",
        json!({ "algorithm": "bubble", "array": [1, 2] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = body["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["action"].as_str().unwrap())
        .collect();
    assert_eq!(
        actions,
        vec!["start", "outer_loop", "compare", "no_swap", "pass_complete", "complete"]
    );
}

#[tokio::test]
async fn stack_script_steps() {
    let (status, body) = post_json(
        &test_app(),
        "/api/structures/steps",
        json!({ "type": "stack", "operations": ["push 10", "push 20", "pop", "peek"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "stack");

    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[2]["data"], json!([10]));
    assert_eq!(steps[2]["status"], "info");
    assert_eq!(steps[2]["message"], "Removed value: 20");
    assert_eq!(steps[3]["data"], json!([10]));
    assert_eq!(steps[3]["highlightIndex"], 0);
}

#[tokio::test]
async fn unsupported_structure_yields_error_and_no_steps() {
    let (status, body) = post_json(
        &test_app(),
        "/api/structures/steps",
        json!({ "type": "linkedlist", "operations": ["push 1"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("steps").is_none());
    assert!(body["error"]["message"].as_str().unwrap().contains("linkedlist"));
}

#[tokio::test]
async fn structure_metadata_includes_presets() {
    let (status, body) = get_json(&test_app(), "/api/structures").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[1]["operations"], json!(["push", "pop", "peek", "isEmpty"]));
    assert_eq!(list[2]["examples"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn sorting_metadata_lists_three_sorts() {
    let (status, body) = get_json(&test_app(), "/api/sorting").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bubble Sort", "Quick Sort", "Selection Sort"]);
}

#[tokio::test]
async fn oversized_script_is_rejected() {
    let operations: Vec<String> = (0..201).map(|i| format!("push {}", i)).collect();
    let (status, body) = post_json(
        &test_app(),
        "/api/structures/steps",
        json!({ "type": "stack", "operations": operations }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn script_limit_is_configurable() {
    let config = ServerConfig {
        max_operations: 2,
        ..ServerConfig::default()
    };
    let app = build_router(&config);
    let (status, _) = post_json(
        &app,
        "/api/structures/steps",
        json!({ "type": "queue", "operations": ["enqueue 1", "dequeue", "front"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        &app,
        "/api/structures/steps",
        json!({ "type": "queue", "operations": ["enqueue 1", "dequeue"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stack_stops_growing_at_the_cap() {
    let operations: Vec<String> = (0..150).map(|i| format!("push {}", i)).collect();
    let (status, body) = post_json(
        &test_app(),
        "/api/structures/steps",
        json!({ "type": "stack", "operations": operations }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let last = body["steps"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["status"], "error");
    assert_eq!(last["data"].as_array().unwrap().len(), 100);
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trace_without_json_body_gets_error_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/algorithms/1/trace")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_gets_error_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/sorting/steps")
        .header("content-type", "application/json")
        .body(Body::from("{\"algorithm\": "))
        .unwrap();
    let (status, body) = send(&test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn non_numeric_id_gets_error_body() {
    let app = test_app();
    for path in ["/api/algorithms/-1", "/api/algorithms/bubble"] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    let (status, body) =
        post_json(&app, "/api/algorithms/x/trace", json!({ "input": [2, 1] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
