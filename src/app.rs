use axum::{
    Json, Router,
    extract::{FromRequest, FromRequestParts, Path, State},
    routing::{get, post},
};
use log::{debug, info};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::{self, Algorithm, TraceInput};
use crate::config::ServerConfig;
use crate::error::{ApiError, VisualizerError};
use crate::sorting::{self, SortAlgorithm, SortOptions, SortingAlgorithm};
use crate::step::TraceStep;
use crate::structures::{self, DataStructure, StructureKind};

/// Request-independent settings shared by all handlers. Nothing in here is
/// mutated after startup.
pub struct AppState {
    sort_options: SortOptions,
    max_elements: usize,
    max_operations: usize,
}

/// `Json` whose rejections answer with the [`ApiError`] body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
struct ApiJson<T>(T);

/// `Path` whose rejections answer with the [`ApiError`] body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
struct ApiPath<T>(T);

#[derive(Deserialize)]
struct SortRequest {
    algorithm: String,
    #[serde(default)]
    array: Vec<i32>,
}

#[derive(Deserialize)]
struct StructureRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    operations: Vec<String>,
}

#[derive(Deserialize)]
struct TraceRequest {
    #[serde(default)]
    input: TraceInput,
}

pub fn build_router(config: &ServerConfig) -> Router {
    let app_state = Arc::new(AppState {
        sort_options: config.sort_options(),
        max_elements: config.max_elements,
        max_operations: config.max_operations,
    });

    Router::new()
        .route("/health", get(health))
        // Catalog binding
        .route("/api/algorithms", get(list_algorithms))
        .route("/api/algorithms/:id", get(get_algorithm))
        .route("/api/algorithms/:id/trace", post(generate_trace))
        // Direct binding
        .route("/api/sorting", get(list_sorts))
        .route("/api/sorting/steps", post(sorting_steps))
        .route("/api/structures", get(list_structures))
        .route("/api/structures/steps", post(structure_steps))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(&config);

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_algorithms() -> Json<&'static [Algorithm]> {
    Json(catalog::algorithms())
}

async fn get_algorithm(ApiPath(id): ApiPath<u32>) -> Result<Json<&'static Algorithm>, ApiError> {
    catalog::algorithm_by_id(id)
        .map(Json)
        .ok_or_else(|| VisualizerError::AlgorithmNotFound(id).into())
}

async fn generate_trace(
    ApiPath(id): ApiPath<u32>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TraceRequest>,
) -> Result<Json<Vec<TraceStep>>, ApiError> {
    let generator = catalog::resolve_generator(id, state.max_elements)?;

    let trace = generator
        .generate_trace(&payload.input)
        .map_err(|e| ApiError::BadRequest(format!("Error generating trace: {}", e)))?;

    debug!("{}: {} trace steps", generator.algorithm_name(), trace.len());
    Ok(Json(trace))
}

async fn list_sorts() -> Json<Vec<SortingAlgorithm>> {
    Json(sorting::catalog())
}

async fn sorting_steps(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SortRequest>,
) -> Result<Json<SortingAlgorithm>, ApiError> {
    let kind: SortAlgorithm = payload.algorithm.parse()?;
    let result = sorting::generate_checked(
        kind,
        &payload.array,
        &state.sort_options,
        state.max_elements,
    )?;
    Ok(Json(result))
}

async fn list_structures() -> Json<Vec<DataStructure>> {
    Json(structures::catalog())
}

async fn structure_steps(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<StructureRequest>,
) -> Result<Json<DataStructure>, ApiError> {
    let kind: StructureKind = payload.kind.parse()?;
    let result = structures::simulate_checked(
        kind,
        payload.operations.as_slice(),
        state.max_operations,
    )?;
    Ok(Json(result))
}
