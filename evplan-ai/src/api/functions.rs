//! Function discovery and invocation endpoints
//!
//! - `GET /functions` lists every descriptor
//! - `GET /functions/:name` returns one descriptor
//! - `POST /functions/:name` invokes with the JSON body (empty body = no arguments)

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::functions::{FunctionDescriptor, RegistryError};
use crate::AppState;

pub async fn list_functions(State(state): State<AppState>) -> Json<Vec<FunctionDescriptor>> {
    Json(state.registry.descriptors())
}

pub async fn describe_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<FunctionDescriptor>> {
    Ok(Json(state.registry.describe(&name)?))
}

pub async fn invoke_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    // unknown name wins over a malformed body
    if !state.registry.contains(&name) {
        return Err(RegistryError::UnknownFunction(name).into());
    }

    let input = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Request body is not valid JSON: {}", e)))?
    };

    let output = state.registry.invoke(&name, input).await?;
    Ok(Json(output))
}

pub fn function_routes() -> Router<AppState> {
    Router::new()
        .route("/functions", get(list_functions))
        .route("/functions/:name", get(describe_function).post(invoke_function))
}
