use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::instrument;

// Stand-in for the fronted dashboard application. Requests that clear the
// gate land here; in a deployment this is where the upstream proxy goes.
#[instrument]
pub async fn passthrough(uri: Uri) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "path": uri.path() })))
}
