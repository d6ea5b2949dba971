//! Read-only HTTP views over the shared lovelace state.

use crate::dashboard::{Dashboard, DashboardInfo};
use crate::error::LovelaceError;
use crate::lovelace::SharedLovelace;
use crate::resources::ResourceItem;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;

pub fn router(lovelace: SharedLovelace) -> Router {
    Router::new()
        .route("/api/lovelace/info", get(info))
        .route("/api/lovelace/config", get(default_config))
        .route("/api/lovelace/config/:url_path", get(dashboard_config))
        .route("/api/lovelace/resources", get(resources))
        .route("/api/lovelace/dashboards", get(dashboards))
        .with_state(lovelace)
}

/// Error body: `{"code": ..., "message": ...}`.
#[derive(Debug)]
pub struct ConfigError(LovelaceError);

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            e if e.is_config_not_found() => (StatusCode::NOT_FOUND, "config_not_found"),
            LovelaceError::DashboardNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
        };
        (status, Json(json!({ "code": code, "message": self.0.to_string() }))).into_response()
    }
}

// Info may read the default dashboard's yaml file, which fills its cache.
async fn info(State(lovelace): State<SharedLovelace>) -> Json<DashboardInfo> {
    Json(lovelace.write().await.info())
}

async fn default_config(
    State(lovelace): State<SharedLovelace>,
) -> Result<Json<serde_json::Value>, ConfigError> {
    let config = lovelace.write().await.load_config(None, false);
    config.map(Json).map_err(ConfigError)
}

async fn dashboard_config(
    State(lovelace): State<SharedLovelace>,
    Path(url_path): Path<String>,
) -> Result<Json<serde_json::Value>, ConfigError> {
    let config = lovelace.write().await.load_config(Some(&url_path), false);
    config.map(Json).map_err(ConfigError)
}

async fn resources(State(lovelace): State<SharedLovelace>) -> Json<Vec<ResourceItem>> {
    Json(lovelace.read().await.resources().items().to_vec())
}

async fn dashboards(State(lovelace): State<SharedLovelace>) -> Json<Vec<Dashboard>> {
    let lovelace = lovelace.read().await;
    Json(lovelace.dashboards().into_iter().cloned().collect())
}
