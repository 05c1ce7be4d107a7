//! Unauthenticated service endpoints: banner, health check, the public
//! database-connectivity probe and the catch-all 404.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Service banner and endpoint map
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Bienvenido a MiVideoteca API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "auth": "/api/auth",
            "movies": "/api/movies"
        }
    }))
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "API funcionando correctamente",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET /api/movies/public - Unauthenticated connectivity probe that counts
/// movies across all users
pub async fn movies_public(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.count_movies().await {
        Ok(count) => Ok(Json(json!({
            "message": "Conexión a base de datos exitosa",
            "totalMovies": count
        }))),
        Err(e) => {
            tracing::error!("public movie count failed: {}", e);
            Err(ApiError::internal_server_error(
                "Error de conexión a la base de datos",
            ))
        }
    }
}

/// Catch-all for unmatched routes, reporting the path and method
pub async fn fallback(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Ruta no encontrada",
            "path": uri.path(),
            "method": method.as_str()
        })),
    )
}
