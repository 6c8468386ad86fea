use axum::{Router, routing::get};
use storage::Database;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod openapi;

/// The routed application. Trailing slashes are trimmed before routing, so
/// `/categorias/` and `/categorias` reach the same handler.
pub type App = NormalizePath<Router>;

/// Builds the application over a shared database pool.
pub fn app(db: Database) -> App {
    let router = Router::new()
        .nest("/categorias", features::categories::routes())
        .nest("/centros_treinamento", features::training_centers::routes())
        .nest("/atletas", features::athletes::routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
