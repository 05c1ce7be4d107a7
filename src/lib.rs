pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod store;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the full application router.
///
/// The binary binds this to a socket; tests drive it in-process with a
/// substituted datastore, mirroring the test-mode entry point of the API.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/api/health", get(handlers::system::health))
        .route("/api/movies/public", get(handlers::system::movies_public))
        // Credential issuing
        .merge(auth_routes())
        // Movie CRUD, gated by the JWT middleware
        .merge(movie_routes(state.clone()))
        // Unmatched routes report path and method
        .fallback(handlers::system::fallback)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

fn movie_routes(state: AppState) -> Router<AppState> {
    use handlers::movies;

    Router::new()
        .route("/api/movies", get(movies::list).post(movies::create))
        .route(
            "/api/movies/:id",
            get(movies::get).put(movies::update).delete(movies::remove),
        )
        .layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}
