//! API route configuration.
//!
//! Defines all routes for the patient registry API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use pacientes_persistence::core::{Backend, PatientStorage};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// - `POST /api/pacientes` - Register a patient
/// - `GET /api/pacientes` - List patients
/// - `GET /api/pacientes/{id}` - Read a patient
/// - `DELETE /api/pacientes/{id}` - Delete a patient
/// - `GET /api/health` - Health check
///
/// Anything else, including a known path with another method, is answered
/// by [`handlers::route_not_found_handler`].
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: PatientStorage + Backend + Send + Sync + 'static,
{
    let body_limit = state.config().max_body_size;

    // The collection answers with and without a trailing slash.
    Router::new()
        .route(
            "/api/pacientes",
            post(handlers::create_handler::<S>).get(handlers::list_handler::<S>),
        )
        .route(
            "/api/pacientes/",
            post(handlers::create_handler::<S>).get(handlers::list_handler::<S>),
        )
        .route(
            "/api/pacientes/{id}",
            get(handlers::read_handler::<S>).delete(handlers::delete_handler::<S>),
        )
        .route("/api/health", get(handlers::health_handler::<S>))
        .fallback(handlers::route_not_found_handler)
        .method_not_allowed_fallback(handlers::route_not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        // State
        .with_state(state)
}
