use crate::handlers::{comments, communities, health, not_found, root, submissions};
use crate::middleware::{apply_standard_layers, track_requests};
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::{middleware, Router};

/// Builds the complete application: routes, fallback and middleware.
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(root::index))
        .route("/communities", get(communities::index).post(communities::create))
        .route("/communities/new", get(communities::new_form))
        .route(
            "/communities/{name}",
            get(communities::show)
                .delete(communities::destroy)
                .post(communities::destroy_via_form),
        )
        .route("/submissions", post(submissions::create))
        .route("/submissions/new", get(submissions::new_form))
        .route(
            "/submissions/{id}",
            get(submissions::show)
                .delete(submissions::destroy)
                .post(submissions::destroy_via_form),
        )
        .route("/comments", post(comments::create))
        .route("/comments/new", get(comments::new_form))
        .route(
            "/comments/{id}",
            delete(comments::destroy).post(comments::destroy_via_form),
        )
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(health::metrics))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .with_state(state);

    apply_standard_layers(routes)
}
