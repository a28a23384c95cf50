//! Route table (spec §6 "HTTP surface"): binds every path to its handler
//! and layers request tracing / CORS, matching the teacher's admin router
//! shape scaled up to the full CRUD + pipeline-trigger surface.

use axum::routing::{delete, get, post};
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/subscriptions/", post(handlers::create_subscription).get(handlers::list_subscriptions))
        .route("/subscriptions/{sid}", get(handlers::get_subscription).delete(handlers::delete_subscription))
        .route("/subscriptions/{sid}/resource-types", get(handlers::list_subscription_resource_types))
        .route(
            "/subscriptions/{sid}/collections",
            get(handlers::list_subscription_collections).post(handlers::create_collection_under_subscription),
        )
        .route("/collections/{cid}", get(handlers::get_collection).delete(handlers::delete_collection))
        .route("/collections/{cid}/resource-types", get(handlers::list_collection_resource_types))
        .route("/collections/{cid}/resources", get(handlers::list_collection_resources))
        .route("/collections/{cid}/{rtid}", post(handlers::upload_resource))
        .route("/collections/{cid}/query", post(handlers::collection_query))
        .route("/resources/{rid}", delete(handlers::delete_resource))
        .route("/resource/{rid}/query", post(handlers::resource_query))
        .route("/resource-types/", get(handlers::list_resource_types))
        .route("/query-results/{qid}", get(handlers::get_query_result))
        .route("/query-results/{qid}/metadata", get(handlers::get_query_result_metadata))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
