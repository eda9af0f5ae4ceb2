use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    // All scheduling routes require an authenticated caller; the handlers
    // additionally enforce the admin role.
    let protected_routes = Router::new()
        .route("/doctors/{doctor_id}/edit-slots", get(handlers::get_edit_slots))
        .route(
            "/doctors/{doctor_id}/availability",
            get(handlers::get_weekly_availability),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
