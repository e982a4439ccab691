use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::Redirect;
use axum::routing::{get, post};
use coachdesk_infrastructure::IN_MEMORY_OBJECT_ROUTE;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

#[cfg(test)]
mod tests;

const MAX_FORM_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(app_state: AppState, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    let protected_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::dashboard_handler))
        .route(
            "/dashboard/sections/{target_id}",
            post(handlers::dashboard::select_section_handler),
        )
        .route(
            "/dashboard/actions",
            post(handlers::dashboard::action_handler),
        )
        .route(
            "/dashboard/confirmation",
            post(handlers::dashboard::confirmation_handler),
        )
        .route(
            "/dashboard/forms",
            post(handlers::forms::submit_form_handler)
                .layer(DefaultBodyLimit::max(MAX_FORM_UPLOAD_BYTES)),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let mut public_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(handlers::health::health_handler))
        .route("/login", get(auth::login_page_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    if app_state.dev_objects.is_some() {
        public_routes = public_routes.route(
            &format!("{IN_MEMORY_OBJECT_ROUTE}/{{bucket}}/{{*path}}"),
            get(handlers::dev_storage::dev_object_handler),
        );
    }

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(middleware::require_same_origin_for_mutations))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
