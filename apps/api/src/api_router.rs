use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use lanewright_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;
mod worker_internal;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/boards/{board_id}/rules",
            get(handlers::rules::list_rules_handler).post(handlers::rules::create_rule_handler),
        )
        .route(
            "/api/boards/{board_id}/rules/from-fields",
            post(handlers::rules::create_rule_from_fields_handler),
        )
        .route(
            "/api/rules/{rule_id}",
            delete(handlers::rules::delete_rule_handler),
        )
        .route(
            "/api/rules/{rule_id}/enabled",
            put(handlers::rules::update_rule_enabled_handler),
        )
        .route(
            "/api/boards/{board_id}/lists",
            post(handlers::boards::create_list_handler),
        )
        .route(
            "/api/lists/{list_id}/position",
            put(handlers::boards::move_list_handler),
        )
        .route(
            "/api/lists/{list_id}/cards",
            post(handlers::boards::create_card_handler),
        )
        .route(
            "/api/cards/{card_id}/position",
            put(handlers::boards::move_card_handler),
        )
        .route(
            "/api/cards/{card_id}/completion",
            put(handlers::boards::update_card_completion_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    let cors_layer = cors::build_cors_layer(frontend_url)?;
    let worker_internal_routes = worker_internal::build_worker_internal_routes(app_state.clone());

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/automation/templates",
            get(handlers::templates::template_catalog_handler),
        )
        .route(
            "/api/automation/templates/{template_id}",
            get(handlers::templates::template_handler),
        )
        .merge(worker_internal_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
