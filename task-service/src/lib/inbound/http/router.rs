use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::refresh;
use super::handlers::auth::register;
use super::handlers::health::health_check;
use super::handlers::tasks::create_task;
use super::handlers::tasks::delete_task;
use super::handlers::tasks::get_task;
use super::handlers::tasks::list_tasks;
use super::handlers::tasks::update_task;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::users::update_access;
use super::handlers::users::update_user;
use super::middleware::require_access;
use super::middleware::RouteGuard;
use crate::domain::auth::models::RequiredRoles;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::AuthorizationPort;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state. Services are held behind their ports so the same
/// router runs on Postgres/Redis adapters or in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    task_service: Arc<dyn TaskServicePort>,
    authorizer: Arc<dyn AuthorizationPort>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        task_service,
    };

    let authenticated = middleware::from_fn_with_state(
        RouteGuard::new(Arc::clone(&authorizer), RequiredRoles::none()),
        require_access,
    );
    let admin_only = middleware::from_fn_with_state(
        RouteGuard::new(authorizer, RequiredRoles::admin()),
        require_access,
    );

    let public_routes = Router::new()
        .route("/", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh));

    let task_routes = Router::new()
        .route(
            "/tasks",
            get(list_tasks)
                .post(create_task)
                .route_layer(authenticated.clone()),
        )
        .route(
            "/tasks/:task_id",
            get(get_task)
                .patch(update_task)
                .route_layer(authenticated.clone())
                .merge(delete(delete_task).route_layer(admin_only.clone())),
        );

    let user_routes = Router::new()
        .route("/users", get(list_users).route_layer(admin_only.clone()))
        .route(
            "/users/:user_id",
            get(get_user)
                .patch(update_user)
                .route_layer(authenticated)
                .merge(delete(delete_user).route_layer(admin_only.clone())),
        )
        .route(
            "/users/:user_id/access",
            patch(update_access).route_layer(admin_only),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .merge(user_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
