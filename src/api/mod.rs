mod extract;
mod handlers;
mod middleware;
mod relay;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use middleware::{RateLimiter, SecurityConfig};
pub use relay::{frames, RelayRequest};
pub use state::AppState;

pub fn create_router(state: AppState, security: SecurityConfig) -> Router {
    let api = Router::new()
        .route(
            "/ask",
            post(handlers::ask).fallback(handlers::method_not_allowed),
        )
        .route(
            "/docs-get",
            post(handlers::docs_get).fallback(handlers::method_not_allowed),
        )
        .route(
            "/catalog",
            get(handlers::get_catalog).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        );

    let mut router = Router::new().nest("/api", api).with_state(state);

    if let Some(limiter) = security.rate_limiter.clone() {
        router = router.layer(axum::middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(security.cors_layer())
}
