use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::token_auth_middleware;
use crate::state::AppState;

/// Build the full router: public routes, token-gated user routes, global layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(user_routes(state.clone()))
        .layer(TraceLayer::new_for_http());

    let router = if config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        // Token acquisition from Username/Password headers
        .route("/auth", get(auth::token_get))
}

fn user_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::users;

    Router::new()
        // Collection
        .route("/users", get(users::users_list).post(users::user_post))
        // Individual record
        .route(
            "/users/:id",
            get(users::user_get)
                .put(users::user_put)
                .patch(users::user_patch),
        )
        .route_layer(middleware::from_fn_with_state(state, token_auth_middleware))
}
