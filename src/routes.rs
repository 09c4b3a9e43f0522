// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, enrollment, lessons, practice, stats},
    state::AppState,
    utils::auth::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, enrollments, subjects).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, content client).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let enrollment_routes = Router::new()
        .route(
            "/",
            get(enrollment::list_enrollments).post(enrollment::enroll),
        )
        .route(
            "/{subject}",
            put(enrollment::update_enrollment).delete(enrollment::unenroll),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let subject_routes = Router::new()
        .route("/{subject}/lessons", get(lessons::list_lessons))
        .route(
            "/{subject}/lessons/{lesson_id}/progress",
            put(lessons::update_progress),
        )
        .route(
            "/{subject}/instructions/{slug}",
            get(lessons::get_instructions),
        )
        .route("/{subject}/practice/session", post(practice::start_session))
        .route(
            "/{subject}/practice/attempts",
            post(practice::submit_attempt),
        )
        .route("/{subject}/stats", get(stats::get_stats))
        .route("/{subject}/weak-spots", get(stats::get_weak_spots))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/enrollments", enrollment_routes)
        .nest("/api/subjects", subject_routes)
        // Global middleware: trace outermost, then CORS.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
