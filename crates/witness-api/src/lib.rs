//! Witness API
//!
//! Serves project, date and photo-of-the-day metadata from a remote folder
//! tree laid out as `<root>/<project>/<YYYY-MM-DD>/<date>_<HHMM>.jpg`.
//!
//! ## Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /health` - Health check
//! - `GET /projects` - Configured project list
//! - `GET /projects/{project}/dates` - Date folders of a project
//! - `GET /projects/{project}/photo-of-day?date=` - Image captured closest to noon
//! - `GET /projects/{project}/compare?date1=&date2=` - Comparison placeholder

pub mod config;
pub mod dates;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod selector;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use handlers::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/projects", get(handlers::list_projects_handler))
        .route("/projects/{project}/dates", get(handlers::list_dates_handler))
        .route(
            "/projects/{project}/photo-of-day",
            get(handlers::photo_of_day_handler),
        )
        .route("/projects/{project}/compare", get(handlers::compare_handler))
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
