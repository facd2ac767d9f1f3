//! clinidash-api library - clinic dashboard data service
//!
//! Serves aggregate activity metrics and paginated patient sentiment read
//! from a static JSON snapshot.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod aggregation;
pub mod api;
pub mod pagination;
pub mod service;
pub mod timeframe;

pub use service::{Clock, DashboardService};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Dataset-backed dashboard operations
    pub service: DashboardService,
}

impl AppState {
    /// Create new application state
    pub fn new(service: DashboardService) -> Self {
        Self { service }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let dashboard = Router::new()
        .route("/api/dashboard", get(api::get_dashboard_data))
        .route(
            "/api/dashboard/sentiment/patients",
            get(api::get_patient_sentiment),
        );

    Router::new()
        .merge(dashboard)
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
