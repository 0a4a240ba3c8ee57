//! # Tiffin Tracker Backend
//!
//! Records daily tiffin orders for a small group, aggregates them into
//! Sunday-to-Saturday weeks, reconciles payments per member and reminds the
//! group every evening to enter the day's orders.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API under /api)
//!     ↓
//! Domain Layer (aggregation, reconciliation, services, reminder)
//!     ↓
//! Storage Layer (orders.csv, members.yaml)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{Clock, MemberService, OrderService, PaymentReconciler, WeeklyInsightsService};
use crate::storage::csv::{CsvConnection, MemberRepository, OrderRepository};
use crate::storage::Connection;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService<OrderRepository>,
    pub member_service: MemberService<MemberRepository>,
    pub insights_service: WeeklyInsightsService<OrderRepository>,
    pub payment_reconciler: PaymentReconciler<OrderRepository>,
}

impl AppState {
    pub fn new(connection: &CsvConnection, seed_members: Vec<String>, clock: Arc<dyn Clock>) -> Self {
        let order_repository = Arc::new(connection.create_order_repository());
        let member_repository = Arc::new(connection.create_member_repository());

        Self {
            order_service: OrderService::new(order_repository.clone(), clock.clone()),
            member_service: MemberService::new(member_repository, seed_members),
            insights_service: WeeklyInsightsService::new(order_repository.clone(), clock),
            payment_reconciler: PaymentReconciler::new(order_repository),
        }
    }
}

/// Open the data directory and wire up all services.
pub async fn initialize_backend(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<AppState> {
    let data_dir = config.resolved_data_dir()?;
    info!("Using data directory {}", data_dir.display());

    let connection = CsvConnection::new(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    connection.ensure_orders_file_exists()?;

    info!("Setting up application state");
    Ok(AppState::new(&connection, config.seed_members.clone(), clock))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!("Invalid CORS origin '{}', allowing any origin", cors_origin);
            cors.allow_origin(Any)
        }
    };

    Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .with_state(app_state)
}
