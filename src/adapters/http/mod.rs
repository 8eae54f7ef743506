//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter with its own app state; `api_router`
//! combines them.

pub mod error_response;
pub mod merchant;
pub mod notification;
pub mod settlement;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::domain::settlement::SettlementCalculator;
use crate::domain::signing::NotificationVerifier;
use crate::ports::PaymentGateway;

pub use error_response::ErrorResponse;
pub use merchant::{merchant_router, MerchantAppState};
pub use notification::{notification_router, NotificationAppState};
pub use settlement::{settlement_router, SettlementAppState};

/// Dependencies shared by every route.
#[derive(Clone)]
pub struct ApiDependencies {
    pub gateway: Arc<dyn PaymentGateway>,
    pub verifier: Arc<NotificationVerifier>,
    pub calculator: Arc<SettlementCalculator>,
}

/// Builds the complete router with request tracing.
///
/// The notification route is mounted at the verifier's request target.
pub fn api_router(deps: ApiDependencies) -> Router {
    let notification_path = deps.verifier.request_target().to_string();

    Router::new()
        .merge(notification_router(&notification_path).with_state(NotificationAppState::new(
            deps.verifier,
        )))
        .merge(settlement_router().with_state(SettlementAppState::new(deps.calculator)))
        .merge(merchant_router().with_state(MerchantAppState::new(deps.gateway)))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
