//! Axum router configuration for settlement endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_gross_amount, get_settlement_fee, SettlementAppState};

/// Create the settlement router.
///
/// # Routes
/// - `GET /fee?payment_method&amount` - Fee, tax and net for a gross amount
/// - `GET /gross?payment_method&net_amount` - Price that nets the requested amount
pub fn settlement_routes() -> Router<SettlementAppState> {
    Router::new()
        .route("/fee", get(get_settlement_fee))
        .route("/gross", get(get_gross_amount))
}

/// Settlement routes mounted at `/settlement`.
pub fn settlement_router() -> Router<SettlementAppState> {
    Router::new().nest("/settlement", settlement_routes())
}
