//! DOKU gateway service.
//!
//! Loads configuration from `DOKU__*` environment variables, decodes the
//! signing key once and serves the notification, settlement and merchant
//! endpoints.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use doku_gateway::adapters::doku::DokuGatewayAdapter;
use doku_gateway::adapters::http::{api_router, ApiDependencies};
use doku_gateway::adapters::transport::ReqwestTransport;
use doku_gateway::config::{AppConfig, LogFormat};
use doku_gateway::domain::settlement::SettlementCalculator;
use doku_gateway::domain::signing::RequestSigner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    if !config.gateway.has_private_key() {
        tracing::warn!("No private key configured; token issuance and account inquiries will fail");
    }

    let signer = Arc::new(RequestSigner::new(config.gateway.signer_credentials()?));
    let transport = Arc::new(ReqwestTransport::new());
    let gateway = Arc::new(DokuGatewayAdapter::new(
        config.gateway.adapter_config(),
        signer,
        transport,
    ));

    let app = api_router(ApiDependencies {
        gateway,
        verifier: Arc::new(config.gateway.notification_verifier()),
        calculator: Arc::new(SettlementCalculator::new(config.fees.clone())),
    });

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        base_url = %config.gateway.base_url,
        notification_path = %config.gateway.notification_path,
        "Server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// `RUST_LOG` overrides the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.log_format() == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
