use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hr_payroll::api::{AppState, create_router};
use hr_payroll::config::ConfigLoader;

const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?;
    let addr = config.server().bind_address.clone();
    let api_base = config.api().base_url.clone();

    let state = AppState::new(config);

    info!(%addr, config = %config_path, api = %api_base, "starting payslip preview service");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, create_router(state))
        .await
        .map_err(|err| err.into())
}
