//! Stowage command-line entry point.

use stowage_client::api_client::ApiClient;
use stowage_client::cli::{self, CliArgs};
use stowage_client::config::ClientConfig;
use stowage_client::error::AppError;
use stowage_client::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ClientConfig::load()?;
    telemetry::init_tracing(&config.log)?;
    let args = CliArgs::parse(std::env::args().skip(1))?;

    let api = ApiClient::new(&config)?;
    let user = api
        .rest()
        .current_user()
        .await?
        .ok_or(AppError::Unauthenticated)?;
    info!(user_id = %user.id, kind = %args.kind, "signed in");

    let output = cli::run(&api, &config, &args).await?;
    println!("{}", output.trim_end());
    Ok(())
}
