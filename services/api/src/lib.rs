mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use bifl_catalog::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
