mod cli;
mod infra;
mod render;
mod routes;
mod server;

use hiring_funnel::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
