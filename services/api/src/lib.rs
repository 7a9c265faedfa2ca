mod cli;
mod infra;
mod routes;
mod server;

use homeservices::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
