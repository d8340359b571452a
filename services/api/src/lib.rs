mod audit;
mod cli;
mod infra;
mod routes;
mod server;

use pdf_a11y::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
