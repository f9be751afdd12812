mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use rent_to_sa::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
