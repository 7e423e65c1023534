mod cli;
mod infra;
mod rank;
mod routes;
mod server;

use scholar_rank::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
