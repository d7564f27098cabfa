mod cli;
mod infra;
mod routes;
mod score;
mod server;

use oncoscore::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
