mod cli;
mod infra;
mod report;
mod routes;
mod server;

use sem_lite::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
