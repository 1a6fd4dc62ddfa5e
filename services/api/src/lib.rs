mod cli;
mod infra;
mod routes;
mod server;
mod underwrite;

use underwriter::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
