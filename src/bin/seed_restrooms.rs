use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use flushrush::config::AppConfig;
use flushrush::database::{self, schema};
use flushrush::services::seed_service::{self, SeedReport};
use sqlx::SqlitePool;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("seed failed: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("seed failed: cannot open {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    match seed(&pool).await {
        Ok(report) => {
            println!(
                "seed: existing={}, inserted={}",
                report.existing, report.inserted
            );
        }
        Err(e) => {
            eprintln!("seed failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn seed(pool: &SqlitePool) -> sqlx::Result<SeedReport> {
    schema::ensure_schema(pool).await?;
    seed_service::seed_if_empty(pool).await
}
