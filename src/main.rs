use anyhow::Context;
use seed_store::{SeedConfig, Seeder};
use tracing::info;

mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env next to the working directory; real env vars win.
    let _ = dotenvy::dotenv();

    telemetry::init().context("installing tracing subscriber")?;

    let cfg = SeedConfig::from_env().context("loading configuration")?;
    cfg.log_summary();

    let seeder = Seeder::new(cfg).context("building Qdrant client")?;
    let report = seeder.run().await.with_context(|| {
        format!(
            "seeding collection '{}' from {}",
            seeder.config().collection,
            seeder.config().data_path.display()
        )
    })?;

    info!(
        attempts = report.attempts,
        created = report.created,
        vector_size = report.vector_size,
        written = report.written,
        "Seeding finished"
    );
    Ok(())
}
