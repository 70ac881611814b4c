use anyhow::Context;
use product_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config)?;

    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("failed to connect to {}", config.database.display_target()))?;
    ensure_schema(&pool)
        .await
        .context("failed to prepare products schema")?;

    let app = routes(&config, PgProductRepository::new(pool));
    Server::new(config).serve(app).await?;

    Ok(())
}
