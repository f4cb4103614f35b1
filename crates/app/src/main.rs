use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "itinera={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    if let Err(err) = server::run(engine, &addr, settings.app.expose_errors).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}

async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
