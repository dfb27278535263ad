use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::db::{Store, migrator::Migrator};

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let applied = store.migrate().await?;
    if applied == 0 {
        println!("Database is up to date.");
    } else {
        println!("Applied {applied} migration(s).");
    }

    let total = Migrator::migrations().len();
    println!("Schema version: {total}/{total}");

    Ok(())
}
