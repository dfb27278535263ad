use sea_orm_migration::prelude::*;

mod m20240101_initial;
mod m20240115_add_user_settings;
mod m20240122_add_user_profile;
mod m20240130_add_history_user_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_initial::Migration),
            Box::new(m20240115_add_user_settings::Migration),
            Box::new(m20240122_add_user_profile::Migration),
            Box::new(m20240130_add_history_user_index::Migration),
        ]
    }
}
