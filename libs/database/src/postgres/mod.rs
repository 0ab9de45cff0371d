//! PostgreSQL connector, stored-procedure executor and health probe

mod config;
mod connector;
mod health;
mod procedure;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
pub use health::check_health;
pub use procedure::{ProcedureCall, StoredProcedures};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
