use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::CrmConfig;

pub mod archive;
pub mod entities;
pub mod models;
pub mod schema;
pub mod serialize;
pub mod services;

pub async fn connect(config: &CrmConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.to_owned());
    opt.max_connections(config.max_connections)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    info!(max_connections = config.max_connections, "Connected to database.");
    Ok(db)
}
