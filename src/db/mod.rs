use deadpool::Runtime;
use deadpool_postgres::{CreatePoolError, Pool};
use tokio_postgres::{NoTls, Row};

use crate::settings::SETTINGS;

pub mod comment_repository;
pub mod content_type_repository;

pub trait FromRow {
  fn from_row(row: Row) -> Option<Self>
  where
    Self: Sized;
}

pub fn create_pool() -> Result<Pool, CreatePoolError> {
  let mut config = deadpool_postgres::Config::new();
  config.host = Some(SETTINGS.database.host.clone());
  config.port = Some(SETTINGS.database.port);
  config.user = Some(SETTINGS.database.user.clone());
  config.password = Some(SETTINGS.database.password.clone());
  config.dbname = Some(SETTINGS.database.database.clone());
  config.pool = Some(deadpool_postgres::PoolConfig::new(
    SETTINGS.database.pool_size,
  ));

  config.create_pool(Some(Runtime::Tokio1), NoTls)
}
