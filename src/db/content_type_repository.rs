use crate::{helpers::api::map_db_err, logic::LogicErr, model::content_type::ContentType};

use super::FromRow;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// The entity-type registry: resolves an inbound (app_name, model_name)
/// descriptor to a concrete entity type and probes instance existence.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentTypeRepo {
  async fn namespace_exists(&self, app_name: &str) -> Result<bool, LogicErr>;
  /// `model_name` must already be lowercased by the caller; registry rows
  /// store it lowercase.
  async fn fetch_content_type(&self, app_name: &str, model_name: &str) -> Result<Option<ContentType>, LogicErr>;
  async fn entity_exists(&self, content_type: &ContentType, object_id: i64) -> Result<bool, LogicErr>;
}

pub type ContentTypePool = Arc<dyn ContentTypeRepo + Send + Sync>;

pub struct DbContentTypeRepo {
  pub db: Pool,
}

#[async_trait]
impl ContentTypeRepo for DbContentTypeRepo {
  async fn namespace_exists(&self, app_name: &str) -> Result<bool, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db
      .query_one(
        "SELECT EXISTS (SELECT 1 FROM content_types WHERE app_name = $1)",
        &[&app_name],
      )
      .await
      .map_err(map_db_err)?;

    Ok(row.get(0))
  }

  async fn fetch_content_type(&self, app_name: &str, model_name: &str) -> Result<Option<ContentType>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db
      .query_opt(
        "SELECT * FROM content_types WHERE app_name = $1 AND model_name = $2",
        &[&app_name, &model_name],
      )
      .await
      .map_err(map_db_err)?;

    Ok(row.and_then(ContentType::from_row))
  }

  async fn entity_exists(&self, content_type: &ContentType, object_id: i64) -> Result<bool, LogicErr> {
    // table_name comes from the registry table, which only administrators
    // write, so interpolating it here does not expose request input to SQL.
    let query = format!(
      "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
      content_type.table_name
    );

    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db.query_one(&query, &[&object_id]).await.map_err(map_db_err)?;

    Ok(row.get(0))
  }
}
