use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::db::FromRow;

#[derive(Deserialize, Serialize, Eq, PartialEq, Debug, Clone)]
/// A row of the entity-type registry: maps an (app_name, model_name)
/// descriptor to the table holding that entity's instances. `model_name` is
/// stored lowercase so descriptor lookups are case-insensitive.
pub struct ContentType {
  pub content_type_id: i64,
  pub app_name: String,
  pub model_name: String,
  pub table_name: String,
}

impl FromRow for ContentType {
  fn from_row(row: Row) -> Option<Self> {
    Some(ContentType {
      content_type_id: row.get("content_type_id"),
      app_name: row.get("app_name"),
      model_name: row.get("model_name"),
      table_name: row.get("table_name"),
    })
  }
}
