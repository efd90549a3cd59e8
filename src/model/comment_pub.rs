use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::db::FromRow;

#[derive(Deserialize, Serialize, Eq, PartialEq, Debug, Clone)]
/// The listing shape of a comment: the row joined with the author's public
/// profile plus the derived edited flag. This is what handlers serialize.
pub struct CommentPub {
  pub comment_id: i64,
  pub user_id: i64,
  pub parent_id: Option<i64>,
  pub content_type_id: i64,
  pub object_id: i64,
  pub content: String,
  pub posted_at: DateTime<Utc>,
  pub edited_at: DateTime<Utc>,
  pub user_handle: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_avatar_url: Option<String>,
  pub is_edited: bool,
}

impl FromRow for CommentPub {
  fn from_row(row: Row) -> Option<Self> {
    Some(CommentPub {
      comment_id: row.get("comment_id"),
      user_id: row.get("user_id"),
      parent_id: row.get("parent_id"),
      content_type_id: row.get("content_type_id"),
      object_id: row.get("object_id"),
      content: row.get("content"),
      posted_at: row.get("posted_at"),
      edited_at: row.get("edited_at"),
      user_handle: row.get("user_handle"),
      user_avatar_url: row.get("user_avatar_url"),
      is_edited: row.get("is_edited"),
    })
  }
}
