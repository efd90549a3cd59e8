use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::db::FromRow;

/// The resolved polymorphic target a comment is attached to: the registry id
/// of the entity type plus the id of the instance within that type's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTarget {
  pub content_type_id: i64,
  pub object_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
/// Represents a user's comment on some target entity. `parent_id` is None
/// for top-level comments and references another comment for replies.
pub struct Comment {
  pub comment_id: i64,
  pub user_id: i64,
  pub parent_id: Option<i64>,
  pub content_type_id: i64,
  pub object_id: i64,
  pub content: String,
  pub posted_at: DateTime<Utc>,
  pub edited_at: DateTime<Utc>,
}

impl Comment {
  pub fn target(&self) -> CommentTarget {
    CommentTarget {
      content_type_id: self.content_type_id,
      object_id: self.object_id,
    }
  }

  /// Both timestamps are written on creation, so a comment only counts as
  /// edited once `edited_at` has moved more than a second past `posted_at`.
  pub fn is_edited(&self) -> bool {
    self.edited_at > self.posted_at + Duration::seconds(1)
  }
}

impl FromRow for Comment {
  fn from_row(row: Row) -> Option<Self> {
    Some(Comment {
      comment_id: row.get("comment_id"),
      user_id: row.get("user_id"),
      parent_id: row.get("parent_id"),
      content_type_id: row.get("content_type_id"),
      object_id: row.get("object_id"),
      content: row.get("content"),
      posted_at: row.get("posted_at"),
      edited_at: row.get("edited_at"),
    })
  }
}
