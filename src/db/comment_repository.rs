use crate::{
  helpers::api::map_db_err,
  logic::LogicErr,
  model::{
    comment::{Comment, CommentTarget},
    comment_pub::CommentPub,
  },
};

use super::FromRow;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepo {
  async fn fetch_top_level_comments(&self, target: &CommentTarget) -> Result<Vec<CommentPub>, LogicErr>;
  async fn fetch_all_comments(&self, target: &CommentTarget) -> Result<Vec<CommentPub>, LogicErr>;
  async fn fetch_replies(&self, comment_id: i64) -> Result<Vec<CommentPub>, LogicErr>;
  async fn fetch_comment_by_id(&self, comment_id: i64) -> Option<Comment>;
  /// The parent-consistency probe: the comment must exist AND be attached to
  /// the given target instance. Fallible, unlike the plain lookup, because a
  /// store failure here must not read as a missing parent.
  async fn fetch_comment_for_target(&self, comment_id: i64, object_id: i64) -> Result<Option<Comment>, LogicErr>;
  async fn create_comment(
    &self,
    user_id: i64,
    target: &CommentTarget,
    parent_id: Option<i64>,
    content: &str,
  ) -> Result<Comment, LogicErr>;
  async fn update_comment_content(
    &self,
    comment_id: i64,
    user_id: i64,
    content: &str,
  ) -> Result<Option<Comment>, LogicErr>;
  async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), LogicErr>;
  async fn delete_comments_for_target(&self, target: &CommentTarget) -> Result<(), LogicErr>;
}

pub type CommentPool = Arc<dyn CommentRepo + Send + Sync>;

pub struct DbCommentRepo {
  pub db: Pool,
}

#[async_trait]
impl CommentRepo for DbCommentRepo {
  async fn fetch_top_level_comments(&self, target: &CommentTarget) -> Result<Vec<CommentPub>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let rows = db
      .query(
        include_str!("./sql/fetch_top_level_comments.sql"),
        &[&target.content_type_id, &target.object_id],
      )
      .await
      .map_err(map_db_err)?;

    Ok(rows.into_iter().flat_map(CommentPub::from_row).collect())
  }

  async fn fetch_all_comments(&self, target: &CommentTarget) -> Result<Vec<CommentPub>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let rows = db
      .query(
        include_str!("./sql/fetch_all_comments.sql"),
        &[&target.content_type_id, &target.object_id],
      )
      .await
      .map_err(map_db_err)?;

    Ok(rows.into_iter().flat_map(CommentPub::from_row).collect())
  }

  async fn fetch_replies(&self, comment_id: i64) -> Result<Vec<CommentPub>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let rows = db
      .query(include_str!("./sql/fetch_replies.sql"), &[&comment_id])
      .await
      .map_err(map_db_err)?;

    Ok(rows.into_iter().flat_map(CommentPub::from_row).collect())
  }

  async fn fetch_comment_by_id(&self, comment_id: i64) -> Option<Comment> {
    let db = match self.db.get().await.map_err(map_db_err) {
      Ok(db) => db,
      Err(_) => return None,
    };

    let row = match db
      .query_opt("SELECT * FROM comments WHERE comment_id = $1", &[&comment_id])
      .await
      .map_err(map_db_err)
    {
      Ok(row) => row,
      Err(_) => return None,
    };

    row.and_then(Comment::from_row)
  }

  async fn fetch_comment_for_target(&self, comment_id: i64, object_id: i64) -> Result<Option<Comment>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db
      .query_opt(
        "SELECT * FROM comments WHERE comment_id = $1 AND object_id = $2",
        &[&comment_id, &object_id],
      )
      .await
      .map_err(map_db_err)?;

    Ok(row.and_then(Comment::from_row))
  }

  async fn create_comment(
    &self,
    user_id: i64,
    target: &CommentTarget,
    parent_id: Option<i64>,
    content: &str,
  ) -> Result<Comment, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db
      .query_one(
        "INSERT INTO comments (user_id, parent_id, content_type_id, object_id, content) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        &[
          &user_id,
          &parent_id,
          &target.content_type_id,
          &target.object_id,
          &content,
        ],
      )
      .await
      .map_err(map_db_err)?;

    Comment::from_row(row).ok_or(LogicErr::DbError)
  }

  async fn update_comment_content(
    &self,
    comment_id: i64,
    user_id: i64,
    content: &str,
  ) -> Result<Option<Comment>, LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    let row = db
      .query_opt(
        "UPDATE comments SET content = $3, edited_at = now() WHERE comment_id = $1 AND user_id = $2 RETURNING *",
        &[&comment_id, &user_id, &content],
      )
      .await
      .map_err(map_db_err)?;

    Ok(row.and_then(Comment::from_row))
  }

  async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    db.execute(
      "DELETE FROM comments WHERE comment_id = $1 AND user_id = $2",
      &[&comment_id, &user_id],
    )
    .await
    .map_err(map_db_err)?;

    Ok(())
  }

  async fn delete_comments_for_target(&self, target: &CommentTarget) -> Result<(), LogicErr> {
    let db = self.db.get().await.map_err(map_db_err)?;
    db.execute(
      "DELETE FROM comments WHERE content_type_id = $1 AND object_id = $2",
      &[&target.content_type_id, &target.object_id],
    )
    .await
    .map_err(map_db_err)?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #[test]
  fn top_level_and_full_listings_order_newest_first() {
    let top_level = include_str!("./sql/fetch_top_level_comments.sql");
    let all = include_str!("./sql/fetch_all_comments.sql");

    assert!(top_level.trim_end().ends_with("ORDER BY c.posted_at DESC"));
    assert!(all.trim_end().ends_with("ORDER BY c.posted_at DESC"));
    assert!(top_level.contains("c.parent_id IS NULL"));
    assert!(!all.contains("c.parent_id IS NULL"));
  }

  #[test]
  fn replies_order_oldest_first() {
    let replies = include_str!("./sql/fetch_replies.sql");

    assert!(replies.trim_end().ends_with("ORDER BY c.posted_at ASC"));
    assert!(replies.contains("c.parent_id = $1"));
  }
}
