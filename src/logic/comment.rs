use crate::{
  db::comment_repository::CommentPool,
  model::{
    comment::{Comment, CommentTarget},
    comment_pub::CommentPub,
  },
};

use super::LogicErr;

pub async fn get_comments(
  comments: &CommentPool,
  target: &CommentTarget,
  include_replies: bool,
) -> Result<Vec<CommentPub>, LogicErr> {
  if include_replies {
    comments.fetch_all_comments(target).await
  } else {
    comments.fetch_top_level_comments(target).await
  }
}

pub async fn get_replies(comments: &CommentPool, comment_id: i64) -> Result<Vec<CommentPub>, LogicErr> {
  if comments.fetch_comment_by_id(comment_id).await.is_none() {
    return Err(LogicErr::MissingRecord);
  }

  comments.fetch_replies(comment_id).await
}

pub async fn create_comment(
  comments: &CommentPool,
  user_id: i64,
  target: &CommentTarget,
  parent_id: Option<i64>,
  content: &str,
) -> Result<Comment, LogicErr> {
  if content.trim().is_empty() {
    return Err(LogicErr::InvalidData);
  }

  comments.create_comment(user_id, target, parent_id, content).await
}

pub async fn update_comment(
  comments: &CommentPool,
  comment_id: i64,
  user_id: i64,
  content: &str,
) -> Result<Comment, LogicErr> {
  if content.trim().is_empty() {
    return Err(LogicErr::InvalidData);
  }

  match comments.update_comment_content(comment_id, user_id, content).await? {
    Some(comment) => Ok(comment),
    None => Err(LogicErr::MissingRecord),
  }
}

pub async fn delete_comment(comments: &CommentPool, comment_id: i64, user_id: i64) -> Result<(), LogicErr> {
  comments.delete_comment(comment_id, user_id).await
}

/// Host hook for target-entity deletion: the registry cannot express a
/// foreign key into arbitrary entity tables, so the host calls this when it
/// deletes a commentable entity.
pub async fn delete_comments_for_target(comments: &CommentPool, target: &CommentTarget) -> Result<(), LogicErr> {
  comments.delete_comments_for_target(target).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::comment_repository::MockCommentRepo;
  use chrono::Utc;
  use std::sync::Arc;

  fn target() -> CommentTarget {
    CommentTarget {
      content_type_id: 1,
      object_id: 42,
    }
  }

  fn comment(comment_id: i64, parent_id: Option<i64>) -> Comment {
    let now = Utc::now();

    Comment {
      comment_id,
      user_id: 7,
      parent_id,
      content_type_id: 1,
      object_id: 42,
      content: "a comment".to_string(),
      posted_at: now,
      edited_at: now,
    }
  }

  #[async_std::test]
  async fn get_comments_fetches_top_level_by_default() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_fetch_top_level_comments()
      .times(1)
      .returning(|_| Ok(vec![]));

    let comments: CommentPool = Arc::new(comments);
    let result = get_comments(&comments, &target(), false).await;

    assert_eq!(result, Ok(vec![]));
  }

  #[async_std::test]
  async fn get_comments_can_include_replies() {
    let mut comments = MockCommentRepo::new();
    comments.expect_fetch_all_comments().times(1).returning(|_| Ok(vec![]));

    let comments: CommentPool = Arc::new(comments);
    let result = get_comments(&comments, &target(), true).await;

    assert_eq!(result, Ok(vec![]));
  }

  #[async_std::test]
  async fn get_replies_requires_the_comment_to_exist() {
    let mut comments = MockCommentRepo::new();
    comments.expect_fetch_comment_by_id().returning(|_| None);

    let comments: CommentPool = Arc::new(comments);
    let result = get_replies(&comments, 5).await;

    assert_eq!(result, Err(LogicErr::MissingRecord));
  }

  #[async_std::test]
  async fn get_replies_fetches_children() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_fetch_comment_by_id()
      .returning(|comment_id| Some(comment(comment_id, None)));
    comments
      .expect_fetch_replies()
      .withf(|comment_id| *comment_id == 5)
      .returning(|_| Ok(vec![]));

    let comments: CommentPool = Arc::new(comments);
    let result = get_replies(&comments, 5).await;

    assert_eq!(result, Ok(vec![]));
  }

  #[async_std::test]
  async fn create_comment_rejects_blank_content() {
    // No expectations: an insert would panic.
    let comments: CommentPool = Arc::new(MockCommentRepo::new());
    let result = create_comment(&comments, 7, &target(), None, "   ").await;

    assert_eq!(result, Err(LogicErr::InvalidData));
  }

  #[async_std::test]
  async fn create_comment_inserts_with_the_validated_parent() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_create_comment()
      .withf(|user_id, _, parent_id, content| {
        *user_id == 7 && *parent_id == Some(3) && content == "a reply"
      })
      .returning(|_, _, parent_id, _| Ok(comment(10, parent_id)));

    let comments: CommentPool = Arc::new(comments);
    let result = create_comment(&comments, 7, &target(), Some(3), "a reply").await;

    assert_eq!(result.unwrap().parent_id, Some(3));
  }

  #[async_std::test]
  async fn update_comment_of_another_author_is_missing() {
    let mut comments = MockCommentRepo::new();
    comments.expect_update_comment_content().returning(|_, _, _| Ok(None));

    let comments: CommentPool = Arc::new(comments);
    let result = update_comment(&comments, 10, 8, "changed").await;

    assert_eq!(result, Err(LogicErr::MissingRecord));
  }

  #[async_std::test]
  async fn update_comment_returns_the_refreshed_row() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_update_comment_content()
      .returning(|comment_id, _, _| Ok(Some(comment(comment_id, None))));

    let comments: CommentPool = Arc::new(comments);
    let result = update_comment(&comments, 10, 7, "changed").await;

    assert_eq!(result.unwrap().comment_id, 10);
  }

  #[async_std::test]
  async fn delete_comments_for_target_clears_the_thread() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_delete_comments_for_target()
      .withf(|target| target.object_id == 42)
      .times(1)
      .returning(|_| Ok(()));

    let comments: CommentPool = Arc::new(comments);
    let result = delete_comments_for_target(&comments, &target()).await;

    assert_eq!(result, Ok(()));
  }
}
