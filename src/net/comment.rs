use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
  db::{comment_repository::CommentPool, content_type_repository::ContentTypePool},
  helpers::api::map_api_err,
  logic::{self, validation::RequestValidator, LogicErr},
  model::{comment::CommentTarget, comment_request::CommentRequest},
};

#[derive(Deserialize, Debug)]
pub struct ListCommentsQuery {
  app_name: Option<String>,
  model_name: Option<String>,
  model_id: Option<String>,
  all: Option<bool>,
}

impl ListCommentsQuery {
  fn descriptor(&self) -> CommentRequest {
    CommentRequest {
      app_name: self.app_name.clone(),
      model_name: self.model_name.clone(),
      model_id: self.model_id.clone(),
      parent_id: None,
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct CreateCommentForm {
  app_name: Option<String>,
  model_name: Option<String>,
  model_id: Option<String>,
  parent_id: Option<String>,
  user_id: i64,
  content: String,
}

impl CreateCommentForm {
  fn descriptor(&self) -> CommentRequest {
    CommentRequest {
      app_name: self.app_name.clone(),
      model_name: self.model_name.clone(),
      model_id: self.model_id.clone(),
      parent_id: self.parent_id.clone(),
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct UpdateCommentForm {
  user_id: i64,
  content: String,
}

#[derive(Deserialize, Debug)]
pub struct DeleteCommentQuery {
  user_id: i64,
}

async fn validate_target(
  content_types: &ContentTypePool,
  comments: &CommentPool,
  req: &CommentRequest,
) -> Result<(CommentTarget, Option<i64>), LogicErr> {
  let validator = RequestValidator::new(content_types.clone(), comments.clone());
  let resolved = validator.run(req).await?;

  match resolved.target() {
    Some(target) => Ok((target, resolved.parent_id)),
    None => Err(LogicErr::InternalError(
      "Validated request is missing a resolved target".to_string(),
    )),
  }
}

async fn list_comments(
  comments: &CommentPool,
  content_types: &ContentTypePool,
  query: &ListCommentsQuery,
) -> Result<HttpResponse, LogicErr> {
  let (target, _) = validate_target(content_types, comments, &query.descriptor()).await?;
  let results = logic::comment::get_comments(comments, &target, query.all.unwrap_or(false)).await?;

  Ok(HttpResponse::Ok().json(results))
}

async fn post_comment(
  comments: &CommentPool,
  content_types: &ContentTypePool,
  descriptor: &CommentRequest,
  form: &CreateCommentForm,
) -> Result<HttpResponse, LogicErr> {
  let (target, parent_id) = validate_target(content_types, comments, descriptor).await?;
  let comment = logic::comment::create_comment(comments, form.user_id, &target, parent_id, &form.content).await?;

  Ok(HttpResponse::Created().json(comment))
}

async fn list_replies(comments: &CommentPool, comment_id: i64) -> Result<HttpResponse, LogicErr> {
  let results = logic::comment::get_replies(comments, comment_id).await?;

  Ok(HttpResponse::Ok().json(results))
}

async fn patch_comment(
  comments: &CommentPool,
  comment_id: i64,
  form: &UpdateCommentForm,
) -> Result<HttpResponse, LogicErr> {
  let comment = logic::comment::update_comment(comments, comment_id, form.user_id, &form.content).await?;

  Ok(HttpResponse::Ok().json(comment))
}

async fn remove_comment(comments: &CommentPool, comment_id: i64, user_id: i64) -> Result<HttpResponse, LogicErr> {
  logic::comment::delete_comment(comments, comment_id, user_id).await?;

  Ok(HttpResponse::Ok().finish())
}

pub async fn get_comments(
  comments: web::Data<CommentPool>,
  content_types: web::Data<ContentTypePool>,
  query: web::Query<ListCommentsQuery>,
) -> HttpResponse {
  match list_comments(&comments, &content_types, &query).await {
    Ok(res) => res,
    Err(err) => map_api_err(&err),
  }
}

pub async fn api_get_comments(
  comments: web::Data<CommentPool>,
  content_types: web::Data<ContentTypePool>,
  query: web::Query<ListCommentsQuery>,
) -> Result<HttpResponse, LogicErr> {
  list_comments(&comments, &content_types, &query).await
}

pub async fn create_comment(
  comments: web::Data<CommentPool>,
  content_types: web::Data<ContentTypePool>,
  query: web::Query<CommentRequest>,
  form: web::Form<CreateCommentForm>,
) -> HttpResponse {
  let descriptor = query.into_inner().or(form.descriptor());

  match post_comment(&comments, &content_types, &descriptor, &form).await {
    Ok(res) => res,
    Err(err) => map_api_err(&err),
  }
}

pub async fn api_create_comment(
  comments: web::Data<CommentPool>,
  content_types: web::Data<ContentTypePool>,
  query: web::Query<CommentRequest>,
  form: web::Form<CreateCommentForm>,
) -> Result<HttpResponse, LogicErr> {
  let descriptor = query.into_inner().or(form.descriptor());

  post_comment(&comments, &content_types, &descriptor, &form).await
}

pub async fn get_replies(comments: web::Data<CommentPool>, comment_id: web::Path<i64>) -> HttpResponse {
  match list_replies(&comments, *comment_id).await {
    Ok(res) => res,
    Err(err) => map_api_err(&err),
  }
}

pub async fn api_get_replies(
  comments: web::Data<CommentPool>,
  comment_id: web::Path<i64>,
) -> Result<HttpResponse, LogicErr> {
  list_replies(&comments, *comment_id).await
}

pub async fn update_comment(
  comments: web::Data<CommentPool>,
  comment_id: web::Path<i64>,
  form: web::Form<UpdateCommentForm>,
) -> HttpResponse {
  match patch_comment(&comments, *comment_id, &form).await {
    Ok(res) => res,
    Err(err) => map_api_err(&err),
  }
}

pub async fn api_update_comment(
  comments: web::Data<CommentPool>,
  comment_id: web::Path<i64>,
  form: web::Form<UpdateCommentForm>,
) -> Result<HttpResponse, LogicErr> {
  patch_comment(&comments, *comment_id, &form).await
}

pub async fn delete_comment(
  comments: web::Data<CommentPool>,
  comment_id: web::Path<i64>,
  query: web::Query<DeleteCommentQuery>,
) -> HttpResponse {
  match remove_comment(&comments, *comment_id, query.user_id).await {
    Ok(res) => res,
    Err(err) => map_api_err(&err),
  }
}

pub async fn api_delete_comment(
  comments: web::Data<CommentPool>,
  comment_id: web::Path<i64>,
  query: web::Query<DeleteCommentQuery>,
) -> Result<HttpResponse, LogicErr> {
  remove_comment(&comments, *comment_id, query.user_id).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    db::{comment_repository::MockCommentRepo, content_type_repository::MockContentTypeRepo},
    model::content_type::ContentType,
  };
  use actix_web::http::StatusCode;
  use std::sync::Arc;

  fn blog_registry() -> ContentTypePool {
    let mut content_types = MockContentTypeRepo::new();
    content_types
      .expect_namespace_exists()
      .returning(|app_name| Ok(app_name == "blog"));
    content_types.expect_fetch_content_type().returning(|_, model_name| {
      if model_name == "post" {
        Ok(Some(ContentType {
          content_type_id: 1,
          app_name: "blog".to_string(),
          model_name: "post".to_string(),
          table_name: "blog_posts".to_string(),
        }))
      } else {
        Ok(None)
      }
    });
    content_types.expect_entity_exists().returning(|_, _| Ok(true));

    Arc::new(content_types)
  }

  #[async_std::test]
  async fn listing_renders_validation_failure_as_the_json_contract() {
    let comments: CommentPool = Arc::new(MockCommentRepo::new());
    let query = ListCommentsQuery {
      app_name: Some("forum".to_string()),
      model_name: Some("Post".to_string()),
      model_id: Some("42".to_string()),
      all: None,
    };

    let resp = match list_comments(&comments, &blog_registry(), &query).await {
      Ok(res) => res,
      Err(err) => map_api_err(&err),
    };

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["type"], "error");
    assert_eq!(body["detail"], "forum is NOT a valid app name");
  }

  #[async_std::test]
  async fn create_accepts_the_descriptor_from_the_query_string() {
    let mut comments = MockCommentRepo::new();
    comments
      .expect_create_comment()
      .withf(|user_id, target, _, content| {
        *user_id == 7 && target.object_id == 42 && content == "hello"
      })
      .returning(|user_id, target, parent_id, content| {
        let now = chrono::Utc::now();

        Ok(crate::model::comment::Comment {
          comment_id: 10,
          user_id,
          parent_id,
          content_type_id: target.content_type_id,
          object_id: target.object_id,
          content: content.to_string(),
          posted_at: now,
          edited_at: now,
        })
      });

    let comments: CommentPool = Arc::new(comments);
    let query = CommentRequest {
      app_name: Some("blog".to_string()),
      model_name: Some("Post".to_string()),
      model_id: Some("42".to_string()),
      parent_id: None,
    };
    let form = CreateCommentForm {
      app_name: None,
      model_name: None,
      model_id: None,
      parent_id: None,
      user_id: 7,
      content: "hello".to_string(),
    };

    let descriptor = query.or(form.descriptor());
    let resp = post_comment(&comments, &blog_registry(), &descriptor, &form).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
  }

  #[async_std::test]
  async fn listing_serializes_validated_results() {
    let mut comments = MockCommentRepo::new();
    comments.expect_fetch_top_level_comments().returning(|_| Ok(vec![]));

    let comments: CommentPool = Arc::new(comments);
    let query = ListCommentsQuery {
      app_name: Some("blog".to_string()),
      model_name: Some("Post".to_string()),
      model_id: Some("42".to_string()),
      all: None,
    };

    let resp = list_comments(&comments, &blog_registry(), &query).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
