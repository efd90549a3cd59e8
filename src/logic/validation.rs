use actix_web::http::StatusCode;
use async_trait::async_trait;

use crate::{
  db::{comment_repository::CommentPool, content_type_repository::ContentTypePool},
  model::{
    comment::CommentTarget, comment_request::CommentRequest, content_type::ContentType,
  },
};

use super::LogicErr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
  MissingField,
  UnknownNamespace,
  UnknownEntityType,
  EntityNotFound,
  InvalidId,
  ParentNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
  pub kind: ValidationErrorKind,
  pub detail: String,
  pub status: StatusCode,
}

impl ValidationError {
  fn new(kind: ValidationErrorKind, detail: String) -> ValidationError {
    ValidationError {
      kind,
      detail,
      status: StatusCode::BAD_REQUEST,
    }
  }

  pub fn with_status(mut self, status: StatusCode) -> ValidationError {
    self.status = status;
    self
  }

  pub fn missing_field(field: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::MissingField,
      format!("{} must be provided", field),
    )
  }

  pub fn unknown_namespace(app_name: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::UnknownNamespace,
      format!("{} is NOT a valid app name", app_name),
    )
  }

  pub fn unknown_entity_type(model_name: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::UnknownEntityType,
      format!("{} is NOT a valid model name", model_name),
    )
  }

  pub fn entity_not_found(model_id: &str, model_name: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::EntityNotFound,
      format!("{} is NOT a valid model id for the model {}", model_id, model_name),
    )
  }

  pub fn invalid_model_id(model_id: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::InvalidId,
      format!("model id must be an integer, {} is NOT", model_id),
    )
  }

  pub fn invalid_parent_id(parent_id: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::InvalidId,
      format!("the parent id must be an integer, {} is NOT", parent_id),
    )
  }

  pub fn parent_not_found(parent_id: &str) -> ValidationError {
    ValidationError::new(
      ValidationErrorKind::ParentNotFound,
      format!(
        "{} is NOT a valid id for a parent comment or the parent comment does NOT belong to the provided model object",
        parent_id
      ),
    )
  }
}

/// What the chain has resolved so far. Later stages read what earlier stages
/// wrote; a fully validated request always carries a target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTarget {
  pub content_type: Option<ContentType>,
  pub object_id: Option<i64>,
  pub parent_id: Option<i64>,
}

impl ResolvedTarget {
  pub fn target(&self) -> Option<CommentTarget> {
    match (&self.content_type, self.object_id) {
      (Some(content_type), Some(object_id)) => Some(CommentTarget {
        content_type_id: content_type.content_type_id,
        object_id,
      }),
      _ => None,
    }
  }
}

#[async_trait]
pub trait Validator {
  async fn validate(&self, req: &CommentRequest, resolved: &mut ResolvedTarget) -> Result<(), LogicErr>;
}

/// Stage 1: the request's (app_name, model_name, model_id) descriptor must
/// resolve to an existing entity instance via the type registry.
pub struct TargetValidator {
  pub content_types: ContentTypePool,
}

#[async_trait]
impl Validator for TargetValidator {
  async fn validate(&self, req: &CommentRequest, resolved: &mut ResolvedTarget) -> Result<(), LogicErr> {
    let model_name = match req.model_name.as_deref() {
      Some(name) if !name.is_empty() => name,
      _ => return Err(ValidationError::missing_field("model name").into()),
    };
    let model_id = match req.model_id.as_deref() {
      Some(id) if !id.is_empty() => id,
      _ => return Err(ValidationError::missing_field("model id").into()),
    };
    let app_name = match req.app_name.as_deref() {
      Some(name) if !name.is_empty() => name,
      _ => return Err(ValidationError::missing_field("app name").into()),
    };

    if !self.content_types.namespace_exists(app_name).await? {
      return Err(ValidationError::unknown_namespace(app_name).into());
    }

    let content_type = match self
      .content_types
      .fetch_content_type(app_name, &model_name.to_lowercase())
      .await?
    {
      Some(content_type) => content_type,
      None => return Err(ValidationError::unknown_entity_type(model_name).into()),
    };

    // Parse before probing so a malformed id surfaces as InvalidId, never
    // as EntityNotFound.
    let object_id: i64 = match model_id.parse() {
      Ok(id) => id,
      Err(_) => return Err(ValidationError::invalid_model_id(model_id).into()),
    };

    if !self.content_types.entity_exists(&content_type, object_id).await? {
      return Err(ValidationError::entity_not_found(model_id, model_name).into());
    }

    resolved.content_type = Some(content_type);
    resolved.object_id = Some(object_id);

    Ok(())
  }
}

/// Stage 2: an optional parent_id must name a comment attached to the target
/// stage 1 resolved. Absent or the literal "0" means top-level.
pub struct ParentValidator {
  pub comments: CommentPool,
}

#[async_trait]
impl Validator for ParentValidator {
  async fn validate(&self, req: &CommentRequest, resolved: &mut ResolvedTarget) -> Result<(), LogicErr> {
    let parent_id = match req.parent_id.as_deref() {
      Some(id) if !id.is_empty() && id != "0" => id,
      _ => return Ok(()),
    };

    let comment_id: i64 = match parent_id.parse() {
      Ok(id) => id,
      Err(_) => return Err(ValidationError::invalid_parent_id(parent_id).into()),
    };

    // Stage ordering guarantees a resolved target; without one no parent
    // can be consistent.
    let object_id = match resolved.object_id {
      Some(id) => id,
      None => return Err(ValidationError::parent_not_found(parent_id).into()),
    };

    match self.comments.fetch_comment_for_target(comment_id, object_id).await? {
      Some(_) => {
        resolved.parent_id = Some(comment_id);
        Ok(())
      }
      None => Err(ValidationError::parent_not_found(parent_id).into()),
    }
  }
}

/// The ordered validation chain run against every comment request before the
/// store is touched. Stages run in sequence and the first failure wins.
pub struct RequestValidator {
  validators: Vec<Box<dyn Validator + Send + Sync>>,
}

impl RequestValidator {
  pub fn new(content_types: ContentTypePool, comments: CommentPool) -> RequestValidator {
    RequestValidator {
      validators: vec![
        Box::new(TargetValidator { content_types }),
        Box::new(ParentValidator { comments }),
      ],
    }
  }

  pub async fn run(&self, req: &CommentRequest) -> Result<ResolvedTarget, LogicErr> {
    let mut resolved = ResolvedTarget::default();

    for validator in &self.validators {
      validator.validate(req, &mut resolved).await?;
    }

    Ok(resolved)
  }
}
