use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt::Display;

use crate::logic::LogicErr;

pub fn map_db_err<E: Display>(err: E) -> LogicErr {
  log::error!("Database query failed: {}", err);
  LogicErr::DbError
}

/// The error contract shared by both presentation modes:
/// `{"type": "error", "detail": "<message>"}` under the error's status.
pub fn map_api_err(err: &LogicErr) -> HttpResponse {
  HttpResponse::build(err.status_code()).json(json!({
    "type": "error",
    "detail": err.to_string(),
  }))
}

/// Lets API-mode handlers return `Err(LogicErr)` and leave rendering to the
/// framework; the plain handlers call `map_api_err` themselves.
impl ResponseError for LogicErr {
  fn status_code(&self) -> StatusCode {
    match self {
      LogicErr::DbError => StatusCode::INTERNAL_SERVER_ERROR,
      LogicErr::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
      LogicErr::MissingRecord => StatusCode::NOT_FOUND,
      LogicErr::InvalidData => StatusCode::BAD_REQUEST,
      LogicErr::Validation(err) => err.status,
    }
  }

  fn error_response(&self) -> HttpResponse {
    map_api_err(self)
  }
}
