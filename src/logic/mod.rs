use std::fmt;

use crate::logic::validation::ValidationError;

pub mod comment;
pub mod validation;

#[derive(Debug, Clone, PartialEq)]
pub enum LogicErr {
  DbError,
  MissingRecord,
  InvalidData,
  InternalError(String),
  Validation(ValidationError),
}

impl fmt::Display for LogicErr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogicErr::DbError => write!(f, "Database error"),
      LogicErr::MissingRecord => write!(f, "Record not found"),
      LogicErr::InvalidData => write!(f, "Invalid data"),
      LogicErr::InternalError(detail) => write!(f, "{}", detail),
      LogicErr::Validation(err) => write!(f, "{}", err.detail),
    }
  }
}

impl From<ValidationError> for LogicErr {
  fn from(err: ValidationError) -> Self {
    LogicErr::Validation(err)
  }
}
