use serde::Deserialize;

/// The target-entity descriptor fields an inbound comment request carries,
/// taken verbatim from the query string or form body. Everything arrives as
/// an optional string; the validation chain decides what is missing, what
/// does not parse and what does not resolve.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRequest {
  pub app_name: Option<String>,
  pub model_name: Option<String>,
  pub model_id: Option<String>,
  pub parent_id: Option<String>,
}

fn first_present(primary: Option<String>, fallback: Option<String>) -> Option<String> {
  match primary {
    Some(value) if !value.is_empty() => Some(value),
    _ => fallback,
  }
}

impl CommentRequest {
  /// Field-wise merge of two descriptor sources. Mutation requests may carry
  /// the descriptor in the query string, the form body, or both; the query
  /// string wins per field and an empty value counts as absent.
  pub fn or(self, fallback: CommentRequest) -> CommentRequest {
    CommentRequest {
      app_name: first_present(self.app_name, fallback.app_name),
      model_name: first_present(self.model_name, fallback.model_name),
      model_id: first_present(self.model_id, fallback.model_id),
      parent_id: first_present(self.parent_id, fallback.parent_id),
    }
  }
}
