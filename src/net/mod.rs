use actix_web::web;

pub mod comment;

/// Every route is mounted twice: the plain handlers render validation
/// failures themselves as the JSON error contract, the `/api` handlers
/// return the typed error and let the framework render it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/comments", web::get().to(comment::get_comments))
    .route("/comments", web::post().to(comment::create_comment))
    .route("/comments/{comment_id}", web::patch().to(comment::update_comment))
    .route("/comments/{comment_id}", web::delete().to(comment::delete_comment))
    .route("/comments/{comment_id}/replies", web::get().to(comment::get_replies))
    .route("/api/comments", web::get().to(comment::api_get_comments))
    .route("/api/comments", web::post().to(comment::api_create_comment))
    .route("/api/comments/{comment_id}", web::patch().to(comment::api_update_comment))
    .route("/api/comments/{comment_id}", web::delete().to(comment::api_delete_comment))
    .route(
      "/api/comments/{comment_id}/replies",
      web::get().to(comment::api_get_replies),
    );
}
