use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;

use commentable::{
  db::{
    self,
    comment_repository::{CommentPool, DbCommentRepo},
    content_type_repository::{ContentTypePool, DbContentTypeRepo},
  },
  model::args::Args,
  net,
  settings::SETTINGS,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let args = Args::parse();
  if let Some(config_path) = args.config_path {
    std::env::set_var("COMMENTABLE_CONFIG", config_path);
  }

  env_logger::init();

  let pool = db::create_pool().map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

  let comments: CommentPool = Arc::new(DbCommentRepo { db: pool.clone() });
  let content_types: ContentTypePool = Arc::new(DbContentTypeRepo { db: pool });

  log::info!(
    "Listening on {}:{}",
    SETTINGS.server.host,
    SETTINGS.server.port
  );

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .app_data(web::Data::new(comments.clone()))
      .app_data(web::Data::new(content_types.clone()))
      .configure(net::configure_routes)
  })
  .bind((SETTINGS.server.host.as_str(), SETTINGS.server.port))?
  .run()
  .await
}
