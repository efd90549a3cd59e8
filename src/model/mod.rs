pub mod args;
pub mod comment;
pub mod comment_pub;
pub mod comment_request;
pub mod content_type;
