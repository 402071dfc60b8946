pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod models;
pub mod pagination;
pub mod patch;
pub mod routes;


use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

use self::models::Blog;

#[derive(Serialize, Debug)]
pub struct BlogData {
    pub blog: Blog,
}

// A path segment that is not a UUID cannot name any stored blog.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound)
}
