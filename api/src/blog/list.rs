use axum::{Json, debug_handler, extract::State};
use serde::Serialize;

use crate::{App, envelope::Envelope, error::AppError, query::Query};

use super::{
    models::Blog,
    pagination::{ListQuery, Pagination},
};

#[derive(Serialize, Debug)]
pub struct BlogsData {
    pub blogs: Vec<Blog>,
}

#[debug_handler]
pub async fn list_blogs(
    State(ctx): State<App>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<BlogsData>>, AppError> {
    let pagination = Pagination::from_query(&query);

    let blogs = ctx
        .store
        .find_page(pagination.limit, pagination.offset())
        .await?;

    let results = blogs.len();
    Ok(Json(Envelope::success(BlogsData { blogs }).with_results(results)))
}
