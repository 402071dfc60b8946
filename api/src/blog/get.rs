use axum::{
    Json, debug_handler,
    extract::{Path, State},
};

use crate::{App, envelope::Envelope, error::AppError};

use super::{BlogData, parse_id};

#[debug_handler]
pub async fn get_blog(
    State(ctx): State<App>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<BlogData>>, AppError> {
    let id = parse_id(&id)?;

    let blog = ctx.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(Envelope::success(BlogData { blog })))
}
