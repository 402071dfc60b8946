use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{App, error::AppError};

use super::parse_id;

#[debug_handler]
pub async fn delete_blog(
    State(ctx): State<App>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    if ctx.store.delete_where_id(id).await? == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(%id, "Deleted blog");

    Ok(StatusCode::NO_CONTENT)
}
