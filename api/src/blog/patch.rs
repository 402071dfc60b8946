use axum::{
    Json, debug_handler,
    extract::{Path, State},
};
use chrono::Utc;

use crate::{App, envelope::Envelope, error::AppError, json::ValidJson};

use super::{BlogData, models::BlogPatch, parse_id};

#[debug_handler]
pub async fn patch_blog(
    State(ctx): State<App>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<BlogPatch>,
) -> Result<Json<Envelope<BlogData>>, AppError> {
    let id = parse_id(&id)?;

    let affected = ctx
        .store
        .update_where_id(id, patch.into_changeset(Utc::now()))
        .await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }

    // The update does not return the row, so it is read back. A concurrent
    // delete can land in between; that is reported as not found.
    let blog = ctx.store.find_by_id(id).await?.ok_or_else(|| {
        tracing::warn!(%id, "Blog vanished between update and refetch");
        AppError::NotFound
    })?;

    Ok(Json(Envelope::success(BlogData { blog })))
}
