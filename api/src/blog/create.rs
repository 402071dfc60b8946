use axum::{Json, debug_handler, extract::State, http::StatusCode};

use crate::{
    App,
    envelope::Envelope,
    error::AppError,
    json::ValidJson,
    store::StoreError,
};

use super::{BlogData, models::NewBlog};

#[debug_handler]
pub async fn create_blog(
    State(ctx): State<App>,
    ValidJson(blog): ValidJson<NewBlog>,
) -> Result<(StatusCode, Json<Envelope<BlogData>>), AppError> {
    let blog = ctx.store.insert(blog).await.map_err(|e| match e {
        StoreError::UniqueViolation { message } => {
            tracing::debug!(%message, "Rejected blog with a duplicate title");
            AppError::DuplicateTitle
        }
        e => e.into(),
    })?;

    tracing::info!(id = %blog.id, "Created blog");

    Ok((StatusCode::CREATED, Json(Envelope::success(BlogData { blog }))))
}
