use axum::{Router, routing::get};

use crate::{App, route_not_found};

use super::{
    create::create_blog, delete::delete_blog, get::get_blog, list::list_blogs,
    patch::patch_blog,
};

pub fn route() -> Router<App> {
    Router::<App>::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog).patch(patch_blog).delete(delete_blog))
        .method_not_allowed_fallback(route_not_found)
}
