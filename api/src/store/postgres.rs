use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{
    AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection,
    pooled_connection::{
        AsyncDieselConnectionManager,
        deadpool::{Object, Pool},
    },
};
use uuid::Uuid;

use crate::{
    blog::models::{Blog, BlogChangeset, NewBlog},
    schema::blogs,
};

use super::{BlogStore, StoreError, StoreResult};

const CREATE_BLOGS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS blogs (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title VARCHAR(100) NOT NULL UNIQUE,
        description TEXT NOT NULL,
        category VARCHAR(50),
        published BOOLEAN NOT NULL DEFAULT false,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );
    CREATE INDEX IF NOT EXISTS blogs_created_at_idx ON blogs (created_at DESC);
";

pub struct PgBlogStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgBlogStore {
    /// Builds the connection pool. Connections are opened lazily, so this
    /// does not touch the database.
    pub fn new(database_url: &str, max_connections: usize) -> Result<Self, StoreError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(manager)
            .max_size(max_connections)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Creates the `blogs` table and its ordering index if missing.
    pub async fn migrate(&self) -> StoreResult<()> {
        let mut conn = self.conn().await?;
        conn.batch_execute(CREATE_BLOGS_TABLE).await?;

        tracing::info!("blogs table is ready");
        Ok(())
    }

    async fn conn(&self) -> StoreResult<Object<AsyncPgConnection>> {
        self.pool.get().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to acquire a database connection");
            StoreError::Connection(e.to_string())
        })
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn insert(&self, blog: NewBlog) -> StoreResult<Blog> {
        let mut conn = self.conn().await?;

        let blog = diesel::insert_into(blogs::table)
            .values(&blog)
            .returning(Blog::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Blog>> {
        let mut conn = self.conn().await?;

        let blog = blogs::table
            .find(id)
            .select(Blog::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(blog)
    }

    async fn find_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Blog>> {
        let mut conn = self.conn().await?;

        let blogs = blogs::table
            .order((blogs::created_at.desc(), blogs::id.desc()))
            .limit(limit)
            .offset(offset)
            .select(Blog::as_select())
            .load(&mut conn)
            .await?;

        Ok(blogs)
    }

    async fn update_where_id(&self, id: Uuid, changes: BlogChangeset) -> StoreResult<usize> {
        let mut conn = self.conn().await?;

        let affected = diesel::update(blogs::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        Ok(affected)
    }

    async fn delete_where_id(&self, id: Uuid) -> StoreResult<usize> {
        let mut conn = self.conn().await?;

        let affected = diesel::delete(blogs::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(affected)
    }

    async fn count(&self) -> StoreResult<i64> {
        let mut conn = self.conn().await?;

        let count = blogs::table.count().get_result(&mut conn).await?;

        Ok(count)
    }
}
