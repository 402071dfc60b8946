//! In-process store with the same semantics as the Postgres one: unique
//! titles, store-assigned ids and timestamps, newest-first listing.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::blog::models::{Blog, BlogChangeset, NewBlog};

use super::{BlogStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryBlogStore {
    blogs: RwLock<Vec<Blog>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_title() -> StoreError {
    StoreError::UniqueViolation {
        message: "duplicate key value violates unique constraint \"blogs_title_key\"".into(),
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn insert(&self, blog: NewBlog) -> StoreResult<Blog> {
        let mut blogs = self.blogs.write().await;

        if blogs.iter().any(|b| b.title == blog.title) {
            return Err(duplicate_title());
        }

        // Creation times stay strictly increasing, so the latest insert is
        // always listed first.
        let now = match blogs.iter().map(|b| b.created_at).max() {
            Some(latest) if latest >= Utc::now() => latest + TimeDelta::nanoseconds(1),
            _ => Utc::now(),
        };
        let blog = Blog {
            id: Uuid::new_v4(),
            title: blog.title,
            description: blog.description,
            category: blog.category,
            published: blog.published,
            created_at: now,
            updated_at: now,
        };
        blogs.push(blog.clone());

        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Blog>> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn find_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Blog>> {
        let blogs = self.blogs.read().await;

        // Equal timestamps fall back to id descending, as in the SQL store.
        let mut newest_first: Vec<&Blog> = blogs.iter().collect();
        newest_first.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(newest_first
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn update_where_id(&self, id: Uuid, changes: BlogChangeset) -> StoreResult<usize> {
        let mut blogs = self.blogs.write().await;

        if let Some(title) = &changes.title {
            if blogs.iter().any(|b| b.id != id && &b.title == title) {
                return Err(duplicate_title());
            }
        }

        let Some(blog) = blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(0);
        };

        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(description) = changes.description {
            blog.description = description;
        }
        if let Some(category) = changes.category {
            blog.category = category;
        }
        if let Some(published) = changes.published {
            blog.published = published;
        }
        blog.updated_at = changes.updated_at;

        Ok(1)
    }

    async fn delete_where_id(&self, id: Uuid) -> StoreResult<usize> {
        let mut blogs = self.blogs.write().await;

        let before = blogs.len();
        blogs.retain(|b| b.id != id);

        Ok(before - blogs.len())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.blogs.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_blog(title: &str) -> NewBlog {
        NewBlog {
            title: title.into(),
            description: "description".into(),
            category: None,
            published: false,
        }
    }

    fn no_changes() -> BlogChangeset {
        BlogChangeset {
            title: None,
            description: None,
            category: None,
            published: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = MemoryBlogStore::new();

        let blog = store.insert(new_blog("first")).await.unwrap();

        assert_eq!(blog.created_at, blog.updated_at);
        assert_eq!(store.find_by_id(blog.id).await.unwrap(), Some(blog));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_unique_violation() {
        let store = MemoryBlogStore::new();
        store.insert(new_blog("same")).await.unwrap();

        let err = store.insert(new_blog("same")).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_rejects_title_owned_by_another_record() {
        let store = MemoryBlogStore::new();
        store.insert(new_blog("taken")).await.unwrap();
        let other = store.insert(new_blog("mine")).await.unwrap();

        let changes = BlogChangeset {
            title: Some("taken".into()),
            ..no_changes()
        };
        let err = store.update_where_id(other.id, changes).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        // keeping its own title is not a collision
        let changes = BlogChangeset {
            title: Some("mine".into()),
            ..no_changes()
        };
        assert_eq!(store.update_where_id(other.id, changes).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let store = MemoryBlogStore::new();
        let blog = store.insert(new_blog("a")).await.unwrap();

        assert_eq!(
            store.update_where_id(Uuid::new_v4(), no_changes()).await.unwrap(),
            0
        );
        assert_eq!(store.update_where_id(blog.id, no_changes()).await.unwrap(), 1);

        assert_eq!(store.delete_where_id(Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(store.delete_where_id(blog.id).await.unwrap(), 1);
        assert_eq!(store.find_by_id(blog.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_page_is_newest_first_and_windowed() {
        let store = MemoryBlogStore::new();
        for i in 0..7 {
            store.insert(new_blog(&format!("post {i}"))).await.unwrap();
        }

        let titles = |blogs: Vec<Blog>| blogs.into_iter().map(|b| b.title).collect::<Vec<_>>();

        assert_eq!(
            titles(store.find_page(3, 0).await.unwrap()),
            ["post 6", "post 5", "post 4"]
        );
        assert_eq!(
            titles(store.find_page(3, 6).await.unwrap()),
            ["post 0"]
        );
        assert!(store.find_page(3, 9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn equal_timestamps_are_ordered_by_id_descending() {
        let store = MemoryBlogStore::new();
        let created_at = Utc::now();
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);

        for (id, title) in [(low, "low"), (high, "high")] {
            store.blogs.write().await.push(Blog {
                id,
                title: title.into(),
                description: "description".into(),
                category: None,
                published: false,
                created_at,
                updated_at: created_at,
            });
        }

        let ids: Vec<Uuid> = store
            .find_page(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, [high, low]);
    }
}
