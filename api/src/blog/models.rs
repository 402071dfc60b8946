use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::json::Validate;

const MAX_TITLE_LEN: usize = 100;
const MAX_CATEGORY_LEN: usize = 50;

// The model that maps to the database table
#[derive(Queryable, Selectable, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Partial update submitted by the client. `category: null` clears the
/// category, an absent field leaves it untouched.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    pub published: Option<bool>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::blogs)]
pub struct BlogChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Option<String>>,
    pub published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPatch {
    pub fn into_changeset(self, updated_at: DateTime<Utc>) -> BlogChangeset {
        BlogChangeset {
            title: self.title,
            description: self.description,
            category: self.category,
            published: self.published,
            updated_at,
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn check_title(title: &mut String) -> Result<(), &'static str> {
    *title = title.trim().to_string();
    if title.is_empty() {
        return Err("Title is required");
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err("Title too long (max 100 characters)");
    }

    Ok(())
}

fn check_description(description: &mut String) -> Result<(), &'static str> {
    *description = description.trim().to_string();
    if description.is_empty() {
        return Err("Description is required");
    }

    Ok(())
}

fn check_category(category: &mut String) -> Result<(), &'static str> {
    *category = category.trim().to_string();
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err("Category too long (max 50 characters)");
    }

    Ok(())
}

impl Validate for NewBlog {
    fn validate(&mut self) -> Result<(), &'static str> {
        check_title(&mut self.title)?;
        check_description(&mut self.description)?;
        if let Some(category) = self.category.as_mut() {
            check_category(category)?;
        }

        Ok(())
    }
}

impl Validate for BlogPatch {
    fn validate(&mut self) -> Result<(), &'static str> {
        if let Some(title) = self.title.as_mut() {
            check_title(title)?;
        }

        if let Some(description) = self.description.as_mut() {
            check_description(description)?;
        }

        if let Some(Some(category)) = self.category.as_mut() {
            check_category(category)?;
        }

        Ok(())
    }
}
