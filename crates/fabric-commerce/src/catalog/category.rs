//! Category and banner types.

use crate::ids::{BannerId, CategoryId};
use serde::{Deserialize, Serialize};

/// A product category. Categories form a two-level tree via `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    /// Parent category ID (None for root categories).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Category image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort order position.
    #[serde(default)]
    pub order: i32,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(id: impl Into<CategoryId>, name: impl Into<String>, order: i32) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: super::slugify(&name),
            name,
            parent_id: None,
            image: None,
            description: None,
            order,
        }
    }

    /// Create a child of `parent`.
    pub fn new_child(
        parent: &Category,
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        order: i32,
    ) -> Self {
        let mut category = Self::new_root(id, name, order);
        category.parent_id = Some(parent.id.clone());
        category
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this category is a direct child of `other`.
    pub fn is_child_of(&self, other: &Category) -> bool {
        self.parent_id.as_ref() == Some(&other.id)
    }
}

/// A home-page banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Image URL.
    pub image: String,
    /// Link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    /// Display order.
    #[serde(default)]
    pub order: i32,
}
