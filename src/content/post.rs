//! Post and category models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A blog post.
///
/// The `(category, slug)` pair is unique across the site; the loader
/// enforces this when posts are read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier, taken from front-matter or derived from the slug
    pub id: String,

    /// Post title
    pub title: String,

    /// URL-friendly name
    pub slug: String,

    /// Category slug this post belongs to
    pub category: String,

    /// Short summary shown on listing pages and in the post header callout
    pub excerpt: String,

    /// Raw markdown-lite body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Publication date; absent when the front-matter gave none
    pub published_at: Option<DateTime<Local>>,

    /// Estimated reading time in minutes
    pub read_time: u32,

    /// Display tags, in front-matter order
    pub tags: Vec<String>,

    /// Source file path relative to the source directory
    pub source: String,

    /// URL path (`/<category>/<slug>/`)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl Post {
    /// Create a post with the fields every post must have; the loader fills
    /// in the rest.
    pub fn new(id: String, title: String, slug: String, category: String) -> Self {
        let path = format!("/{}/{}/", category, slug);
        Self {
            id,
            title,
            slug,
            category,
            excerpt: String::new(),
            raw: String::new(),
            content: String::new(),
            published_at: None,
            read_time: 0,
            tags: Vec::new(),
            source: String::new(),
            path,
            permalink: String::new(),
        }
    }

    /// Posts from the same category, excluding this one, newest-first order
    /// of the input preserved.
    pub fn related<'a>(&self, posts: &'a [Post], limit: usize) -> Vec<&'a Post> {
        posts
            .iter()
            .filter(|p| p.category == self.category && p.id != self.id)
            .take(limit)
            .collect()
    }

    /// Publication date formatted for display, empty when unknown.
    pub fn published_label(&self, format: &str) -> String {
        self.published_at
            .map(|d| d.format(format).to_string())
            .unwrap_or_default()
    }
}

/// A content category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl Category {
    pub fn new(id: &str, name: &str, slug: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
        }
    }

    /// URL path of the category listing page.
    pub fn path(&self) -> String {
        format!("/{}/", self.slug)
    }
}
