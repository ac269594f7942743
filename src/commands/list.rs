//! List site content and stats

use anyhow::Result;
use std::collections::HashMap;

use crate::content::loader::ContentLoader;
use crate::stats::{FileStore, VisitorTracker};
use crate::Blog;

/// List site content by type.
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = ContentLoader::new(blog).load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}/{}]",
                    post.published_label(&blog.config.date_format),
                    post.title,
                    post.category,
                    post.slug
                );
            }
        }
        "category" | "categories" => {
            let posts = ContentLoader::new(blog).load_posts()?;
            let mut counts: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                *counts.entry(post.category.clone()).or_insert(0) += 1;
            }
            println!("Categories ({}):", blog.config.categories.len());
            for category in &blog.config.categories {
                let count = counts.get(&category.slug).copied().unwrap_or(0);
                println!("  {} [{}] ({})", category.name, category.slug, count);
            }
        }
        "tag" | "tags" => {
            let posts = ContentLoader::new(blog).load_posts()?;
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "popular" => {
            let store = FileStore::open(blog.stats_path())?;
            let tracker = VisitorTracker::new(store);
            let top = tracker.top_pages(5);
            println!("Most viewed pages ({}):", top.len());
            for page in top {
                println!("  {} ({})", page.path, page.views);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag, popular",
                content_type
            );
        }
    }

    Ok(())
}
