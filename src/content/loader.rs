//! Content loader - reads posts from the source directory

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownLite, Post};
use crate::Blog;

/// Loads posts from `source/_posts`.
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownLite,
}

impl<'a> ContentLoader<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownLite::new(),
        }
    }

    /// Load all posts, newest first. Unpublished posts and `(category,
    /// slug)` duplicates are skipped.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.blog.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) => {
                    let key = (post.category.clone(), post.slug.clone());
                    if !seen.insert(key) {
                        tracing::warn!(
                            "Duplicate (category, slug) pair {}/{}, skipping {:?}",
                            post.category,
                            post.slug,
                            path
                        );
                        continue;
                    }
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Newest first; undated posts sink to the end
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(posts)
    }

    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        if !fm.published {
            anyhow::bail!("post is not published");
        }

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let slug = fm
            .slug
            .clone()
            .unwrap_or_else(|| slug::slugify(&title));

        let category = fm
            .category
            .clone()
            .unwrap_or_else(|| self.blog.config.default_category.clone());

        let id = fm.id.clone().unwrap_or_else(|| slug.clone());

        let source = path
            .strip_prefix(&self.blog.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(id, title, slug, category);
        post.excerpt = fm.excerpt.clone().unwrap_or_default();
        post.published_at = fm.parse_published_at();
        post.read_time = fm.read_time.unwrap_or(1);
        post.tags = fm.tags.clone();
        post.raw = body.to_string();
        post.content = self.renderer.render(body);
        post.source = source;
        post.permalink = crate::helpers::full_url_for(&self.blog.config, &post.path);

        Ok(post)
    }
}

/// Find a post by its `(category, slug)` pair.
pub fn find_post<'a>(posts: &'a [Post], category: &str, slug: &str) -> Option<&'a Post> {
    posts
        .iter()
        .find(|p| p.category == category && p.slug == slug)
}

/// All posts in a category, preserving input order.
pub fn posts_in_category<'a>(posts: &'a [Post], category: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.category == category).collect()
}

/// The most recently published posts.
pub fn recent_posts(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    sorted.truncate(limit);
    sorted
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, front: &str, body: &str) {
        let posts_dir = dir.join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join(name),
            format!("---\n{}---\n\n{}", front, body),
        )
        .unwrap();
    }

    fn test_blog(dir: &Path) -> Blog {
        Blog::new(dir).unwrap()
    }

    #[test]
    fn test_load_sorted_and_rendered() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "older.md",
            "title: Older\nslug: older\ncategory: stocks\npublished_at: 2025-01-01T00:00:00Z\n",
            "# Older\n\nBody.",
        );
        write_post(
            tmp.path(),
            "newer.md",
            "title: Newer\nslug: newer\ncategory: stocks\npublished_at: 2025-02-01T00:00:00Z\n",
            "Plain body with **bold**.",
        );

        let blog = test_blog(tmp.path());
        let posts = ContentLoader::new(&blog).load_posts().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer");
        assert!(posts[0].content.contains("<strong"));
        assert!(posts[1].content.contains("<h1"));
    }

    #[test]
    fn test_duplicate_category_slug_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "a.md",
            "title: A\nslug: same\ncategory: stocks\n",
            "a",
        );
        write_post(
            tmp.path(),
            "b.md",
            "title: B\nslug: same\ncategory: stocks\n",
            "b",
        );
        write_post(
            tmp.path(),
            "c.md",
            "title: C\nslug: same\ncategory: crypto\n",
            "c",
        );

        let blog = test_blog(tmp.path());
        let posts = ContentLoader::new(&blog).load_posts().unwrap();

        // Same slug in a different category is fine
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_unpublished_post_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "draft.md",
            "title: Draft\npublished: false\n",
            "wip",
        );

        let blog = test_blog(tmp.path());
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_lookup_helpers() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "a.md",
            "title: A\nslug: a\ncategory: stocks\npublished_at: 2025-01-01T00:00:00Z\n",
            "a",
        );
        write_post(
            tmp.path(),
            "b.md",
            "title: B\nslug: b\ncategory: crypto\npublished_at: 2025-02-01T00:00:00Z\n",
            "b",
        );

        let blog = test_blog(tmp.path());
        let posts = ContentLoader::new(&blog).load_posts().unwrap();

        assert!(find_post(&posts, "stocks", "a").is_some());
        assert!(find_post(&posts, "stocks", "b").is_none());
        assert_eq!(posts_in_category(&posts, "crypto").len(), 1);
        let recent = recent_posts(&posts, 1);
        assert_eq!(recent[0].slug, "b");
    }

    #[test]
    fn test_missing_posts_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = test_blog(tmp.path());
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }
}
