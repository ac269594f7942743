//! Generator module - writes the static site to the public directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{loader, Category, Post};
use crate::templates;
use crate::Blog;

/// Static site generator.
pub struct Generator {
    blog: Blog,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Generate the entire site: home page, one listing page per category,
    /// one page per post.
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.generate_index(posts)?;

        for category in &self.blog.config.categories {
            self.generate_category_page(category, posts)?;
        }

        for post in posts {
            self.generate_post_page(post, posts)?;
        }

        Ok(())
    }

    fn generate_index(&self, posts: &[Post]) -> Result<()> {
        let recent = loader::recent_posts(posts, self.blog.config.recent_posts);
        let html = templates::index_page(&self.blog.config, &recent);
        write_page(&self.blog.public_dir, &html)
    }

    fn generate_category_page(&self, category: &Category, posts: &[Post]) -> Result<()> {
        let in_category = loader::posts_in_category(posts, &category.slug);
        let html = templates::category_page(&self.blog.config, category, &in_category);
        write_page(&self.blog.public_dir.join(&category.slug), &html)
    }

    fn generate_post_page(&self, post: &Post, posts: &[Post]) -> Result<()> {
        // Posts in unconfigured categories still render; the category table
        // only enriches the page with a name and description.
        let category = match self.blog.config.category(&post.category) {
            Some(c) => c.clone(),
            None => {
                tracing::warn!(
                    "Post {} references unconfigured category {}",
                    post.slug,
                    post.category
                );
                Category::new("", &post.category, &post.category, "")
            }
        };

        let related = post.related(posts, self.blog.config.related_posts);
        let html = templates::post_page(&self.blog.config, &category, post, &related);
        write_page(
            &self.blog.public_dir.join(&post.category).join(&post.slug),
            &html,
        )
    }
}

/// Write `index.html` under `dir`, creating the directory as needed.
fn write_page(dir: &Path, html: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join("index.html");
    fs::write(&path, html)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use std::fs;

    fn setup_site(dir: &Path) {
        fs::write(
            dir.join("_config.yml"),
            r#"
title: Money Notes
categories:
  - id: "1"
    name: Stocks
    slug: stocks
    description: Market analysis
  - id: "2"
    name: Bitcoin
    slug: bitcoin
    description: Crypto trends
"#,
        )
        .unwrap();

        let posts_dir = dir.join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("etf.md"),
            "---\ntitle: ETF approval aftermath\nslug: etf-aftermath\ncategory: bitcoin\nexcerpt: What changed.\npublished_at: 2025-01-21T16:00:00Z\nread_time: 5\ntags:\n  - etf\n---\n\n# Aftermath\n\n- **Inflows**: growing\n- Liquidity: improving\n",
        )
        .unwrap();
    }

    #[test]
    fn test_generate_writes_all_pages() {
        let tmp = tempfile::tempdir().unwrap();
        setup_site(tmp.path());

        let blog = Blog::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        Generator::new(&blog).generate(&posts).unwrap();

        let public = tmp.path().join("public");
        assert!(public.join("index.html").exists());
        assert!(public.join("stocks/index.html").exists());
        assert!(public.join("bitcoin/index.html").exists());

        let post_html =
            fs::read_to_string(public.join("bitcoin/etf-aftermath/index.html")).unwrap();
        assert!(post_html.contains("<h1 class=\"text-3xl"));
        assert!(post_html.contains("<ul>"));
        assert!(post_html.contains("</ul>"));
        assert!(post_html.contains("ETF approval aftermath"));
    }

    #[test]
    fn test_unconfigured_category_still_generates() {
        let tmp = tempfile::tempdir().unwrap();
        setup_site(tmp.path());
        fs::write(
            tmp.path().join("source/_posts/other.md"),
            "---\ntitle: Misc\nslug: misc\ncategory: notes\n---\nbody",
        )
        .unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        Generator::new(&blog).generate(&posts).unwrap();

        assert!(tmp.path().join("public/notes/misc/index.html").exists());
    }
}
