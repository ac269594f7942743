//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new post skeleton under `source/_posts`.
pub fn run(blog: &Blog, title: &str, category: Option<&str>) -> Result<()> {
    let posts_dir = blog.source_dir.join("_posts");
    fs::create_dir_all(&posts_dir)?;

    let slug = slug::slugify(title);
    let file_path = posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("Post already exists: {:?}", file_path);
    }

    let category = category.unwrap_or(&blog.config.default_category);
    let now = chrono::Local::now();

    let content = format!(
        r#"---
title: {title}
slug: {slug}
category: {category}
excerpt: ""
published_at: {date}
read_time: 5
tags: []
---

# {title}
"#,
        title = title,
        slug = slug,
        category = category,
        date = now.to_rfc3339(),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);
    println!("Created {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_new_post_parses_back() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "Dividend growth picks", Some("stocks")).unwrap();

        let path = tmp
            .path()
            .join("source/_posts/dividend-growth-picks.md");
        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content);

        assert_eq!(fm.title.as_deref(), Some("Dividend growth picks"));
        assert_eq!(fm.slug.as_deref(), Some("dividend-growth-picks"));
        assert_eq!(fm.category.as_deref(), Some("stocks"));
        assert!(fm.parse_published_at().is_some());
        assert!(body.contains("# Dividend growth picks"));
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "Same title", None).unwrap();
        assert!(run(&blog, "Same title", None).is_err());
    }
}
