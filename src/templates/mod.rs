//! HTML page templates
//!
//! Pages are assembled from plain format strings. The site chrome is small
//! enough that a template engine would cost more than it saves; everything
//! dynamic flows through these builders. Post bodies arrive already
//! rendered by the markdown-lite pipeline and are injected as-is (trusted,
//! repository-bundled content); every other value is escaped.

use crate::config::SiteConfig;
use crate::content::{Category, Post};
use crate::helpers::{html_escape, strip_html, truncate, url_for};

/// Shared page shell: head, header nav with the category table, footer.
pub fn layout(config: &SiteConfig, title: &str, description: &str, body: &str) -> String {
    let nav: String = config
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"<a href="{}" class="nav-link">{}</a>"#,
                url_for(config, &c.path()),
                html_escape(&c.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="description" content="{description}">
  <title>{title}</title>
</head>
<body>
  <header class="site-header">
    <a href="{home}" class="site-title">{site_title}</a>
    <nav>
      {nav}
    </nav>
  </header>
  <main class="max-w-4xl mx-auto px-4 py-8">
{body}
  </main>
  <footer class="site-footer">
    <p>&copy; {site_title}</p>
  </footer>
</body>
</html>
"#,
        lang = html_escape(&config.language),
        description = html_escape(description),
        title = html_escape(title),
        home = url_for(config, ""),
        site_title = html_escape(&config.title),
        nav = nav,
        body = body,
    )
}

/// Home page: category cards plus the most recent posts.
pub fn index_page(config: &SiteConfig, recent: &[&Post]) -> String {
    let mut body = String::new();

    body.push_str("    <section class=\"categories grid md:grid-cols-2 gap-6\">\n");
    for category in &config.categories {
        body.push_str(&format!(
            r#"      <a href="{}" class="category-card">
        <h2>{}</h2>
        <p>{}</p>
      </a>
"#,
            url_for(config, &category.path()),
            html_escape(&category.name),
            html_escape(&category.description),
        ));
    }
    body.push_str("    </section>\n");

    body.push_str("    <section class=\"recent-posts\">\n      <h2>Recent posts</h2>\n");
    for post in recent {
        body.push_str(&post_card(config, post));
    }
    body.push_str("    </section>");

    layout(config, &config.title, &config.description, &body)
}

/// Category listing page.
pub fn category_page(config: &SiteConfig, category: &Category, posts: &[&Post]) -> String {
    let mut body = format!(
        "    <h1>{}</h1>\n    <p class=\"category-description\">{}</p>\n",
        html_escape(&category.name),
        html_escape(&category.description),
    );

    for post in posts {
        body.push_str(&post_card(config, post));
    }
    if posts.is_empty() {
        body.push_str("    <p class=\"empty\">No posts yet.</p>\n");
    }

    let title = format!("{} - {}", category.name, config.title);
    layout(config, &title, &category.description, &body)
}

/// Full post page: breadcrumb, header, rendered body, related posts.
pub fn post_page(
    config: &SiteConfig,
    category: &Category,
    post: &Post,
    related: &[&Post],
) -> String {
    let mut body = String::new();

    // Breadcrumb
    body.push_str(&format!(
        r#"    <nav class="breadcrumb text-sm text-gray-500">
      <a href="{home}">Home</a> / <a href="{cat}">{cat_name}</a> / <span>{title}</span>
    </nav>
"#,
        home = url_for(config, ""),
        cat = url_for(config, &category.path()),
        cat_name = html_escape(&category.name),
        title = html_escape(&post.title),
    ));

    // Header: badge, title, meta line, tags, excerpt callout
    body.push_str(&format!(
        "    <header>\n      <span class=\"category-badge\">{}</span>\n      <h1 class=\"text-4xl font-bold text-gray-900 mb-6\">{}</h1>\n",
        html_escape(&category.name),
        html_escape(&post.title),
    ));
    body.push_str(&format!(
        r#"      <div class="post-meta text-gray-600 text-sm">
        <span>{date}</span>
        <span>{read_time} min read</span>
        <span class="post-views" data-path="{path}"></span>
      </div>
"#,
        date = post.published_label(&config.date_format),
        read_time = post.read_time,
        path = html_escape(&post.path),
    ));
    if !post.tags.is_empty() {
        body.push_str("      <div class=\"post-tags\">\n");
        for tag in &post.tags {
            body.push_str(&format!(
                "        <span class=\"tag\">#{}</span>\n",
                html_escape(tag)
            ));
        }
        body.push_str("      </div>\n");
    }
    if !post.excerpt.is_empty() {
        body.push_str(&format!(
            "      <div class=\"excerpt bg-blue-50 border-l-4 border-blue-400 p-6\">\n        <p>{}</p>\n      </div>\n",
            html_escape(&post.excerpt)
        ));
    }
    body.push_str("    </header>\n");

    // Rendered body, injected without escaping
    body.push_str(&format!(
        "    <article class=\"prose prose-lg max-w-none\">\n      <div class=\"text-gray-800 leading-relaxed\">{}</div>\n    </article>\n",
        post.content
    ));

    // Related posts
    if !related.is_empty() {
        body.push_str("    <section class=\"related-posts\">\n      <h3>Related posts</h3>\n");
        for rel in related {
            body.push_str(&post_card(config, rel));
        }
        body.push_str("    </section>\n");
    }

    // Back link
    body.push_str(&format!(
        "    <p class=\"back-link\"><a href=\"{}\">Back to {}</a></p>",
        url_for(config, &category.path()),
        html_escape(&category.name),
    ));

    let title = format!("{} - {}", post.title, config.title);
    let description = if post.excerpt.is_empty() {
        truncate(&strip_html(&post.content), 160, None)
    } else {
        post.excerpt.clone()
    };

    layout(config, &title, &description, &body)
}

/// Summary card used on index, category, and related-post listings.
fn post_card(config: &SiteConfig, post: &Post) -> String {
    format!(
        r#"      <a href="{href}" class="post-card">
        <h3>{title}</h3>
        <p>{excerpt}</p>
        <div class="post-card-meta">{date} &middot; {read_time} min read</div>
      </a>
"#,
        href = url_for(config, &post.path),
        title = html_escape(&post.title),
        excerpt = html_escape(&post.excerpt),
        date = post.published_label(&config.date_format),
        read_time = post.read_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    fn test_config() -> SiteConfig {
        SiteConfig {
            categories: vec![Category::new("1", "Stocks", "stocks", "Market analysis")],
            ..Default::default()
        }
    }

    fn test_post() -> Post {
        let mut post = Post::new(
            "1".to_string(),
            "Samsung <Electronics> outlook".to_string(),
            "samsung-outlook".to_string(),
            "stocks".to_string(),
        );
        post.excerpt = "Where the memory cycle goes next.".to_string();
        post.content = r#"<h1 class="x">Outlook</h1><p class="y">Body</p>"#.to_string();
        post.read_time = 7;
        post.tags = vec!["semiconductors".to_string()];
        post
    }

    #[test]
    fn test_layout_escapes_title() {
        let config = test_config();
        let html = layout(&config, "<script>", "desc", "body");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<title><script>"));
    }

    #[test]
    fn test_index_lists_categories_and_recent() {
        let config = test_config();
        let post = test_post();
        let html = index_page(&config, &[&post]);
        assert!(html.contains("Market analysis"));
        assert!(html.contains("/stocks/"));
        assert!(html.contains("Samsung &lt;Electronics&gt; outlook"));
    }

    #[test]
    fn test_post_page_injects_rendered_body_unescaped() {
        let config = test_config();
        let post = test_post();
        let category = config.category("stocks").unwrap();
        let html = post_page(&config, category, &post, &[]);

        // The rendered body keeps its markup
        assert!(html.contains(r#"<h1 class="x">Outlook</h1>"#));
        // The title is escaped wherever it appears
        assert!(html.contains("Samsung &lt;Electronics&gt; outlook"));
        assert!(html.contains("7 min read"));
        assert!(html.contains("#semiconductors"));
        assert!(html.contains("Where the memory cycle goes next."));
    }

    #[test]
    fn test_post_page_lists_related() {
        let config = test_config();
        let post = test_post();
        let mut other = test_post();
        other.id = "2".to_string();
        other.title = "HBM demand".to_string();
        other.slug = "hbm-demand".to_string();
        other.path = "/stocks/hbm-demand/".to_string();

        let category = config.category("stocks").unwrap();
        let html = post_page(&config, category, &post, &[&other]);
        assert!(html.contains("Related posts"));
        assert!(html.contains("HBM demand"));
        assert!(html.contains("/stocks/hbm-demand/"));
    }

    #[test]
    fn test_category_page_empty_state() {
        let config = test_config();
        let category = config.category("stocks").unwrap();
        let html = category_page(&config, category, &[]);
        assert!(html.contains("No posts yet."));
    }
}
