//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(blog);
    let posts = loader.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(blog).generate(&posts)?;

    tracing::info!(
        "Generated {} post pages and {} category pages in {:?}",
        posts.len(),
        blog.config.categories.len(),
        start.elapsed()
    );

    Ok(())
}
