//! finblog: a static site generator for a financial-education blog
//!
//! Posts are markdown-lite files under `source/_posts`; the generator
//! renders them into a category/post page tree under `public/`, and the
//! preview server adds the visitor-stats API the pages consume.

pub mod analytics;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod stats;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application: configuration plus directory layout.
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a blog instance from a base directory, reading `_config.yml`
    /// when present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Generate the static site.
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory.
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Path of the visitor-stats store file.
    pub fn stats_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.analytics.stats_file)
    }
}
