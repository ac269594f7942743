//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL under the configured root path.
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain.
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &str) -> SiteConfig {
        SiteConfig {
            root: root.to_string(),
            url: "https://blog.example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = config_with_root("/");
        assert_eq!(url_for(&config, "/stocks/abc/"), "/stocks/abc/");
        assert_eq!(url_for(&config, ""), "/");

        let config = config_with_root("/blog/");
        assert_eq!(url_for(&config, "/stocks/"), "/blog/stocks/");
    }

    #[test]
    fn test_full_url_for() {
        let config = config_with_root("/");
        assert_eq!(
            full_url_for(&config, "/bitcoin/etf/"),
            "https://blog.example.com/bitcoin/etf/"
        );
    }
}
