//! Show visitor statistics

use anyhow::Result;

use crate::analytics::AnalyticsClient;
use crate::stats::{FileStore, VisitorTracker};
use crate::Blog;

/// Print visitor statistics: the remote analytics snapshot when an
/// endpoint is configured, otherwise the local counters.
pub async fn run(blog: &Blog) -> Result<()> {
    if let Some(endpoint) = &blog.config.analytics.endpoint {
        let view = AnalyticsClient::new(endpoint).fetch().await;
        if view.degraded {
            println!("(live data unavailable, showing placeholder numbers)");
        }
        println!("Current visitors: {}", view.snapshot.current_visitors);
        println!("Total visitors:   {}", view.snapshot.total_visitors);
        println!("Today visitors:   {}", view.snapshot.today_visitors);
        println!("Page views:       {}", view.snapshot.page_views);
        return Ok(());
    }

    let store = FileStore::open(blog.stats_path())?;
    let tracker = VisitorTracker::new(store);
    let stats = tracker.stats();
    println!("Total visitors: {}", stats.total_visitors);
    println!("Today visitors: {}", stats.today_visitors);
    println!("Page views:     {}", stats.page_views);

    Ok(())
}
