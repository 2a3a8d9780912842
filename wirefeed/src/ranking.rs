use crate::types::Article;
use tracing::debug;

/// Order articles newest first and keep at most `max_total`.
///
/// The sort is stable, so articles sharing a timestamp keep the order in
/// which they were collected. Anything past the cap is dropped.
pub fn rank_articles(mut articles: Vec<Article>, max_total: usize) -> Vec<Article> {
    articles.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));

    if articles.len() > max_total {
        debug!("Dropping {} articles past the cap of {}", articles.len() - max_total, max_total);
        articles.truncate(max_total);
    }

    articles
}
