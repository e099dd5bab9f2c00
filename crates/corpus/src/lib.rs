pub mod article;
pub mod store;

pub use article::Article;
pub use store::ArticleStore;

use anyhow::Result;
use std::path::Path;

/// Load every record from `path`, keeping at most `limit` of them.
pub async fn load_articles(path: &Path, limit: Option<usize>) -> Result<Vec<Article>> {
    let mut articles = ArticleStore::load(path).await?;

    if let Some(limit) = limit {
        if articles.len() > limit {
            tracing::info!(
                total = articles.len(),
                limit,
                "Truncating collection to configured limit"
            );
            articles.truncate(limit);
        }
    }

    Ok(articles)
}

/// Write the whole collection to `path` in one go.
pub async fn save_articles(path: &Path, articles: &[Article]) -> Result<()> {
    ArticleStore::save(path, articles).await
}
