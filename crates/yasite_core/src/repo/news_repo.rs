//! News repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Latest-first listing is ordered by `published_at DESC, id DESC`.
//! - News rows are never updated after insert.

use crate::db::now_epoch_ms;
use crate::model::news::{NewNewsItem, NewsId, NewsItem};
use crate::repo::ensure_tables_ready;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NEWS_SELECT_SQL: &str = "SELECT id, title, text, published_at FROM news";

/// Repository interface for news items.
pub trait NewsRepository {
    fn create_news(&self, news: &NewNewsItem) -> RepoResult<NewsItem>;
    fn get_news(&self, id: NewsId) -> RepoResult<Option<NewsItem>>;
    /// Returns at most `limit` items, newest publication first.
    fn list_latest(&self, limit: u32) -> RepoResult<Vec<NewsItem>>;
    fn count_news(&self) -> RepoResult<u64>;
}

/// SQLite-backed news repository.
pub struct SqliteNewsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNewsRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, &["news"])?;
        Ok(Self { conn })
    }
}

impl NewsRepository for SqliteNewsRepository<'_> {
    fn create_news(&self, news: &NewNewsItem) -> RepoResult<NewsItem> {
        let published_at = news.published_at.unwrap_or_else(now_epoch_ms);
        self.conn.execute(
            "INSERT INTO news (title, text, published_at) VALUES (?1, ?2, ?3);",
            params![news.title.as_str(), news.text.as_str(), published_at],
        )?;
        Ok(NewsItem {
            id: self.conn.last_insert_rowid(),
            title: news.title.clone(),
            text: news.text.clone(),
            published_at,
        })
    }

    fn get_news(&self, id: NewsId) -> RepoResult<Option<NewsItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NEWS_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_news_row(row).map(Some),
            None => Ok(None),
        }
    }

    fn list_latest(&self, limit: u32) -> RepoResult<Vec<NewsItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NEWS_SELECT_SQL} ORDER BY published_at DESC, id DESC LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_news_row(row)?);
        }
        Ok(items)
    }

    fn count_news(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM news;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative news count {count}")))
    }
}

fn parse_news_row(row: &Row<'_>) -> RepoResult<NewsItem> {
    Ok(NewsItem {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        published_at: row.get("published_at")?,
    })
}
