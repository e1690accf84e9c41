//! SQLite-backed article store.
//!
//! One row per canonical URL, maintained with `INSERT … ON CONFLICT`
//! upserts so repeat crawls overwrite instead of duplicating.

use crate::article::Article;
use crate::sink::traits::{ArticleSink, SinkResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS articles (
    url TEXT PRIMARY KEY,
    headline TEXT NOT NULL,
    author TEXT NOT NULL,
    publication_date TEXT,
    body_text TEXT NOT NULL,
    source_site TEXT NOT NULL,
    first_seen_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_articles_source ON articles(source_site);
";

/// SQLite storage backend.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new(path: &Path) -> SinkResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub fn new_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Fetches a stored article by URL.
    pub fn get(&self, url: &str) -> SinkResult<Option<Article>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT url, headline, author, publication_date, body_text, source_site
             FROM articles WHERE url = ?1",
        )?;
        let article = stmt
            .query_row(params![url], |row| {
                Ok(Article {
                    url: row.get(0)?,
                    headline: row.get(1)?,
                    author: row.get(2)?,
                    publication_date: row.get(3)?,
                    body_text: row.get(4)?,
                    source_site: row.get(5)?,
                })
            })
            .optional()?;
        Ok(article)
    }

    pub fn count_total(&self) -> SinkResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Article counts per source, most populous first.
    pub fn counts_by_source(&self) -> SinkResult<Vec<(String, u64)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT source_site, COUNT(*) FROM articles
             GROUP BY source_site ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[async_trait]
impl ArticleSink for SqliteSink {
    async fn upsert(&self, article: &Article) -> SinkResult<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO articles
                 (url, headline, author, publication_date, body_text, source_site,
                  first_seen_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             ON CONFLICT(url) DO UPDATE SET
                 headline = excluded.headline,
                 author = excluded.author,
                 publication_date = excluded.publication_date,
                 body_text = excluded.body_text,
                 source_site = excluded.source_site,
                 updated_at = excluded.updated_at",
            params![
                article.url,
                article.headline,
                article.author,
                article.publication_date,
                article.body_text,
                article.source_site,
                now,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str, headline: &str) -> Article {
        Article {
            url: url.to_string(),
            headline: headline.to_string(),
            author: "Reporter".to_string(),
            publication_date: Some("2023-01-02T10:00:00+00:00".to_string()),
            body_text: "Body".to_string(),
            source_site: "NDTV".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let sink = SqliteSink::new_in_memory().unwrap();
        let a = article("https://example.com/a", "First");
        sink.upsert(&a).await.unwrap();
        assert_eq!(sink.get("https://example.com/a").unwrap(), Some(a));
        assert_eq!(sink.get("https://example.com/missing").unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_same_url_keeps_one_row_with_latest_values() {
        let sink = SqliteSink::new_in_memory().unwrap();
        sink.upsert(&article("https://example.com/a", "First"))
            .await
            .unwrap();
        sink.upsert(&article("https://example.com/a", "Updated"))
            .await
            .unwrap();

        assert_eq!(sink.count_total().unwrap(), 1);
        let stored = sink.get("https://example.com/a").unwrap().unwrap();
        assert_eq!(stored.headline, "Updated");
    }

    #[tokio::test]
    async fn test_null_publication_date_round_trips() {
        let sink = SqliteSink::new_in_memory().unwrap();
        let mut a = article("https://example.com/undated", "No Date");
        a.publication_date = None;
        sink.upsert(&a).await.unwrap();
        let stored = sink.get("https://example.com/undated").unwrap().unwrap();
        assert_eq!(stored.publication_date, None);
    }

    #[tokio::test]
    async fn test_counts_by_source() {
        let sink = SqliteSink::new_in_memory().unwrap();
        sink.upsert(&article("https://example.com/a", "A"))
            .await
            .unwrap();
        sink.upsert(&article("https://example.com/b", "B"))
            .await
            .unwrap();
        let mut c = article("https://example.com/c", "C");
        c.source_site = "The Hindu".to_string();
        sink.upsert(&c).await.unwrap();

        let counts = sink.counts_by_source().unwrap();
        assert_eq!(counts[0], ("NDTV".to_string(), 2));
        assert_eq!(counts[1], ("The Hindu".to_string(), 1));
    }
}
