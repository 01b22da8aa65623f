use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Article;
use crate::domain::sorting::SortKey;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ArticleStorage;
use crate::storage::StorageError;

const ARTICLE_COLUMNS: &str = "id, title, slug, content, created_at, updated_at";

/// Repository for article operations
#[derive(Clone)]
pub struct ArticleRepository {
    db: DbConnection,
}

impl ArticleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_article(row: &SqliteRow) -> Result<Article, StorageError> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Article {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            content: row.try_get("content")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::MalformedRow(format!("invalid timestamp '{}': {}", value, e)))
}

/// Builds the ORDER BY list; insertion order breaks remaining ties.
fn order_by_clause(sort: &[SortKey]) -> String {
    let mut terms: Vec<String> = sort
        .iter()
        .map(|key| {
            format!(
                "{} COLLATE NOCASE {}",
                key.field.column(),
                key.direction.keyword()
            )
        })
        .collect();
    terms.push("rowid ASC".to_string());
    terms.join(", ")
}

fn map_write_error(err: sqlx::Error, slug: &str) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StorageError::DuplicateSlug(slug.to_string());
        }
    }
    StorageError::Database(err)
}

#[async_trait]
impl ArticleStorage for ArticleRepository {
    async fn store_article(&self, article: &Article) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, title, slug, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(article.created_at.to_rfc3339())
        .bind(article.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await
        .map_err(|e| map_write_error(e, &article.slug))?;
        Ok(())
    }

    async fn get_article(&self, article_id: &str) -> Result<Option<Article>, StorageError> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?", ARTICLE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(article_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_article).transpose()
    }

    async fn list_articles(&self, sort: &[SortKey]) -> Result<Vec<Article>, StorageError> {
        // Only whitelisted column names reach the ORDER BY clause.
        let sql = format!(
            "SELECT {} FROM articles ORDER BY {}",
            ARTICLE_COLUMNS,
            order_by_clause(sort)
        );
        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn update_article(&self, article: &Article) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = ?, slug = ?, content = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(article.updated_at.to_rfc3339())
        .bind(&article.id)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_write_error(e, &article.slug))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_article(&self, article_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(article_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn slug_exists(
        &self,
        slug: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        let row = match excluding_id {
            Some(article_id) => {
                sqlx::query("SELECT 1 FROM articles WHERE slug = ? AND id != ? LIMIT 1")
                    .bind(slug)
                    .bind(article_id)
                    .fetch_optional(self.db.pool())
                    .await?
            }
            None => {
                sqlx::query("SELECT 1 FROM articles WHERE slug = ? LIMIT 1")
                    .bind(slug)
                    .fetch_optional(self.db.pool())
                    .await?
            }
        };

        Ok(row.is_some())
    }
}
