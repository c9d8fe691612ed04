use chrono::{SecondsFormat, Utc};
use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_url: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    pub image_url: String,
    pub description: String,
}

pub struct ImageStore<'a> {
    conn: &'a Connection,
}

impl<'a> ImageStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create_image(&self, input: CreateImage) -> Result<ImageRecord, StoreError> {
        if self.find_by_url(&input.image_url).await?.is_some() {
            return Err(StoreError::DuplicateUrl(input.image_url));
        }

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let query = r#"
            INSERT INTO images (image_url, description, created_at)
            VALUES (?, ?, ?)
            RETURNING image_url, description, created_at
        "#;

        let mut rows = match self
            .conn
            .query(
                query,
                libsql::params![
                    input.image_url.as_str(),
                    input.description.as_str(),
                    created_at
                ],
            )
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                // A concurrent create can slip past the lookup above; the
                // UNIQUE constraint decides the winner.
                if e.to_string().contains("UNIQUE constraint failed") {
                    return Err(StoreError::DuplicateUrl(input.image_url));
                }
                return Err(e.into());
            }
        };

        if let Some(row) = rows.next().await? {
            Self::row_to_record(&row)
        } else {
            Err(StoreError::Db(
                anyhow::anyhow!("insert returned no row").into(),
            ))
        }
    }

    pub async fn list_images(&self) -> Result<Vec<ImageRecord>, StoreError> {
        let query = r#"
            SELECT image_url, description, created_at
            FROM images
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut records = Vec::new();

        while let Some(row) = rows.next().await? {
            records.push(Self::row_to_record(&row)?);
        }

        Ok(records)
    }

    pub async fn find_by_url(&self, image_url: &str) -> Result<Option<ImageRecord>, StoreError> {
        let query = r#"
            SELECT image_url, description, created_at
            FROM images WHERE image_url = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![image_url]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_record(&row)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_record(row: &libsql::Row) -> Result<ImageRecord, StoreError> {
        Ok(ImageRecord {
            image_url: row.get(0)?,
            description: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use libsql::Builder;
    use std::collections::HashSet;

    async fn test_conn() -> Connection {
        let db = Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();
        conn.execute_batch(include_str!("migrations/001_images.sql"))
            .await
            .unwrap();
        conn
    }

    fn input(url: &str, description: &str) -> CreateImage {
        CreateImage {
            image_url: url.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_timestamp_within_execution_window() {
        let conn = test_conn().await;
        let store = ImageStore::new(&conn);

        let before = Utc::now();
        let record = store
            .create_image(input("http://x/a.png", "cat"))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(record.image_url, "http://x/a.png");
        assert_eq!(record.description, "cat");

        let created_at: DateTime<Utc> = record.created_at.parse().unwrap();
        // stored timestamps carry millisecond precision
        assert!(created_at >= before - Duration::milliseconds(1));
        assert!(created_at <= after);
    }

    #[tokio::test]
    async fn duplicate_url_is_rejected_regardless_of_description() {
        let conn = test_conn().await;
        let store = ImageStore::new(&conn);

        store
            .create_image(input("http://x/a.png", "cat"))
            .await
            .unwrap();

        let err = store
            .create_image(input("http://x/a.png", "dog"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUrl(url) if url == "http://x/a.png"));

        let existing = store.find_by_url("http://x/a.png").await.unwrap().unwrap();
        assert_eq!(existing.description, "cat");
    }

    #[tokio::test]
    async fn list_returns_exactly_the_created_set() {
        let conn = test_conn().await;
        let store = ImageStore::new(&conn);

        for (url, description) in [
            ("http://x/a.png", "cat"),
            ("http://x/b.png", "dog"),
            ("http://x/c.png", "bird"),
        ] {
            store.create_image(input(url, description)).await.unwrap();
        }

        let records = store.list_images().await.unwrap();
        let urls: HashSet<String> = records.into_iter().map(|r| r.image_url).collect();
        let expected: HashSet<String> = ["http://x/a.png", "http://x/b.png", "http://x/c.png"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(urls, expected);
    }

    #[tokio::test]
    async fn find_by_url_returns_stored_fields() {
        let conn = test_conn().await;
        let store = ImageStore::new(&conn);

        assert!(store.find_by_url("http://x/a.png").await.unwrap().is_none());

        let created = store
            .create_image(input("http://x/a.png", "cat"))
            .await
            .unwrap();

        let found = store.find_by_url("http://x/a.png").await.unwrap().unwrap();
        assert_eq!(found.description, "cat");
        assert_eq!(found.created_at, created.created_at);
    }
}
