//! Postgres-backed stores. These are the production implementations wired
//! into `AppState` at startup.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::book::{BookQuery, BookRow};
use crate::models::cart::CartLine;
use crate::models::progress::ReadingProgressRow;
use crate::store::notify::ProgressNotifier;
use crate::store::{CartStore, LibraryStore, ProgressStore};

pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    pub fn new(pool: PgPool) -> Self {
        PgCartStore { pool }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn get(&self, user_id: Uuid) -> Result<Vec<CartLine>, AppError> {
        Ok(sqlx::query_as::<_, CartLine>(
            r#"
            SELECT b.*, c.quantity, c.added_at
            FROM cart_items c
            JOIN books b ON b.id = c.book_id
            WHERE c.user_id = $1
            ORDER BY c.added_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn put(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, book_id, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, book_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cart_items WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn remove(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PgLibraryStore {
    pool: PgPool,
}

impl PgLibraryStore {
    pub fn new(pool: PgPool) -> Self {
        PgLibraryStore { pool }
    }
}

#[async_trait]
impl LibraryStore for PgLibraryStore {
    async fn add(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO library_entries (user_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, book_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM library_entries WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list(&self, user_id: Uuid, query: &BookQuery) -> Result<Vec<BookRow>, AppError> {
        // ORDER BY comes from the SortOption whitelist, never from raw input.
        let sql = format!(
            r#"
            SELECT b.*
            FROM library_entries l
            JOIN books b ON b.id = l.book_id
            WHERE l.user_id = $1
              AND ($2::text IS NULL OR b.title ILIKE '%' || $2 || '%' OR b.author ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR b.genre = $3)
            ORDER BY {}
            "#,
            query.sort.order_by_sql()
        );
        Ok(sqlx::query_as::<_, BookRow>(&sql)
            .bind(user_id)
            .bind(query.q.as_deref())
            .bind(query.genre.as_deref())
            .fetch_all(&self.pool)
            .await?)
    }
}

pub struct PgProgressStore {
    pool: PgPool,
    notifier: ProgressNotifier,
}

impl PgProgressStore {
    pub fn new(pool: PgPool, notifier: ProgressNotifier) -> Self {
        PgProgressStore { pool, notifier }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn get(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ReadingProgressRow>, AppError> {
        Ok(sqlx::query_as::<_, ReadingProgressRow>(
            "SELECT * FROM reading_progress WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn put(&self, progress: ReadingProgressRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO reading_progress
                (user_id, book_id, current_page, total_pages, percentage, last_read_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, book_id) DO UPDATE SET
                current_page = EXCLUDED.current_page,
                total_pages = EXCLUDED.total_pages,
                percentage = EXCLUDED.percentage,
                last_read_at = EXCLUDED.last_read_at
            "#,
        )
        .bind(progress.user_id)
        .bind(progress.book_id)
        .bind(progress.current_page)
        .bind(progress.total_pages)
        .bind(progress.percentage)
        .bind(progress.last_read_at)
        .execute(&self.pool)
        .await?;

        // Publish only after the row is durable.
        self.notifier.publish(progress);
        Ok(())
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<ReadingProgressRow>, AppError> {
        Ok(sqlx::query_as::<_, ReadingProgressRow>(
            "SELECT * FROM reading_progress WHERE user_id = $1 ORDER BY last_read_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    fn subscribe(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> watch::Receiver<Option<ReadingProgressRow>> {
        self.notifier.subscribe(user_id, book_id)
    }
}
