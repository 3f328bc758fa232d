#![allow(dead_code)]

//! In-memory store implementations. These back the unit tests for checkout
//! and listing semantics; production wiring always uses the `pg` backends.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::book::{BookQuery, BookRow, SortOption};
use crate::models::cart::CartLine;
use crate::models::progress::ReadingProgressRow;
use crate::store::notify::ProgressNotifier;
use crate::store::{CartStore, LibraryStore, ProgressStore};

/// Applies the shared q/genre filter and whitelist sort to a set of books.
/// Matches the SQL semantics: `q` is a case-insensitive substring match on
/// title or author, `genre` is exact.
pub fn filter_and_sort(mut books: Vec<BookRow>, query: &BookQuery) -> Vec<BookRow> {
    if let Some(q) = query.q.as_deref() {
        let needle = q.to_lowercase();
        books.retain(|b| {
            b.title.to_lowercase().contains(&needle) || b.author.to_lowercase().contains(&needle)
        });
    }
    if let Some(genre) = query.genre.as_deref() {
        books.retain(|b| b.genre == genre);
    }
    match query.sort {
        SortOption::TitleAsc => books.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOption::TitleDesc => books.sort_by(|a, b| b.title.cmp(&a.title)),
        SortOption::AuthorAsc => books.sort_by(|a, b| a.author.cmp(&b.author)),
        SortOption::AuthorDesc => books.sort_by(|a, b| b.author.cmp(&a.author)),
    }
    books
}

pub struct MemoryCartStore {
    books: HashMap<Uuid, BookRow>,
    items: Mutex<Vec<(Uuid, CartLine)>>,
}

impl MemoryCartStore {
    /// `catalog` is the set of books cart lines may reference.
    pub fn new(catalog: Vec<BookRow>) -> Self {
        MemoryCartStore {
            books: catalog.into_iter().map(|b| (b.id, b)).collect(),
            items: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn get(&self, user_id: Uuid) -> Result<Vec<CartLine>, AppError> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, line)| line.clone())
            .collect())
    }

    async fn put(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError> {
        let book = self
            .books
            .get(&book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {book_id} not found")))?
            .clone();
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let exists = items
            .iter()
            .any(|(owner, line)| *owner == user_id && line.book.id == book_id);
        if !exists {
            items.push((
                user_id,
                CartLine {
                    book,
                    quantity: 1,
                    added_at: Utc::now(),
                },
            ));
        }
        Ok(())
    }

    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items
            .iter()
            .any(|(owner, line)| *owner == user_id && line.book.id == book_id))
    }

    async fn remove(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let before = items.len();
        items.retain(|(owner, line)| !(*owner == user_id && line.book.id == book_id));
        Ok(items.len() < before)
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.retain(|(owner, _)| *owner != user_id);
        Ok(())
    }
}

pub struct MemoryLibraryStore {
    books: HashMap<Uuid, BookRow>,
    owned: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl MemoryLibraryStore {
    pub fn new(catalog: Vec<BookRow>) -> Self {
        MemoryLibraryStore {
            books: catalog.into_iter().map(|b| (b.id, b)).collect(),
            owned: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn add(&self, user_id: Uuid, book_id: Uuid) -> Result<(), AppError> {
        let mut owned = self.owned.lock().unwrap_or_else(|e| e.into_inner());
        owned.insert((user_id, book_id));
        Ok(())
    }

    async fn contains(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, AppError> {
        let owned = self.owned.lock().unwrap_or_else(|e| e.into_inner());
        Ok(owned.contains(&(user_id, book_id)))
    }

    async fn list(&self, user_id: Uuid, query: &BookQuery) -> Result<Vec<BookRow>, AppError> {
        let owned = self.owned.lock().unwrap_or_else(|e| e.into_inner());
        let books: Vec<BookRow> = owned
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .filter_map(|(_, book_id)| self.books.get(book_id).cloned())
            .collect();
        Ok(filter_and_sort(books, query))
    }
}

#[derive(Default)]
pub struct MemoryProgressStore {
    rows: Mutex<HashMap<(Uuid, Uuid), ReadingProgressRow>>,
    notifier: ProgressNotifier,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn get(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ReadingProgressRow>, AppError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.get(&(user_id, book_id)).cloned())
    }

    async fn put(&self, progress: ReadingProgressRow) -> Result<(), AppError> {
        {
            let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            rows.insert((progress.user_id, progress.book_id), progress.clone());
        }
        self.notifier.publish(progress);
        Ok(())
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<ReadingProgressRow>, AppError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let mut list: Vec<ReadingProgressRow> = rows
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.last_read_at.cmp(&a.last_read_at));
        Ok(list)
    }

    fn subscribe(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> watch::Receiver<Option<ReadingProgressRow>> {
        self.notifier.subscribe(user_id, book_id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
