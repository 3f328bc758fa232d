//! Watch-channel registry backing `ProgressStore::subscribe`.
//!
//! One channel per (user, book), created lazily by whichever side shows up
//! first. Channels hold the latest published row, so a subscriber arriving
//! after a write still starts from current state instead of `None`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use uuid::Uuid;

use crate::models::progress::ReadingProgressRow;

type ChannelMap = HashMap<(Uuid, Uuid), watch::Sender<Option<ReadingProgressRow>>>;

#[derive(Clone, Default)]
pub struct ProgressNotifier {
    channels: Arc<Mutex<ChannelMap>>,
}

impl ProgressNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver for a (user, book) pair. The initial value is the latest
    /// published row, or `None` when nothing was published this process.
    pub fn subscribe(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> watch::Receiver<Option<ReadingProgressRow>> {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        channels
            .entry((user_id, book_id))
            .or_insert_with(|| watch::channel(None).0)
            .subscribe()
    }

    /// Pushes a new row to every subscriber of its (user, book) pair.
    pub fn publish(&self, progress: ReadingProgressRow) {
        let key = (progress.user_id, progress.book_id);
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        channels
            .entry(key)
            .or_insert_with(|| watch::channel(None).0)
            .send_replace(Some(progress));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_progress(user_id: Uuid, book_id: Uuid, current_page: i32) -> ReadingProgressRow {
        ReadingProgressRow {
            user_id,
            book_id,
            current_page,
            total_pages: 10,
            percentage: ((current_page + 1) as f64 / 10.0) * 100.0,
            last_read_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_observes_publish() {
        let notifier = ProgressNotifier::new();
        let user_id = Uuid::new_v4();
        let book_id = Uuid::new_v4();

        let mut rx = notifier.subscribe(user_id, book_id);
        assert!(rx.borrow().is_none(), "fresh channel should start empty");

        notifier.publish(make_progress(user_id, book_id, 3));
        rx.changed().await.expect("sender should still be alive");
        let seen = rx.borrow().clone().expect("published row visible");
        assert_eq!(seen.current_page, 3);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_latest_row() {
        let notifier = ProgressNotifier::new();
        let user_id = Uuid::new_v4();
        let book_id = Uuid::new_v4();

        notifier.publish(make_progress(user_id, book_id, 7));

        let rx = notifier.subscribe(user_id, book_id);
        let seen = rx.borrow().clone().expect("latest row visible at subscribe");
        assert_eq!(seen.current_page, 7);
    }

    #[tokio::test]
    async fn test_channels_are_isolated_per_book() {
        let notifier = ProgressNotifier::new();
        let user_id = Uuid::new_v4();
        let book_a = Uuid::new_v4();
        let book_b = Uuid::new_v4();

        let rx_a = notifier.subscribe(user_id, book_a);
        notifier.publish(make_progress(user_id, book_b, 5));

        assert!(
            rx_a.borrow().is_none(),
            "publish for book B must not reach book A subscribers"
        );
    }
}
