//! Checkout flow against the cart and library store traits.
//!
//! Runs without a transaction across the two stores: `LibraryStore::add` is
//! idempotent and the cart is cleared last, so a crash mid-checkout leaves a
//! cart whose re-checkout converges instead of duplicating purchases.

use uuid::Uuid;

use crate::cart::totals::{compute_totals, CartTotals};
use crate::errors::AppError;
use crate::models::cart::CartLine;
use crate::store::{CartStore, LibraryStore};

pub struct CheckoutSummary {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Converts a non-empty cart into library ownership and clears it.
pub async fn perform_checkout(
    cart: &dyn CartStore,
    library: &dyn LibraryStore,
    user_id: Uuid,
) -> Result<CheckoutSummary, AppError> {
    // 1. Snapshot the cart; an empty one cannot be checked out.
    let items = cart.get(user_id).await?;
    if items.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Cannot check out an empty cart".to_string(),
        ));
    }

    // 2. Price the snapshot.
    let totals = compute_totals(&items);

    // 3. Grant ownership of every purchased title.
    for line in &items {
        library.add(user_id, line.book.id).await?;
    }

    // 4. Clear the cart only after every grant landed.
    cart.clear(user_id).await?;

    Ok(CheckoutSummary { items, totals })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::{BookQuery, BookRow};
    use crate::store::memory::{MemoryCartStore, MemoryLibraryStore};
    use chrono::Utc;

    fn make_book(title: &str, price: f64) -> BookRow {
        BookRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: "Author".to_string(),
            cover_image: "https://picsum.photos/300/450".to_string(),
            image_hint: "book cover".to_string(),
            genre: "Fiction".to_string(),
            rating: 4.0,
            description: "A test book.".to_string(),
            price,
            gutenberg_id: None,
            text_key: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_rejected() {
        let cart = MemoryCartStore::new(vec![]);
        let library = MemoryLibraryStore::new(vec![]);
        let result = perform_checkout(&cart, &library, Uuid::new_v4()).await;
        assert!(
            matches!(result, Err(AppError::UnprocessableEntity(_))),
            "empty cart should be unprocessable"
        );
    }

    #[tokio::test]
    async fn test_checkout_moves_items_into_library_and_clears_cart() {
        let books = vec![make_book("First", 5.0), make_book("Second", 7.0)];
        let ids: Vec<Uuid> = books.iter().map(|b| b.id).collect();
        let cart = MemoryCartStore::new(books.clone());
        let library = MemoryLibraryStore::new(books);
        let user_id = Uuid::new_v4();

        for id in &ids {
            cart.put(user_id, *id).await.expect("add to cart");
        }

        let summary = perform_checkout(&cart, &library, user_id)
            .await
            .expect("checkout succeeds");

        assert_eq!(summary.items.len(), 2);
        assert!((summary.totals.subtotal - 12.0).abs() < 1e-9);
        assert!((summary.totals.total - 12.0 * 1.08).abs() < 1e-9);

        for id in &ids {
            assert!(
                library.contains(user_id, *id).await.expect("contains"),
                "purchased book should be owned"
            );
        }
        assert!(
            cart.get(user_id).await.expect("get cart").is_empty(),
            "cart should be cleared after checkout"
        );
    }

    #[tokio::test]
    async fn test_checkout_is_idempotent_for_already_owned_books() {
        let books = vec![make_book("Owned", 3.0)];
        let book_id = books[0].id;
        let cart = MemoryCartStore::new(books.clone());
        let library = MemoryLibraryStore::new(books);
        let user_id = Uuid::new_v4();

        // Owned from a previous purchase; a stale cart still lists it.
        library.add(user_id, book_id).await.expect("pre-own");
        cart.put(user_id, book_id).await.expect("add to cart");

        perform_checkout(&cart, &library, user_id)
            .await
            .expect("checkout succeeds");

        let owned = library
            .list(user_id, &BookQuery::default())
            .await
            .expect("list library");
        assert_eq!(owned.len(), 1, "re-purchase must not duplicate ownership");
    }

    #[tokio::test]
    async fn test_checkout_does_not_touch_other_users() {
        let books = vec![make_book("Mine", 5.0)];
        let book_id = books[0].id;
        let cart = MemoryCartStore::new(books.clone());
        let library = MemoryLibraryStore::new(books);
        let buyer = Uuid::new_v4();
        let bystander = Uuid::new_v4();

        cart.put(buyer, book_id).await.expect("buyer cart");
        cart.put(bystander, book_id).await.expect("bystander cart");

        perform_checkout(&cart, &library, buyer)
            .await
            .expect("checkout succeeds");

        assert_eq!(
            cart.get(bystander).await.expect("bystander cart").len(),
            1,
            "another user's cart must survive"
        );
        assert!(
            !library
                .contains(bystander, book_id)
                .await
                .expect("contains"),
            "another user must not gain ownership"
        );
    }
}
