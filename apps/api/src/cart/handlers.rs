use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::cart::checkout::perform_checkout;
use crate::cart::totals::CartTotals;
use crate::errors::AppError;
use crate::models::book::BookRow;
use crate::models::cart::CartLine;
use crate::models::order::OrderRow;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

/// GET /api/v1/users/:user_id/cart
pub async fn handle_get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CartResponse>, AppError> {
    let items = state.cart.get(user_id).await?;
    let totals = crate::cart::totals::compute_totals(&items);
    Ok(Json(CartResponse { items, totals }))
}

/// POST /api/v1/users/:user_id/cart/:book_id
///
/// 409 ALREADY_IN_CART / ALREADY_OWNED rather than silently duplicating;
/// e-books are single-copy purchases.
pub async fn handle_add_to_cart(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let book: Option<BookRow> = sqlx::query_as("SELECT * FROM books WHERE id = $1")
        .bind(book_id)
        .fetch_optional(&state.db)
        .await?;
    if book.is_none() {
        return Err(AppError::NotFound(format!("Book {book_id} not found")));
    }

    if state.library.contains(user_id, book_id).await? {
        return Err(AppError::already_owned());
    }
    if state.cart.contains(user_id, book_id).await? {
        return Err(AppError::already_in_cart());
    }

    state.cart.put(user_id, book_id).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/users/:user_id/cart/:book_id
pub async fn handle_remove_from_cart(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let removed = state.cart.remove(user_id, book_id).await?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "Book {book_id} is not in the cart"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order: OrderRow,
    pub items: Vec<CartLine>,
}

/// POST /api/v1/users/:user_id/cart/checkout
pub async fn handle_checkout(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let summary = perform_checkout(state.cart.as_ref(), state.library.as_ref(), user_id).await?;

    // Order receipts are plain history rows; the source of truth for
    // ownership is the library.
    let order: OrderRow = sqlx::query_as(
        r#"
        INSERT INTO orders (id, user_id, item_count, subtotal, tax, total)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(summary.items.len() as i32)
    .bind(summary.totals.subtotal)
    .bind(summary.totals.tax)
    .bind(summary.totals.total)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Checkout complete for user {user_id}: {} items, total {:.2}",
        summary.items.len(),
        summary.totals.total
    );

    Ok(Json(CheckoutResponse {
        order,
        items: summary.items,
    }))
}
