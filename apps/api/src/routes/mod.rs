pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::cart::handlers as cart;
use crate::catalog::handlers as catalog;
use crate::library::handlers as library;
use crate::progress::handlers as progress;
use crate::reader::handlers as reader;
use crate::state::AppState;
use crate::users::handlers as users;

/// Publishing sends the book file (up to 50 MB) plus cover in one multipart
/// body; leave headroom for framing.
const MAX_UPLOAD_BYTES: usize = 60 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route(
            "/api/v1/books",
            get(catalog::handle_list_books)
                .post(catalog::handle_publish_book)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/books/genres", get(catalog::handle_list_genres))
        .route("/api/v1/books/:book_id", get(catalog::handle_get_book))
        // Reader
        .route("/api/v1/books/:book_id/pages", get(reader::handle_get_pages))
        // Cart and checkout
        .route("/api/v1/users/:user_id/cart", get(cart::handle_get_cart))
        .route(
            "/api/v1/users/:user_id/cart/checkout",
            post(cart::handle_checkout),
        )
        .route(
            "/api/v1/users/:user_id/cart/:book_id",
            post(cart::handle_add_to_cart).delete(cart::handle_remove_from_cart),
        )
        // Library
        .route(
            "/api/v1/users/:user_id/library",
            get(library::handle_list_library),
        )
        // Reading progress
        .route(
            "/api/v1/users/:user_id/progress",
            get(progress::handle_list_progress),
        )
        .route(
            "/api/v1/users/:user_id/progress/:book_id",
            get(progress::handle_get_progress).put(progress::handle_put_progress),
        )
        .route(
            "/api/v1/users/:user_id/progress/:book_id/events",
            get(progress::handle_progress_events),
        )
        // Profile and dashboard
        .route(
            "/api/v1/users/:user_id/profile",
            get(users::handle_get_profile).patch(users::handle_update_profile),
        )
        .route(
            "/api/v1/users/:user_id/dashboard",
            get(users::handle_get_dashboard),
        )
        // AI flows
        .route("/api/v1/ai/recommendations", post(ai::handle_recommendations))
        .route("/api/v1/ai/search", post(ai::handle_search))
        .with_state(state)
}
