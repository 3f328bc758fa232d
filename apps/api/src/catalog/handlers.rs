use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::catalog::publish::{
    store_book, validate_book_file, validate_cover, validate_metadata, BookMetadata, UploadedFile,
};
use crate::errors::AppError;
use crate::models::book::{BookQuery, BookRow};
use crate::state::AppState;

/// GET /api/v1/books
pub async fn handle_list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<Json<Vec<BookRow>>, AppError> {
    // ORDER BY comes from the SortOption whitelist, never from raw input.
    let sql = format!(
        r#"
        SELECT b.*
        FROM books b
        WHERE ($1::text IS NULL OR b.title ILIKE '%' || $1 || '%' OR b.author ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR b.genre = $2)
        ORDER BY {}
        "#,
        query.sort.order_by_sql()
    );
    let books = sqlx::query_as::<_, BookRow>(&sql)
        .bind(query.q.as_deref())
        .bind(query.genre.as_deref())
        .fetch_all(&state.db)
        .await?;
    Ok(Json(books))
}

/// GET /api/v1/books/:book_id
pub async fn handle_get_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookRow>, AppError> {
    let book: BookRow = sqlx::query_as("SELECT * FROM books WHERE id = $1")
        .bind(book_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {book_id} not found")))?;
    Ok(Json(book))
}

/// GET /api/v1/books/genres
pub async fn handle_list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let genres: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT genre FROM books ORDER BY genre ASC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(genres))
}

/// POST /api/v1/books  (multipart/form-data)
///
/// Fields: `title`, `description`, `genre`, `price`, plus a `cover` image
/// and a `book` file (PDF, EPUB, or plain text). Unknown fields are ignored.
pub async fn handle_publish_book(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BookRow>), AppError> {
    let mut title = None;
    let mut description = None;
    let mut genre = None;
    let mut price = None;
    let mut cover = None;
    let mut book_file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text_field(field, "title").await?),
            "description" => description = Some(read_text_field(field, "description").await?),
            "genre" => genre = Some(read_text_field(field, "genre").await?),
            "price" => {
                let raw = read_text_field(field, "price").await?;
                let parsed = raw.trim().parse::<f64>().map_err(|_| {
                    AppError::Validation(format!("price must be a number, got '{raw}'"))
                })?;
                price = Some(parsed);
            }
            "cover" => cover = Some(read_file_field(field, "cover").await?),
            "book" => book_file = Some(read_file_field(field, "book").await?),
            _ => {}
        }
    }

    let metadata = BookMetadata {
        title: require_field(title, "title")?,
        description: require_field(description, "description")?,
        genre: require_field(genre, "genre")?,
        // Price is the one optional field; leaving it out lists the book
        // for free.
        price: price.unwrap_or(0.0),
    };
    let cover = require_field(cover, "cover")?;
    let book_file = require_field(book_file, "book")?;

    validate_metadata(&metadata)?;
    validate_cover(&cover)?;
    let book_kind = validate_book_file(&book_file)?;

    let row = store_book(&state, metadata, cover, book_file, book_kind).await?;
    tracing::info!("Published \"{}\" as {}", row.title, row.id);
    Ok((StatusCode::CREATED, Json(row)))
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))
}

async fn read_file_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<UploadedFile, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
    Ok(UploadedFile {
        filename,
        content_type,
        bytes,
    })
}

fn require_field<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing required field '{name}'")))
}
