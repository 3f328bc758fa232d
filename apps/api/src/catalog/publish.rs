//! Publish pipeline: validate metadata and files, store assets in object
//! storage, extract the readable text, insert the catalog row.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::catalog::extract::{extract_text, BookFileKind};
use crate::errors::AppError;
use crate::models::book::BookRow;
use crate::state::AppState;

pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_BOOK_BYTES: usize = 50 * 1024 * 1024;

const ALLOWED_COVER_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Metadata fields of a publish request, already parsed out of the
/// multipart body.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Field bounds match the storefront's upload form.
pub fn validate_metadata(metadata: &BookMetadata) -> Result<(), AppError> {
    let title_len = metadata.title.trim().chars().count();
    if !(2..=100).contains(&title_len) {
        return Err(AppError::Validation(
            "title must be between 2 and 100 characters".to_string(),
        ));
    }
    let description_len = metadata.description.trim().chars().count();
    if !(10..=1000).contains(&description_len) {
        return Err(AppError::Validation(
            "description must be between 10 and 1000 characters".to_string(),
        ));
    }
    let genre_len = metadata.genre.trim().chars().count();
    if !(2..=50).contains(&genre_len) {
        return Err(AppError::Validation(
            "genre must be between 2 and 50 characters".to_string(),
        ));
    }
    if !metadata.price.is_finite() || metadata.price < 0.0 {
        return Err(AppError::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_cover(cover: &UploadedFile) -> Result<(), AppError> {
    if !ALLOWED_COVER_TYPES.contains(&cover.content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "cover must be JPEG, PNG, or WebP, got '{}'",
            cover.content_type
        )));
    }
    if cover.bytes.len() > MAX_COVER_BYTES {
        return Err(AppError::Validation(
            "cover image exceeds the 5 MB limit".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_book_file(book: &UploadedFile) -> Result<BookFileKind, AppError> {
    if book.bytes.len() > MAX_BOOK_BYTES {
        return Err(AppError::Validation(
            "book file exceeds the 50 MB limit".to_string(),
        ));
    }
    BookFileKind::detect(&book.content_type, &book.filename).ok_or_else(|| {
        AppError::Validation(format!(
            "book file must be PDF, EPUB, or plain text, got '{}'",
            book.content_type
        ))
    })
}

/// Two lowercase keywords for stock cover-image search, taken from the title.
pub fn derive_image_hint(title: &str) -> String {
    title
        .split_whitespace()
        .take(2)
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stores assets and inserts the catalog row. The caller has already
/// validated everything.
pub async fn store_book(
    state: &AppState,
    metadata: BookMetadata,
    cover: UploadedFile,
    book_file: UploadedFile,
    book_kind: BookFileKind,
) -> Result<BookRow, AppError> {
    let book_id = Uuid::new_v4();
    let bucket = &state.config.s3_bucket;

    // 1. Extract the readable text; an upload nothing can be read from is
    //    rejected here, not discovered by the first reader.
    let file_bytes = book_file.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(book_kind, &file_bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        })??;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No readable text could be extracted from the book file".to_string(),
        ));
    }

    // 2. Upload the cover.
    let cover_key = format!("covers/{book_id}.{}", cover_extension(&cover.content_type));
    state
        .s3
        .put_object()
        .bucket(bucket)
        .key(&cover_key)
        .body(ByteStream::from(cover.bytes.to_vec()))
        .content_type(&cover.content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Cover upload failed: {e}")))?;

    // 3. Upload the original book file.
    let upload_key = format!("uploads/{book_id}/{}", sanitize_filename(&book_file.filename));
    state
        .s3
        .put_object()
        .bucket(bucket)
        .key(&upload_key)
        .body(ByteStream::from(book_file.bytes.to_vec()))
        .content_type(&book_file.content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Book file upload failed: {e}")))?;

    // 4. Upload the extracted text the reader will serve.
    let text_key = format!("texts/{book_id}.txt");
    state
        .s3
        .put_object()
        .bucket(bucket)
        .key(&text_key)
        .body(ByteStream::from(text.into_bytes()))
        .content_type("text/plain; charset=utf-8")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Extracted text upload failed: {e}")))?;

    info!("Stored book assets for {book_id} under s3://{bucket}");

    // 5. Insert the catalog row. New uploads start unrated.
    let cover_image = public_object_url(&state.config.s3_endpoint, bucket, &cover_key);
    let row: BookRow = sqlx::query_as(
        r#"
        INSERT INTO books
            (id, title, author, cover_image, image_hint, genre, rating,
             description, price, gutenberg_id, text_key)
        VALUES ($1, $2, $3, $4, $5, $6, 0.0, $7, $8, NULL, $9)
        RETURNING *
        "#,
    )
    .bind(book_id)
    .bind(metadata.title.trim())
    .bind("Independent Author")
    .bind(&cover_image)
    .bind(derive_image_hint(metadata.title.trim()))
    .bind(metadata.genre.trim())
    .bind(metadata.description.trim())
    .bind(metadata.price)
    .bind(&text_key)
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}

fn cover_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Keeps object keys flat and ASCII-safe.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn public_object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
