use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

// User rows are created lazily on first profile write, so the per-user tables
// carry no FK to users. Book references cascade so a removed catalog row
// cleans up carts, libraries and progress with it.
const SCHEMA_DDL: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        cover_image TEXT NOT NULL,
        image_hint TEXT NOT NULL,
        genre TEXT NOT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        description TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        gutenberg_id INTEGER,
        text_key TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        auth_id TEXT,
        email TEXT,
        display_name TEXT,
        tier TEXT NOT NULL DEFAULT 'reader',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cart_items (
        user_id UUID NOT NULL,
        book_id UUID NOT NULL REFERENCES books(id) ON DELETE CASCADE,
        quantity INTEGER NOT NULL DEFAULT 1,
        added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, book_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS library_entries (
        user_id UUID NOT NULL,
        book_id UUID NOT NULL REFERENCES books(id) ON DELETE CASCADE,
        purchased_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, book_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reading_progress (
        user_id UUID NOT NULL,
        book_id UUID NOT NULL REFERENCES books(id) ON DELETE CASCADE,
        current_page INTEGER NOT NULL,
        total_pages INTEGER NOT NULL,
        percentage DOUBLE PRECISION NOT NULL,
        last_read_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, book_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        item_count INTEGER NOT NULL,
        subtotal DOUBLE PRECISION NOT NULL,
        tax DOUBLE PRECISION NOT NULL,
        total DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Runs idempotent DDL at startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database schema ensured");
    Ok(())
}

// (title, author, cover_image, image_hint, genre, rating, description, price,
// gutenberg_id)
type SeedBook = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
    f64,
    i32,
);

const SEED_BOOKS: [SeedBook; 12] = [
    (
        "Pride and Prejudice",
        "Jane Austen",
        "https://picsum.photos/seed/book1/300/450",
        "regency couple",
        "Romance",
        4.8,
        "A classic novel of manners, following the turbulent relationship between Elizabeth Bennet and Fitzwilliam Darcy.",
        12.99,
        1342,
    ),
    (
        "Frankenstein; Or, The Modern Prometheus",
        "Mary Wollstonecraft Shelley",
        "https://picsum.photos/seed/book2/300/450",
        "stormy castle",
        "Gothic",
        4.6,
        "The story of a young science student who creates a sapient creature in an unorthodox scientific experiment.",
        9.99,
        84,
    ),
    (
        "Alice's Adventures in Wonderland",
        "Lewis Carroll",
        "https://picsum.photos/seed/book3/300/450",
        "fantasy forest",
        "Fantasy",
        4.5,
        "A young girl named Alice falls through a rabbit hole into a fantasy world populated by peculiar, anthropomorphic creatures.",
        7.50,
        11,
    ),
    (
        "The Adventures of Sherlock Holmes",
        "Arthur Conan Doyle",
        "https://picsum.photos/seed/book4/300/450",
        "victorian street",
        "Mystery",
        4.7,
        "A collection of twelve short stories featuring the famous detective Sherlock Holmes.",
        10.00,
        1661,
    ),
    (
        "Moby Dick; Or, The Whale",
        "Herman Melville",
        "https://picsum.photos/seed/book5/300/450",
        "ocean storm",
        "Adventure",
        4.4,
        "The narrative of the sailor Ishmael's perilous voyage aboard the whaling ship Pequod, led by the monomaniacal Captain Ahab.",
        11.99,
        2701,
    ),
    (
        "A Tale of Two Cities",
        "Charles Dickens",
        "https://picsum.photos/seed/book6/300/450",
        "french revolution",
        "Historical",
        4.6,
        "A historical novel set in London and Paris before and during the French Revolution.",
        8.99,
        98,
    ),
    (
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        "https://picsum.photos/seed/book7/300/450",
        "roaring twenties",
        "Classic",
        4.7,
        "A novel about the American dream, set in the Jazz Age on Long Island.",
        14.00,
        64317,
    ),
    (
        "Adventures of Huckleberry Finn",
        "Mark Twain",
        "https://picsum.photos/seed/book8/300/450",
        "river raft",
        "Classic",
        4.8,
        "A novel about a young boy's adventures on the Mississippi River with a runaway slave.",
        10.50,
        76,
    ),
    (
        "The Jungle Book",
        "Rudyard Kipling",
        "https://picsum.photos/seed/indianbook1/300/450",
        "jungle animals",
        "Adventure",
        4.7,
        "A collection of stories about the adventures of a boy named Mowgli who is raised by wolves in the Indian jungle.",
        9.99,
        236,
    ),
    (
        "Gitanjali",
        "Rabindranath Tagore",
        "https://picsum.photos/seed/indianbook2/300/450",
        "spiritual poetry",
        "Poetry",
        4.9,
        "A collection of prose poems, for which Tagore was awarded the Nobel Prize in Literature.",
        15.00,
        7164,
    ),
    (
        "Kim",
        "Rudyard Kipling",
        "https://picsum.photos/seed/indianbook3/300/450",
        "indian boy",
        "Adventure",
        4.6,
        "An adventure novel about the orphan son of an Irish soldier who grows up in British India.",
        11.00,
        2226,
    ),
    (
        "The Home and the World",
        "Rabindranath Tagore",
        "https://picsum.photos/seed/indianbook4/300/450",
        "bengali couple",
        "Historical",
        4.5,
        "A novel exploring the complexities of tradition, modernity, and nationalism in early 20th-century Bengal.",
        12.50,
        7166,
    ),
];

/// Seeds the catalog with public-domain classics. Runs only when the books
/// table is empty so operator edits survive restarts.
pub async fn seed_catalog(pool: &PgPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for (title, author, cover_image, image_hint, genre, rating, description, price, gutenberg_id) in
        SEED_BOOKS
    {
        sqlx::query(
            r#"
            INSERT INTO books
                (id, title, author, cover_image, image_hint, genre, rating,
                 description, price, gutenberg_id, text_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NULL)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(author)
        .bind(cover_image)
        .bind(image_hint)
        .bind(genre)
        .bind(rating)
        .bind(description)
        .bind(price)
        .bind(gutenberg_id)
        .execute(pool)
        .await?;
    }

    info!("Seeded catalog with {} classics", SEED_BOOKS.len());
    Ok(())
}
