//! # Jaarplan DB
//!
//! Document storage for the Jaarplan calendar.
//!
//! This crate provides Postgres pool initialization, embedded migrations, and
//! a [`DocumentStore`] over the `activities` and `weeks` collections. Without
//! a database the same store runs in memory.
//!
//! # Example
//!
//! ```ignore
//! use jaarplan_db::{DocumentStore, init_db_pool, migrate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jaarplan_db::StoreError> {
//!     let pool = init_db_pool(&database_url).await?;
//!     migrate(&pool).await?;
//!     let store = DocumentStore::postgres(pool);
//!     let snapshot = store.snapshot().await?;
//!     Ok(())
//! }
//! ```

pub mod store;

pub use sqlx::PgPool;
pub use store::{
    ACTIVITIES, CHANGE_CHANNEL, CalendarSnapshot, DecodedCollection, DocumentStore, StoreError,
    WEEKS,
};

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable; create it once at startup.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, StoreError> {
    Ok(PgPool::connect(database_url).await?)
}

/// Applies the embedded migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Connects, migrates, and wraps the pool in a store.
pub async fn connect(database_url: &str) -> Result<DocumentStore, StoreError> {
    let pool = init_db_pool(database_url).await?;
    migrate(&pool).await?;
    Ok(DocumentStore::postgres(pool))
}
