//! Ordered JSON document collections with change notification.
//!
//! Two collections exist: `activities` and `weeks`. Each is an ordered list of
//! JSON documents. Every committed write bumps a revision counter that
//! subscribers watch; with Postgres, writes made by other processes arrive
//! through `LISTEN jaarplan_documents` and bump it as well.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use jaarplan_models::activities::Activity;
use jaarplan_models::calendar::UndecodableDocument;
use jaarplan_models::weeks::WeekRow;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use sqlx::types::Json;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Collection holding activity documents.
pub const ACTIVITIES: &str = "activities";

/// Collection holding raw week rows.
pub const WEEKS: &str = "weeks";

/// Postgres channel announcing committed document changes.
pub const CHANGE_CHANNEL: &str = "jaarplan_documents";

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error in `{collection}`: {source}")]
    Serialization {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Both collections read at one revision.
#[derive(Debug, Clone, Default)]
pub struct CalendarSnapshot {
    pub activities: Vec<Activity>,
    pub weeks: Vec<WeekRow>,
    /// Documents of either collection that were skipped
    pub undecodable: Vec<UndecodableDocument>,
    pub revision: u64,
}

/// One collection decoded document by document.
#[derive(Debug, Clone)]
pub struct DecodedCollection<T> {
    pub documents: Vec<T>,
    pub undecodable: Vec<UndecodableDocument>,
}

impl<T: DeserializeOwned> DecodedCollection<T> {
    fn decode(collection: &str, bodies: Vec<Value>) -> Self {
        let mut documents = Vec::with_capacity(bodies.len());
        let mut undecodable = Vec::new();
        for (position, body) in bodies.into_iter().enumerate() {
            let id = document_id(&body);
            match serde_json::from_value(body) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    warn!(collection, position, id = ?id, error = %e, "Skipping undecodable document");
                    undecodable.push(UndecodableDocument {
                        collection: collection.to_string(),
                        position,
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Self {
            documents,
            undecodable,
        }
    }
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory(Arc<RwLock<HashMap<String, Vec<Value>>>>),
}

/// Handle to the document collections. Cheap to clone.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
    revision: Arc<watch::Sender<u64>>,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        };
        f.debug_struct("DocumentStore")
            .field("backend", &backend)
            .field("revision", &*self.revision.borrow())
            .finish()
    }
}

fn bump(revision: &watch::Sender<u64>) -> u64 {
    let mut next = 0;
    revision.send_modify(|current| {
        *current += 1;
        next = *current;
    });
    next
}

fn to_values<T: Serialize>(collection: &str, documents: &[T]) -> Result<Vec<Value>, StoreError> {
    documents
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(|source| StoreError::Serialization {
            collection: collection.to_string(),
            source,
        })
}

fn document_id(body: &Value) -> Option<String> {
    body.get("id").and_then(Value::as_str).map(str::to_owned)
}

async fn insert_rows(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    collection: &str,
    first_position: i64,
    bodies: Vec<Value>,
) -> Result<(), StoreError> {
    for (offset, body) in bodies.into_iter().enumerate() {
        sqlx::query(
            "INSERT INTO documents (collection, position, id, body) VALUES ($1, $2, $3, $4)",
        )
        .bind(collection)
        .bind(first_position + offset as i64)
        .bind(document_id(&body))
        .bind(Json(body))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

impl DocumentStore {
    pub fn postgres(pool: PgPool) -> Self {
        Self::with_backend(Backend::Postgres(pool))
    }

    /// Process-local store. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::Memory(Arc::default()))
    }

    fn with_backend(backend: Backend) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            backend,
            revision: Arc::new(revision),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Postgres(_))
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that observes every revision bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Documents of `collection` in stored order. Documents that fail to
    /// decode are skipped; see [`DocumentStore::read_decoded`].
    pub async fn read_collection<T>(&self, collection: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        Ok(self.read_decoded(collection).await?.documents)
    }

    /// Decodes every document of `collection` on its own, reporting the ones
    /// that fail instead of failing the read.
    #[instrument(skip(self))]
    pub async fn read_decoded<T>(&self, collection: &str) -> Result<DecodedCollection<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let bodies: Vec<Value> = match &self.backend {
            Backend::Postgres(pool) => sqlx::query_scalar::<_, Json<Value>>(
                "SELECT body FROM documents WHERE collection = $1 ORDER BY position",
            )
            .bind(collection)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|Json(body)| body)
            .collect(),
            Backend::Memory(collections) => collections
                .read()
                .await
                .get(collection)
                .cloned()
                .unwrap_or_default(),
        };

        Ok(DecodedCollection::decode(collection, bodies))
    }

    /// Replaces the whole collection atomically. Returns the new revision.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn replace_collection<T>(
        &self,
        collection: &str,
        documents: &[T],
    ) -> Result<u64, StoreError>
    where
        T: Serialize,
    {
        let bodies = to_values(collection, documents)?;
        match &self.backend {
            Backend::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                sqlx::query("DELETE FROM documents WHERE collection = $1")
                    .bind(collection)
                    .execute(&mut *tx)
                    .await?;
                insert_rows(&mut tx, collection, 0, bodies).await?;
                tx.commit().await?;
            }
            Backend::Memory(collections) => {
                collections
                    .write()
                    .await
                    .insert(collection.to_string(), bodies);
            }
        }

        let revision = bump(&self.revision);
        info!(collection, revision, "Collection replaced");
        Ok(revision)
    }

    /// Appends documents after the existing ones. Returns the new revision.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn append<T>(&self, collection: &str, documents: &[T]) -> Result<u64, StoreError>
    where
        T: Serialize,
    {
        let bodies = to_values(collection, documents)?;
        match &self.backend {
            Backend::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                let next: i64 = sqlx::query_scalar(
                    "SELECT COALESCE(MAX(position) + 1, 0) FROM documents WHERE collection = $1",
                )
                .bind(collection)
                .fetch_one(&mut *tx)
                .await?;
                insert_rows(&mut tx, collection, next, bodies).await?;
                tx.commit().await?;
            }
            Backend::Memory(collections) => {
                collections
                    .write()
                    .await
                    .entry(collection.to_string())
                    .or_default()
                    .extend(bodies);
            }
        }

        let revision = bump(&self.revision);
        info!(collection, revision, "Documents appended");
        Ok(revision)
    }

    /// Removes every document of `collection`. Returns the new revision.
    #[instrument(skip(self))]
    pub async fn clear(&self, collection: &str) -> Result<u64, StoreError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("DELETE FROM documents WHERE collection = $1")
                    .bind(collection)
                    .execute(pool)
                    .await?;
            }
            Backend::Memory(collections) => {
                collections.write().await.remove(collection);
            }
        }

        let revision = bump(&self.revision);
        info!(collection, revision, "Collection cleared");
        Ok(revision)
    }

    pub async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                let count: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                        .bind(collection)
                        .fetch_one(pool)
                        .await?;
                Ok(usize::try_from(count).unwrap_or_default())
            }
            Backend::Memory(collections) => Ok(collections
                .read()
                .await
                .get(collection)
                .map_or(0, Vec::len)),
        }
    }

    /// Reads activities and weeks. The revision is taken before reading, so a
    /// write racing the read always leaves a newer revision behind.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<CalendarSnapshot, StoreError> {
        let revision = self.revision();
        let activities = self.read_decoded::<Activity>(ACTIVITIES).await?;
        let weeks = self.read_decoded::<WeekRow>(WEEKS).await?;
        let mut undecodable = activities.undecodable;
        undecodable.extend(weeks.undecodable);
        debug!(
            revision,
            activities = activities.documents.len(),
            weeks = weeks.documents.len(),
            undecodable = undecodable.len(),
            "Snapshot read"
        );
        Ok(CalendarSnapshot {
            activities: activities.documents,
            weeks: weeks.documents,
            undecodable,
            revision,
        })
    }

    /// Forwards Postgres change notifications into the revision counter.
    /// Returns `None` for the in-memory backend.
    pub fn spawn_change_listener(&self) -> Option<JoinHandle<()>> {
        let Backend::Postgres(pool) = &self.backend else {
            return None;
        };
        let pool = pool.clone();
        let revision = Arc::clone(&self.revision);

        Some(tokio::spawn(async move {
            let mut listener = match PgListener::connect_with(&pool).await {
                Ok(listener) => listener,
                Err(e) => {
                    error!(error = %e, "Failed to connect change listener");
                    return;
                }
            };
            if let Err(e) = listener.listen(CHANGE_CHANNEL).await {
                error!(error = %e, channel = CHANGE_CHANNEL, "Failed to LISTEN");
                return;
            }
            info!(channel = CHANGE_CHANNEL, "Listening for document changes");

            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        let revision = bump(&revision);
                        debug!(operation = notification.payload(), revision, "Document change received");
                    }
                    Err(e) => {
                        // Notifications sent while disconnected are lost.
                        warn!(error = %e, "Change listener interrupted, reloading after reconnect");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        bump(&revision);
                    }
                }
            }
        }))
    }
}
