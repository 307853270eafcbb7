//! Persistence seam for generated paths and per-user progress documents.
//!
//! The engine core is pure; every load/save crosses this boundary. The
//! trait is the collaborator contract a real backend implements; the crate
//! itself ships only [`MemoryProgressStore`], which exists for tests,
//! examples, and single-process deployments.
//!
//! # Concurrency
//!
//! Two devices updating the same user's progress is a classic
//! read-modify-write hazard. Writes here use optimistic versioning: a save
//! carries the version the caller loaded, and the store rejects it with
//! [`ProgressError::ConcurrencyConflict`] if the stored document has moved
//! on. No cross-user coordination is ever needed: each (user, course)
//! document is independently owned.
//!
//! # Examples
//!
//! ```rust
//! use learnpath::progress::CourseProgress;
//! use learnpath::store::{MemoryProgressStore, ProgressStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryProgressStore::new();
//! let doc = CourseProgress::new("user-1", "course-1");
//! let saved = store.save(doc).await?;
//! assert_eq!(saved.version, 1);
//!
//! let loaded = store.load("user-1", &"course-1".into()).await?;
//! assert_eq!(loaded.unwrap().version, 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::engine::PathResponse;
use crate::progress::{CourseProgress, ProgressError};
use crate::types::CourseId;

/// JSON (de)serialization glue for persisted documents.
///
/// Backends that store documents as JSON text get the conversion in one
/// place instead of sprinkling `serde_json` calls through store code. The
/// blanket implementation covers every serde-capable document type.
pub trait JsonDocument: Sized {
    fn to_json_string(&self) -> Result<String, ProgressError>;
    fn from_json_str(s: &str) -> Result<Self, ProgressError>;
}

impl<T> JsonDocument for T
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    fn to_json_string(&self) -> Result<String, ProgressError> {
        serde_json::to_string(self).map_err(|e| ProgressError::Serde { source: e })
    }

    fn from_json_str(s: &str) -> Result<Self, ProgressError> {
        serde_json::from_str(s).map_err(|e| ProgressError::Serde { source: e })
    }
}

/// Storage contract for progress documents and generated paths.
///
/// Implementations own retries, transactions, and schema concerns; the
/// engine never retries and treats every error as terminal for the request.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Loads the progress document for a (user, course) pair, if any.
    async fn load(
        &self,
        user_id: &str,
        course_id: &CourseId,
    ) -> Result<Option<CourseProgress>, ProgressError>;

    /// Persists a document, enforcing optimistic versioning.
    ///
    /// The incoming document's `version` must equal the stored version (0
    /// for a first save). On success the returned document carries the
    /// bumped version the caller should hold for its next save.
    ///
    /// # Errors
    ///
    /// [`ProgressError::ConcurrencyConflict`] when the stored document has
    /// been updated since the caller loaded it.
    async fn save(&self, doc: CourseProgress) -> Result<CourseProgress, ProgressError>;

    /// Persists the most recent generated path for a user.
    async fn save_path(&self, user_id: &str, response: &PathResponse)
    -> Result<(), ProgressError>;

    /// Loads a user's most recent generated path, if any.
    async fn load_path(&self, user_id: &str) -> Result<Option<PathResponse>, ProgressError>;
}

type DocKey = (String, CourseId);

/// In-memory [`ProgressStore`] with optimistic versioning.
#[derive(Default)]
pub struct MemoryProgressStore {
    docs: RwLock<FxHashMap<DocKey, CourseProgress>>,
    paths: RwLock<FxHashMap<String, PathResponse>>,
}

impl MemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn load(
        &self,
        user_id: &str,
        course_id: &CourseId,
    ) -> Result<Option<CourseProgress>, ProgressError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(&(user_id.to_string(), course_id.clone()))
            .cloned())
    }

    async fn save(&self, mut doc: CourseProgress) -> Result<CourseProgress, ProgressError> {
        let key = (doc.user_id.clone(), doc.course_id.clone());
        let mut docs = self.docs.write().await;
        let current = docs.get(&key).map_or(0, |existing| existing.version);
        if doc.version != current {
            tracing::warn!(
                user = %doc.user_id,
                course = %doc.course_id,
                expected = doc.version,
                actual = current,
                "rejecting stale progress write"
            );
            return Err(ProgressError::ConcurrencyConflict {
                expected: doc.version,
                actual: current,
            });
        }
        doc.version += 1;
        docs.insert(key, doc.clone());
        Ok(doc)
    }

    async fn save_path(
        &self,
        user_id: &str,
        response: &PathResponse,
    ) -> Result<(), ProgressError> {
        let mut paths = self.paths.write().await;
        paths.insert(user_id.to_string(), response.clone());
        Ok(())
    }

    async fn load_path(&self, user_id: &str) -> Result<Option<PathResponse>, ProgressError> {
        let paths = self.paths.read().await;
        Ok(paths.get(user_id).cloned())
    }
}
